pub mod use_cases;

pub use use_cases::auth::AuthUseCase;
pub use use_cases::tabular_summary::TabularSummaryUseCase;
pub use use_cases::trend_forecast::{ForecastRequest, TrendForecastUseCase};
