pub mod auth;
pub mod tabular_summary;
pub mod trend_forecast;
