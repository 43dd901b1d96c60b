// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types for tabular ingestion and summaries
// No I/O, no async

mod chart_series;
mod column_summary;
mod dataset;
mod parser_config;
mod summary;

pub use chart_series::{ChartData, ChartSeries};
pub use column_summary::{ColumnDescriptions, ColumnSummary};
pub use dataset::{CellValue, Column, TabularDataset};
pub use parser_config::{DelimiterMode, ParserConfig};
pub use summary::{DatasetSummary, UploadSummary};
