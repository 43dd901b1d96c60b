// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV decoding, parsing and column statistics

mod column_profiler;
mod csv_parser;

pub use column_profiler::ColumnProfiler;
pub use csv_parser::CsvParser;
