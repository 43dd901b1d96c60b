// ============================================================
// TABULAR SUMMARY USE CASE
// ============================================================
// Orchestrate CSV parsing, column statistics, and chart extraction

use std::time::Instant;

use tracing::{debug, info};

use crate::domain::csv::{
    ChartData, ChartSeries, DatasetSummary, ParserConfig, TabularDataset, UploadSummary,
};
use crate::domain::error::Result;
use crate::infrastructure::csv::{ColumnProfiler, CsvParser};

/// Turns uploaded tabular bytes into a summary and chart series
pub struct TabularSummaryUseCase {
    parser: CsvParser,
    profiler: ColumnProfiler,
}

impl TabularSummaryUseCase {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            parser: CsvParser::from_config(config),
            profiler: ColumnProfiler::new(),
        }
    }

    /// Summarize one upload. The file name is checked by the caller.
    pub fn execute(&self, raw: &[u8]) -> Result<UploadSummary> {
        let start = Instant::now();

        let dataset = self
            .parser
            .parse_bytes(raw)
            .map_err(|e| e.context("Error processing file"))?;

        let description = self.profiler.describe(&dataset);
        let chart_data = build_chart(&dataset);
        let (rows, columns) = dataset.shape();

        info!(
            rows,
            columns,
            numeric_columns = description.len(),
            has_chart = !chart_data.is_empty(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Summarized tabular upload"
        );

        Ok(UploadSummary {
            summary: DatasetSummary {
                columns: dataset.column_names(),
                shape: dataset.shape(),
                description,
            },
            chart_data,
        })
    }
}

impl Default for TabularSummaryUseCase {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

/// First numeric column as labels, second as values
fn build_chart(dataset: &TabularDataset) -> ChartData {
    let mut numeric = dataset.numeric_columns();

    match (numeric.next(), numeric.next()) {
        (Some(x), Some(y)) => {
            debug!(x = %x.name, y = %y.name, "Building chart series");
            ChartData::Series(ChartSeries {
                labels: x.numeric_values().unwrap_or_default(),
                values: y.numeric_values().unwrap_or_default(),
                x_label: x.name.clone(),
                y_label: y.name.clone(),
            })
        }
        _ => ChartData::Empty,
    }
}
