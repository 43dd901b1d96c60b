// ============================================================
// COLUMN PROFILER
// ============================================================
// Descriptive statistics over numeric columns

use crate::domain::csv::{ColumnDescriptions, ColumnSummary, TabularDataset};

/// Computes count/mean/std/min/quartiles/max for numeric columns
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnProfiler;

impl ColumnProfiler {
    pub fn new() -> Self {
        Self
    }

    /// Summaries for every numeric column, in column order
    pub fn describe(&self, dataset: &TabularDataset) -> ColumnDescriptions {
        let mut descriptions = ColumnDescriptions::new();

        for column in dataset.columns() {
            if let Some(values) = column.numeric_values() {
                descriptions.push(column.name.clone(), self.summarize(&values));
            }
        }

        descriptions
    }

    /// Summarize one column. NaN entries count as missing.
    pub fn summarize(&self, values: &[f64]) -> ColumnSummary {
        let mut observed: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if observed.is_empty() {
            return ColumnSummary::empty();
        }

        observed.sort_by(|a, b| a.total_cmp(b));

        let count = observed.len();
        let n = count as f64;
        let mean = observed.iter().sum::<f64>() / n;

        let std = if count > 1 {
            let squared = observed.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
            Some((squared / (n - 1.0)).sqrt())
        } else {
            None
        };

        ColumnSummary {
            count,
            mean: Some(mean),
            std,
            min: observed.first().copied(),
            p25: Some(percentile(&observed, 0.25)),
            p50: Some(percentile(&observed, 0.50)),
            p75: Some(percentile(&observed, 0.75)),
            max: observed.last().copied(),
        }
    }
}

/// Linear interpolation between closest ranks. `sorted` must be non-empty.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
