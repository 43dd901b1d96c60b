// ============================================================
// UPLOAD SUMMARY
// ============================================================
// Response shape of the tabular summarizer

use serde::Serialize;

use super::{ChartData, ColumnDescriptions};

/// Column metadata and per-column statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub columns: Vec<String>,

    /// (rows, columns)
    pub shape: (usize, usize),

    pub description: ColumnDescriptions,
}

/// Result of summarizing one uploaded file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadSummary {
    pub summary: DatasetSummary,
    pub chart_data: ChartData,
}
