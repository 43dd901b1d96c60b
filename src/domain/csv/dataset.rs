// ============================================================
// TABULAR DATASET
// ============================================================
// In-memory table built from one upload, dropped after the response

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::error::{AppError, Result};

/// Tokens read as a missing value rather than text.
const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single parsed cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Missing,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Classify a raw field. Surrounding whitespace is ignored for
    /// missing/number detection but kept for text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if MISSING_TOKENS.contains(&trimmed) {
            return CellValue::Missing;
        }

        match trimmed.parse::<f64>() {
            Ok(number) => CellValue::Number(number),
            Err(_) => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, CellValue::Text(_))
    }
}

/// A named column of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// A column is numeric when it has rows and none of them hold text.
    pub fn is_numeric(&self) -> bool {
        !self.cells.is_empty() && !self.cells.iter().any(CellValue::is_text)
    }

    /// Numeric view of the column with missing cells as NaN.
    ///
    /// Returns `None` for non-numeric columns.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        if !self.is_numeric() {
            return None;
        }

        Some(
            self.cells
                .iter()
                .map(|cell| match cell {
                    CellValue::Number(value) => *value,
                    _ => f64::NAN,
                })
                .collect(),
        )
    }
}

/// Ordered, equally sized columns with unique names
#[derive(Debug, Clone, PartialEq)]
pub struct TabularDataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl TabularDataset {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(|c| c.cells.len()).unwrap_or(0);

        let mut seen = HashSet::new();
        for column in &columns {
            if column.cells.len() != row_count {
                return Err(AppError::ParseError(format!(
                    "Column '{}' has {} values, expected {}",
                    column.name,
                    column.cells.len(),
                    row_count
                )));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(AppError::ParseError(format!(
                    "Duplicate column name '{}'",
                    column.name
                )));
            }
        }

        Ok(Self { columns, row_count })
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.columns.len())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Numeric columns in their original order
    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_numeric())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::Number(*v)).collect()
    }

    #[test]
    fn test_cell_classification() {
        assert_eq!(CellValue::parse(" 42 "), CellValue::Number(42.0));
        assert_eq!(CellValue::parse("-1.5e2"), CellValue::Number(-150.0));
        assert_eq!(CellValue::parse(""), CellValue::Missing);
        assert_eq!(CellValue::parse("NA"), CellValue::Missing);
        assert_eq!(CellValue::parse(" n/a "), CellValue::Missing);
        assert_eq!(CellValue::parse("Alice"), CellValue::Text("Alice".to_string()));
    }

    #[test]
    fn test_numeric_column_tolerates_missing() {
        let column = Column::new(
            "price",
            vec![CellValue::Number(1.0), CellValue::Missing, CellValue::Number(3.0)],
        );
        assert!(column.is_numeric());

        let values = column.numeric_values().unwrap();
        assert_eq!(values[0], 1.0);
        assert!(values[1].is_nan());
    }

    #[test]
    fn test_text_makes_column_non_numeric() {
        let column = Column::new(
            "mixed",
            vec![CellValue::Number(1.0), CellValue::Text("x".to_string())],
        );
        assert!(!column.is_numeric());
        assert!(column.numeric_values().is_none());
    }

    #[test]
    fn test_empty_column_is_not_numeric() {
        assert!(!Column::new("empty", Vec::new()).is_numeric());
    }

    #[test]
    fn test_dataset_rejects_ragged_columns() {
        let result = TabularDataset::new(vec![
            Column::new("a", numbers(&[1.0, 2.0])),
            Column::new("b", numbers(&[1.0])),
        ]);
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }

    #[test]
    fn test_dataset_rejects_duplicate_names() {
        let result = TabularDataset::new(vec![
            Column::new("a", numbers(&[1.0])),
            Column::new("a", numbers(&[2.0])),
        ]);
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }

    #[test]
    fn test_shape_and_numeric_order() {
        let dataset = TabularDataset::new(vec![
            Column::new("name", vec![CellValue::Text("a".into()), CellValue::Text("b".into())]),
            Column::new("y", numbers(&[1.0, 2.0])),
            Column::new("x", numbers(&[3.0, 4.0])),
        ])
        .unwrap();

        assert_eq!(dataset.shape(), (2, 3));
        let numeric: Vec<_> = dataset.numeric_columns().map(|c| c.name.as_str()).collect();
        assert_eq!(numeric, vec!["y", "x"]);
    }
}
