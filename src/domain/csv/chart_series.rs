// ============================================================
// CHART SERIES
// ============================================================
// Two numeric columns paired up for plotting

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Labels (x) and values (y) taken from the first two numeric columns.
///
/// Missing cells are NaN and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<f64>,
    pub values: Vec<f64>,
    pub x_label: String,
    pub y_label: String,
}

/// Chart payload of an upload response: a series, or `{}` when the
/// dataset has fewer than two numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Series(ChartSeries),
    Empty,
}

impl ChartData {
    pub fn series(&self) -> Option<&ChartSeries> {
        match self {
            ChartData::Series(series) => Some(series),
            ChartData::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ChartData::Empty)
    }
}

impl Serialize for ChartData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ChartData::Series(series) => series.serialize(serializer),
            ChartData::Empty => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chart_is_empty_object() {
        let json = serde_json::to_value(ChartData::Empty).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_series_serializes_flat() {
        let chart = ChartData::Series(ChartSeries {
            labels: vec![1.0, f64::NAN],
            values: vec![2.0, 3.0],
            x_label: "x".to_string(),
            y_label: "y".to_string(),
        });

        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["x_label"], "x");
        assert_eq!(json["labels"][0], 1.0);
        assert!(json["labels"][1].is_null());
    }
}
