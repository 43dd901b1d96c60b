// ============================================================
// COLUMN SUMMARY
// ============================================================
// Descriptive statistics for one numeric column

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Descriptive statistics of a numeric column.
///
/// Statistics that are undefined for the observed values (every field
/// except `count` on an all-missing column, `std` with fewer than two
/// values) are `None` and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Number of non-missing values
    pub count: usize,

    pub mean: Option<f64>,

    /// Sample standard deviation (n - 1 denominator)
    pub std: Option<f64>,

    pub min: Option<f64>,

    #[serde(rename = "25%")]
    pub p25: Option<f64>,

    #[serde(rename = "50%")]
    pub p50: Option<f64>,

    #[serde(rename = "75%")]
    pub p75: Option<f64>,

    pub max: Option<f64>,
}

impl ColumnSummary {
    /// Summary of a column without any observed value
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: None,
            std: None,
            min: None,
            p25: None,
            p50: None,
            p75: None,
            max: None,
        }
    }
}

/// Column name to summary, in dataset column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnDescriptions(Vec<(String, ColumnSummary)>);

impl ColumnDescriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: String, summary: ColumnSummary) {
        self.0.push((name, summary));
    }

    pub fn get(&self, name: &str) -> Option<&ColumnSummary> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ColumnDescriptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, summary) in &self.0 {
            map.serialize_entry(name, summary)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_keys_and_null_stats() {
        let mut summary = ColumnSummary::empty();
        summary.count = 1;
        summary.p50 = Some(4.0);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["50%"], 4.0);
        assert!(json["std"].is_null());
    }

    #[test]
    fn test_descriptions_keep_column_order() {
        let mut descriptions = ColumnDescriptions::new();
        descriptions.push("zeta".to_string(), ColumnSummary::empty());
        descriptions.push("alpha".to_string(), ColumnSummary::empty());

        let json = serde_json::to_string(&descriptions).unwrap();
        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());
        assert_eq!(descriptions.names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }
}
