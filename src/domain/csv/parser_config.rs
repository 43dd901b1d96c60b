// ============================================================
// PARSER CONFIGURATION
// ============================================================
// How uploaded bytes are split into fields

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Field delimiter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelimiterMode {
    Fixed(u8),
    /// Score the common delimiters on the first lines and keep the best
    Auto,
}

impl Default for DelimiterMode {
    fn default() -> Self {
        DelimiterMode::Fixed(b',')
    }
}

impl FromStr for DelimiterMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "auto" => Ok(DelimiterMode::Auto),
            "tab" | "\\t" | "\t" => Ok(DelimiterMode::Fixed(b'\t')),
            "," | ";" | "|" => Ok(DelimiterMode::Fixed(value.as_bytes()[0])),
            other => Err(format!(
                "unsupported csv delimiter '{}' (expected ',', ';', '|', 'tab' or 'auto')",
                other
            )),
        }
    }
}

/// Configuration for tabular parsing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    pub delimiter: DelimiterMode,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: DelimiterMode) -> Self {
        self.delimiter = delimiter;
        self
    }
}
