// ============================================================
// CSV PARSER
// ============================================================
// Decode uploaded bytes and split them into a tabular dataset

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::UTF_8;
use std::borrow::Cow;
use std::collections::HashSet;

use crate::domain::csv::{CellValue, Column, DelimiterMode, ParserConfig, TabularDataset};
use crate::domain::error::{AppError, Result};

/// CSV parser producing column-oriented datasets
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    delimiter: DelimiterMode,
}

impl CsvParser {
    /// Create a comma-delimited parser
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self {
            delimiter: config.delimiter,
        }
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: DelimiterMode) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse raw upload bytes. Input must be UTF-8; a leading BOM is dropped.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<TabularDataset> {
        let content = Self::decode(bytes)?;
        self.parse_content(&content)
    }

    /// Parse CSV content with a header row.
    ///
    /// Every record must have exactly as many fields as the header.
    pub fn parse_content(&self, content: &str) -> Result<TabularDataset> {
        if content.trim().is_empty() {
            return Err(AppError::ParseError(
                "No columns to parse from file".to_string(),
            ));
        }

        let delimiter = match self.delimiter {
            DelimiterMode::Fixed(delimiter) => delimiter,
            DelimiterMode::Auto => Self::detect_delimiter(content),
        };

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let names = unique_column_names(&headers);
        let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); names.len()];

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            for (column, field) in cells.iter_mut().zip(record.iter()) {
                column.push(CellValue::parse(field));
            }
        }

        let columns = names
            .into_iter()
            .zip(cells)
            .map(|(name, cells)| Column::new(name, cells))
            .collect();

        TabularDataset::new(columns)
    }

    fn decode(bytes: &[u8]) -> Result<Cow<'_, str>> {
        let (content, had_errors) = UTF_8.decode_with_bom_removal(bytes);
        if had_errors {
            return Err(AppError::ParseError(
                "File is not valid UTF-8 text".to_string(),
            ));
        }
        Ok(content)
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<&str> = content.lines().take(10).collect();

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        if sample_lines.is_empty() {
            return best_delimiter;
        }

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            // Score by frequency, penalised by spread across lines
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

/// Header names made unique: blanks become `Unnamed: {index}` and repeats
/// get `.1`, `.2`, ... suffixes.
fn unique_column_names(headers: &StringRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(headers.len());

    for (index, header) in headers.iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", index)
        } else {
            header.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(candidate.clone());
        names.push(candidate);
    }

    names
}
