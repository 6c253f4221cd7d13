use crate::utils::error::Result;
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// Values of `column` from CSV data with a header row.
///
/// Rows too short to have the column are skipped; an unknown column yields
/// no values.
pub fn parse_csv_column(data: &[u8], column: &str) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(data);

    let Some(index) = reader.headers()?.iter().position(|h| h == column) else {
        tracing::warn!("⚠️ Column '{}' not found in CSV header", column);
        return Ok(Vec::new());
    };

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(value) = record.get(index) {
            values.push(value.to_string());
        }
    }
    Ok(values)
}

pub fn read_csv_column<P: AsRef<Path>>(path: P, column: &str) -> Result<Vec<String>> {
    let data = std::fs::read(path)?;
    parse_csv_column(&data, column)
}

/// Drops blanks and repeats, keeping first occurrence order.
pub fn unique_domains(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(v.clone()))
        .collect()
}
