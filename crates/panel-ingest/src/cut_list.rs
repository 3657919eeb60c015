//! CSV cut lists: one header row, one part per following row.

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};
use crate::extract::{detect_delimiter, normalize_cell, raw_part_from_row};
use crate::raw::RawPart;

#[derive(Debug, Clone, Default)]
pub struct CutList {
    pub headers: Vec<String>,
    pub parts: Vec<RawPart>,
}

impl CutList {
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    normalize_cell(raw)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read a cut list file. The delimiter is sniffed from the first line.
pub fn read_cut_list(path: &Path) -> Result<CutList> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cut_list = parse_cut_list(&text).map_err(|error| match error {
        IngestError::Parse(source) => IngestError::Csv {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    tracing::debug!(
        path = %path.display(),
        parts = cut_list.len(),
        columns = cut_list.headers.len(),
        "read cut list"
    );
    Ok(cut_list)
}

/// Parse cut list text. The first non-empty row is the header row.
pub fn parse_cut_list(text: &str) -> Result<CutList> {
    let first_line = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(detect_delimiter(first_line))
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut parts = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        match &headers {
            None => headers = Some(record.iter().map(normalize_header).collect()),
            Some(headers) => parts.push(raw_part_from_row(headers, &row)),
        }
    }
    Ok(CutList {
        headers: headers.unwrap_or_default(),
        parts,
    })
}
