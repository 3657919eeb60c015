//! Split raw input into per-family [`RawFields`](crate::raw::RawFields).

use csv::ReaderBuilder;
use panel_codec::{detect_family, parse_mm};
use panel_model::{PartDimensions, ParamValue, ServiceFamily};

use crate::classify::{HeaderRole, classify_header, keyword_families};
use crate::raw::{RawPart, is_blank_marker};

const SEGMENT_SEPARATORS: &[char] = &[',', ';', '|', '\n', '\r'];

/// Extract raw service fields from one line of input.
///
/// Without headers the text is free-form notation (`2L2W, GL-4-10, 2 hinges`).
/// With headers it is one delimited row of a cut list, and every cell is
/// routed by its header.
pub fn extract_raw_fields(text: &str, headers: Option<&[String]>) -> RawPart {
    match headers {
        Some(headers) => {
            let cells = split_delimited(text);
            raw_part_from_row(headers, &cells)
        }
        None => {
            let mut part = RawPart::default();
            extract_text_into(&mut part, text);
            part
        }
    }
}

/// Pick the delimiter of a delimited line: tab, then comma, then semicolon.
pub fn detect_delimiter(line: &str) -> u8 {
    if line.contains('\t') {
        b'\t'
    } else if line.contains(',') {
        b','
    } else if line.contains(';') {
        b';'
    } else {
        b','
    }
}

/// Split one delimited line into trimmed cells, honouring quotes.
pub fn split_delimited(line: &str) -> Vec<String> {
    let delimiter = detect_delimiter(line);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(line.as_bytes());
    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(normalize_cell).collect(),
        Some(Err(error)) => {
            tracing::warn!(%error, "malformed delimited line, splitting without quotes");
            line.split(char::from(delimiter)).map(normalize_cell).collect()
        }
        None => Vec::new(),
    }
}

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Build a raw part from a row of cells and its headers.
///
/// Missing trailing cells count as blank. Blank family cells are still
/// recorded: a blank column is information for the normalizer.
pub fn raw_part_from_row(headers: &[String], cells: &[String]) -> RawPart {
    let mut part = RawPart::default();
    let mut length = None;
    let mut width = None;
    let mut thickness = None;

    for (index, header) in headers.iter().enumerate() {
        let cell = cells.get(index).map_or("", String::as_str);
        match classify_header(header) {
            HeaderRole::Length => length = parse_mm(cell),
            HeaderRole::Width => width = parse_mm(cell),
            HeaderRole::Thickness => thickness = parse_mm(cell),
            HeaderRole::Label => {
                if !cell.is_empty() {
                    part.label = Some(cell.to_string());
                }
            }
            HeaderRole::Notes => extract_text_into(&mut part, cell),
            HeaderRole::Family(family) => {
                part.push_column(family, header.clone(), ParamValue::from(cell));
            }
            HeaderRole::Unmapped => {
                part.unmapped.insert(header.clone(), ParamValue::from(cell));
            }
        }
    }

    part.dimensions = match (length, width) {
        (Some(length), Some(width)) => {
            let dimensions = PartDimensions::new(length, width);
            Some(match thickness {
                Some(thickness) => dimensions.with_thickness(thickness),
                None => dimensions,
            })
        }
        _ => None,
    };
    part
}

fn segments(text: &str) -> Vec<&str> {
    text.split(SEGMENT_SEPARATORS)
        .flat_map(|segment| segment.split(" + "))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Route free text into the families of `part`.
///
/// A segment made only of codes is split token by token. Any other segment
/// stays one phrase and goes to every family that its keywords or embedded
/// codes point at, or to all families when nothing does.
fn extract_text_into(part: &mut RawPart, text: &str) {
    let segments = segments(text);
    if segments.is_empty() {
        return;
    }
    if segments.iter().all(|segment| is_blank_marker(segment)) {
        // An explicit "nothing" still reaches every family.
        for family in ServiceFamily::ALL {
            part.push_token(family, segments[0]);
        }
        return;
    }

    for segment in segments {
        if is_blank_marker(segment) {
            continue;
        }
        let tokens: Vec<&str> = segment.split_whitespace().collect();
        let families: Vec<Option<ServiceFamily>> =
            tokens.iter().map(|token| detect_family(token)).collect();

        if families.iter().all(Option::is_some) {
            for (token, family) in tokens.iter().zip(families.into_iter().flatten()) {
                part.push_token(family, *token);
            }
            continue;
        }

        let mut targets = keyword_families(segment);
        for family in families.into_iter().flatten() {
            if !targets.contains(&family) {
                targets.push(family);
            }
        }
        if targets.is_empty() {
            targets = ServiceFamily::ALL.to_vec();
        }
        tracing::trace!(segment, ?targets, "routing phrase");
        for family in targets {
            part.push_token(family, segment);
        }
    }
}
