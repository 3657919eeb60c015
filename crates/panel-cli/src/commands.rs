use std::time::Instant;

use anyhow::{Context, Result, bail};
use panel_cli::{CutListReport, DialectDump, PartReport, load_dialect};
use panel_codec::{decode_any, split_overrides};
use panel_ingest::{extract_raw_fields, read_cut_list};
use panel_model::PartDimensions;
use panel_normalize::{NormalizeOptions, normalize_part};
use tracing::{info, info_span};

use crate::cli::{CutListArgs, DecodeArgs, DialectArgs, NormalizeArgs, NormalizeFlags};
use crate::summary::{print_cut_list, print_decoded, print_part};

fn options_from_flags(flags: &NormalizeFlags) -> NormalizeOptions {
    NormalizeOptions::new()
        .natural_language(!flags.no_heuristics)
        .validate(!flags.no_validate)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}

/// Returns whether the part needs review.
pub fn run_normalize(args: &NormalizeArgs) -> Result<bool> {
    let dialect = load_dialect(args.flags.dialect.as_deref())?;
    let options = options_from_flags(&args.flags);

    let mut raw = extract_raw_fields(&args.text, None);
    if let (Some(length), Some(width)) = (args.length, args.width) {
        raw.dimensions = Some(PartDimensions::new(length, width));
    }
    let dimensions = raw.dimensions;
    let part = normalize_part(&raw, &dialect, &options);
    let report = PartReport::new(part, dimensions.as_ref(), &dialect);

    if args.flags.json {
        print_json(&report)?;
    } else {
        print_part(&report);
    }
    Ok(report.needs_review())
}

/// Returns whether any part needs review.
pub fn run_cut_list(args: &CutListArgs) -> Result<bool> {
    let span = info_span!("cut_list", path = %args.path.display());
    let _guard = span.enter();
    let started = Instant::now();

    let dialect = load_dialect(args.flags.dialect.as_deref())?;
    let options = options_from_flags(&args.flags);
    let cut_list = read_cut_list(&args.path)
        .with_context(|| format!("read cut list {}", args.path.display()))?;
    info!(parts = cut_list.len(), "cut list loaded");

    let parts = cut_list
        .parts
        .iter()
        .map(|raw| {
            let part = normalize_part(raw, &dialect, &options);
            PartReport::new(part, raw.dimensions.as_ref(), &dialect)
        })
        .collect();
    let report = CutListReport::new(parts);
    info!(
        parts = report.parts.len(),
        review = report.review_count(),
        elapsed_ms = started.elapsed().as_millis(),
        "cut list normalized"
    );

    if args.flags.json {
        print_json(&report)?;
    } else {
        print_cut_list(&report);
    }
    Ok(report.review_count() > 0)
}

pub fn run_decode(args: &DecodeArgs) -> Result<()> {
    let Some(decoded) = decode_any(&args.code) else {
        bail!("`{}` is not a code of any service family", args.code);
    };
    let (_, overrides) = split_overrides(&args.code);
    print_decoded(&decoded, &overrides)
}

pub fn run_dialect(args: &DialectArgs) -> Result<()> {
    let dialect = load_dialect(args.dialect.as_deref())?;
    print_json(&DialectDump::new(&dialect))
}
