use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use panel_cli::{CutListReport, PartReport};
use panel_codec::{Decoded, Overrides};
use panel_format::{NONE_MARKER, ServiceStats};
use panel_model::ServiceFamily;

pub fn print_part(report: &PartReport) {
    if let Some(label) = &report.label {
        println!("Part: {label}");
    }
    println!("{}", report.summary);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Family"), header_cell("Codes")]);
    apply_table_style(&mut table);
    let codes = &report.codes;
    let rows = [
        (ServiceFamily::EdgeBand, codes.edgeband.clone()),
        (ServiceFamily::Groove, codes.grooves.join(", ")),
        (ServiceFamily::Drilling, codes.holes.join(", ")),
        (ServiceFamily::Cnc, codes.cnc.join(", ")),
    ];
    for (family, value) in rows {
        table.add_row(vec![family_cell(family), code_cell(value)]);
    }
    println!("{table}");
    println!("{}", report.description);

    if !report.trace.is_empty() {
        let mut trace = Table::new();
        trace.set_header(vec![
            header_cell("Family"),
            header_cell("Input"),
            header_cell("Strategy"),
        ]);
        apply_table_style(&mut trace);
        for resolution in &report.trace {
            trace.add_row(vec![
                family_cell(resolution.family),
                Cell::new(&resolution.input),
                dim_cell(&resolution.strategy),
            ]);
        }
        println!();
        println!("Resolved:");
        println!("{trace}");
    }
    print_review(report);
}

fn print_review(report: &PartReport) {
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    for input in &report.unresolved {
        eprintln!("unresolved: {input}");
    }
}

pub fn print_cut_list(report: &CutListReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Part"),
        header_cell("Edge band"),
        header_cell("Grooves"),
        header_cell("Holes"),
        header_cell("CNC"),
        header_cell("Warnings"),
        header_cell("Unresolved"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    align_column(&mut table, 7, CellAlignment::Right);

    for (index, part) in report.parts.iter().enumerate() {
        let codes = &part.codes;
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(part.label.as_deref().unwrap_or(NONE_MARKER)),
            code_cell(codes.edgeband.clone()),
            code_cell(codes.grooves.join(", ")),
            code_cell(codes.holes.join(", ")),
            code_cell(codes.cnc.join(", ")),
            count_cell(part.warnings.len(), Color::Yellow),
            count_cell(part.unresolved.len(), Color::Red),
        ]);
    }
    println!("{table}");
    print_totals(&report.totals);

    for (index, part) in report.parts.iter().enumerate() {
        if !part.needs_review() {
            continue;
        }
        let label = part.label.as_deref().unwrap_or(NONE_MARKER);
        for warning in &part.warnings {
            eprintln!("row {} ({label}) warning: {warning}", index + 1);
        }
        for input in &part.unresolved {
            eprintln!("row {} ({label}) unresolved: {input}", index + 1);
        }
    }
}

fn print_totals(totals: &ServiceStats) {
    let length = |value: Option<f64>| match value {
        Some(mm) => format!("{:.1} m", mm / 1000.0),
        None => NONE_MARKER.to_string(),
    };
    let mut table = Table::new();
    table.set_header(vec![header_cell("Total"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Edge band length"),
        Cell::new(length(totals.edgeband_length_mm)),
    ]);
    table.add_row(vec![Cell::new("Banded edges"), Cell::new(totals.edge_count)]);
    table.add_row(vec![Cell::new("Grooves"), Cell::new(totals.groove_count)]);
    table.add_row(vec![
        Cell::new("Groove length"),
        Cell::new(length(totals.groove_length_mm)),
    ]);
    table.add_row(vec![Cell::new("Hole patterns"), Cell::new(totals.hole_pattern_count)]);
    table.add_row(vec![Cell::new("Holes"), Cell::new(totals.hole_count)]);
    table.add_row(vec![Cell::new("CNC operations"), Cell::new(totals.cnc_count)]);
    println!("{table}");
}

pub fn print_decoded(decoded: &Decoded, overrides: &Overrides) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Family"), family_cell(decoded.family())]);
    table.add_row(vec![Cell::new("Canonical"), code_cell(decoded.encode())]);
    if !overrides.is_empty() {
        table.add_row(vec![Cell::new("Overrides"), Cell::new(overrides.to_suffix())]);
    }
    let value = serde_json::to_string_pretty(decoded).context("serialize decoded code")?;
    table.add_row(vec![Cell::new("Value"), Cell::new(value)]);
    println!("{table}");
    Ok(())
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn family_cell(family: ServiceFamily) -> Cell {
    Cell::new(family.short_label())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn code_cell(value: String) -> Cell {
    if value.is_empty() || value == NONE_MARKER {
        dim_cell(NONE_MARKER)
    } else {
        Cell::new(value)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
