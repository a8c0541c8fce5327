use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::PredictResult;

pub fn print_summary(result: &PredictResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Records: {}", path.display()),
        None => println!("Records: stdout"),
    }
    if !result.failed_strategies.is_empty() {
        println!(
            "Parsed with `{}` after {} failed",
            result.strategy,
            result.failed_strategies.join(", ")
        );
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Scored"),
        header_cell("Failed"),
        header_cell("Dropped"),
        header_cell("Truncated"),
        header_cell("Strategy"),
    ]);
    apply_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.records.len()),
        count_cell(result.scored(), Color::Green),
        count_cell(result.failed(), Color::Red),
        count_cell(result.dropped_invalid, Color::Yellow),
        Cell::new(if result.truncated { "yes" } else { "no" }),
        Cell::new(result.strategy),
    ]);
    println!("{table}");

    let failures: Vec<_> = result
        .records
        .iter()
        .filter(|record| !record.is_ok())
        .collect();
    if failures.is_empty() {
        return;
    }
    eprintln!("Row errors:");
    for record in failures.iter().take(10) {
        let message = record.error.as_deref().unwrap_or("unknown error");
        eprintln!("- {}: {message}", record.id);
    }
    if failures.len() > 10 {
        eprintln!("- ... and {} more", failures.len() - 10);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
