use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::MapRunResult;

pub fn print_summary(result: &MapRunResult) {
    println!("Schema: {}", result.reference);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Records"),
        header_cell("Extensions"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    let extensions = if result.extension_scopes.is_empty() {
        "-".to_string()
    } else {
        result.extension_scopes.join(", ")
    };
    let output = match &result.output {
        Some(path) => Cell::new(path.display()).fg(Color::Green),
        None => Cell::new("dry run").fg(Color::DarkGrey),
    };
    table.add_row(vec![Cell::new(result.records), Cell::new(extensions), output]);
    println!("{table}");
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
