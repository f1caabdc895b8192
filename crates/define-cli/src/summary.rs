use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::GenerateResult;

pub fn print_summary(result: &GenerateResult) {
    println!("Study: {}", result.study_name);
    println!("Define-XML: {}", result.output_path.display());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Element"), header_cell("Count")]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for (family, count) in &result.entity_counts {
        table.add_row(vec![family_cell(family), count_cell(*count)]);
    }
    println!("{table}");

    if !result.skipped_sections.is_empty() {
        println!("Skipped sections: {}", result.skipped_sections.join(", "));
    }
    if let Some(validation) = &result.validation {
        if validation.passed {
            println!("Schema validation: passed");
        } else {
            eprintln!("Schema validation: FAILED");
            for message in &validation.messages {
                eprintln!("- {message}");
            }
        }
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn family_cell(family: &str) -> Cell {
    Cell::new(family).fg(Color::Blue)
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        Cell::new(count).fg(Color::DarkGrey)
    } else {
        Cell::new(count).add_attribute(Attribute::Bold)
    }
}
