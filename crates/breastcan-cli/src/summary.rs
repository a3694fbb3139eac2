use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use breastcan_standards::MutationTherapyTable;

pub fn print_mutation_table(table: &MutationTherapyTable) {
    println!("{}", mutation_table(table));
}

/// One row per mutation: identifier, preferred therapy, fallbacks, notes.
pub fn mutation_table(therapies: &MutationTherapyTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Mutation"),
        header_cell("Preferred"),
        header_cell("Fallbacks"),
        header_cell("Eligibility notes"),
    ]);
    apply_table_style(&mut table);
    for entry in therapies.iter() {
        let fallbacks = if entry.fallback_therapies.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(entry.fallback_therapies.join(", "))
        };
        table.add_row(vec![
            Cell::new(&entry.mutation)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&entry.preferred_therapy),
            fallbacks,
            Cell::new(&entry.eligibility_notes),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ]);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
