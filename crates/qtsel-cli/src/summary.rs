use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use qtsel_metadata::module_name;
use qtsel_model::format_raw_size;
use qtsel_state::{CompositeState, ElementMap, SelectableElement};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Versions, one row per minor release.
pub fn versions_table(state: &CompositeState) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Release"), header_cell("Versions")]);
    apply_table_style(&mut table);
    for group in state.version().groups().iter().rev() {
        let Some(first) = group.first() else {
            continue;
        };
        let versions: Vec<String> = group.iter().rev().map(ToString::to_string).collect();
        table.add_row(vec![
            Cell::new(format!("{}.{}", first.major, first.minor))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(versions.join("  ")),
        ]);
    }
    table
}

/// A single column of names.
pub fn names_table(title: &str, names: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(title)]);
    apply_table_style(&mut table);
    for name in names {
        table.add_row(vec![name.as_str()]);
    }
    table
}

/// Modules with their short name, display name and download size.
pub fn modules_table(modules: &ElementMap) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Module"),
        header_cell("Package"),
        header_cell("Name"),
        header_cell("Size"),
    ]);
    apply_table_style(&mut table);
    for (name, element) in modules {
        let display = element
            .package()
            .map(|package| package.display_name.as_str())
            .unwrap_or_default();
        table.add_row(vec![
            selected_cell(module_name(name), element.is_selected()),
            dim_cell(name),
            Cell::new(display),
            size_cell(element),
        ]);
    }
    align_column(&mut table, 3, CellAlignment::Right);
    table
}

/// Archives and their sizes.
pub fn archives_table(archives: &ElementMap) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Archive"), header_cell("Size")]);
    apply_table_style(&mut table);
    for (name, element) in archives {
        table.add_row(vec![
            selected_cell(name, element.is_selected()),
            size_cell(element),
        ]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

/// Variants of one tool.
pub fn variants_table(variants: &ElementMap) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variant"),
        header_cell("Version"),
        header_cell("Name"),
        header_cell("Size"),
    ]);
    apply_table_style(&mut table);
    for (name, element) in variants {
        let (version, display) = element
            .package()
            .map(|package| (package.version.as_str(), package.display_name.as_str()))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(name),
            dim_cell(version),
            Cell::new(display),
            size_cell(element),
        ]);
    }
    align_column(&mut table, 3, CellAlignment::Right);
    table
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

fn selected_cell(label: &str, selected: bool) -> Cell {
    if selected {
        Cell::new(label).fg(Color::Green)
    } else {
        Cell::new(label)
    }
}

fn size_cell(element: &SelectableElement) -> Cell {
    match element.size() {
        Some(size) => Cell::new(format_raw_size(&size)),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
