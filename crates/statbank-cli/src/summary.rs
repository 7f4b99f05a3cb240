use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use statbank_model::{Codelist, Finding, Severity, Subtable, TableDescription, ValidationReport};

use crate::commands::display_path;
use crate::types::{PayloadResult, WrittenFiles};

pub fn print_description(description: &TableDescription) {
    println!("Table: {} {}", description.table_id, description.table_name);
    println!("Retrieved: {}", description.retrieved_at.format("%d.%m.%Y %H:%M"));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Subtable"),
        header_cell("#"),
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Codelist / format / decimals"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for subtable in &description.subtables {
        let mut first = true;
        for number in 1..=subtable.expected_column_count {
            let name = if first {
                Cell::new(&subtable.file_name)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold)
            } else {
                dim_cell("")
            };
            first = false;
            let (kind, detail) = column_kind(description, subtable, number);
            table.add_row(vec![
                name,
                Cell::new(number),
                Cell::new(subtable.variables.column_name(number).unwrap_or("-")),
                Cell::new(kind),
                Cell::new(detail),
            ]);
        }
    }
    println!("{table}");

    let mut codelists = Table::new();
    codelists.set_header(vec![
        header_cell("Codelist"),
        header_cell("Codes"),
        header_cell("Total code"),
    ]);
    apply_table_style(&mut codelists);
    align_column(&mut codelists, 1, CellAlignment::Right);
    for (id, codelist) in &description.codelists {
        codelists.add_row(vec![
            Cell::new(id),
            Cell::new(codelist.len()),
            codelist
                .total_code
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{codelists}");

    if !description.suppression_markers.is_empty() {
        let markers: Vec<String> = description
            .suppression_markers
            .iter()
            .map(|m| format!("{} ({})", m.code, m.shown_as))
            .collect();
        println!("Suppression markers: {}", markers.join(", "));
    }
}

fn column_kind(
    description: &TableDescription,
    subtable: &Subtable,
    number: usize,
) -> (&'static str, String) {
    let variables = &subtable.variables;
    if let Some(variable) = variables
        .categorical
        .iter()
        .find(|v| v.column_number == number)
    {
        if let Some(format) = &variable.time_format {
            return ("time", format.pattern().to_string());
        }
        let detail = match variable.codelist_id.as_deref() {
            Some(id) => {
                let size = description.codelist(id).map_or(0, Codelist::len);
                format!("{id} ({size} codes)")
            }
            None => "-".to_string(),
        };
        return ("categorical", detail);
    }
    if let Some(statistic) = variables.statistic(number) {
        return (
            "statistic",
            format!(
                "{} stored, {} shown",
                statistic.stored_decimals, statistic.shown_decimals
            ),
        );
    }
    match variables
        .suppression
        .iter()
        .find(|s| s.column_number == number)
    {
        Some(column) => ("suppression", format!("for column {}", column.applies_to)),
        None => ("-", "-".to_string()),
    }
}

pub fn print_report(report: &ValidationReport, show_info: bool) {
    let findings: Vec<&Finding> = report
        .findings
        .iter()
        .filter(|f| show_info || f.severity != Severity::Info)
        .collect();
    if !findings.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Severity"),
            header_cell("Category"),
            header_cell("Subtable"),
            header_cell("Column"),
            header_cell("Message"),
        ]);
        apply_issue_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Center);
        for finding in findings {
            table.add_row(vec![
                severity_cell(finding.severity),
                Cell::new(finding.category.label()),
                optional_cell(finding.subtable.as_deref()),
                optional_cell(finding.column.as_deref()),
                Cell::new(&finding.message),
            ]);
        }
        println!("{table}");
    }

    let status = if report.has_errors() {
        Cell::new("FAILED").fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        Cell::new("PASSED").fg(Color::Green).add_attribute(Attribute::Bold)
    };
    let mut totals = Table::new();
    totals.set_header(vec![
        header_cell("Table"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Info"),
        header_cell("Result"),
    ]);
    apply_table_style(&mut totals);
    totals.add_row(vec![
        Cell::new(&report.table_id),
        count_cell(report.error_count(), Color::Red),
        count_cell(report.warning_count(), Color::Yellow),
        dim_cell(report.info_count()),
        status,
    ]);
    println!("{totals}");
}

pub fn print_written(result: &WrittenFiles) {
    println!("Table: {}", result.table_id);
    for path in &result.files {
        println!("  wrote {}", display_path(path));
    }
}

pub fn print_payload(result: &PayloadResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Parameter"), header_cell("Value")]);
    apply_table_style(&mut table);
    for (key, value) in &result.params {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    eprintln!("{table}");
    eprintln!("Content-Type: {}", result.content_type);
    if result.report.has_errors() {
        eprintln!(
            "Validation reported {} error(s); the body was built anyway.",
            result.report.error_count()
        );
    }
    match &result.output {
        Some(path) => eprintln!("Body written to {}", display_path(path)),
        None => println!("{}", result.body),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
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

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
        Severity::Info => dim_cell("INFO"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    value.map_or_else(|| dim_cell("-"), Cell::new)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
