use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use acrdd_cli::types::{
    ArchiveResult, BatchReport, ReconcileResult, SearchResult, TableOutcome,
};

pub fn print_profile_summary(report: &BatchReport) {
    println!("Snapshot: {}", report.snapshot);
    println!("Output: {}", report.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Columns"),
        header_cell("Enumerated"),
        header_cell("Dictionary"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut total_columns = 0usize;
    let mut total_enumerated = 0usize;
    for summary in &report.tables {
        total_columns += summary.columns;
        total_enumerated += summary.enumerated;
        let table_cell = if summary.declared {
            Cell::new(&summary.table)
        } else {
            Cell::new(format!("{} (undeclared)", summary.table)).fg(Color::Yellow)
        };
        let outcome_cell = match &summary.outcome {
            TableOutcome::Written(path) => Cell::new(path.display()).fg(Color::Green),
            TableOutcome::Failed(error) => Cell::new(error).fg(Color::Red),
        };
        table.add_row(vec![
            table_cell,
            Cell::new(summary.columns),
            count_cell(summary.enumerated),
            outcome_cell,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_columns).add_attribute(Attribute::Bold),
        Cell::new(total_enumerated).add_attribute(Attribute::Bold),
        dim_cell(format!("{} written", report.written().count())),
    ]);
    println!("{table}");

    if !report.missing.is_empty() {
        eprintln!("Declared tables without an export:");
        for table in &report.missing {
            eprintln!("- {table}");
        }
    }
    if report.cancelled {
        eprintln!("Profiling was cancelled before every table was processed.");
    }
}

pub fn print_search_summary(result: &SearchResult) {
    println!(
        "Found {} matching studies for query '{}'.",
        result.studies.len(),
        result.query
    );
    if result.studies.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Study"),
        header_cell("Dataset"),
        header_cell("Snapshot"),
        header_cell("dbGaP"),
    ]);
    apply_table_style(&mut table);
    for study in &result.studies {
        table.add_row(vec![
            Cell::new(&study.study_name),
            Cell::new(&study.dataset_identifier),
            optional_cell(study.snapshot_id.as_deref()),
            optional_cell(Some(study.phs_id.as_str()).filter(|_| study.has_phs_id())),
        ]);
    }
    println!("{table}");

    for path in &result.summaries {
        println!("Saved summary: {}", path.display());
    }
}

pub fn print_reconcile_summary(result: &ReconcileResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Snapshot"),
        header_cell("ID"),
        header_cell("dbGaP"),
        header_cell("DUOS"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for snapshot in &result.snapshots {
        let duos_cell = if snapshot.in_duos {
            Cell::new(snapshot.duos_id.as_deref().unwrap_or("✓"))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(&snapshot.name),
            Cell::new(&snapshot.id),
            optional_cell(snapshot.phs_id.as_deref()),
            duos_cell,
        ]);
    }
    println!("{table}");
    println!(
        "{} registered in DUOS, {} repository only.",
        result.registered_count(),
        result.snapshots.len() - result.registered_count()
    );
}

pub fn print_archive_summary(result: &ArchiveResult) {
    println!("Output: {}", result.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Variables"),
        header_cell("CSV"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for file in &result.files {
        let outcome_cell = match &file.outcome {
            Ok(path) => Cell::new(path.display()).fg(Color::Green),
            Err(error) => Cell::new(error).fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(file.source.display()),
            Cell::new(file.variables),
            outcome_cell,
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
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

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value.filter(|text| !text.is_empty()) {
        Some(text) => Cell::new(text),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
