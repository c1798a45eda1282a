//! Terminal rendering of screening results and table reports.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pbp_core::ScreeningReport;
use pbp_model::{BpStatus, PercentileResult};
use pbp_standards::DoctorReport;

pub fn print_screening(report: &ScreeningReport) {
    let request = &report.request;
    println!(
        "Sex: {}  Age: {} y  Height: {} cm",
        request.sex,
        trim_number(request.age_years),
        trim_number(request.height_cm)
    );
    println!("{}", screening_table(report));
    println!();
    println!("Recommended follow-up:");
    println!("{}", guideline_actions_table(&report.statuses()));
}

pub fn screening_table(report: &ScreeningReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Measure"),
        header_cell("mmHg"),
        header_cell("Age group"),
        header_cell("Height band"),
        header_cell("50th"),
        header_cell("95th"),
        header_cell("Percentile"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 3, CellAlignment::Left);
    for result in report.results() {
        table.add_row(result_row(result));
    }
    table
}

fn result_row(result: &PercentileResult) -> Vec<Cell> {
    let cell = &result.cell;
    vec![
        Cell::new(result.bp_type.display_label()).add_attribute(Attribute::Bold),
        Cell::new(trim_number(result.bp_value_mmhg)),
        Cell::new(format!("{} y", cell.age_years)),
        Cell::new(format!("{} ({} cm)", cell.band, trim_number(cell.height_cm))),
        dim_cell(trim_number(cell.bp_50)),
        dim_cell(trim_number(cell.bp_95)),
        Cell::new(format!("{:.0}", result.percentile)).add_attribute(Attribute::Bold),
        status_cell(result.status),
    ]
}

/// Follow-up actions for the given statuses.
pub fn guideline_actions_table(statuses: &[BpStatus]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Status"),
        header_cell("Threshold"),
        header_cell("Recommended actions"),
    ]);
    apply_table_style(&mut table);
    for status in statuses {
        let actions = status
            .recommended_actions()
            .iter()
            .map(|action| format!("- {action}"))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            status_cell(*status),
            Cell::new(status.threshold_label()),
            Cell::new(actions),
        ]);
    }
    table
}

pub fn doctor_table(report: &DoctorReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Source"),
        header_cell("Ages"),
        header_cell("Age groups"),
        header_cell("Height bands"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for summary in &report.tables {
        let ages = match (summary.min_age, summary.max_age) {
            (Some(min), Some(max)) => Cell::new(format!("{min}-{max}")),
            _ => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&summary.role)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&summary.source),
            ages,
            Cell::new(summary.age_groups),
            Cell::new(summary.height_bands),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(report.counts.age_groups).add_attribute(Attribute::Bold),
        Cell::new(report.counts.height_bands).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn print_doctor(report: &DoctorReport) {
    let verified = if report.verified {
        "verified against manifest"
    } else {
        "not verified (no manifest)"
    };
    println!("Reference tables: {verified}");
    if let Some(guideline) = &report.guideline {
        println!("Guideline: {guideline}");
    }
    println!("{}", doctor_table(report));
}

pub fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_color(status: BpStatus) -> Color {
    match status {
        BpStatus::Normal => Color::Green,
        BpStatus::Elevated => Color::DarkYellow,
        BpStatus::Hypertension => Color::Red,
    }
}

fn status_cell(status: BpStatus) -> Cell {
    Cell::new(status.label())
        .fg(status_color(status))
        .add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

/// `140` rather than `140.0`; keeps one decimal otherwise.
fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_number_drops_trailing_zero() {
        assert_eq!(trim_number(140.0), "140");
        assert_eq!(trim_number(140.24), "140.2");
        assert_eq!(trim_number(7.5), "7.5");
    }
}
