//! Terminal tables for command results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use preserve_core::{EnvironmentalRating, Evaluation};
use preserve_tables::{ArtifactReport, GenerateReport, SourceInfo, TableSummary};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// One row per table: range, shape and boundary policy.
pub fn tables_table(summaries: &[TableSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Temperature"),
        header_cell("Humidity"),
        header_cell("Shape"),
        header_cell("Boundary"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for summary in summaries {
        let (t_min, t_max) = summary.temperature;
        let (rh_min, rh_max) = summary.humidity;
        table.add_row(vec![
            Cell::new(summary.kind.label())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{t_min}..={t_max} °C")),
            Cell::new(format!("{rh_min}..={rh_max} %")),
            Cell::new(format!("{}x{}", summary.rows, summary.cols)),
            Cell::new(summary.policy.as_str()),
        ]);
    }
    table
}

/// Outputs and ratings of one evaluation.
pub fn evaluation_table(evaluation: &Evaluation) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell("Value"),
        header_cell("Concern"),
        header_cell("Rating"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        (
            "Preservation Index",
            format!("{} years", evaluation.pi),
            "Natural aging",
            evaluation.natural_aging,
        ),
        (
            "Equilibrium moisture content",
            format!("{} %", evaluation.emc),
            "Mechanical damage",
            evaluation.mechanical_damage,
        ),
        (
            "Mold risk",
            mold_text(evaluation.mold.value()),
            "Mold growth",
            evaluation.mold_growth,
        ),
        (
            "Equilibrium moisture content",
            format!("{} %", evaluation.emc),
            "Metal corrosion",
            evaluation.metal_corrosion,
        ),
    ];
    for (metric, value, concern, rating) in rows {
        table.add_row(vec![
            Cell::new(metric),
            Cell::new(value),
            Cell::new(concern),
            rating_cell(rating),
        ]);
    }
    table
}

pub fn print_generate_report(report: &GenerateReport) {
    println!("Artifact: {}", report.output.display());
    print_source(&report.source);
    println!("Checksum: {}", report.checksum);
    println!("{}", tables_table(&report.tables));
}

pub fn print_artifact_report(report: &ArtifactReport) {
    println!("Artifact: {}", report.path.display());
    print_source(&report.source);
    println!("Checksum: {}", report.checksum);
    println!("Cells: {}", report.cell_count);
    println!("{}", tables_table(&report.tables));
}

pub fn print_evaluation(evaluation: &Evaluation) {
    println!(
        "Conditions: {} °C, {} % RH",
        evaluation.temperature, evaluation.humidity
    );
    println!("{}", evaluation_table(evaluation));
    println!("Overall: {}", evaluation.overall());
}

fn print_source(source: &SourceInfo) {
    println!(
        "Source: {} ({} bytes, sha256 {})",
        source.url, source.bytes, source.sha256
    );
}

fn mold_text(days: i32) -> String {
    if days == 0 {
        "none".to_string()
    } else {
        format!("{days} days")
    }
}

fn rating_cell(rating: EnvironmentalRating) -> Cell {
    let color = match rating {
        EnvironmentalRating::Good => Color::Green,
        EnvironmentalRating::Ok => Color::Yellow,
        EnvironmentalRating::Risk => Color::Red,
    };
    Cell::new(rating.as_str())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preserve_core::{MoistureContent, MoldRisk, PreservationIndex};

    #[test]
    fn evaluation_table_lists_every_concern() {
        let evaluation = Evaluation {
            temperature: 20.0,
            humidity: 70.0,
            pi: PreservationIndex(38),
            emc: MoistureContent(13.2),
            mold: MoldRisk(41),
            natural_aging: EnvironmentalRating::Risk,
            mechanical_damage: EnvironmentalRating::Risk,
            mold_growth: EnvironmentalRating::Risk,
            metal_corrosion: EnvironmentalRating::Risk,
        };
        let rendered = evaluation_table(&evaluation).to_string();
        for needle in [
            "38 years",
            "13.2 %",
            "41 days",
            "Natural aging",
            "Mechanical damage",
            "Mold growth",
            "Metal corrosion",
        ] {
            assert!(rendered.contains(needle), "missing {needle}:\n{rendered}");
        }
    }

    #[test]
    fn mold_text_names_no_risk() {
        assert_eq!(mold_text(0), "none");
        assert_eq!(mold_text(12), "12 days");
    }
}
