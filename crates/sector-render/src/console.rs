//! Console summaries of a run

use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use sector_core::{PerformanceRecord, PerformanceSummary};

/// One line per ranked sector, e.g. `Gold Miners: +3.96% → 103.9`
///
/// Records without a final value print the return only.
pub fn summary_lines(summary: &PerformanceSummary) -> Vec<String> {
    summary.ranked.iter().map(summary_line).collect()
}

fn summary_line(record: &PerformanceRecord) -> String {
    match record.display_final_value() {
        Some(final_value) => format!(
            "{}: {} → {}",
            record.sector_name,
            record.display_return(),
            final_value
        ),
        None => format!("{}: {}", record.sector_name, record.display_return()),
    }
}

/// Heading plus summary lines, with omitted sectors noted at the end
pub fn summary_block(summary: &PerformanceSummary) -> String {
    let mut lines = vec![format!("{} Performance", summary.window)];
    lines.extend(summary_lines(summary));
    lines.extend(summary.omitted.iter().map(|o| {
        format!(
            "{}: not enough history ({} of {} observations)",
            o.sector_name, o.observations, o.required
        )
    }));
    lines.join("\n")
}

/// Ranked summary as a bordered table
pub fn summary_table(summary: &PerformanceSummary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Sector", summary.window.label(), "Final"]);

    for (i, record) in summary.ranked.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            record.sector_name.clone(),
            record.display_return(),
            record.display_final_value().unwrap_or_default(),
        ]);
    }

    for index in [0, 2, 3] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}
