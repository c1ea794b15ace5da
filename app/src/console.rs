// In app/src/console.rs

use colored::{ColoredString, Colorize};
use core_types::{Crossing, GroupReport, ScanGroup, ScanRecord, Timeframe};
use tabled::{Table, Tabled};

/// Plain text of one result line, e.g. `[PTT.BK] (W) | CrossUp`.
pub fn format_line(record: &ScanRecord, timeframe: Timeframe) -> String {
    let mut label = format!("[{}]", record.label);
    if timeframe == Timeframe::Weekly {
        label.push_str(" (W)");
    }
    format!("{label} | {}", record.classification)
}

pub fn paint(text: &str, crossing: Crossing) -> ColoredString {
    match crossing {
        Crossing::CrossUp => text.green(),
        Crossing::CrossDown => text.red(),
        Crossing::None => text.bright_black(),
    }
}

/// Prints a group header followed by one colored line per record.
pub fn print_report(report: &GroupReport) {
    println!("\n=== {} ===", report.group);
    if report.records.is_empty() {
        println!("{}", "(no results)".bright_black());
    }
    for record in &report.records {
        let line = format_line(record, report.timeframe);
        println!("{}", paint(&line, record.classification.headline()));
    }
}

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "MACD Status")]
    status: String,
}

/// Renders every report as a single Group / Symbol / MACD Status table.
pub fn render_table(reports: &[GroupReport]) -> String {
    let rows = reports.iter().flat_map(|report| {
        report.records.iter().map(move |record| {
            let mut status = record.classification.to_string();
            if report.timeframe == Timeframe::Weekly {
                status.push_str(" (W)");
            }
            ResultRow {
                group: report.group.clone(),
                symbol: record.label.clone(),
                status,
            }
        })
    });
    Table::new(rows).to_string()
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Group")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Size")]
    size: usize,
    #[tabled(rename = "Default")]
    enabled: &'static str,
}

/// Renders the configured groups with their sizes and whether they run by default.
pub fn render_groups<'a>(groups: impl IntoIterator<Item = (&'a ScanGroup, bool)>) -> String {
    let rows = groups.into_iter().map(|(group, enabled)| GroupRow {
        name: group.name.clone(),
        kind: group.target.kind(),
        size: group.target.len(),
        enabled: if enabled { "yes" } else { "" },
    });
    Table::new(rows).to_string()
}
