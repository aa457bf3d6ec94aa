//! Fixed-width text rendering of the fixture list.

use crate::model::filter::ALL_FILTER_NAME;
use crate::model::fixture::FixtureRecord;

/// Body rows beyond this are not rendered.
pub const MAX_ROWS: usize = 100;

pub const COLUMN_SEPARATOR: &str = " │ ";
pub const RULE_SEPARATOR: &str = "─┼─";

/// Column layout: header label, width, and whether values are cut to the width.
/// Date, time and result are never cut.
pub const COLUMNS: [(&str, usize, bool); 7] = [
    ("Competició", 30, true),
    ("Data", 10, false),
    ("Hora", 6, false),
    ("Local", 25, true),
    ("Visitante", 25, true),
    ("Resultat", 8, false),
    ("Pista", 35, true),
];

/// Render header, rule and at most [`MAX_ROWS`] fixtures, one per line.
pub fn render(records: &[FixtureRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len().min(MAX_ROWS) + 2);
    lines.push(header());
    lines.push(rule());
    lines.extend(records.iter().take(MAX_ROWS).map(row));
    lines.join("\n")
}

/// Every field of one fixture, uncut, for the detail view.
pub fn detail_lines(record: &FixtureRecord) -> Vec<String> {
    let result = if record.result.is_empty() { "-" } else { record.result.as_str() };
    vec![
        "Partit:".to_string(),
        format!("{} vs {}", record.home, record.away),
        String::new(),
        format!("Competició: {}", record.competition),
        format!("Data: {}", record.date),
        format!("Hora: {}", record.time),
        format!("Resultat: {}", result),
        format!("Pista: {}", record.venue),
    ]
}

pub fn header() -> String {
    COLUMNS
        .iter()
        .map(|(label, width, _)| truncate(&pad(label, *width), *width))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR)
}

pub fn rule() -> String {
    COLUMNS.iter().map(|(_, width, _)| "-".repeat(*width)).collect::<Vec<_>>().join(RULE_SEPARATOR)
}

pub fn row(record: &FixtureRecord) -> String {
    let result = if record.result.is_empty() { "-" } else { record.result.as_str() };
    let values = [
        record.competition.as_str(),
        record.date.as_str(),
        record.time.as_str(),
        record.home.as_str(),
        record.away.as_str(),
        result,
        record.venue.as_str(),
    ];
    values
        .iter()
        .zip(COLUMNS.iter())
        .map(|(value, (_, width, cut))| {
            if *cut {
                pad(&truncate(value, *width), *width)
            } else {
                pad(value, *width)
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR)
}

/// One-line summary for the status bar.
pub fn status_line(shown: usize, filter_name: Option<&str>) -> String {
    format!(
        "Mostrant {} partits | Filtre: {} | (R)efrescar | (F)iltres | (/) Cercar | (?) Ajuda | (Q) Sortir",
        shown,
        filter_name.unwrap_or(ALL_FILTER_NAME)
    )
}

fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}
