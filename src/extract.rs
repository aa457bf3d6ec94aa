//! Turns the federation's fixtures table into [`FixtureRecord`]s.
//!
//! The page lays every fixture out as a `<tr>` of at least seven `<td>` cells.
//! Cell positions are fixed by the source table:
//!
//! | cell | field       |
//! |------|-------------|
//! | 0    | competition |
//! | 1    | date        |
//! | 2    | time        |
//! | 3    | (unused)    |
//! | 4    | home        |
//! | 5    | (unused)    |
//! | 6    | away        |
//! | 7    | result      |
//! | 8    | venue       |
//!
//! Cells 3 and 5 hold crests and the "vs" separator on the live page.

use scraper::{Html, Selector};
use tracing::{debug, instrument};

use crate::model::fixture::FixtureRecord;

/// Rows shorter than this are headers, spacers or layout tables.
pub const MIN_CELLS: usize = 7;

const COMPETITION: usize = 0;
const DATE: usize = 1;
const TIME: usize = 2;
const HOME: usize = 4;
const AWAY: usize = 6;
const RESULT: usize = 7;
const VENUE: usize = 8;

/// Collect the `<td>` texts of every `<tr>` inside every `<table>` of the document.
///
/// `<th>` cells are not collected, so header rows come back empty.
#[instrument(level = "debug", skip(html), fields(bytes = html.len()))]
pub fn table_rows(html: &str) -> Vec<Vec<String>> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("table tr").expect("static row selector");
    let cell_selector = Selector::parse("td").expect("static cell selector");

    let rows: Vec<Vec<String>> = document
        .select(&row_selector)
        .map(|row| row.select(&cell_selector).map(|cell| cell.text().collect::<String>()).collect())
        .collect();
    debug!(rows = rows.len(), "Collected table rows");
    rows
}

/// Map table rows to fixtures, keeping the source order and any duplicates.
pub fn extract<R: AsRef<[String]>>(rows: &[R]) -> Vec<FixtureRecord> {
    rows.iter().filter_map(|row| extract_row(row.as_ref())).collect()
}

/// Map one row, or `None` when it is too short or names neither a competition nor a team.
pub fn extract_row(cells: &[String]) -> Option<FixtureRecord> {
    if cells.len() < MIN_CELLS {
        return None;
    }
    let cell = |idx: usize| cells.get(idx).map(|s| s.trim().to_string()).unwrap_or_default();
    let record = FixtureRecord {
        competition: cell(COMPETITION),
        date: cell(DATE),
        time: cell(TIME),
        home: cell(HOME),
        away: cell(AWAY),
        result: cell(RESULT),
        venue: cell(VENUE),
    };
    record.is_meaningful().then_some(record)
}

/// Parse a whole page straight into fixtures.
pub fn extract_page(html: &str) -> Vec<FixtureRecord> {
    extract(&table_rows(html))
}
