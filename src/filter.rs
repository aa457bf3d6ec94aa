//! Case-insensitive substring filtering over the in-memory fixture list.

use crate::model::filter::FilterDefinition;
use crate::model::fixture::FixtureRecord;

/// Apply a stored filter. `None` returns every record.
///
/// A record passes when the upper-cased `"competition home away venue"` composite contains the
/// filter's search text and its competition contains the filter's category. Missing conditions pass.
pub fn apply(records: &[FixtureRecord], filter: Option<&FilterDefinition>) -> Vec<FixtureRecord> {
    let Some(filter) = filter else {
        return records.to_vec();
    };
    let search = filter.search().map(str::to_uppercase);
    let category = filter.category().map(str::to_uppercase);

    records
        .iter()
        .filter(|r| {
            let search_ok = search.as_deref().is_none_or(|needle| filter_composite(r).contains(needle));
            let category_ok = category.as_deref().is_none_or(|needle| r.competition.to_uppercase().contains(needle));
            search_ok && category_ok
        })
        .cloned()
        .collect()
}

/// Free-text search typed at the `/` prompt. Also matches against the result column.
pub fn search(records: &[FixtureRecord], text: &str) -> Vec<FixtureRecord> {
    if text.is_empty() {
        return records.to_vec();
    }
    let needle = text.to_uppercase();
    records.iter().filter(|r| search_composite(r).contains(&needle)).cloned().collect()
}

fn filter_composite(r: &FixtureRecord) -> String {
    format!("{} {} {} {}", r.competition, r.home, r.away, r.venue).to_uppercase()
}

fn search_composite(r: &FixtureRecord) -> String {
    format!("{} {} {} {} {}", r.competition, r.home, r.away, r.venue, r.result).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_joins_with_single_spaces() {
        let r = FixtureRecord {
            competition: "OK Lliga".into(),
            home: "Reus".into(),
            away: "Liceo".into(),
            venue: "Pavelló".into(),
            ..Default::default()
        };
        assert_eq!(filter_composite(&r), "OK LLIGA REUS LICEO PAVELLÓ");
    }

    #[test]
    fn search_spans_field_boundaries() {
        let r = FixtureRecord { home: "Reus".into(), away: "Liceo".into(), ..Default::default() };
        let filter = FilterDefinition { name: "x".into(), search_text: Some("reus lic".into()), category: None };
        assert_eq!(apply(&[r], Some(&filter)).len(), 1);
    }
}
