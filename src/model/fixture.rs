use serde::{Deserialize, Serialize};

/// One row of the federation's fixtures table.
///
/// Every field is kept as the source formats it; dates and scores are never parsed.
/// The JSON keys follow the Catalan column names used by the persisted `partidos.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureRecord {
    #[serde(rename = "competicio")]
    pub competition: String,
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "hora")]
    pub time: String,
    #[serde(rename = "local")]
    pub home: String,
    #[serde(rename = "visitant")]
    pub away: String,
    #[serde(rename = "resultat")]
    pub result: String,
    #[serde(rename = "pista")]
    pub venue: String,
}

impl FixtureRecord {
    /// A record is worth keeping when it names a competition or at least one team.
    pub fn is_meaningful(&self) -> bool {
        !self.competition.trim().is_empty() || !self.home.trim().is_empty() || !self.away.trim().is_empty()
    }
}
