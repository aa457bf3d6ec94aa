use std::path::PathBuf;

use hoquei_fixtures::model::fixture::FixtureRecord;

/// A fresh, empty directory under the system temp dir, unique per test.
#[allow(dead_code)]
pub fn scratch_dir(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let dir = std::env::temp_dir().join(format!("hoquei-{}-{}-{}", name, std::process::id(), nanos));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[allow(dead_code)]
pub fn fixture(competition: &str, home: &str, away: &str, result: &str) -> FixtureRecord {
    FixtureRecord {
        competition: competition.into(),
        date: "12/05".into(),
        time: "18:00".into(),
        home: home.into(),
        away: away.into(),
        result: result.into(),
        venue: "Pavelló 1".into(),
    }
}
