//! JSON files in the data directory: `partidos.json` and `equipos.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{error, info, instrument};

use crate::error::StoreError;
use crate::model::filter::{FilterDefinition, FilterFile};
use crate::model::fixture::FixtureRecord;

pub const FIXTURES_FILE: &str = "partidos.json";
pub const FILTERS_FILE: &str = "equipos.json";

#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn fixtures_path(&self) -> PathBuf {
        self.dir.join(FIXTURES_FILE)
    }

    pub fn filters_path(&self) -> PathBuf {
        self.dir.join(FILTERS_FILE)
    }

    /// Previously saved fixtures, or an empty list when nothing was saved yet.
    #[instrument(level = "info", skip(self))]
    pub fn load_fixtures(&self) -> Result<Vec<FixtureRecord>, StoreError> {
        let fixtures: Vec<FixtureRecord> = read_json(&self.fixtures_path())?.unwrap_or_default();
        info!(count = fixtures.len(), "Loaded fixtures");
        Ok(fixtures)
    }

    /// Replace the fixtures file. The new content is written next to it and renamed into place.
    #[instrument(level = "info", skip(self, fixtures), fields(count = fixtures.len()))]
    pub fn save_fixtures(&self, fixtures: &[FixtureRecord]) -> Result<(), StoreError> {
        let path = self.fixtures_path();
        let write_err = |reason: String| {
            error!(path = %path.display(), %reason, "Failed to save fixtures");
            StoreError::Write { path: path.clone(), reason }
        };

        let json = serde_json::to_string_pretty(fixtures).map_err(|e| write_err(e.to_string()))?;
        fs::create_dir_all(&self.dir).map_err(|e| write_err(e.to_string()))?;
        let tmp = self.dir.join(format!(".{}.tmp", FIXTURES_FILE));
        fs::write(&tmp, json).map_err(|e| write_err(e.to_string()))?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            write_err(e.to_string())
        })?;
        info!(path = %path.display(), "Saved fixtures");
        Ok(())
    }

    /// Filters authored in `equipos.json`, or an empty list when the file is absent.
    #[instrument(level = "info", skip(self))]
    pub fn load_filters(&self) -> Result<Vec<FilterDefinition>, StoreError> {
        let file: FilterFile = read_json(&self.filters_path())?.unwrap_or_default();
        info!(count = file.filters.len(), "Loaded filters");
        Ok(file.filters)
    }
}

/// `Ok(None)` when the file does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let read_err = |reason: String| {
        error!(path = %path.display(), %reason, "Failed to read JSON file");
        StoreError::Read { path: path.to_path_buf(), reason }
    };
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(read_err(e.to_string())),
    };
    serde_json::from_str(&data).map(Some).map_err(|e| read_err(e.to_string()))
}

/// Pick the data directory: an explicit choice, else the executable's directory when it already
/// holds both data files, else the current directory.
pub fn resolve_data_dir(explicit: Option<&Path>, exe_dir: Option<&Path>, cwd: &Path) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    match exe_dir {
        Some(dir) if dir.join(FIXTURES_FILE).exists() && dir.join(FILTERS_FILE).exists() => dir.to_path_buf(),
        _ => cwd.to_path_buf(),
    }
}
