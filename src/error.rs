use std::path::PathBuf;

use thiserror::Error;

/// Network or decoding failure while pulling fresh fixtures. Never fatal: the previous list stays on screen.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body: {0}")]
    Body(#[source] ureq::Error),

    #[error("mirror returned invalid fixtures JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fetch task aborted: {0}")]
    Join(String),
}

/// Failure reading or writing the JSON files in the data directory.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot read {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    #[error("cannot write {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },
}

impl StoreError {
    pub fn path(&self) -> &PathBuf {
        match self {
            StoreError::Read { path, .. } | StoreError::Write { path, .. } => path,
        }
    }
}
