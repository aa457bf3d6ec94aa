use std::time::Duration;

use tracing::{error, info, info_span, instrument, warn};
use ureq::Agent;

use crate::error::FetchError;
use crate::extract;
use crate::model::fixture::FixtureRecord;

pub const DEFAULT_PAGE_URL: &str = "https://www.hoqueipatins.fecapa.cat/ag/";
pub const DEFAULT_MIRROR_URL: &str = "https://raw.githubusercontent.com/tortajet/fecapa-explorer/main/partidos.json";

/// Anything that can produce a complete, fresh fixture list.
pub trait FixtureSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<FixtureRecord>, FetchError>;

    /// Short human label for status messages.
    fn describe(&self) -> String;
}

/// Scrapes the federation's fixtures page.
pub struct PageSource {
    url: String,
    agent: Agent,
}

impl PageSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self { url: url.into(), agent: build_agent(timeout) }
    }
}

impl FixtureSource for PageSource {
    #[instrument(level = "info", skip(self), fields(url = %self.url))]
    fn fetch(&self) -> Result<Vec<FixtureRecord>, FetchError> {
        let html = get_text(&self.agent, &self.url)?;
        let fixtures = extract::extract_page(&html);
        if fixtures.is_empty() {
            warn!(bytes = html.len(), "Page contained no fixture rows");
        } else {
            info!(count = fixtures.len(), "Extracted fixtures from page");
        }
        Ok(fixtures)
    }

    fn describe(&self) -> String {
        format!("web ({})", self.url)
    }
}

/// Downloads an already extracted `partidos.json`, for hosts that cannot scrape.
pub struct MirrorSource {
    url: String,
    agent: Agent,
}

impl MirrorSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self { url: url.into(), agent: build_agent(timeout) }
    }

    /// Decode a mirror body (no network).
    pub fn parse(body: &str) -> Result<Vec<FixtureRecord>, FetchError> {
        let fixtures: Vec<FixtureRecord> = serde_json::from_str(body)?;
        Ok(fixtures.into_iter().filter(FixtureRecord::is_meaningful).collect())
    }
}

impl FixtureSource for MirrorSource {
    #[instrument(level = "info", skip(self), fields(url = %self.url))]
    fn fetch(&self) -> Result<Vec<FixtureRecord>, FetchError> {
        let body = get_text(&self.agent, &self.url)?;
        match Self::parse(&body) {
            Ok(fixtures) => {
                info!(count = fixtures.len(), "Downloaded fixtures from mirror");
                Ok(fixtures)
            }
            Err(e) => {
                error!(error = %e, "Failed to decode mirror body");
                Err(e)
            }
        }
    }

    fn describe(&self) -> String {
        format!("mirror ({})", self.url)
    }
}

fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder().timeout_global(Some(timeout)).build().into()
}

fn get_text(agent: &Agent, url: &str) -> Result<String, FetchError> {
    let response_result = {
        let _span = info_span!("fixtures_fetch", url = %url).entered();
        agent.get(url).call()
    };
    match response_result {
        Ok(response) => {
            let mut body_reader = response.into_body();
            body_reader.read_to_string().map_err(|e| {
                error!(error = %e, "Failed to read response body");
                FetchError::Body(e)
            })
        }
        Err(ureq::Error::StatusCode(status)) => {
            error!(status, url = %url, "Non-success status");
            Err(FetchError::Status { url: url.to_string(), status })
        }
        Err(e) => {
            error!(error = %e, url = %url, "Request failed");
            Err(FetchError::Request { url: url.to_string(), source: e })
        }
    }
}

/// Android and Termux hosts have no browser to scrape with.
pub fn is_android() -> bool {
    std::env::consts::OS == "android" || std::env::var("ANDROID_ROOT").is_ok() || std::env::var("TERMUX_VERSION").is_ok()
}
