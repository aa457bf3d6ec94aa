use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::source::{self, DEFAULT_MIRROR_URL, DEFAULT_PAGE_URL, FixtureSource, MirrorSource, PageSource};
use crate::store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Scrape the federation page.
    Page,
    /// Download a prebuilt partidos.json.
    Mirror,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "hoquei")]
#[command(about = "Browse roller hockey fixtures from the federation website", long_about = None)]
#[command(version)]
pub struct Config {
    /// Fixtures page to scrape
    #[arg(long, env = "HOQUEI_URL", default_value = DEFAULT_PAGE_URL)]
    pub url: String,

    /// Prebuilt fixtures JSON used by the mirror source
    #[arg(long, env = "HOQUEI_MIRROR_URL", default_value = DEFAULT_MIRROR_URL)]
    pub mirror_url: String,

    /// Where fresh fixtures come from (defaults to mirror on Android)
    #[arg(long, env = "HOQUEI_SOURCE", value_enum)]
    pub source: Option<SourceKind>,

    /// Directory holding partidos.json and equipos.json
    #[arg(long, env = "HOQUEI_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, env = "HOQUEI_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn source_kind(&self) -> SourceKind {
        self.source.unwrap_or(if source::is_android() { SourceKind::Mirror } else { SourceKind::Page })
    }

    pub fn build_source(&self) -> Box<dyn FixtureSource> {
        let timeout = Duration::from_secs(self.timeout_secs);
        match self.source_kind() {
            SourceKind::Page => Box::new(PageSource::new(&self.url, timeout)),
            SourceKind::Mirror => Box::new(MirrorSource::new(&self.mirror_url, timeout)),
        }
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        let exe_dir = std::env::current_exe().ok().and_then(|p| p.parent().map(|p| p.to_path_buf()));
        let cwd = std::env::current_dir().unwrap_or_default();
        store::resolve_data_dir(self.data_dir.as_deref(), exe_dir.as_deref(), &cwd)
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
