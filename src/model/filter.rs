use serde::{Deserialize, Serialize};

/// Label of the catch-all entry shown first in the filter picker.
pub const ALL_FILTER_NAME: &str = "Tots";

/// A user-authored filter read from `equipos.json`.
///
/// Empty strings in `buscar`/`categoria` mean "no condition", the same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDefinition {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "buscar", default, skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl FilterDefinition {
    /// The synthesized filter that lets every fixture through.
    pub fn all() -> Self {
        Self { name: ALL_FILTER_NAME.to_string(), search_text: None, category: None }
    }

    /// Search text, if set to something non-empty.
    pub fn search(&self) -> Option<&str> {
        self.search_text.as_deref().filter(|s| !s.is_empty())
    }

    /// Category text, if set to something non-empty.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|s| !s.is_empty())
    }

    /// True when neither condition is set.
    pub fn is_catch_all(&self) -> bool {
        self.search().is_none() && self.category().is_none()
    }
}

/// On-disk shape of the filters file: `{ "filtros": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterFile {
    #[serde(rename = "filtros", default)]
    pub filters: Vec<FilterDefinition>,
}
