//! Search request model.
//!
//! The fields here are exactly the ones that decide what a metasearch backend
//! returns, which makes them the inputs of the cache fingerprint.

use serde::{Deserialize, Serialize};

/// Output format requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Text,
}

impl OutputFormat {
    /// Stable tag used for display and fingerprinting.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Text => "text",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single search as issued by the CLI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query text
    pub query: String,
    /// 1-based results page
    pub page: u32,
    /// Output format tag
    pub format: OutputFormat,
    /// Search categories, in caller order
    pub categories: Vec<String>,
    /// Result languages, in caller order
    pub languages: Vec<String>,
    /// Safe-search level (0 = off, 1 = moderate, 2 = strict)
    pub safe_search: u8,
    /// Time-range filter such as `day` or `month`; empty for none
    pub time_range: String,
}

impl SearchRequest {
    /// Creates a first-page request with default filters.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            format: OutputFormat::default(),
            categories: Vec::new(),
            languages: Vec::new(),
            safe_search: 0,
            time_range: String::new(),
        }
    }
}
