//! Pre-canonical external records and the source identity profile

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Raw project record as emitted by one source, before tag normalization
///
/// Ids are provider-namespaced (e.g. `github:acme/demo`) so they stay
/// globally unique across sources without central coordination. The curated
/// static list is a JSON array of this shape embedded in the binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalRecord {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub summary: String,

    /// Project date, used for display and deterministic ordering
    pub date: NaiveDate,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub languages: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    pub image: String,

    /// Last time the source saw this project change, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Which external identities to query
///
/// A source whose identity is absent contributes zero records without
/// touching the network; that is not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub huggingface_username: Option<String>,
}

impl ProjectProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_github(mut self, username: impl Into<String>) -> Self {
        self.github_username = Some(username.into());
        self
    }

    pub fn with_huggingface(mut self, username: impl Into<String>) -> Self {
        self.huggingface_username = Some(username.into());
        self
    }
}
