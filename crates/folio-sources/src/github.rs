//! GitHub repositories source
//!
//! Lists a user's public repositories via the GitHub REST API and maps them
//! to external records. Forked, archived and private repositories are
//! excluded here, at the adapter boundary.

use crate::http::HttpClient;
use crate::{humanize, ProjectSource, DEFAULT_PROJECT_IMAGE};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_types::{CatalogError, CatalogResult, ExternalRecord, ProjectProfile};
use serde::Deserialize;
use tracing::{debug, info};

/// Default GitHub API base URL
pub const GITHUB_API_BASE: &str = "https://api.github.com";

const SOURCE_NAME: &str = "github";

/// GitHub repositories adapter
pub struct GithubSource {
    http: HttpClient,
    base_url: String,
}

impl GithubSource {
    pub fn new() -> Self {
        Self::with_base_url(GITHUB_API_BASE.to_string())
    }

    /// Create an adapter against a custom API base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for GithubSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectSource for GithubSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch_projects(
        &self,
        profile: &ProjectProfile,
    ) -> CatalogResult<Vec<ExternalRecord>> {
        let Some(ref username) = profile.github_username else {
            debug!("No GitHub username configured, skipping source");
            return Ok(vec![]);
        };

        let url = format!("{}/users/{}/repos", self.base_url, username);
        debug!("Fetching GitHub repositories: {}", url);

        let repos: Vec<GithubRepo> = self
            .http
            .get_json(
                &url,
                &[("Accept", "application/vnd.github.v3+json")],
                &[("per_page", "100"), ("sort", "updated")],
            )
            .await
            .map_err(|e| CatalogError::SourceUnavailable {
                source: SOURCE_NAME.to_string(),
                reason: e.to_string(),
            })?;

        let records: Vec<ExternalRecord> = repos
            .into_iter()
            .filter(|repo| !repo.fork && !repo.archived && !repo.private)
            .map(convert_repo)
            .collect();

        info!("Found {} projects on GitHub for '{}'", records.len(), username);

        Ok(records)
    }
}

fn convert_repo(repo: GithubRepo) -> ExternalRecord {
    let mut categories = vec!["Open Source".to_string()];
    categories.extend(repo.topics.iter().map(|t| humanize(t)));

    ExternalRecord {
        id: format!("github:{}", repo.full_name),
        title: humanize(&repo.name),
        summary: repo.description.unwrap_or_default(),
        date: repo.created_at.date_naive(),
        categories,
        languages: repo.language.into_iter().collect(),
        link: Some(repo.html_url),
        image: DEFAULT_PROJECT_IMAGE.to_string(),
        updated_at: repo.pushed_at,
    }
}

/// Repository entry from the GitHub API
#[derive(Debug, Deserialize)]
struct GithubRepo {
    name: String,

    full_name: String,

    #[serde(default)]
    description: Option<String>,

    html_url: String,

    #[serde(default)]
    fork: bool,

    #[serde(default)]
    archived: bool,

    #[serde(default)]
    private: bool,

    /// Primary language as detected by GitHub
    #[serde(default)]
    language: Option<String>,

    #[serde(default)]
    topics: Vec<String>,

    created_at: DateTime<Utc>,

    #[serde(default)]
    pushed_at: Option<DateTime<Utc>>,
}
