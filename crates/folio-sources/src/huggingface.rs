//! Hugging Face sources
//!
//! Two adapters against the Hugging Face Hub API: one for published models,
//! one for Spaces (the hosted-demo provider). Private and gated assets are
//! excluded here; Spaces additionally drop anything whose runtime reports a
//! non-running stage.

use crate::http::HttpClient;
use crate::{humanize, ProjectSource, DEFAULT_PROJECT_IMAGE};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_types::{CatalogError, CatalogResult, ExternalRecord, ProjectProfile};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

/// Default Hugging Face Hub base URL (API and public pages share the host)
pub const HUGGINGFACE_API_BASE: &str = "https://huggingface.co";

const MODELS_SOURCE_NAME: &str = "huggingface";
const SPACES_SOURCE_NAME: &str = "huggingface-spaces";

/// Hugging Face models adapter
pub struct HuggingFaceModelSource {
    http: HttpClient,
    base_url: String,
}

impl HuggingFaceModelSource {
    pub fn new() -> Self {
        Self::with_base_url(HUGGINGFACE_API_BASE.to_string())
    }

    /// Create an adapter against a custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn convert_model(&self, model: HuggingFaceModel) -> Option<ExternalRecord> {
        // The hub reports at least one of these on every listed model; a
        // record with neither cannot be ordered deterministically, so skip it.
        let date = model
            .created_at
            .or(model.last_modified)
            .map(|ts| ts.date_naive())?;

        let mut categories = vec!["AI Development".to_string()];
        if let Some(ref pipeline) = model.pipeline_tag {
            categories.push(humanize(pipeline));
        }

        let mut languages = Vec::new();
        for tag in &model.tags {
            if let Some(language) = library_language(tag) {
                if !languages.iter().any(|l| l == language) {
                    languages.push(language.to_string());
                }
            }
        }

        let summary = match model.pipeline_tag {
            Some(ref pipeline) => {
                format!("{} model published on Hugging Face", humanize(pipeline))
            }
            None => "Model published on Hugging Face".to_string(),
        };

        Some(ExternalRecord {
            id: format!("huggingface:{}", model.id),
            title: humanize(short_name(&model.id)),
            summary,
            date,
            categories,
            languages,
            link: Some(format!("{}/{}", self.base_url, model.id)),
            image: DEFAULT_PROJECT_IMAGE.to_string(),
            updated_at: model.last_modified,
        })
    }
}

impl Default for HuggingFaceModelSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectSource for HuggingFaceModelSource {
    fn name(&self) -> &'static str {
        MODELS_SOURCE_NAME
    }

    async fn fetch_projects(
        &self,
        profile: &ProjectProfile,
    ) -> CatalogResult<Vec<ExternalRecord>> {
        let Some(ref username) = profile.huggingface_username else {
            debug!("No Hugging Face username configured, skipping models source");
            return Ok(vec![]);
        };

        let url = format!("{}/api/models", self.base_url);
        debug!("Fetching Hugging Face models: {}", url);

        let models: Vec<HuggingFaceModel> = self
            .http
            .get_json(&url, &[], &[("author", username.as_str())])
            .await
            .map_err(|e| CatalogError::SourceUnavailable {
                source: MODELS_SOURCE_NAME.to_string(),
                reason: e.to_string(),
            })?;

        let records: Vec<ExternalRecord> = models
            .into_iter()
            .filter(|m| !m.private && !is_gated(&m.gated))
            .filter_map(|m| self.convert_model(m))
            .collect();

        info!(
            "Found {} models on Hugging Face for '{}'",
            records.len(),
            username
        );

        Ok(records)
    }
}

/// Hugging Face Spaces adapter (hosted demos)
pub struct HuggingFaceSpaceSource {
    http: HttpClient,
    base_url: String,
}

impl HuggingFaceSpaceSource {
    pub fn new() -> Self {
        Self::with_base_url(HUGGINGFACE_API_BASE.to_string())
    }

    /// Create an adapter against a custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn convert_space(&self, space: HuggingFaceSpace) -> Option<ExternalRecord> {
        let date = space
            .created_at
            .or(space.last_modified)
            .map(|ts| ts.date_naive())?;

        let mut categories = vec!["Demo".to_string()];
        if let Some(ref sdk) = space.sdk {
            categories.push(humanize(sdk));
        }

        let languages = match space.sdk.as_deref() {
            Some("gradio") | Some("streamlit") => vec!["Python".to_string()],
            _ => vec![],
        };

        Some(ExternalRecord {
            id: format!("space:{}", space.id),
            title: humanize(short_name(&space.id)),
            summary: "Interactive demo hosted on Hugging Face Spaces".to_string(),
            date,
            categories,
            languages,
            link: Some(format!("{}/spaces/{}", self.base_url, space.id)),
            image: DEFAULT_PROJECT_IMAGE.to_string(),
            updated_at: space.last_modified,
        })
    }
}

impl Default for HuggingFaceSpaceSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectSource for HuggingFaceSpaceSource {
    fn name(&self) -> &'static str {
        SPACES_SOURCE_NAME
    }

    async fn fetch_projects(
        &self,
        profile: &ProjectProfile,
    ) -> CatalogResult<Vec<ExternalRecord>> {
        let Some(ref username) = profile.huggingface_username else {
            debug!("No Hugging Face username configured, skipping spaces source");
            return Ok(vec![]);
        };

        let url = format!("{}/api/spaces", self.base_url);
        debug!("Fetching Hugging Face spaces: {}", url);

        let spaces: Vec<HuggingFaceSpace> = self
            .http
            .get_json(&url, &[], &[("author", username.as_str())])
            .await
            .map_err(|e| CatalogError::SourceUnavailable {
                source: SPACES_SOURCE_NAME.to_string(),
                reason: e.to_string(),
            })?;

        let records: Vec<ExternalRecord> = spaces
            .into_iter()
            .filter(|s| !s.private && s.is_running())
            .filter_map(|s| self.convert_space(s))
            .collect();

        info!(
            "Found {} spaces on Hugging Face for '{}'",
            records.len(),
            username
        );

        Ok(records)
    }
}

/// Part of a hub id after the owner prefix, e.g. "acme/bert-tiny" -> "bert-tiny"
fn short_name(hub_id: &str) -> &str {
    hub_id.rsplit('/').next().unwrap_or(hub_id)
}

/// The hub reports `gated` as false, "auto" or "manual"
fn is_gated(gated: &Value) -> bool {
    !matches!(gated, Value::Null | Value::Bool(false))
}

/// Map a hub library tag to the implementation language it implies
fn library_language(tag: &str) -> Option<&'static str> {
    match tag {
        "pytorch" | "tensorflow" | "jax" | "keras" | "transformers" | "diffusers"
        | "safetensors" => Some("Python"),
        "candle" | "rust" => Some("Rust"),
        _ => None,
    }
}

/// Model entry from the hub API
#[derive(Debug, Deserialize)]
struct HuggingFaceModel {
    #[serde(alias = "modelId")]
    id: String,

    #[serde(default)]
    private: bool,

    /// false, "auto" or "manual"
    #[serde(default)]
    gated: Value,

    #[serde(default)]
    pipeline_tag: Option<String>,

    #[serde(default)]
    tags: Vec<String>,

    #[serde(default, alias = "createdAt")]
    created_at: Option<DateTime<Utc>>,

    #[serde(default, alias = "lastModified")]
    last_modified: Option<DateTime<Utc>>,
}

/// Space entry from the hub API
#[derive(Debug, Deserialize)]
struct HuggingFaceSpace {
    id: String,

    #[serde(default)]
    private: bool,

    #[serde(default)]
    sdk: Option<String>,

    #[serde(default, alias = "createdAt")]
    created_at: Option<DateTime<Utc>>,

    #[serde(default, alias = "lastModified")]
    last_modified: Option<DateTime<Utc>>,

    #[serde(default)]
    runtime: Option<SpaceRuntime>,
}

impl HuggingFaceSpace {
    /// Spaces without runtime info are kept; a reported non-running stage
    /// means the demo would 404, so it is dropped.
    fn is_running(&self) -> bool {
        match self.runtime.as_ref().and_then(|r| r.stage.as_deref()) {
            Some(stage) => stage == "RUNNING",
            None => true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SpaceRuntime {
    #[serde(default)]
    stage: Option<String>,
}
