//! External data source adapters
//!
//! One adapter per provider, each turning a provider-specific payload into
//! provider-agnostic `ExternalRecord`s behind the `ProjectSource` trait.
//! Provider-level exclusion policy (forks, archived repos, private or gated
//! assets) lives inside the adapter that knows the provider, never
//! downstream.

pub mod github;
pub mod http;
pub mod huggingface;

pub use github::GithubSource;
pub use http::{HttpClient, HttpError};
pub use huggingface::{HuggingFaceModelSource, HuggingFaceSpaceSource};

use async_trait::async_trait;
use folio_types::{CatalogResult, ExternalRecord, ProjectProfile};

/// A single external provider of project records
///
/// Contract:
/// - An adapter whose identity field is absent from the profile returns an
///   empty list without touching the network; that is not an error.
/// - Transport failure (network error, non-2xx, undecodable payload) is a
///   `CatalogError::SourceUnavailable` carrying the source name, never a
///   silent empty list, so callers can tell "no data" from "source broke".
/// - Emitted ids are provider-namespaced (`github:...`, `huggingface:...`).
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Stable source name, used in errors and logs
    fn name(&self) -> &'static str;

    /// Fetch all project records this source has for the given profile
    async fn fetch_projects(&self, profile: &ProjectProfile)
        -> CatalogResult<Vec<ExternalRecord>>;
}

/// Image path used when a provider has no usable artwork for a project
pub const DEFAULT_PROJECT_IMAGE: &str = "/images/projects/default.png";

/// Turn a slug-ish provider string into a display label
/// e.g., "text-classification" -> "Text Classification"
pub(crate) fn humanize(value: &str) -> String {
    value
        .split(|c| c == '-' || c == '_')
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("text-classification"), "Text Classification");
        assert_eq!(humanize("my_cool_app"), "My Cool App");
        assert_eq!(humanize("rust"), "Rust");
        assert_eq!(humanize("--odd--input--"), "Odd Input");
    }
}
