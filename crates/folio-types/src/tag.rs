//! Tag value object
//!
//! Canonicalizes free-text labels ("AI Development") into comparable slugs
//! ("ai-development"). Two tags are equal iff their slugs are equal; the
//! label is display-only.

use crate::errors::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};

/// Immutable label/slug pair. Equality, ordering and hashing are by slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    label: String,
    slug: String,
}

impl Tag {
    /// Create a tag from a free-text label, deriving the slug
    pub fn new(label: impl Into<String>) -> CatalogResult<Self> {
        let label = label.into().trim().to_string();
        if label.is_empty() {
            return Err(CatalogError::InvalidTag(
                "label must not be empty".to_string(),
            ));
        }
        let slug = Self::slugify(&label);
        Ok(Self { label, slug })
    }

    /// Create a tag with an explicitly supplied slug
    ///
    /// The supplied slug is canonicalized the same way a derived one would
    /// be, so `with_slug("Rust", "The Rust Language")` and
    /// `with_slug("Rust", "the-rust-language")` produce equal tags.
    pub fn with_slug(label: impl Into<String>, slug: &str) -> CatalogResult<Self> {
        let label = label.into().trim().to_string();
        if label.is_empty() {
            return Err(CatalogError::InvalidTag(
                "label must not be empty".to_string(),
            ));
        }
        let slug = Self::slugify(slug);
        if slug.is_empty() {
            return Err(CatalogError::InvalidTag(format!(
                "slug for '{}' canonicalizes to empty",
                label
            )));
        }
        Ok(Self { label, slug })
    }

    /// Convert a human-readable value to a canonical slug
    /// e.g., "Web  Development!" -> "web-development"
    pub fn slugify(value: &str) -> String {
        value
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Compare against a raw label or slug, canonicalizing the argument
    pub fn matches(&self, label_or_slug: &str) -> bool {
        self.slug == Self::slugify(label_or_slug)
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.slug == other.slug
    }
}

impl Eq for Tag {}

impl std::hash::Hash for Tag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.slug.hash(state);
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.slug.cmp(&other.slug)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}
