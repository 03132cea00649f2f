//! Canonical project entity
//!
//! A `Project` is the single normalized representation of one portfolio
//! project after the merge/dedup pass, independent of which source it came
//! from. Entities are immutable; a refresh supersedes them with freshly
//! constructed ones carrying the same stable id.

use crate::tag::Tag;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical project entity
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    id: String,
    title: String,
    summary: String,
    date: NaiveDate,
    categories: Vec<Tag>,
    languages: Vec<Tag>,
    link: Option<String>,
    image: String,
}

impl Project {
    /// Construct a project, collapsing duplicate tags by slug
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
        date: NaiveDate,
        categories: Vec<Tag>,
        languages: Vec<Tag>,
        link: Option<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: summary.into(),
            date,
            categories: dedup_by_slug(categories),
            languages: dedup_by_slug(languages),
            link,
            image: image.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn categories(&self) -> &[Tag] {
        &self.categories
    }

    pub fn languages(&self) -> &[Tag] {
        &self.languages
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Whether any of this project's categories carries the given slug
    pub fn has_category(&self, tag: &Tag) -> bool {
        self.categories.contains(tag)
    }

    /// Whether any of this project's languages carries the given slug
    pub fn has_language(&self, tag: &Tag) -> bool {
        self.languages.contains(tag)
    }

    /// Produce a fully-resolved DTO for crossing the core/UI boundary
    ///
    /// Snapshots are plain data: every tag is resolved to label+slug, the
    /// date is rendered both machine- and display-form, and all collections
    /// are copies. Mutating a snapshot never touches the entity.
    pub fn snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            id: self.id.clone(),
            title: self.title.clone(),
            summary: self.summary.clone(),
            date: self.date.format("%Y-%m-%d").to_string(),
            display_date: self.date.format("%B %Y").to_string(),
            categories: self.categories.iter().map(TagDto::from).collect(),
            languages: self.languages.iter().map(TagDto::from).collect(),
            link: self.link.clone(),
            image: self.image.clone(),
        }
    }
}

fn dedup_by_slug(tags: Vec<Tag>) -> Vec<Tag> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .filter(|t| seen.insert(t.slug().to_string()))
        .collect()
}

/// Resolved tag for the UI boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDto {
    pub label: String,
    pub slug: String,
}

impl From<&Tag> for TagDto {
    fn from(tag: &Tag) -> Self {
        Self {
            label: tag.label().to_string(),
            slug: tag.slug().to_string(),
        }
    }
}

/// Plain, side-effect-free view of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Human-readable month/year, e.g. "March 2024"
    pub display_date: String,
    pub categories: Vec<TagDto>,
    pub languages: Vec<TagDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub image: String,
}
