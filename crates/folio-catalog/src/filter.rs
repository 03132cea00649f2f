//! Catalog filter
//!
//! A query over category and language tags. Matching is OR within a
//! dimension and AND across dimensions; an empty dimension matches
//! everything.

use folio_types::{Project, Tag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    categories: Vec<Tag>,
    languages: Vec<Tag>,
}

impl ProjectFilter {
    pub fn new(categories: Vec<Tag>, languages: Vec<Tag>) -> Self {
        Self {
            categories,
            languages,
        }
    }

    /// Filter that matches every project
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a filter from raw user input
    ///
    /// Entries are canonicalized through `Tag`, so filter slugs always match
    /// project slugs regardless of input casing and punctuation. Blank
    /// entries are dropped.
    pub fn from_raw(categories: &[String], languages: &[String]) -> Self {
        Self {
            categories: raw_tags(categories),
            languages: raw_tags(languages),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.languages.is_empty()
    }

    pub fn category_tags(&self) -> &[Tag] {
        &self.categories
    }

    pub fn language_tags(&self) -> &[Tag] {
        &self.languages
    }

    pub fn matches(&self, project: &Project) -> bool {
        let category_ok = self.categories.is_empty()
            || self.categories.iter().any(|tag| project.has_category(tag));
        let language_ok = self.languages.is_empty()
            || self.languages.iter().any(|tag| project.has_language(tag));
        category_ok && language_ok
    }
}

fn raw_tags(values: &[String]) -> Vec<Tag> {
    values
        .iter()
        .filter_map(|value| Tag::new(value.as_str()).ok())
        .collect()
}
