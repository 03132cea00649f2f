//! In-memory project collection with facet aggregation

use crate::filter::ProjectFilter;
use folio_types::{Project, Tag};
use once_cell::sync::OnceCell;
use std::collections::HashMap;

/// A (tag, count) pair summarizing how many projects carry that tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    pub tag: Tag,
    pub count: usize,
}

/// Ordered, id-unique sequence of projects plus derived facet tables
///
/// Collections are immutable once constructed, so each facet table is
/// computed at most once per instance and cached for its lifetime; no
/// invalidation logic is needed.
#[derive(Debug)]
pub struct ProjectCollection {
    projects: Vec<Project>,
    category_facets: OnceCell<Vec<Facet>>,
    language_facets: OnceCell<Vec<Facet>>,
}

impl ProjectCollection {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            category_facets: OnceCell::new(),
            language_facets: OnceCell::new(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Restricted view containing only the projects the filter matches
    ///
    /// Returns a new collection and leaves this one untouched; the view
    /// computes its own facets on demand.
    pub fn filter(&self, filter: &ProjectFilter) -> ProjectCollection {
        ProjectCollection::new(
            self.projects
                .iter()
                .filter(|project| filter.matches(project))
                .cloned()
                .collect(),
        )
    }

    /// Category facets over all projects in this collection,
    /// ordered by descending count then label
    pub fn category_facets(&self) -> &[Facet] {
        self.category_facets.get_or_init(|| {
            facets_over(self.projects.iter().flat_map(|p| p.categories().iter()))
        })
    }

    /// Language facets over all projects in this collection,
    /// ordered by descending count then label
    pub fn language_facets(&self) -> &[Facet] {
        self.language_facets.get_or_init(|| {
            facets_over(self.projects.iter().flat_map(|p| p.languages().iter()))
        })
    }
}

fn facets_over<'a>(tags: impl Iterator<Item = &'a Tag>) -> Vec<Facet> {
    let mut by_slug: HashMap<String, Facet> = HashMap::new();
    for tag in tags {
        by_slug
            .entry(tag.slug().to_string())
            .and_modify(|facet| facet.count += 1)
            .or_insert_with(|| Facet {
                tag: tag.clone(),
                count: 1,
            });
    }

    let mut facets: Vec<Facet> = by_slug.into_values().collect();
    facets.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.tag.label().cmp(b.tag.label()))
    });
    facets
}
