//! Catalog façade and DTO layer
//!
//! The one entry point the UI/CLI layer calls. Pure orchestration over the
//! repository: refresh, filter, snapshot, aggregate. No hidden state of its
//! own, so the same input against the same underlying collection always
//! produces the same DTO.

use crate::collection::Facet;
use crate::filter::ProjectFilter;
use crate::repository::CatalogRepository;
use folio_types::{CatalogResult, ProjectSnapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Raw filter input as it arrives from the UI/CLI boundary
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterInput {
    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub languages: Vec<String>,
}

/// A facet chip: resolved tag plus how many projects carry it
#[derive(Debug, Clone, Serialize)]
pub struct FacetDto {
    pub label: String,
    pub slug: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FacetGroupsDto {
    pub categories: Vec<FacetDto>,
    pub languages: Vec<FacetDto>,
}

/// Echo of the filter actually applied, as canonical slugs
#[derive(Debug, Clone, Serialize)]
pub struct ActiveFilterDto {
    pub categories: Vec<String>,
    pub languages: Vec<String>,
}

/// Everything the UI needs to render "N of M projects" plus facet chips
#[derive(Debug, Clone, Serialize)]
pub struct CatalogDto {
    pub projects: Vec<ProjectSnapshot>,
    /// Size of the unfiltered collection ("M" in "N of M")
    pub total: usize,
    pub facets: FacetGroupsDto,
    pub active_filter: ActiveFilterDto,
}

/// Façade combining refresh, filtering and facet aggregation
pub struct CatalogService {
    repository: Arc<CatalogRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<CatalogRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<CatalogRepository> {
        &self.repository
    }

    /// Load the catalog restricted by the given filter
    ///
    /// Facet counts always reflect the unfiltered collection so the UI can
    /// show what narrowing further would yield.
    pub async fn load_catalog(&self, input: &FilterInput) -> CatalogResult<CatalogDto> {
        let collection = self.repository.refresh().await?;
        let filter = ProjectFilter::from_raw(&input.categories, &input.languages);
        let filtered = collection.filter(&filter);

        Ok(CatalogDto {
            projects: filtered.projects().iter().map(|p| p.snapshot()).collect(),
            total: collection.len(),
            facets: FacetGroupsDto {
                categories: facet_dtos(collection.category_facets()),
                languages: facet_dtos(collection.language_facets()),
            },
            active_filter: ActiveFilterDto {
                categories: slugs(filter.category_tags()),
                languages: slugs(filter.language_tags()),
            },
        })
    }
}

fn facet_dtos(facets: &[Facet]) -> Vec<FacetDto> {
    facets
        .iter()
        .map(|facet| FacetDto {
            label: facet.tag.label().to_string(),
            slug: facet.tag.slug().to_string(),
            count: facet.count,
        })
        .collect()
}

fn slugs(tags: &[folio_types::Tag]) -> Vec<String> {
    tags.iter().map(|tag| tag.slug().to_string()).collect()
}
