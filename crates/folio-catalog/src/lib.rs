//! Project catalog pipeline
//!
//! Pulls project metadata from the configured external sources, merges it
//! with the curated static list, deduplicates and normalizes into canonical
//! entities, and serves deterministic, facet-annotated views through a
//! single façade. Source failures degrade the catalog instead of breaking
//! it; a stale snapshot always beats a fresh error.

pub mod collection;
pub mod curated;
pub mod filter;
pub mod manager;
pub mod repository;
pub mod service;

pub use collection::{Facet, ProjectCollection};
pub use curated::curated_projects;
pub use filter::ProjectFilter;
pub use manager::{CatalogManager, CollectionBuild, SourceFailure};
pub use repository::{CatalogRepository, RepositoryStatus};
pub use service::{
    ActiveFilterDto, CatalogDto, CatalogService, FacetDto, FacetGroupsDto, FilterInput,
};
