//! Catalog build pipeline
//!
//! Fans out to every configured source concurrently, tolerates individual
//! source failure, merges the survivors with the curated static list and
//! normalizes the result into canonical projects.

use crate::collection::ProjectCollection;
use crate::curated::curated_projects;
use folio_sources::ProjectSource;
use folio_types::{CatalogError, CatalogResult, ExternalRecord, Project, ProjectProfile, Tag};
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One source's failure during a build cycle, kept for observability
#[derive(Debug, Clone, Serialize)]
pub struct SourceFailure {
    pub source: String,
    pub reason: String,
}

/// Result of one build cycle
#[derive(Debug)]
pub struct CollectionBuild {
    pub collection: ProjectCollection,
    pub failures: Vec<SourceFailure>,
}

/// Merges external sources with the curated list into canonical projects
pub struct CatalogManager {
    sources: Vec<Arc<dyn ProjectSource>>,
    static_records: Vec<ExternalRecord>,
}

impl CatalogManager {
    /// Manager over the embedded curated list
    pub fn new(sources: Vec<Arc<dyn ProjectSource>>) -> Self {
        Self::with_static_records(sources, curated_projects().to_vec())
    }

    /// Manager over an explicit static list
    pub fn with_static_records(
        sources: Vec<Arc<dyn ProjectSource>>,
        static_records: Vec<ExternalRecord>,
    ) -> Self {
        Self {
            sources,
            static_records,
        }
    }

    /// Fetch, merge, dedup, normalize and sort one catalog build
    ///
    /// A failing source contributes nothing for this cycle and is recorded
    /// in the build's failure list; the build itself only fails when every
    /// source failed and there is no curated data to fall back on.
    pub async fn build_collection(
        &self,
        profile: &ProjectProfile,
    ) -> CatalogResult<CollectionBuild> {
        let fetches = self.sources.iter().map(|source| {
            let source = Arc::clone(source);
            async move {
                let result = source.fetch_projects(profile).await;
                (source.name(), result)
            }
        });

        let mut fetched: Vec<ExternalRecord> = Vec::new();
        let mut failures: Vec<SourceFailure> = Vec::new();
        for (name, result) in join_all(fetches).await {
            match result {
                Ok(records) => {
                    debug!("Source '{}' contributed {} records", name, records.len());
                    fetched.extend(records);
                }
                Err(e) => {
                    warn!("Source '{}' failed: {}", name, e);
                    failures.push(SourceFailure {
                        source: name.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let all_sources_failed = !self.sources.is_empty() && failures.len() == self.sources.len();
        if all_sources_failed && self.static_records.is_empty() {
            return Err(CatalogError::CatalogUnavailable);
        }

        let mut projects: Vec<Project> = self.merge(fetched).into_iter().map(to_project).collect();

        // Deterministic order: newest first, title breaks ties
        projects.sort_by(|a, b| {
            b.date()
                .cmp(&a.date())
                .then_with(|| a.title().to_lowercase().cmp(&b.title().to_lowercase()))
        });

        info!(
            "Built catalog with {} projects ({} source failures)",
            projects.len(),
            failures.len()
        );

        Ok(CollectionBuild {
            collection: ProjectCollection::new(projects),
            failures,
        })
    }

    /// Merge fetched records with the curated list, dedup by id
    ///
    /// Within one cycle's fetched records the last occurrence of an id wins;
    /// a curated record sharing an id with a fetched one replaces it
    /// wholesale.
    fn merge(&self, fetched: Vec<ExternalRecord>) -> Vec<ExternalRecord> {
        let mut merged: Vec<ExternalRecord> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in fetched {
            match index.get(&record.id) {
                Some(&at) => merged[at] = record,
                None => {
                    index.insert(record.id.clone(), merged.len());
                    merged.push(record);
                }
            }
        }

        for record in &self.static_records {
            match index.get(&record.id) {
                Some(&at) => {
                    debug!("Curated record overrides fetched '{}'", record.id);
                    merged[at] = record.clone();
                }
                None => {
                    index.insert(record.id.clone(), merged.len());
                    merged.push(record.clone());
                }
            }
        }

        merged
    }
}

fn to_project(record: ExternalRecord) -> Project {
    Project::new(
        record.id,
        record.title,
        record.summary,
        record.date,
        to_tags(&record.categories),
        to_tags(&record.languages),
        record.link,
        record.image,
    )
}

/// Invalid tag strings are skipped; they never abort the project
fn to_tags(labels: &[String]) -> Vec<Tag> {
    labels
        .iter()
        .filter_map(|label| match Tag::new(label.as_str()) {
            Ok(tag) => Some(tag),
            Err(e) => {
                debug!("Skipping tag '{}': {}", label, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct StubSource {
        name: &'static str,
        records: Vec<ExternalRecord>,
        fail: bool,
    }

    #[async_trait]
    impl ProjectSource for StubSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch_projects(
            &self,
            _profile: &ProjectProfile,
        ) -> CatalogResult<Vec<ExternalRecord>> {
            if self.fail {
                return Err(CatalogError::SourceUnavailable {
                    source: self.name.to_string(),
                    reason: "stubbed outage".to_string(),
                });
            }
            Ok(self.records.clone())
        }
    }

    fn source(name: &'static str, records: Vec<ExternalRecord>) -> Arc<dyn ProjectSource> {
        Arc::new(StubSource {
            name,
            records,
            fail: false,
        })
    }

    fn failing_source(name: &'static str) -> Arc<dyn ProjectSource> {
        Arc::new(StubSource {
            name,
            records: vec![],
            fail: true,
        })
    }

    fn record(id: &str, title: &str, date: &str, categories: &[&str]) -> ExternalRecord {
        ExternalRecord {
            id: id.to_string(),
            title: title.to_string(),
            summary: String::new(),
            date: date.parse::<NaiveDate>().unwrap(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            languages: vec![],
            link: None,
            image: "/images/test.png".to_string(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_partial_source_failure_degrades() {
        let manager = CatalogManager::with_static_records(
            vec![
                failing_source("github"),
                source("huggingface", vec![record("hf:m", "M", "2024-02-01", &[])]),
            ],
            vec![record("static-1", "Static", "2023-01-01", &[])],
        );

        let build = manager
            .build_collection(&ProjectProfile::new())
            .await
            .unwrap();

        assert_eq!(build.collection.len(), 2);
        assert_eq!(build.failures.len(), 1);
        assert_eq!(build.failures[0].source, "github");
    }

    #[tokio::test]
    async fn test_static_record_wins_on_id_collision() {
        let manager = CatalogManager::with_static_records(
            vec![source(
                "github",
                vec![record(
                    "portfolio-website",
                    "Portfolio Website",
                    "2024-01-01",
                    &["Other"],
                )],
            )],
            vec![record(
                "portfolio-website",
                "Portfolio Website",
                "2023-11-01",
                &["Web Development"],
            )],
        );

        let build = manager
            .build_collection(&ProjectProfile::new())
            .await
            .unwrap();

        assert_eq!(build.collection.len(), 1);
        let project = &build.collection.projects()[0];
        assert_eq!(project.categories().len(), 1);
        assert_eq!(project.categories()[0].slug(), "web-development");
        assert_eq!(project.date().to_string(), "2023-11-01");
    }

    #[tokio::test]
    async fn test_duplicate_id_within_source_last_wins() {
        let manager = CatalogManager::with_static_records(
            vec![source(
                "github",
                vec![
                    record("github:acme/tool", "First", "2024-01-01", &[]),
                    record("github:acme/tool", "Second", "2024-01-02", &[]),
                ],
            )],
            vec![],
        );

        let build = manager
            .build_collection(&ProjectProfile::new())
            .await
            .unwrap();

        assert_eq!(build.collection.len(), 1);
        assert_eq!(build.collection.projects()[0].title(), "Second");
    }

    #[tokio::test]
    async fn test_all_sources_fail_with_empty_static_is_fatal() {
        let manager = CatalogManager::with_static_records(
            vec![failing_source("github"), failing_source("huggingface")],
            vec![],
        );

        let err = manager
            .build_collection(&ProjectProfile::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::CatalogUnavailable));
    }

    #[tokio::test]
    async fn test_all_sources_fail_with_static_is_degraded_success() {
        let manager = CatalogManager::with_static_records(
            vec![failing_source("github"), failing_source("huggingface")],
            vec![record("static-1", "Static", "2023-01-01", &[])],
        );

        let build = manager
            .build_collection(&ProjectProfile::new())
            .await
            .unwrap();

        assert_eq!(build.collection.len(), 1);
        assert_eq!(build.failures.len(), 2);
    }

    #[tokio::test]
    async fn test_deterministic_ordering() {
        let manager = CatalogManager::with_static_records(
            vec![source(
                "github",
                vec![
                    record("b", "beta", "2024-01-01", &[]),
                    record("a", "Alpha", "2024-01-01", &[]),
                    record("c", "Gamma", "2024-06-01", &[]),
                ],
            )],
            vec![],
        );

        let build = manager
            .build_collection(&ProjectProfile::new())
            .await
            .unwrap();

        let titles: Vec<_> = build
            .collection
            .projects()
            .iter()
            .map(|p| p.title())
            .collect();
        // Newest first; same-day entries ordered by title, case-insensitive
        assert_eq!(titles, vec!["Gamma", "Alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_invalid_tags_are_skipped_not_fatal() {
        let manager = CatalogManager::with_static_records(
            vec![],
            vec![record("static-1", "Static", "2023-01-01", &["  ", "Web Development"])],
        );

        let build = manager
            .build_collection(&ProjectProfile::new())
            .await
            .unwrap();

        let project = &build.collection.projects()[0];
        assert_eq!(project.categories().len(), 1);
        assert_eq!(project.categories()[0].slug(), "web-development");
    }
}
