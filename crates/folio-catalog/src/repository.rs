//! Catalog repository - refresh lifecycle and snapshot cache
//!
//! Owns the "when do we re-pull from sources" decision: a TTL-gated cached
//! snapshot, an at-most-one-in-flight refresh cycle, and stale-but-available
//! serving when a refresh fails with a prior good snapshot on hand.

use crate::collection::ProjectCollection;
use crate::manager::{CatalogManager, SourceFailure};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use folio_types::{CatalogResult, ProjectProfile};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

/// Observability view of the repository cache
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryStatus {
    pub last_refreshed_at: Option<DateTime<Utc>>,
    pub project_count: usize,
    pub source_failures: Vec<SourceFailure>,
}

struct CachedSnapshot {
    collection: Arc<ProjectCollection>,
    refreshed_at: DateTime<Utc>,
}

#[derive(Default)]
struct RepositoryState {
    snapshot: Option<CachedSnapshot>,
    invalidated: bool,
    failures: Vec<SourceFailure>,
}

/// Caching repository over the catalog manager
pub struct CatalogRepository {
    manager: CatalogManager,
    profile: ProjectProfile,
    /// `None` keeps the snapshot fresh until `invalidate()` is called
    ttl: Option<ChronoDuration>,
    state: RwLock<RepositoryState>,
    /// Serializes fetch cycles; waiters join the in-flight refresh
    refresh_lock: AsyncMutex<()>,
}

impl CatalogRepository {
    pub fn new(manager: CatalogManager, profile: ProjectProfile, ttl: Option<Duration>) -> Self {
        Self {
            manager,
            profile,
            ttl: ttl.map(|d| ChronoDuration::from_std(d).unwrap_or(ChronoDuration::MAX)),
            state: RwLock::new(RepositoryState::default()),
            refresh_lock: AsyncMutex::new(()),
        }
    }

    /// Return the current collection, re-fetching from sources if needed
    ///
    /// Callers that arrive while a fetch cycle is already running queue on
    /// the refresh lock and observe that cycle's freshly cached result
    /// instead of starting a second fan-out.
    pub async fn refresh(&self) -> CatalogResult<Arc<ProjectCollection>> {
        if let Some(snapshot) = self.fresh_snapshot() {
            debug!("Serving cached catalog snapshot");
            return Ok(snapshot);
        }

        let _guard = self.refresh_lock.lock().await;

        // A refresh may have completed while we waited for the lock
        if let Some(snapshot) = self.fresh_snapshot() {
            debug!("Refresh completed while waiting, serving its snapshot");
            return Ok(snapshot);
        }

        info!("Refreshing project catalog");
        match self.manager.build_collection(&self.profile).await {
            Ok(build) => {
                let collection = Arc::new(build.collection);
                let mut state = self.state.write();
                state.snapshot = Some(CachedSnapshot {
                    collection: Arc::clone(&collection),
                    refreshed_at: Utc::now(),
                });
                state.invalidated = false;
                state.failures = build.failures;
                Ok(collection)
            }
            Err(e) => {
                let state = self.state.read();
                match state.snapshot {
                    Some(ref snapshot) => {
                        warn!("Catalog refresh failed, serving stale snapshot: {}", e);
                        Ok(Arc::clone(&snapshot.collection))
                    }
                    None => Err(e),
                }
            }
        }
    }

    /// Mark the cached snapshot stale; the next `refresh()` re-fetches
    pub fn invalidate(&self) {
        self.state.write().invalidated = true;
    }

    /// Bypass the TTL and re-fetch now
    pub async fn force_refresh(&self) -> CatalogResult<Arc<ProjectCollection>> {
        self.invalidate();
        self.refresh().await
    }

    pub fn status(&self) -> RepositoryStatus {
        let state = self.state.read();
        RepositoryStatus {
            last_refreshed_at: state.snapshot.as_ref().map(|s| s.refreshed_at),
            project_count: state
                .snapshot
                .as_ref()
                .map(|s| s.collection.len())
                .unwrap_or(0),
            source_failures: state.failures.clone(),
        }
    }

    fn fresh_snapshot(&self) -> Option<Arc<ProjectCollection>> {
        let state = self.state.read();
        if state.invalidated {
            return None;
        }
        let snapshot = state.snapshot.as_ref()?;
        if let Some(ttl) = self.ttl {
            if Utc::now() - snapshot.refreshed_at >= ttl {
                return None;
            }
        }
        Some(Arc::clone(&snapshot.collection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use folio_sources::ProjectSource;
    use folio_types::{CatalogError, ExternalRecord};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        records: Vec<ExternalRecord>,
        delay: Option<Duration>,
        /// Fail every call whose zero-based index is >= this
        fail_from: usize,
    }

    #[async_trait]
    impl ProjectSource for CountingSource {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn fetch_projects(
            &self,
            _profile: &ProjectProfile,
        ) -> CatalogResult<Vec<ExternalRecord>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if call >= self.fail_from {
                return Err(CatalogError::SourceUnavailable {
                    source: "counting".to_string(),
                    reason: "stubbed outage".to_string(),
                });
            }
            Ok(self.records.clone())
        }
    }

    fn record(id: &str) -> ExternalRecord {
        ExternalRecord {
            id: id.to_string(),
            title: id.to_string(),
            summary: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            categories: vec![],
            languages: vec![],
            link: None,
            image: "/images/test.png".to_string(),
            updated_at: None,
        }
    }

    fn repository(
        calls: Arc<AtomicUsize>,
        delay: Option<Duration>,
        fail_from: usize,
        static_records: Vec<ExternalRecord>,
        ttl: Option<Duration>,
    ) -> CatalogRepository {
        let manager = CatalogManager::with_static_records(
            vec![Arc::new(CountingSource {
                calls,
                records: vec![record("counting:project")],
                delay,
                fail_from,
            })],
            static_records,
        );
        CatalogRepository::new(manager, ProjectProfile::new(), ttl)
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_share_one_fetch_cycle() {
        let calls = Arc::new(AtomicUsize::new(0));
        let repo = repository(
            Arc::clone(&calls),
            Some(Duration::from_millis(50)),
            usize::MAX,
            vec![],
            None,
        );

        let (a, b) = tokio::join!(repo.refresh(), repo.refresh());
        assert_eq!(a.unwrap().len(), 1);
        assert_eq!(b.unwrap().len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cached_snapshot_served_within_ttl() {
        let calls = Arc::new(AtomicUsize::new(0));
        let repo = repository(
            Arc::clone(&calls),
            None,
            usize::MAX,
            vec![],
            Some(Duration::from_secs(3600)),
        );

        repo.refresh().await.unwrap();
        repo.refresh().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_refetches_every_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let repo = repository(
            Arc::clone(&calls),
            None,
            usize::MAX,
            vec![],
            Some(Duration::ZERO),
        );

        repo.refresh().await.unwrap();
        repo.refresh().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let repo = repository(Arc::clone(&calls), None, usize::MAX, vec![], None);

        repo.refresh().await.unwrap();
        repo.invalidate();
        repo.refresh().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stale_snapshot_served_when_refresh_fails() {
        let calls = Arc::new(AtomicUsize::new(0));
        // First call succeeds, later calls fail; empty static list makes the
        // second build fatal rather than degraded
        let repo = repository(
            Arc::clone(&calls),
            None,
            1,
            vec![],
            Some(Duration::ZERO),
        );

        let first = repo.refresh().await.unwrap();
        assert_eq!(first.len(), 1);

        let second = repo.refresh().await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_error_propagates_without_prior_snapshot() {
        let calls = Arc::new(AtomicUsize::new(0));
        let repo = repository(Arc::clone(&calls), None, 0, vec![], None);

        let err = repo.refresh().await.unwrap_err();
        assert!(matches!(err, CatalogError::CatalogUnavailable));

        // Still no snapshot to serve
        assert!(repo.status().last_refreshed_at.is_none());
    }

    #[tokio::test]
    async fn test_status_reports_failures_and_count() {
        let calls = Arc::new(AtomicUsize::new(0));
        // Source always fails but a static record keeps the build degraded
        let repo = repository(Arc::clone(&calls), None, 0, vec![record("static-1")], None);

        repo.refresh().await.unwrap();
        let status = repo.status();
        assert_eq!(status.project_count, 1);
        assert_eq!(status.source_failures.len(), 1);
        assert!(status.last_refreshed_at.is_some());
    }
}
