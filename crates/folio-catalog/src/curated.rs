//! Curated static project list
//!
//! Hand-maintained records embedded in the binary. During a merge these are
//! authoritative: a fetched record sharing an id with a curated one is
//! replaced wholesale.

use folio_types::ExternalRecord;
use once_cell::sync::Lazy;

static CURATED: Lazy<Vec<ExternalRecord>> = Lazy::new(|| {
    serde_json::from_str(include_str!("curated_projects.json"))
        .expect("embedded curated project list is valid JSON")
});

/// The curated records embedded in the binary
pub fn curated_projects() -> &'static [ExternalRecord] {
    &CURATED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_list_parses() {
        let records = curated_projects();
        assert!(!records.is_empty());
        assert!(records.iter().any(|r| r.id == "portfolio-website"));
    }

    #[test]
    fn test_embedded_ids_are_unique() {
        let records = curated_projects();
        let mut ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), records.len());
    }
}
