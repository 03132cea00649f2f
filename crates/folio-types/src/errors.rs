//! Error types and conversions

// NOTE: `CatalogError` cannot use `#[derive(thiserror::Error)]` because the
// `SourceUnavailable` variant has a field named `source`, which thiserror
// unconditionally treats as an `std::error::Error` source (and there is no
// opt-out attribute). Here `source` is a plain source-name `String`, so we
// hand-write the `Display`/`Error` impls to match the intended messages.
#[derive(Debug, Clone)]
pub enum CatalogError {
    InvalidTag(String),

    SourceUnavailable { source: String, reason: String },

    CatalogUnavailable,

    Http(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::InvalidTag(tag) => write!(f, "Invalid tag: {tag}"),
            CatalogError::SourceUnavailable { source, reason } => {
                write!(f, "Source '{source}' unavailable: {reason}")
            }
            CatalogError::CatalogUnavailable => {
                write!(f, "No project data available from any source")
            }
            CatalogError::Http(msg) => write!(f, "HTTP error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for String {
    fn from(err: CatalogError) -> String {
        err.to_string()
    }
}
