use std::{io, path::PathBuf, sync::Arc};
use thiserror::Error;

/// Failure of a single lookup or of a whole hostname resolution.
///
/// `NameNotResolved` is the expected outcome of a strategy that found
/// nothing and is swallowed by the resolver. The other variants end up in
/// the `error` field of a record.
#[derive(Debug, Error, Clone)]
pub enum ResolveError {
    #[error("Name not resolved: {domain}: {source}")]
    NameNotResolved {
        domain: String,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("DNS lookup failed: No addresses found")]
    NoAddresses,
    #[error("Error: {0}")]
    Task(String),
}

impl ResolveError {
    /// Create a `NameNotResolved` error for `domain`.
    pub fn dns_failed(domain: impl Into<String>, source: io::Error) -> Self {
        ResolveError::NameNotResolved {
            domain: domain.into(),
            source: Arc::new(source),
        }
    }

    /// Create a `NameNotResolved` error from a plain message.
    pub fn not_found(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::dns_failed(domain, io::Error::new(io::ErrorKind::NotFound, message.into()))
    }

    /// True if this failure should abort the resolution of a hostname
    /// instead of being swallowed by the strategy that raised it.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, ResolveError::Task(_))
    }
}

impl From<tokio::task::JoinError> for ResolveError {
    fn from(err: tokio::task::JoinError) -> Self {
        ResolveError::Task(err.to_string())
    }
}

/// Fatal errors of a batch run.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("File '{}' not found", .0.display())]
    InputNotFound(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}
