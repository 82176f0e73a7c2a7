//! Ergonomic error context helpers.
//!
//! Provides extension traits for adding context to `Result` types,
//! converting IO errors into context-rich error variants.

use crate::base::error::{BatchError, ResolveError};
use std::{io, path::Path};

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Attach the input path to a read failure.
    ///
    /// # Example
    /// ```ignore
    /// use hostip::base::IoResultExt;
    ///
    /// let text = std::fs::read_to_string(path).read_context(path)?;
    /// // Error: "Failed to read hosts.txt: permission denied"
    /// ```
    fn read_context(self, path: &Path) -> Result<T, BatchError>;

    /// Attach the output path to a write failure.
    fn write_context(self, path: &Path) -> Result<T, BatchError>;

    /// Add DNS resolution context to an IO error.
    fn dns_context(self, domain: &str) -> Result<T, ResolveError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn read_context(self, path: &Path) -> Result<T, BatchError> {
        self.map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                BatchError::InputNotFound(path.to_path_buf())
            } else {
                BatchError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
    }

    fn write_context(self, path: &Path) -> Result<T, BatchError> {
        self.map_err(|source| BatchError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn dns_context(self, domain: &str) -> Result<T, ResolveError> {
        self.map_err(|e| ResolveError::dns_failed(domain, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_read_context_missing_file() {
        let result: Result<(), io::Error> = Err(Error::new(ErrorKind::NotFound, "gone"));
        let err = result.read_context(Path::new("hosts.txt")).unwrap_err();

        match err {
            BatchError::InputNotFound(path) => assert_eq!(path, Path::new("hosts.txt")),
            _ => panic!("Expected InputNotFound"),
        }
    }

    #[test]
    fn test_read_context_other_failure() {
        let result: Result<(), io::Error> =
            Err(Error::new(ErrorKind::PermissionDenied, "denied"));
        let err = result.read_context(Path::new("hosts.txt")).unwrap_err();

        assert!(matches!(err, BatchError::Read { .. }));
        assert!(err.to_string().contains("hosts.txt"));
    }

    #[test]
    fn test_write_context() {
        let result: Result<(), io::Error> =
            Err(Error::new(ErrorKind::PermissionDenied, "denied"));
        let err = result.write_context(Path::new("results/out.json")).unwrap_err();

        match err {
            BatchError::Write { path, .. } => assert_eq!(path, Path::new("results/out.json")),
            _ => panic!("Expected Write"),
        }
    }

    #[test]
    fn test_dns_context() {
        let result: Result<(), io::Error> = Err(Error::new(ErrorKind::NotFound, "no such host"));
        let err = result.dns_context("unknown.example.com").unwrap_err();

        match err {
            ResolveError::NameNotResolved { domain, .. } => {
                assert_eq!(domain, "unknown.example.com");
            }
            _ => panic!("Expected NameNotResolved"),
        }
    }
}
