//! Run configuration.
//!
//! A [`Config`] is built once at startup and passed explicitly to whatever
//! needs it. The `hostip` binary always runs with [`Config::default`]; the
//! other values exist for library callers and tests.

use std::path::PathBuf;

/// Default directory results are written to.
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Settings for a batch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Directory the `<stem>_results.json` file goes into (created if absent).
    pub results_dir: PathBuf,
    /// Whether direct A/AAAA record queries run after the system lookups.
    pub dns_records: bool,
    /// Maximum hostnames resolved at once; 1 means strictly serial.
    pub jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            dns_records: true,
            jobs: 1,
        }
    }
}

impl Config {
    /// Concurrency actually used; zero is treated as one.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.results_dir, Path::new("results"));
        assert!(config.dns_records);
        assert_eq!(config.effective_jobs(), 1);
    }

    #[test]
    fn test_jobs_never_zero() {
        let config = Config {
            jobs: 0,
            ..Config::default()
        };
        assert_eq!(config.effective_jobs(), 1);
    }
}
