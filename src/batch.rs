//! Batch driver: hostnames file in, JSON results file out.
//!
//! Reads every hostname up front, resolves them in input order and writes
//! the records once at the end. A missing input file fails before any
//! lookup runs, so no partial output is ever written.

use crate::base::{context::IoResultExt, error::BatchError};
use crate::config::Config;
use crate::record::HostResolutionRecord;
use crate::resolver::HostResolver;
use futures::stream::{self, StreamExt};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Splits file contents into hostnames.
///
/// Lines are trimmed and blank lines dropped. Order and duplicates are
/// kept; there is no comment syntax.
pub fn parse_hostnames(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Reads the hostnames file at `path`.
pub fn read_hostnames(path: &Path) -> Result<Vec<String>, BatchError> {
    if !path.exists() {
        return Err(BatchError::InputNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).read_context(path)?;
    Ok(parse_hostnames(&text))
}

/// `<results_dir>/<input stem>_results.json`.
pub fn output_path(input: &Path, results_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "hosts".to_string());
    results_dir.join(format!("{stem}_results.json"))
}

/// Resolves every hostname, keeping input order in the output.
///
/// `progress` is called with each hostname as its resolution starts. With
/// `jobs == 1` hostnames resolve strictly one after another.
pub async fn resolve_all<F>(
    resolver: &HostResolver,
    hostnames: &[String],
    jobs: usize,
    mut progress: F,
) -> Vec<HostResolutionRecord>
where
    F: FnMut(&str),
{
    stream::iter(hostnames)
        .map(|hostname| {
            progress(hostname);
            resolver.resolve(hostname)
        })
        .buffered(jobs.max(1))
        .collect()
        .await
}

/// Writes `records` as a pretty-printed JSON array, creating the parent
/// directory if needed.
pub fn write_results(path: &Path, records: &[HostResolutionRecord]) -> Result<(), BatchError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).write_context(dir)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).write_context(path)?;
    tracing::debug!(path = %path.display(), count = records.len(), "results written");
    Ok(())
}

/// Runs the whole pipeline for `input` and returns the output path.
///
/// Prints `Processing: <hostname>` per hostname to stdout.
pub async fn run(
    config: &Config,
    resolver: &HostResolver,
    input: &Path,
) -> Result<PathBuf, BatchError> {
    let hostnames = read_hostnames(input)?;
    tracing::info!(input = %input.display(), count = hostnames.len(), "hostnames loaded");

    let records = resolve_all(resolver, &hostnames, config.effective_jobs(), |hostname| {
        println!("Processing: {hostname}");
    })
    .await;

    let output = output_path(input, &config.results_dir);
    write_results(&output, &records)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hostnames_trims_and_skips_blanks() {
        let hostnames = parse_hostnames("  localhost \n\n8.8.8.8\r\n   \nlocalhost\n");
        assert_eq!(hostnames, ["localhost", "8.8.8.8", "localhost"]);
    }

    #[test]
    fn test_parse_hostnames_no_comment_syntax() {
        let hostnames = parse_hostnames("# not a comment\nexample.com");
        assert_eq!(hostnames, ["# not a comment", "example.com"]);
    }

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("lists/servers.txt"), Path::new("results"));
        assert_eq!(path, Path::new("results/servers_results.json"));

        let path = output_path(Path::new("hosts"), Path::new("/tmp/out"));
        assert_eq!(path, Path::new("/tmp/out/hosts_results.json"));
    }

    #[test]
    fn test_read_hostnames_missing_file() {
        let err = read_hostnames(Path::new("definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, BatchError::InputNotFound(_)));
        assert_eq!(err.to_string(), "File 'definitely/not/here.txt' not found");
    }

    #[test]
    fn test_write_results_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/results/empty_results.json");

        write_results(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }
}
