//! Repository fetch layer
//!
//! Ensures a local working copy of the upstream repository exists, cloning it
//! with git2-rs when the destination directory is absent. Existence of the
//! directory is the skip condition: a pre-existing directory is never
//! re-cloned, even when it does not look like a repository (that case is
//! logged as a warning so a leftover partial clone is visible to the
//! operator).

use git2::Repository;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while fetching the repository
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to clone '{url}' into '{dest}': {source}")]
    Clone {
        url: String,
        dest: String,
        source: git2::Error,
    },

    #[error("Destination path '{0}' exists but is not a directory")]
    DestinationNotADirectory(String),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// What the fetch actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The repository was cloned into the destination
    Cloned,
    /// The destination already existed, so no clone was attempted
    AlreadyPresent,
}

impl std::fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchOutcome::Cloned => write!(f, "cloned"),
            FetchOutcome::AlreadyPresent => write!(f, "already present"),
        }
    }
}

/// Clone `url` into `destination` unless the destination already exists.
///
/// A full clone is performed; there is no depth limit and no retry. The
/// returned outcome says whether a clone happened, so callers can report it.
pub fn fetch_repository(url: &str, destination: impl AsRef<Path>) -> FetchResult<FetchOutcome> {
    let dest = destination.as_ref();

    if dest.exists() {
        if !dest.is_dir() {
            return Err(FetchError::DestinationNotADirectory(
                dest.display().to_string(),
            ));
        }

        if Repository::open(dest).is_err() {
            warn!(
                path = %dest.display(),
                "destination exists but does not contain a git repository; skipping clone anyway"
            );
        }

        println!("Checkstyle repository already cloned.");
        return Ok(FetchOutcome::AlreadyPresent);
    }

    println!("Cloning {} into {}...", url, dest.display());
    debug!(url, dest = %dest.display(), "starting clone");

    Repository::clone(url, dest).map_err(|source| FetchError::Clone {
        url: url.to_string(),
        dest: dest.display().to_string(),
        source,
    })?;

    debug!(dest = %dest.display(), "clone finished");
    Ok(FetchOutcome::Cloned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_outcome_display() {
        assert_eq!(FetchOutcome::Cloned.to_string(), "cloned");
        assert_eq!(FetchOutcome::AlreadyPresent.to_string(), "already present");
    }

    #[test]
    fn test_fetch_error_display() {
        let error = FetchError::DestinationNotADirectory("/tmp/somewhere".to_string());
        assert!(error.to_string().contains("/tmp/somewhere"));
        assert!(error.to_string().contains("not a directory"));
    }

    #[test]
    fn test_existing_file_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = fetch_repository("https://example.com/repo.git", file.path());
        assert!(matches!(
            result,
            Err(FetchError::DestinationNotADirectory(_))
        ));
    }

    #[test]
    fn test_existing_directory_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        // The URL is unreachable on purpose: if a clone were attempted this
        // test would fail rather than silently hit the network.
        let outcome = fetch_repository("https://invalid.invalid/repo.git", dir.path()).unwrap();
        assert_eq!(outcome, FetchOutcome::AlreadyPresent);
    }
}
