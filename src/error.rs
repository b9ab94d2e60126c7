// src/error.rs
// =============================================================================
// Errors that stop a whole run.
//
// Per-link and per-query failures never show up here: they are turned into
// CheckResult values (checker/http.rs) or collected warnings
// (github/discover.rs). Only problems with the run itself end the process.
// =============================================================================

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardianError {
    /// The markdown document to scan does not exist
    #[error("{} not found!", .0.display())]
    MissingInput(PathBuf),

    /// The document exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A generated report could not be written
    #[error("failed to write report {}: {source}", path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be constructed (TLS backend, bad header)
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Reads the input document, distinguishing "missing" from "unreadable".
pub fn read_input(path: &Path) -> Result<String, GuardianError> {
    if !path.exists() {
        return Err(GuardianError::MissingInput(path.to_path_buf()));
    }

    std::fs::read_to_string(path).map_err(|source| GuardianError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");

        let err = read_input(&path).unwrap_err();
        assert!(matches!(err, GuardianError::MissingInput(_)));
        assert!(err.to_string().ends_with("README.md not found!"));
    }

    #[test]
    fn test_reads_existing_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "# Awesome").unwrap();

        assert_eq!(read_input(&path).unwrap(), "# Awesome");
    }
}
