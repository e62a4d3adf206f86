//! Error taxonomy for a synchronisation run.
//!
//! Every failure is fatal to the run and surfaces to the caller unchanged:
//! there are no retries anywhere in the pipeline. An index file that yields no
//! documentable names is *not* an error; it produces an empty component set.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The local copy of the module description could not be read.
    #[error("failed to read local source {path}: {source}")]
    LocalRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The remote endpoint answered with a non-success status.
    #[error("failed to fetch {url}: {status}")]
    RemoteStatus { url: String, status: u16 },

    /// The remote endpoint could not be reached or its body not decoded.
    #[error("failed to fetch {url}: {source}")]
    RemoteTransport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Every configured source location failed; `last` is the final attempt's error.
    #[error("source unavailable after {attempts} attempt(s): {last}")]
    SourceUnavailable { attempts: usize, last: Box<SyncError> },

    #[error("no source location configured")]
    NoSourceConfigured,

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete {path}: {source}")]
    DeleteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialise manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl SyncError {
    /// True for failures that happened while acquiring the module description,
    /// i.e. before anything was written.
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            SyncError::LocalRead { .. }
                | SyncError::RemoteStatus { .. }
                | SyncError::RemoteTransport { .. }
                | SyncError::SourceUnavailable { .. }
                | SyncError::NoSourceConfigured
        )
    }
}
