//! # contract: collaborator interfaces of the pipeline
//!
//! The pipeline reaches the outside world through the filesystem and through
//! one remote call: fetching the index module when no local copy exists. That
//! remote call sits behind [`SourceFetcher`] so the driver can be exercised
//! against a mock (`MockSourceFetcher`) that counts and scripts attempts.
//!
//! ## Implementors
//! - [`crate::download::HttpFetcher`]: plain HTTP GET via `reqwest`.
//! - `MockSourceFetcher`: generated by `mockall` under `cfg(test)` or the
//!   `test-export-mocks` feature.

use async_trait::async_trait;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::SyncError;

/// Fetches the raw text behind a URL.
///
/// Implementations must report a non-success status as
/// [`SyncError::RemoteStatus`] carrying the URL and the status code, and must
/// not retry.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, SyncError>;
}
