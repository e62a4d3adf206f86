//! Source resolution: obtain the index module text, local copy first.
//!
//! Resolution is an ordered list of [`SourceLocation`]s. Each is tried once;
//! the first that yields text wins and nothing after it runs. If all fail the
//! run fails with [`SyncError::SourceUnavailable`] wrapping the last error.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::SourceConfig;
use crate::contract::SourceFetcher;
use crate::error::SyncError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Local(PathBuf),
    Remote(String),
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLocation::Local(path) => write!(f, "{}", path.display()),
            SourceLocation::Remote(url) => f.write_str(url),
        }
    }
}

/// Text of the module description and where it came from.
#[derive(Debug, Clone)]
pub struct ResolvedSource {
    pub origin: SourceLocation,
    pub text: String,
}

pub struct SourceResolver<'f, F: SourceFetcher> {
    locations: Vec<SourceLocation>,
    fetcher: &'f F,
}

impl<'f, F: SourceFetcher> SourceResolver<'f, F> {
    pub fn new(locations: Vec<SourceLocation>, fetcher: &'f F) -> Self {
        Self { locations, fetcher }
    }

    /// Local path (if configured) followed by remote URL (if configured).
    pub fn from_config(config: &SourceConfig, fetcher: &'f F) -> Self {
        let mut locations = Vec::new();
        if let Some(path) = &config.local_path {
            locations.push(SourceLocation::Local(path.clone()));
        }
        if let Some(url) = &config.remote_url {
            locations.push(SourceLocation::Remote(url.clone()));
        }
        Self::new(locations, fetcher)
    }

    pub fn locations(&self) -> &[SourceLocation] {
        &self.locations
    }

    pub async fn resolve(&self) -> Result<ResolvedSource, SyncError> {
        if self.locations.is_empty() {
            return Err(SyncError::NoSourceConfigured);
        }
        let mut last = None;

        for location in &self.locations {
            match self.attempt(location).await {
                Ok(text) => {
                    info!(origin = %location, bytes = text.len(), "Resolved source");
                    return Ok(ResolvedSource {
                        origin: location.clone(),
                        text,
                    });
                }
                Err(e) => {
                    warn!(origin = %location, error = %e, "Source attempt failed");
                    last = Some(e);
                }
            }
        }

        match last {
            Some(last) => Err(SyncError::SourceUnavailable {
                attempts: self.locations.len(),
                last: Box::new(last),
            }),
            None => Err(SyncError::NoSourceConfigured),
        }
    }

    async fn attempt(&self, location: &SourceLocation) -> Result<String, SyncError> {
        match location {
            SourceLocation::Local(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| SyncError::LocalRead {
                        path: path.clone(),
                        source,
                    })
            }
            SourceLocation::Remote(url) => self.fetcher.fetch(url).await,
        }
    }
}

/// [`SourceFetcher`] over plain HTTP GET.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("compdocs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| SyncError::RemoteTransport {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SyncError> {
        info!(url = %url, "Fetching remote source");
        let transport = |source| SyncError::RemoteTransport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::RemoteStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(transport)
    }
}
