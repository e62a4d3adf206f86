//! Directory reconciliation.
//!
//! After [`Reconciler::reconcile`] returns `Ok`, the set of `*.<ext>` files in
//! the directory is exactly the desired slugs plus the preserved slugs that
//! already existed. Files with other extensions and sub-directories are never
//! touched. A failed write or delete aborts immediately; files written before
//! the failure stay in place.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use tracing::{debug, info};

use crate::error::SyncError;

/// One file the reconciler must leave in place with exactly this content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredFile {
    pub slug: String,
    pub content: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub removed: Vec<String>,
}

pub struct Reconciler {
    dir: PathBuf,
    extension: String,
}

impl Reconciler {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_path(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{slug}.{}", self.extension))
    }

    /// Writes every desired file, then deletes every managed file whose slug is
    /// neither desired nor preserved. Writing is unconditional.
    pub async fn reconcile(
        &self,
        desired: &[DesiredFile],
        preserved: &BTreeSet<String>,
    ) -> Result<ReconcileReport, SyncError> {
        let mut report = ReconcileReport::default();

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| SyncError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;

        let mut seen = BTreeSet::new();
        for file in desired {
            let path = self.file_path(&file.slug);
            let existed = match tokio::fs::try_exists(&path).await {
                Ok(existed) => existed,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Could not check for existing page");
                    false
                }
            };
            tokio::fs::write(&path, &file.content)
                .await
                .map_err(|source| SyncError::WriteFile {
                    path: path.clone(),
                    source,
                })?;
            debug!(path = %path.display(), existed, "Wrote page");
            // A slug written twice in one run is reported once, as first seen.
            if !seen.insert(file.slug.as_str()) {
                continue;
            }
            if existed {
                report.updated.push(file.slug.clone());
            } else {
                report.created.push(file.slug.clone());
            }
        }

        let keep: BTreeSet<&str> = desired
            .iter()
            .map(|f| f.slug.as_str())
            .chain(preserved.iter().map(String::as_str))
            .collect();

        let stale: Vec<String> = self
            .managed_slugs()
            .await?
            .into_iter()
            .filter(|slug| !keep.contains(slug.as_str()))
            .collect();

        let deletions = stale.iter().map(|slug| self.remove(slug));
        try_join_all(deletions).await?;
        report.removed = stale;

        info!(
            dir = %self.dir.display(),
            created = report.created.len(),
            updated = report.updated.len(),
            removed = report.removed.len(),
            "Reconciled directory"
        );
        Ok(report)
    }

    /// Slugs of the regular files in the directory carrying the managed
    /// extension, sorted.
    pub async fn managed_slugs(&self) -> Result<Vec<String>, SyncError> {
        let read_dir_err = |source| SyncError::ReadDir {
            path: self.dir.clone(),
            source,
        };
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(read_dir_err)?;
        let suffix = format!(".{}", self.extension);
        let mut slugs = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(read_dir_err)? {
            let file_type = entry.file_type().await.map_err(read_dir_err)?;
            if !file_type.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(slug) = name.strip_suffix(&suffix) {
                slugs.push(slug.to_string());
            }
        }

        slugs.sort();
        Ok(slugs)
    }

    async fn remove(&self, slug: &str) -> Result<(), SyncError> {
        let path = self.file_path(slug);
        tokio::fs::remove_file(&path)
            .await
            .map_err(|source| SyncError::DeleteFile {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), "Removed stale page");
        Ok(())
    }
}
