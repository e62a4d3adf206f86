use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SyncError;

/// Navigation file name the docs site reads in every managed directory.
pub const MANIFEST_FILE: &str = "meta.json";

/// Slug of the landing page that always leads the page list.
pub const INDEX_SLUG: &str = "index";

/// Navigation descriptor for one directory. Regenerated in full every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDescriptor {
    pub title: String,
    pub pages: Vec<String>,
}

impl ManifestDescriptor {
    /// `index` followed by `slugs` in the order given. Ordering is decided
    /// upstream; a slug already listed is not repeated.
    pub fn build<I, S>(title: &str, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pages = vec![INDEX_SLUG.to_string()];
        for slug in slugs {
            let slug = slug.into();
            if !pages.contains(&slug) {
                pages.push(slug);
            }
        }
        Self {
            title: title.to_string(),
            pages,
        }
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String, SyncError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub async fn write_to(&self, dir: &Path) -> Result<(), SyncError> {
        let path = dir.join(MANIFEST_FILE);
        let json = self.to_json()?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|source| SyncError::WriteFile {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), pages = self.pages.len(), "Wrote manifest");
        Ok(())
    }
}
