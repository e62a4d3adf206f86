use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::render::MetadataTable;

const DEFAULT_LOCAL_PATH: &str = "../kami/src/index.ts";
const DEFAULT_REMOTE_URL: &str = "https://raw.githubusercontent.com/jlgrimes/kami/main/src/index.ts";

/// Everything one synchronisation run needs. Every field has a default, so an
/// empty YAML document is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SynchroniseConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub library: LibraryConfig,
    /// Curated per-component enrichment, keyed by export name.
    pub metadata: MetadataTable,
    /// Slugs in the component section that are never deleted, beyond `index`.
    pub preserve: BTreeSet<String>,
}

impl SynchroniseConfig {
    pub fn trace_loaded(&self) {
        info!(
            local_path = ?self.source.local_path,
            remote_url = self.source.remote_url.as_deref().unwrap_or("<none>"),
            docs_root = %self.output.docs_root.display(),
            section = %self.output.section,
            metadata_entries = self.metadata.len(),
            "Loaded SynchroniseConfig"
        );
        debug!(?self, "SynchroniseConfig loaded (full debug)");
    }

    /// Directory that holds the generated component pages.
    pub fn section_dir(&self) -> PathBuf {
        self.output.docs_root.join(&self.output.section)
    }
}

/// Where the module description comes from. Attempts run local first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub local_path: Option<PathBuf>,
    pub remote_url: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            local_path: Some(PathBuf::from(DEFAULT_LOCAL_PATH)),
            remote_url: Some(DEFAULT_REMOTE_URL.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub docs_root: PathBuf,
    /// Sub-directory of `docs_root` owned by the generator.
    pub section: String,
    /// Managed file extension, without the dot.
    pub extension: String,
    pub title: String,
    pub root_title: String,
    pub write_root_manifest: bool,
    pub index: IndexMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            docs_root: PathBuf::from("content/docs"),
            section: "components".to_string(),
            extension: "mdx".to_string(),
            title: "Components".to_string(),
            root_title: "Kami Docs".to_string(),
            write_root_manifest: true,
            index: IndexMode::Generate,
        }
    }
}

/// How the section's landing page is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    /// Rewrite `index.<ext>` every run with the component count.
    #[default]
    Generate,
    /// Leave a hand-written `index.<ext>` alone.
    Preserve,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Display name used in prose.
    pub name: String,
    /// Published package path used in import samples.
    pub package: String,
    /// Module the preview placeholder is imported from.
    pub preview_import: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            name: "Kami".to_string(),
            package: "@jlgrimes/kami".to_string(),
            preview_import: "@/components/component-preview".to_string(),
        }
    }
}
