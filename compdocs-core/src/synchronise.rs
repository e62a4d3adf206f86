//! High-level pipeline: orchestrates resolve → extract → render → manifest → reconcile.
//!
//! One call to [`synchronise`] processes one snapshot of the library's index
//! module to completion:
//!   - Resolves the module text (local path first, remote URL as fallback)
//!   - Extracts the sorted component names it forwards
//!   - Renders one page per component, plus the section landing page
//!   - Reconciles the section directory so its managed files match exactly
//!   - Writes the section manifest (landing page, surviving preserved pages,
//!     generated pages) and, optionally, the docs-root manifest
//!
//! # Error Handling
//! Fail-fast. A source failure returns before anything is written; a write or
//! delete failure returns immediately and leaves earlier writes in place.
//!
//! # Ordering
//! All pages are rendered before the reconciler starts, so nothing still being
//! rendered can be classified as stale.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use crate::config::{IndexMode, SynchroniseConfig};
use crate::contract::SourceFetcher;
use crate::download::{SourceLocation, SourceResolver};
use crate::error::SyncError;
use crate::extract::extract_component_names;
use crate::manifest::{ManifestDescriptor, INDEX_SLUG};
use crate::reconcile::{DesiredFile, Reconciler};
use crate::render::{render_index, PageRenderer, PageSpec};

/// Outcome of a successful run.
#[derive(Debug)]
pub struct SynchroniseReport {
    pub origin: SourceLocation,
    /// Export names documented this run, in manifest order.
    pub components: Vec<String>,
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub removed: Vec<String>,
    pub collisions: Vec<SlugCollision>,
}

impl SynchroniseReport {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

/// A slug claimed by more than one page. Either two or more export names
/// derive it, or a single export derives a reserved slug (`index` or a
/// preserved page). Only one of the clashing pages survives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCollision {
    pub slug: String,
    pub export_names: Vec<String>,
    /// The slug also names the landing page or a preserved page.
    pub reserved: bool,
}

/// Renders every page for `names`. Pure; touches no filesystem.
pub fn render_pages(config: &SynchroniseConfig, names: &[String]) -> Vec<PageSpec> {
    let renderer = PageRenderer::new(&config.library, &config.metadata);
    names.iter().map(|name| renderer.render_page(name)).collect()
}

/// Slugs that generated component pages must not take.
pub fn reserved_slugs(config: &SynchroniseConfig) -> BTreeSet<String> {
    let mut reserved = config.preserve.clone();
    reserved.insert(INDEX_SLUG.to_string());
    reserved
}

/// Groups pages sharing a slug with each other or with a reserved slug.
/// Empty when every slug is unique and unreserved.
pub fn detect_collisions(pages: &[PageSpec], reserved: &BTreeSet<String>) -> Vec<SlugCollision> {
    let mut by_slug: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for page in pages {
        by_slug
            .entry(page.slug.as_str())
            .or_default()
            .push(page.export_name.clone());
    }
    by_slug
        .into_iter()
        .filter_map(|(slug, export_names)| {
            let reserved = reserved.contains(slug);
            (reserved || export_names.len() > 1).then(|| SlugCollision {
                slug: slug.to_string(),
                export_names,
                reserved,
            })
        })
        .collect()
}

pub async fn synchronise<F>(
    config: &SynchroniseConfig,
    fetcher: &F,
) -> Result<SynchroniseReport, SyncError>
where
    F: SourceFetcher,
{
    info!("[SYNC] Starting component docs synchronisation");

    // --- Step 1: Resolve ---
    let resolved = SourceResolver::from_config(&config.source, fetcher)
        .resolve()
        .await?;

    // --- Step 2: Extract ---
    let components = extract_component_names(&resolved.text);
    info!(count = components.len(), origin = %resolved.origin, "[SYNC] Extracted component names");

    // --- Step 3: Render ---
    let pages = render_pages(config, &components);
    let preserved = reserved_slugs(config);
    let collisions = detect_collisions(&pages, &preserved);
    for collision in &collisions {
        warn!(
            slug = %collision.slug,
            export_names = ?collision.export_names,
            reserved = collision.reserved,
            "[SYNC] Slug collision: pages overwrite each other"
        );
    }

    let mut desired: Vec<DesiredFile> = pages
        .iter()
        .map(|page| DesiredFile {
            slug: page.slug.clone(),
            content: page.content.clone(),
        })
        .collect();

    let reconciler = Reconciler::new(config.section_dir(), config.output.extension.as_str());
    if write_landing_page(config, &reconciler).await {
        desired.push(DesiredFile {
            slug: INDEX_SLUG.to_string(),
            content: render_index(&config.library, &config.output.title, components.len()),
        });
    }

    // --- Step 4: Reconcile ---
    let reconciled = reconciler.reconcile(&desired, &preserved).await?;

    // --- Step 5: Manifest ---
    // Preserved pages that exist on disk follow `index`, then the generated pages.
    let on_disk: BTreeSet<String> = reconciler.managed_slugs().await?.into_iter().collect();
    let kept = preserved
        .iter()
        .filter(|slug| slug.as_str() != INDEX_SLUG && on_disk.contains(*slug))
        .map(String::as_str);
    let manifest = ManifestDescriptor::build(
        &config.output.title,
        kept.chain(pages.iter().map(|page| page.slug.as_str())),
    );
    manifest.write_to(reconciler.dir()).await?;

    if config.output.write_root_manifest {
        let root = ManifestDescriptor::build(
            &config.output.root_title,
            [config.output.section.as_str()],
        );
        root.write_to(&config.output.docs_root).await?;
    }

    let report = SynchroniseReport {
        origin: resolved.origin,
        components,
        created: reconciled.created,
        updated: reconciled.updated,
        removed: reconciled.removed,
        collisions,
    };
    info!(
        components = report.component_count(),
        created = report.created.len(),
        updated = report.updated.len(),
        removed = report.removed.len(),
        collisions = report.collisions.len(),
        "[SYNC] Synchronisation complete"
    );
    Ok(report)
}

/// Whether the generated landing page is written this run. In preserve mode
/// it is only written when no `index` page exists yet, so the manifest's
/// leading entry always has a file behind it.
async fn write_landing_page(config: &SynchroniseConfig, reconciler: &Reconciler) -> bool {
    match config.output.index {
        IndexMode::Generate => true,
        IndexMode::Preserve => {
            let path = reconciler.file_path(INDEX_SLUG);
            match tokio::fs::try_exists(&path).await {
                Ok(true) => false,
                Ok(false) => {
                    info!(path = %path.display(), "[SYNC] No landing page to preserve, generating one");
                    true
                }
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "[SYNC] Could not check landing page, generating one");
                    true
                }
            }
        }
    }
}
