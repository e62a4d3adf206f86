///
/// This module implements the CLI for compdocs: command parsing, config
/// loading and the user-visible summary lines.
///
/// All pipeline logic lives in the [`compdocs-core`] crate. This module only
/// wires configuration, the HTTP fetcher and the driver together.
///
/// ## How To Use
/// - From a shell: `compdocs sync --config docs.yaml`.
/// - Programmatically or from tests: call [`run`] with a constructed [`Cli`].
///
/// [`compdocs-core`]: ../../compdocs-core/
use crate::load_config::load_config;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use compdocs_core::download::{HttpFetcher, SourceResolver};
use compdocs_core::extract::extract_component_names;
use compdocs_core::slug::to_slug;
use compdocs_core::synchronise::synchronise;
use std::path::PathBuf;

/// CLI for compdocs: regenerate component reference pages from a library's exports.
#[derive(Parser)]
#[clap(
    name = "compdocs",
    version,
    about = "Generate and synchronise component reference pages from a UI library's export list"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Regenerate the component pages and manifests under the docs root
    Sync {
        /// Path to the YAML config file; defaults apply when omitted
        #[clap(long)]
        config: Option<PathBuf>,
        /// Docs root directory, overriding config and environment
        #[clap(long)]
        docs_root: Option<PathBuf>,
    },
    /// Print the documentable exports and their slugs without writing anything
    List {
        /// Path to the YAML config file; defaults apply when omitted
        #[clap(long)]
        config: Option<PathBuf>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Sync { config, docs_root } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(root) = docs_root {
                config.output.docs_root = root;
            }
            config.trace_loaded();

            tracing::info!(command = "sync", "Starting synchronisation");
            let fetcher = HttpFetcher::new().context("Failed to build HTTP client")?;
            match synchronise(&config, &fetcher).await {
                Ok(report) => {
                    tracing::info!(command = "sync", ?report, "Synchronisation complete");
                    for collision in &report.collisions {
                        let owners = collision.export_names.join(", ");
                        if collision.reserved {
                            eprintln!(
                                "[WARN] slug '{}' of {owners} is reserved for a landing or preserved page",
                                collision.slug
                            );
                        } else {
                            eprintln!(
                                "[WARN] slug '{}' is shared by {owners}; only one page was kept",
                                collision.slug
                            );
                        }
                    }
                    println!(
                        "Generated docs for {} components.",
                        report.component_count()
                    );
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "sync", error = %e, "Synchronisation failed");
                    Err(anyhow::Error::new(e).context("Synchronisation failed"))
                }
            }
        }
        Commands::List { config } => {
            let config = load_config(config.as_deref())?;
            let fetcher = HttpFetcher::new().context("Failed to build HTTP client")?;
            let resolved = SourceResolver::from_config(&config.source, &fetcher)
                .resolve()
                .await
                .context("Failed to resolve source")?;
            for name in extract_component_names(&resolved.text) {
                println!("{name}\t{}", to_slug(&name));
            }
            Ok(())
        }
    }
}
