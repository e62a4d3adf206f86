/// `load_config` module: reads the YAML run configuration and applies environment overrides.
///
/// This is the only place where user-supplied YAML is parsed into the core
/// [`SynchroniseConfig`]. Every key is optional; missing keys keep the core
/// defaults, so running without any file reproduces the stock Kami setup.
///
/// # Environment overrides (applied after the file)
/// - `COMPDOCS_LOCAL_PATH`: local index module path
/// - `COMPDOCS_REMOTE_URL`: remote fallback URL
/// - `COMPDOCS_DOCS_ROOT`: docs root directory
///
/// An override set to the empty string disables that source attempt.
use anyhow::{Context, Result};
use compdocs_core::config::SynchroniseConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const ENV_LOCAL_PATH: &str = "COMPDOCS_LOCAL_PATH";
pub const ENV_REMOTE_URL: &str = "COMPDOCS_REMOTE_URL";
pub const ENV_DOCS_ROOT: &str = "COMPDOCS_DOCS_ROOT";

/// Loads `path` (or the defaults when `None`) and applies environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<SynchroniseConfig> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => {
            info!("No config file given, using defaults");
            SynchroniseConfig::default()
        }
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<SynchroniseConfig> {
    info!(config_path = ?path, "Loading configuration from file");

    let content = fs::read_to_string(path).map_err(|e| {
        error!(error = ?e, config_path = ?path, "Failed to read config file");
        e
    }).with_context(|| format!("Failed to read config file {}", path.display()))?;

    // An empty document deserialises to unit, not to a mapping.
    if content.trim().is_empty() {
        return Ok(SynchroniseConfig::default());
    }

    let config: SynchroniseConfig = serde_yaml::from_str(&content).map_err(|e| {
        error!(error = ?e, config_path = ?path, "Failed to parse config YAML");
        anyhow::anyhow!("Failed to parse config YAML {}: {e}", path.display())
    })?;
    info!(config_path = ?path, "Parsed config YAML successfully");
    Ok(config)
}

fn apply_env_overrides(config: &mut SynchroniseConfig) {
    if let Ok(local) = std::env::var(ENV_LOCAL_PATH) {
        info!(value = %local, "{ENV_LOCAL_PATH} override");
        config.source.local_path = (!local.is_empty()).then(|| PathBuf::from(local));
    }
    if let Ok(remote) = std::env::var(ENV_REMOTE_URL) {
        info!(value = %remote, "{ENV_REMOTE_URL} override");
        config.source.remote_url = (!remote.is_empty()).then_some(remote);
    }
    if let Ok(root) = std::env::var(ENV_DOCS_ROOT) {
        if !root.is_empty() {
            info!(value = %root, "{ENV_DOCS_ROOT} override");
            config.output.docs_root = PathBuf::from(root);
        }
    }
}
