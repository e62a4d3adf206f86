use compdocs::load_config::{load_config, ENV_DOCS_ROOT, ENV_LOCAL_PATH, ENV_REMOTE_URL};
use compdocs_core::config::IndexMode;
use serial_test::serial;
use std::env;
use std::fs::write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn clear_env() {
    env::remove_var(ENV_LOCAL_PATH);
    env::remove_var(ENV_REMOTE_URL);
    env::remove_var(ENV_DOCS_ROOT);
}

/// A full config file maps every section onto the core config.
#[test]
#[serial]
fn test_load_config_full_file() {
    clear_env();
    let config_yaml = r#"
source:
  local_path: ../ui/src/index.ts
  remote_url: https://example.com/ui/index.ts
output:
  docs_root: site/content
  section: widgets
  extension: md
  title: Widgets
  root_title: UI Docs
  write_root_manifest: false
  index: preserve
library:
  name: Acme
  package: "@acme/ui"
  preview_import: "@/preview"
preserve:
  - getting-started
metadata:
  Button:
    used_for: Primary actions.
    features:
      - Sizes
      - Variants
    example: "<Button>Go</Button>"
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = load_config(Some(config_file.path())).expect("Config should load");

    assert_eq!(
        config.source.local_path,
        Some(PathBuf::from("../ui/src/index.ts"))
    );
    assert_eq!(
        config.source.remote_url.as_deref(),
        Some("https://example.com/ui/index.ts")
    );
    assert_eq!(config.output.docs_root, PathBuf::from("site/content"));
    assert_eq!(config.section_dir(), PathBuf::from("site/content/widgets"));
    assert_eq!(config.output.extension, "md");
    assert_eq!(config.output.index, IndexMode::Preserve);
    assert!(!config.output.write_root_manifest);
    assert_eq!(config.library.package, "@acme/ui");
    assert!(config.preserve.contains("getting-started"));
    let button = &config.metadata["Button"];
    assert_eq!(button.used_for, "Primary actions.");
    assert_eq!(button.features, vec!["Sizes", "Variants"]);
}

/// Missing keys keep the defaults.
#[test]
#[serial]
fn test_load_config_partial_file_keeps_defaults() {
    clear_env();
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "output:\n  title: Parts\n").unwrap();

    let config = load_config(Some(config_file.path())).unwrap();

    assert_eq!(config.output.title, "Parts");
    assert_eq!(config.output.section, "components");
    assert_eq!(config.output.extension, "mdx");
    assert_eq!(config.output.index, IndexMode::Generate);
    assert_eq!(config.library.name, "Kami");
    assert!(config.source.local_path.is_some());
    assert!(config.source.remote_url.is_some());
    assert!(config.metadata.is_empty());
}

#[test]
#[serial]
fn test_load_config_empty_file_and_no_file_are_defaults() {
    clear_env();
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "").unwrap();

    let from_empty = load_config(Some(config_file.path())).unwrap();
    let from_none = load_config(None).unwrap();

    assert_eq!(from_empty.output.docs_root, PathBuf::from("content/docs"));
    assert_eq!(from_none.output.docs_root, PathBuf::from("content/docs"));
    assert_eq!(from_empty.source.remote_url, from_none.source.remote_url);
}

#[test]
#[serial]
fn test_load_config_env_overrides() {
    clear_env();
    env::set_var(ENV_LOCAL_PATH, "");
    env::set_var(ENV_REMOTE_URL, "https://mirror.example.com/index.ts");
    env::set_var(ENV_DOCS_ROOT, "/tmp/docs");

    let config = load_config(None).unwrap();
    clear_env();

    assert_eq!(config.source.local_path, None);
    assert_eq!(
        config.source.remote_url.as_deref(),
        Some("https://mirror.example.com/index.ts")
    );
    assert_eq!(config.output.docs_root, PathBuf::from("/tmp/docs"));
}

#[test]
#[serial]
fn test_load_config_errors_for_invalid_file() {
    clear_env();
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), b"not-yaml: [:::").unwrap();

    let err = load_config(Some(config_file.path())).unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

#[test]
#[serial]
fn test_load_config_errors_for_missing_file() {
    clear_env();
    let err = load_config(Some(std::path::Path::new("no/such/compdocs.yaml"))).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
