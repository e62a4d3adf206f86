use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, write};
use tempfile::{tempdir, TempDir};

/// Writes an index module and a config pointing at it; returns (tmp, config path).
fn create_config(index_source: Option<&str>, remote_url: &str) -> (TempDir, std::path::PathBuf) {
    let tmp = tempdir().expect("Creating temp dir failed");
    let index = tmp.path().join("index.ts");
    if let Some(text) = index_source {
        write(&index, text).expect("Writing index failed");
    }
    let docs = tmp.path().join("docs");
    let config = tmp.path().join("compdocs.yaml");
    let yaml = format!(
        "source:\n  local_path: \"{}\"\n  remote_url: \"{}\"\noutput:\n  docs_root: \"{}\"\n",
        index.display(),
        remote_url,
        docs.display()
    );
    write(&config, yaml).expect("Writing temp config failed");
    (tmp, config)
}

fn command() -> Command {
    let mut cmd = Command::cargo_bin("compdocs").expect("Binary exists");
    cmd.env_remove("COMPDOCS_LOCAL_PATH")
        .env_remove("COMPDOCS_REMOTE_URL")
        .env_remove("COMPDOCS_DOCS_ROOT");
    cmd
}

#[test]
fn sync_cli_happy_flow_prints_summary() {
    let (tmp, config) = create_config(
        Some("export { Button, Input as TextInput, ButtonProps } from './x';"),
        "http://127.0.0.1:9/index.ts",
    );

    command()
        .arg("sync")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated docs for 2 components."));

    let section = tmp.path().join("docs").join("components");
    assert!(section.join("button.mdx").is_file());
    assert!(section.join("input.mdx").is_file());
    assert!(section.join("meta.json").is_file());
}

#[test]
fn sync_cli_docs_root_flag_overrides_config() {
    let (tmp, config) = create_config(
        Some("export { Card } from './card';"),
        "http://127.0.0.1:9/index.ts",
    );
    let elsewhere = tmp.path().join("site");

    command()
        .arg("sync")
        .arg("--config")
        .arg(&config)
        .arg("--docs-root")
        .arg(&elsewhere)
        .assert()
        .success();

    assert!(elsewhere.join("components").join("card.mdx").is_file());
    assert!(!tmp.path().join("docs").exists());
}

#[test]
fn sync_cli_fails_when_no_source_is_available() {
    // Port 9 (discard) is not listening: the fallback fetch fails at transport level.
    let url = "http://127.0.0.1:9/index.ts";
    let (tmp, config) = create_config(None, url);

    command()
        .arg("sync")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains(url));

    assert!(!tmp.path().join("docs").exists());
}

#[test]
fn sync_cli_fails_on_invalid_config() {
    let tmp = tempdir().unwrap();
    let config = tmp.path().join("broken.yaml");
    fs::write(&config, "source: [:::").unwrap();

    command()
        .arg("sync")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse"));
}

#[test]
fn list_cli_prints_names_and_slugs() {
    let (_tmp, config) = create_config(
        Some("export { BottomSheet, TabBar } from './nav';"),
        "http://127.0.0.1:9/index.ts",
    );

    command()
        .arg("list")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::eq("BottomSheet\tbottom-sheet\nTabBar\ttab-bar\n"));
}

use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*; // needed for .with()
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let msg = format!("{:?}", event);
        self.events.lock().unwrap().push(msg);
    }
}

#[tokio::test]
async fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use compdocs::cli::{run, Cli, Commands};

    // A config path that does not exist: run fails, but only after tracing starts.
    let cli = Cli {
        command: Commands::Sync {
            config: Some(std::path::PathBuf::from("does-not-exist.yaml")),
            docs_root: None,
        },
    };

    let result = run(cli).await;
    assert!(result.is_err());

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
