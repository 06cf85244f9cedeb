use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use std::fs::write;
use std::sync::{Arc, Mutex};
use tempfile::{tempdir, NamedTempFile, TempDir};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, Layer, Registry};

fn write_config(config: serde_json::Value) -> NamedTempFile {
    let file = NamedTempFile::new().expect("Creating temp config file failed");
    write(file.path(), config.to_string()).expect("Writing temp config failed");
    file
}

/// Runs the binary from an empty directory so no `.env` file or ambient key leaks in.
fn sync_command(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("outline-sync").expect("Binary exists");
    cmd.current_dir(workdir.path()).env_remove("OUTLINE_API_KEY");
    cmd
}

#[test]
fn sync_cli_happy_flow_reports_document_title() {
    let mut server = Server::new();
    let _source = server
        .mock("GET", "/notes.md")
        .with_status(200)
        .with_body("# Release Notes")
        .create();
    let update = server
        .mock("POST", "/api/documents.update")
        .match_header("authorization", "Bearer ol_api_cli")
        .match_body(Matcher::PartialJson(json!({"id": "abc123", "append": true})))
        .with_body(json!({"status": 200, "data": {"title": "Release Notes"}}).to_string())
        .expect(1)
        .create();

    let config = write_config(json!({
        "outline_api": "ol_api_cli",
        "data": [{
            "source": format!("{}/notes.md", server.url()),
            "destination": format!("{}/doc/team/abc123", server.url())
        }]
    }));

    let workdir = tempdir().unwrap();
    sync_command(&workdir)
        .arg("-f")
        .arg(config.path())
        .arg("--append")
        .assert()
        .success()
        .stdout(predicate::str::contains("Release Notes"))
        .stdout(predicate::str::contains("1 published, 0 skipped"));
    update.assert();
}

#[test]
fn sync_cli_api_error_exits_non_zero_with_message_and_status() {
    let mut server = Server::new();
    let _source = server
        .mock("GET", "/notes.md")
        .with_status(200)
        .with_body("text")
        .create();
    let _update = server
        .mock("POST", "/api/documents.update")
        .with_status(403)
        .with_body(json!({"status": 403, "message": "forbidden"}).to_string())
        .create();

    let config = write_config(json!({
        "outline_api": "ol_api_cli",
        "data": [{
            "source": format!("{}/notes.md", server.url()),
            "destination": format!("{}/doc/abc123", server.url())
        }]
    }));

    let workdir = tempdir().unwrap();
    sync_command(&workdir)
        .arg("--file")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("[ERROR]: forbidden"))
        .stderr(predicate::str::contains("Returned with status code 403"));
}

#[test]
fn sync_cli_skipped_entry_still_succeeds() {
    let mut server = Server::new();
    let _source = server.mock("GET", "/gone.md").with_status(404).create();

    let config = write_config(json!({
        "outline_api": "ol_api_cli",
        "data": [{
            "source": format!("{}/gone.md", server.url()),
            "destination": format!("{}/doc/abc123", server.url())
        }]
    }));

    let workdir = tempdir().unwrap();
    sync_command(&workdir)
        .arg("-f")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 published, 1 skipped"))
        .stderr(predicate::str::contains("HTTP 404"));
}

#[test]
fn sync_cli_fails_for_missing_config_file() {
    let workdir = tempdir().unwrap();
    sync_command(&workdir)
        .arg("-f")
        .arg("does-not-exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn sync_cli_fails_without_credential() {
    let config = write_config(json!({ "outline_api": "", "data": [] }));
    let workdir = tempdir().unwrap();
    sync_command(&workdir)
        .arg("-f")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Outline API key"));
}

#[test]
fn sync_cli_reads_credential_from_dotenv_in_working_directory() {
    let workdir = tempdir().unwrap();
    write(workdir.path().join(".env"), "OUTLINE_API_KEY=from-dotenv\n").unwrap();
    let config = write_config(json!({ "data": [] }));

    sync_command(&workdir)
        .arg("-f")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 published, 0 skipped"));
}

#[test]
fn sync_cli_requires_file_flag() {
    let workdir = tempdir().unwrap();
    sync_command(&workdir).assert().failure();
}

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.events.lock().unwrap().push(format!("{:?}", event));
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

    use outline_sync::cli::{run, Cli};

    let cli = Cli {
        file: std::path::PathBuf::from("dummy.json"),
        append: false,
    };

    let result = run(cli).await;
    assert!(result.is_err(), "dummy config path should not load");

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
