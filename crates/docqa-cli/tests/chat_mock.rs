use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_pdf(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"%PDF-1.4 fixture").unwrap();
    path
}

#[tokio::test]
async fn test_chat_upload_ask_reset_script() {
    let mock_server = MockServer::start().await;
    let home = tempdir().unwrap();
    let a = write_pdf(home.path(), "a.pdf");
    let b = write_pdf(home.path(), "b.pdf");

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "ok",
            "session_id": "S1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(serde_json::json!({
            "question": "What is X?",
            "session_id": "S1"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "answer": "X is Y" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/reset"))
        .and(body_json(serde_json::json!({ "session_id": "S1" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "done" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let script = format!(
        "/select {} {}\n/upload\nWhat is X?\n/reset\n/yes\n/status\n",
        a.display(),
        b.display()
    );

    cargo_bin_cmd!("docqa")
        .env("DOCQA_HOME", home.path())
        .args(["--server", &mock_server.uri()])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected: a.pdf, b.pdf"))
        .stdout(predicate::str::contains("Bot: Uploaded: a.pdf, b.pdf"))
        .stdout(predicate::str::contains("You: What is X?"))
        .stdout(predicate::str::contains("Bot: X is Y"))
        .stdout(predicate::str::contains("Reset the session?"))
        .stdout(predicate::str::contains(
            "Bot: Session reset. All uploaded documents and history have been cleared.",
        ))
        .stdout(predicate::str::contains("Session: none"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_chat_validation_messages_without_server() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("docqa")
        .env("DOCQA_HOME", home.path())
        .args(["--server", "http://127.0.0.1:9"])
        .write_stdin("/upload\n   \n/select notes.txt\n/bogus\n:q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: Please select at least one PDF file",
        ))
        .stdout(predicate::str::contains("Error: Please enter a question"))
        .stdout(predicate::str::contains("Skipped (not a PDF): notes.txt"))
        .stdout(predicate::str::contains("Unknown command: /bogus"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_chat_reset_without_session_is_local() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("docqa")
        .env("DOCQA_HOME", home.path())
        .args(["--server", "http://127.0.0.1:9"])
        .write_stdin("/reset\n/no\n/reset\n/yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset cancelled."))
        .stdout(predicate::str::contains("Bot: Session reset."))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[tokio::test]
async fn test_chat_failed_ask_can_be_retried() {
    let mock_server = MockServer::start().await;
    let home = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "detail": "Model overloaded" })),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(serde_json::json!({ "question": "Why?" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "answer": "Because." })),
        )
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("docqa")
        .env("DOCQA_HOME", home.path())
        .args(["--server", &mock_server.uri()])
        .write_stdin("Why?\n/retry\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Model overloaded"))
        .stdout(predicate::str::contains("You: Why?"))
        .stdout(predicate::str::contains("Bot: Because."));
}
