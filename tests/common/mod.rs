//! Shared test infrastructure for integration tests.
//!
//! Provides a canned Suggestion Service on a local port and a runner for
//! the compiled binary against a temp store.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Output};
use std::thread;

/// Start a mock Suggestion Service; returns its base URL. The server thread
/// lives until the test process exits.
pub fn start_mock_suggest_service() -> String {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock suggestion service");
    let port = server
        .server_addr()
        .to_ip()
        .expect("mock server addr")
        .port();
    thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let envelope = serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": canned_content(&body)}}]
            });
            let response = tiny_http::Response::from_string(envelope.to_string()).with_header(
                tiny_http::Header::from_bytes("Content-Type", "application/json").expect("header"),
            );
            let _ = request.respond(response);
        }
    });
    format!("http://127.0.0.1:{port}")
}

/// Pick a reply by prompt content, mirroring the known top-level keys.
fn canned_content(body: &str) -> String {
    if body.contains("clarifying") {
        // one duration question that the client must filter out
        r#"{"questions": [
            {"label": "Any constraints?", "type": "text", "field_name": "constraints"},
            {"label": "Preferred tone?", "type": "text", "field_name": "tone"},
            {"label": "How long should the campaign run?", "type": "text", "field_name": "duration"}
        ]}"#
        .to_string()
    } else if body.contains("final plan") {
        "A focused outreach plan: lead with the goal, then the ask.".to_string()
    } else if body.contains("prompts") {
        r#"{"prompts": ["Hook one", "Hook two", "Hook three"]}"#.to_string()
    } else if body.contains("tweets") {
        r#"{"tweets": ["Tweet one", "Tweet two"]}"#.to_string()
    } else if body.contains("newsletter") {
        r#"{"emails": ["Email one", "Email two", "Email three"]}"#.to_string()
    } else {
        r#"{"suggestions": [
            {"text": "Spring Fund Drive", "tier": "Realistic", "explanation": "Seasonal and clear."}
        ]}"#
        .to_string()
    }
}

/// Run the binary against the given store root and Suggestion Service.
pub fn run_outreach(data_dir: &Path, suggest_url: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_outreach"))
        .args(args)
        .env("OUTREACH_DATA_DIR", data_dir)
        .env("OUTREACH_SUGGEST_URL", suggest_url)
        .env("OUTREACH_SUGGEST_MODEL", "test-model")
        .output()
        .expect("run outreach binary")
}

pub fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{what} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Load a campaign record straight from the store for assertions.
pub fn load_record(data_dir: &Path, id: &str) -> serde_json::Value {
    let path = data_dir.join("campaigns").join(format!("{id}.json"));
    let bytes = std::fs::read(&path).expect("read campaign record");
    serde_json::from_slice(&bytes).expect("parse campaign record")
}
