//! End-to-end workflow runs against a mock Suggestion Service.

mod common;

use common::{assert_success, load_record, run_outreach, start_mock_suggest_service, stdout_text};
use tempfile::TempDir;

fn create_campaign(data: &TempDir, url: &str) -> String {
    let output = run_outreach(
        data.path(),
        url,
        &[
            "create",
            "--name",
            "Spring Drive",
            "--goal",
            "Raise funds",
            "--objective",
            "Hit 10k",
            "--audience",
            "Alumni",
            "--start-kind",
            "exact",
            "--start",
            "2024-01-01",
            "--end-kind",
            "exact",
            "--end",
            "2024-01-11",
        ],
    );
    assert_success(&output, "create");
    stdout_text(&output)
        .lines()
        .find_map(|line| line.strip_prefix("created campaign ").map(str::trim))
        .expect("campaign id in create output")
        .to_string()
}

#[test]
fn workflow_advances_from_create_to_analytics() {
    let data = TempDir::new().expect("data dir");
    let url = start_mock_suggest_service();
    let id = create_campaign(&data, &url);

    // the issued questions exclude the duration question from the provider
    let record = load_record(data.path(), &id);
    let fields: Vec<&str> = record["round2_questions"]
        .as_array()
        .expect("questions array")
        .iter()
        .map(|q| q["field_name"].as_str().expect("field name"))
        .collect();
    assert_eq!(fields, ["constraints", "tone"]);

    // no-info answers get the marker, informative ones stay verbatim, and
    // the plan is synthesized in the same step
    let output = run_outreach(
        data.path(),
        &url,
        &[
            "answer",
            "--campaign",
            &id,
            "constraints= IDK ",
            "tone=warm and direct",
        ],
    );
    assert_success(&output, "answer");
    let record = load_record(data.path(), &id);
    assert_eq!(
        record["round2_answers"]["constraints"],
        "IDK (Needs suggestions)"
    );
    assert_eq!(record["round2_answers"]["tone"], "warm and direct");
    assert!(record["plan"]
        .as_str()
        .expect("plan text")
        .contains("outreach plan"));

    // materials are stored by name and both channels draft from them
    let flyer = data.path().join("flyer.pdf");
    std::fs::write(&flyer, b"%PDF-").expect("write flyer");
    let output = run_outreach(
        data.path(),
        &url,
        &[
            "materials",
            "--campaign",
            &id,
            "--count",
            "3",
            flyer.to_str().expect("flyer path"),
        ],
    );
    assert_success(&output, "materials");
    let record = load_record(data.path(), &id);
    assert_eq!(record["materials"][0]["filename"], "flyer.pdf");
    let hooks: Vec<&str> = record["content_email"]
        .as_array()
        .expect("email content")
        .iter()
        .map(|h| h.as_str().expect("hook"))
        .collect();
    assert_eq!(hooks, ["Hook one", "Hook two", "Hook three"]);

    // recipients reset engagement to exactly the new set
    let output = run_outreach(
        data.path(),
        &url,
        &["recipients", "--campaign", &id, "--list", "a@x.com, b@x.com"],
    );
    assert_success(&output, "recipients");
    let record = load_record(data.path(), &id);
    let engagement = record["engagement"].as_object().expect("engagement map");
    assert_eq!(engagement.len(), 2);
    assert_eq!(engagement["a@x.com"]["opened"], false);
    assert_eq!(engagement["b@x.com"]["clicked"], false);

    // tracking links embed the campaign id and the encoded recipient
    let output = run_outreach(
        data.path(),
        &url,
        &[
            "links",
            "--campaign",
            &id,
            "--base-url",
            "http://example.org",
        ],
    );
    assert_success(&output, "links");
    let text = stdout_text(&output);
    assert!(text.contains(&format!("http://example.org/track/open/{id}/a%40x.com")));
    assert!(text.contains(&format!("http://example.org/track/click/{id}/b%40x.com")));

    // regeneration replaces the social batch from the campaign context
    let output = run_outreach(
        data.path(),
        &url,
        &["generate", "--campaign", &id, "--channel", "social"],
    );
    assert_success(&output, "generate");
    let record = load_record(data.path(), &id);
    let tweets: Vec<&str> = record["content_social"]
        .as_array()
        .expect("social content")
        .iter()
        .map(|t| t.as_str().expect("tweet"))
        .collect();
    assert_eq!(tweets, ["Tweet one", "Tweet two"]);

    // analytics aggregates current state
    let output = run_outreach(data.path(), &url, &["analytics", "--json"]);
    assert_success(&output, "analytics");
    let summary: serde_json::Value =
        serde_json::from_str(&stdout_text(&output)).expect("analytics json");
    let row = summary
        .as_array()
        .expect("summary array")
        .iter()
        .find(|row| row["id"] == id.as_str())
        .expect("summary row");
    assert_eq!(row["total_recipients"], 2);
    assert_eq!(row["opened_count"], 0);
    assert_eq!(row["clicked_count"], 0);
}

#[test]
fn provider_failure_degrades_but_still_advances() {
    let data = TempDir::new().expect("data dir");
    // nothing listens here: every provider call fails fast
    let url = "http://127.0.0.1:9".to_string();

    let id = create_campaign(&data, &url);
    let record = load_record(data.path(), &id);
    assert_eq!(
        record["round2_questions"].as_array().expect("questions").len(),
        0
    );

    // answering with no questions still advances to a (sentinel) plan
    let output = run_outreach(data.path(), &url, &["answer", "--campaign", &id]);
    assert_success(&output, "answer");
    let record = load_record(data.path(), &id);
    assert_eq!(record["plan"], "Error generating final campaign plan.");
}

#[test]
fn unknown_campaign_ids_are_hard_failures() {
    let data = TempDir::new().expect("data dir");
    let url = "http://127.0.0.1:9".to_string();

    let output = run_outreach(data.path(), &url, &["show", "--campaign", "zzzzzzzz"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown campaign"));
}

#[test]
fn progress_reflects_the_configured_date_range() {
    let data = TempDir::new().expect("data dir");
    let url = "http://127.0.0.1:9".to_string();

    // a range that ended long ago pins progress at 100
    let output = run_outreach(
        data.path(),
        &url,
        &[
            "create",
            "--name",
            "Archive Drive",
            "--start-kind",
            "exact",
            "--start",
            "2020-01-01",
            "--end-kind",
            "exact",
            "--end",
            "2020-02-01",
        ],
    );
    assert_success(&output, "create");
    let id = stdout_text(&output)
        .lines()
        .find_map(|line| line.strip_prefix("created campaign ").map(str::trim))
        .expect("campaign id")
        .to_string();
    let record = load_record(data.path(), &id);
    assert_eq!(record["progress_pct"], 100);
}
