use super::{MailMode, SocialCredentialSet, Store};
use crate::campaign::{Campaign, Round1};
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> Store {
    Store::open(Some(dir.path())).expect("open store")
}

fn sample_campaign() -> Campaign {
    Campaign::new(
        "Spring Drive".to_string(),
        "2024-01-01".to_string(),
        "2024-01-11".to_string(),
        Round1 {
            goal: "raise funds".to_string(),
            objective: "hit 10k".to_string(),
            audience: "alumni".to_string(),
        },
    )
}

#[test]
fn campaign_round_trips() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    let mut campaign = sample_campaign();
    campaign.set_recipients(vec!["a@x.com".to_string()]);
    store.save_campaign(&campaign).expect("save");

    let loaded = store.load_campaign(&campaign.id).expect("load");
    assert_eq!(loaded.name, "Spring Drive");
    assert_eq!(loaded.recipients, ["a@x.com"]);
    assert!(loaded.engagement.contains_key("a@x.com"));
}

#[test]
fn unknown_campaign_is_a_hard_failure() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    let err = store.load_campaign("nope1234").expect_err("missing id");
    assert!(err.to_string().contains("unknown campaign"));
}

#[test]
fn listing_skips_unreadable_records() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    let campaign = sample_campaign();
    store.save_campaign(&campaign).expect("save");
    std::fs::write(dir.path().join("campaigns/broken.json"), b"{not json")
        .expect("write broken record");

    let campaigns = store.list_campaigns().expect("list");
    assert_eq!(campaigns.len(), 1);
    assert_eq!(campaigns[0].id, campaign.id);
}

#[test]
fn mail_config_is_lazily_created_with_local_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    let config = store.load_mail_config().expect("load defaults");
    assert_eq!(config.mode, MailMode::Local);
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 1025);
    assert_eq!(config.sender_address, "noreply@example.org");
    assert!(dir.path().join("mail_config.json").is_file());
}

#[test]
fn mail_config_updates_in_place() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    let mut config = store.load_mail_config().expect("defaults");
    config.mode = MailMode::Authenticated;
    config.host = "smtp.example.org".to_string();
    config.port = 587;
    config.user = "mailer".to_string();
    store.update_mail_config(&config).expect("update");

    let reloaded = store.load_mail_config().expect("reload");
    assert_eq!(reloaded.mode, MailMode::Authenticated);
    assert_eq!(reloaded.host, "smtp.example.org");
    assert_eq!(reloaded.port, 587);
}

#[test]
fn social_sets_append_and_remove_by_name() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    assert!(store.load_social_sets().expect("empty").is_empty());

    store
        .add_social_set(SocialCredentialSet {
            name: "primary".to_string(),
            api_key: "k".to_string(),
            api_secret: "s".to_string(),
            access_token: "t".to_string(),
            access_token_secret: "ts".to_string(),
        })
        .expect("add");
    store
        .add_social_set(SocialCredentialSet {
            name: "backup".to_string(),
            api_key: String::new(),
            api_secret: String::new(),
            access_token: String::new(),
            access_token_secret: String::new(),
        })
        .expect("add second");

    assert_eq!(store.load_social_sets().expect("two").len(), 2);
    assert!(store.remove_social_set("primary").expect("remove"));
    assert!(!store.remove_social_set("primary").expect("already gone"));
    let remaining = store.load_social_sets().expect("one");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "backup");
}

#[test]
fn materials_are_stored_by_sanitized_name() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    let source = dir.path().join("flyer v2 (final).pdf");
    std::fs::write(&source, b"%PDF-").expect("write source");

    let stored = store.store_material("abc12345", &source).expect("store");
    assert_eq!(stored.filename, "flyer_v2__final_.pdf");
    assert!(std::path::Path::new(&stored.storage_path).is_file());
}

#[test]
fn delete_removes_record_and_uploads() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    let campaign = sample_campaign();
    store.save_campaign(&campaign).expect("save");
    let source = dir.path().join("flyer.pdf");
    std::fs::write(&source, b"%PDF-").expect("write source");
    store.store_material(&campaign.id, &source).expect("store");

    store.delete_campaign(&campaign.id).expect("delete");
    assert!(store.load_campaign(&campaign.id).is_err());
    assert!(!dir.path().join("uploads").join(&campaign.id).exists());
}
