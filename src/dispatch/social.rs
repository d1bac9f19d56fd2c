//! Social post dispatch. Stub provider integration: one authenticated POST
//! carrying only the text body; HTTP 201 is success and anything else is
//! surfaced verbatim.

use anyhow::{bail, Context, Result};
use std::time::Duration;
use ureq::Agent;

use crate::store::SocialCredentialSet;

pub const SOCIAL_URL_ENV: &str = "OUTREACH_SOCIAL_URL";

const DEFAULT_ENDPOINT: &str = "https://api.twitter.com/2/tweets";
const CALL_TIMEOUT: Duration = Duration::from_secs(30);

pub fn default_endpoint() -> String {
    std::env::var(SOCIAL_URL_ENV).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string())
}

pub fn post_update(text: &str, credentials: &SocialCredentialSet, endpoint: &str) -> Result<()> {
    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(CALL_TIMEOUT))
        .http_status_as_error(false)
        .build()
        .into();
    let authorization = format!(
        "OAuth oauth_consumer_key=\"{}\", oauth_token=\"{}\"",
        credentials.api_key, credentials.access_token
    );
    let mut response = agent
        .post(endpoint)
        .header("Authorization", authorization.as_str())
        .send_json(&serde_json::json!({ "text": text }))
        .context("call social provider")?;

    let status = response.status().as_u16();
    if status == 201 {
        tracing::info!(credential_set = %credentials.name, "social post accepted");
        return Ok(());
    }
    let body = response.body_mut().read_to_string().unwrap_or_default();
    bail!("social provider rejected the post: status {status}: {body}")
}
