//! E-signature token issuance (stub integration).
//!
//! One JWT-grant call with a long-lived private credential; returns an
//! opaque access token or fails. Nothing else of the provider is modeled.
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::env;
use std::time::Duration;
use ureq::Agent;

use crate::cli::EsignArgs;

pub const ESIGN_TOKEN_URL_ENV: &str = "OUTREACH_ESIGN_TOKEN_URL";
pub const ESIGN_CLIENT_ID_ENV: &str = "OUTREACH_ESIGN_CLIENT_ID";
pub const ESIGN_ASSERTION_ENV: &str = "OUTREACH_ESIGN_ASSERTION";

const DEFAULT_TOKEN_URL: &str = "https://account-d.docusign.com/oauth/token";
const CALL_TIMEOUT: Duration = Duration::from_secs(30);

pub fn run_esign_token(_args: &EsignArgs) -> Result<()> {
    let token = request_access_token()?;
    println!("{token}");
    Ok(())
}

fn request_access_token() -> Result<String> {
    let url = env::var(ESIGN_TOKEN_URL_ENV).unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string());
    let client_id =
        env::var(ESIGN_CLIENT_ID_ENV).with_context(|| format!("{ESIGN_CLIENT_ID_ENV} is not set"))?;
    let assertion =
        env::var(ESIGN_ASSERTION_ENV).with_context(|| format!("{ESIGN_ASSERTION_ENV} is not set"))?;

    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(CALL_TIMEOUT))
        .build()
        .into();
    let mut response = agent
        .post(url.as_str())
        .send_form([
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("client_id", client_id.as_str()),
            ("assertion", assertion.as_str()),
        ])
        .context("call e-signature token endpoint")?;
    let body: Value = response
        .body_mut()
        .read_json()
        .context("read e-signature token response")?;
    body["access_token"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("e-signature token response missing access_token"))
}
