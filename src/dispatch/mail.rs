//! SMTP delivery through the configured transport.

use anyhow::{anyhow, bail, Context, Result};
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::store::{MailConfig, MailMode};

pub fn newsletter_subject(campaign_name: &str) -> String {
    format!("Newsletter: {campaign_name}")
}

pub fn snippet_subject(campaign_name: &str) -> String {
    format!("Newsletter Snippet: {campaign_name}")
}

/// Send one plain-text message per recipient through the transport the
/// config selects.
///
/// Known limitation: the first transport failure aborts the remaining
/// sends without reporting which recipients already went out.
pub fn send_batch(
    recipients: &[String],
    subject: &str,
    body: &str,
    config: &MailConfig,
) -> Result<usize> {
    let mailer = build_transport(config)?;
    let sender: Mailbox = config
        .sender_address
        .parse()
        .with_context(|| format!("parse sender address {:?}", config.sender_address))?;

    if config.mode == MailMode::Local && !mailer.test_connection().unwrap_or(false) {
        bail!(
            "could not reach the local mail relay at {}:{}; run a local relay \
             (MailHog/Postfix) or update the mail settings",
            config.host,
            config.port
        );
    }

    let mut sent = 0;
    for recipient in recipients {
        let to: Mailbox = recipient
            .parse()
            .with_context(|| format!("parse recipient address {recipient:?}"))?;
        let message = Message::builder()
            .from(sender.clone())
            .to(to)
            .subject(subject)
            .body(body.to_string())
            .context("build message")?;
        mailer
            .send(&message)
            .with_context(|| format!("send to {recipient}"))?;
        tracing::info!(recipient = %recipient, subject, "message handed to relay");
        sent += 1;
    }
    Ok(sent)
}

fn build_transport(config: &MailConfig) -> Result<SmtpTransport> {
    match config.mode {
        // unauthenticated relay, plaintext
        MailMode::Local => Ok(SmtpTransport::builder_dangerous(&config.host)
            .port(config.port)
            .build()),
        // STARTTLS upgrade before authenticating
        MailMode::Authenticated => {
            if config.user.is_empty() {
                return Err(anyhow!(
                    "authenticated mail transport needs a user; update the mail settings"
                ));
            }
            Ok(SmtpTransport::starttls_relay(&config.host)
                .context("configure STARTTLS relay")?
                .port(config.port)
                .credentials(Credentials::new(config.user.clone(), config.secret.clone()))
                .build())
        }
    }
}
