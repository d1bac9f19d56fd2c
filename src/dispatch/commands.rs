//! Distribution commands: recipients, links, send, post, serve, analytics.
use anyhow::{anyhow, bail, Result};
use chrono::Local;

use super::{mail, parse_recipient_list, serve, social, summarize, tracking_links};
use crate::cli::{AnalyticsArgs, LinksArgs, PostArgs, RecipientsArgs, SendArgs, ServeArgs};
use crate::store::Store;

/// Replace the recipient list. Engagement resets to exactly the new set.
pub fn run_recipients(args: &RecipientsArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    let mut campaign = store.load_campaign(&args.campaign)?;

    let recipients = parse_recipient_list(&args.list);
    if recipients.is_empty() {
        bail!("no recipients found in the list");
    }
    campaign.set_recipients(recipients);
    campaign.recompute_progress(Local::now().date_naive());
    store.save_campaign(&campaign)?;

    println!(
        "recipient list set for campaign {}: {} addresses, engagement reset",
        campaign.id,
        campaign.recipients.len()
    );
    Ok(())
}

pub fn run_links(args: &LinksArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    let mut campaign = store.load_campaign(&args.campaign)?;
    campaign.recompute_progress(Local::now().date_naive());
    store.save_campaign(&campaign)?;

    if campaign.recipients.is_empty() {
        bail!(
            "campaign {} has no recipients; set the recipient list first",
            campaign.id
        );
    }
    for link in tracking_links(&campaign, &args.base_url) {
        println!("{}", link.recipient);
        println!("  open:  {}", link.open_url);
        println!("  click: {}", link.click_url);
    }
    Ok(())
}

/// Send mail to every recipient: the combined newsletter by default, or one
/// snippet with `--snippet`/`--body`.
pub fn run_send(args: &SendArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    let campaign = store.load_campaign(&args.campaign)?;
    let config = store.load_mail_config()?;

    if campaign.recipients.is_empty() {
        bail!(
            "campaign {} has no recipients; set the recipient list first",
            campaign.id
        );
    }

    let (subject, body) = if let Some(body) = &args.body {
        if body.trim().is_empty() {
            bail!("snippet body is empty");
        }
        (mail::snippet_subject(&campaign.name), body.clone())
    } else if let Some(index) = args.snippet {
        let snippet = campaign.content_email.get(index).ok_or_else(|| {
            anyhow!(
                "no email draft at index {index} (campaign {} has {})",
                campaign.id,
                campaign.content_email.len()
            )
        })?;
        (mail::snippet_subject(&campaign.name), snippet.clone())
    } else {
        if campaign.content_email.is_empty() {
            bail!(
                "campaign {} has no email content; run generate or materials first",
                campaign.id
            );
        }
        (
            mail::newsletter_subject(&campaign.name),
            campaign.content_email.join("\n\n"),
        )
    };

    let sent = mail::send_batch(&campaign.recipients, &subject, &body, &config)?;
    println!("sent {sent} messages for campaign {}", campaign.id);
    Ok(())
}

/// Publish one social post through the first (or named) credential set.
pub fn run_post(args: &PostArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    let campaign = store.load_campaign(&args.campaign)?;

    let text = if let Some(text) = &args.text {
        text.clone()
    } else if let Some(index) = args.index {
        campaign
            .content_social
            .get(index)
            .cloned()
            .ok_or_else(|| {
                anyhow!(
                    "no social draft at index {index} (campaign {} has {})",
                    campaign.id,
                    campaign.content_social.len()
                )
            })?
    } else {
        bail!("pass --text or --index to choose what to post");
    };
    if text.trim().is_empty() {
        bail!("no post text provided");
    }

    let sets = store.load_social_sets()?;
    if sets.is_empty() {
        bail!("no social credentials configured; add one with `outreach config social-add`");
    }
    let set = match &args.credentials {
        Some(name) => sets
            .iter()
            .find(|set| set.name == *name)
            .ok_or_else(|| anyhow!("no social credential set named {name:?}"))?,
        None => &sets[0],
    };

    social::post_update(&text, set, &social::default_endpoint())?;
    println!("posted for campaign {} using credential set {}", campaign.id, set.name);
    Ok(())
}

pub fn run_serve(args: &ServeArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    serve::run_tracking_server(&store, &args.addr)
}

pub fn run_analytics(args: &AnalyticsArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    let today = Local::now().date_naive();
    let mut campaigns = store.list_campaigns()?;
    for campaign in &mut campaigns {
        campaign.recompute_progress(today);
        store.save_campaign(campaign)?;
    }

    let summary = summarize(&campaigns);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    if summary.is_empty() {
        println!("no campaigns yet");
        return Ok(());
    }
    for row in summary {
        println!(
            "{}  {:32}  recipients={} opened={} clicked={} progress={}%",
            row.id, row.name, row.total_recipients, row.opened_count, row.clicked_count,
            row.progress_pct
        );
    }
    Ok(())
}
