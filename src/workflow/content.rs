//! Content regeneration step: replace one channel's batch from the full
//! campaign context.
use anyhow::{anyhow, Result};
use chrono::Local;

use crate::cli::GenerateArgs;
use crate::store::Store;
use crate::suggest::{Channel, ContentSource, SuggestClient};

/// Regenerate content for one channel. Repeatable; earlier stages are
/// untouched and a degraded provider call stores an empty batch.
pub fn run_generate(args: &GenerateArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    let client = SuggestClient::from_env();
    let mut campaign = store.load_campaign(&args.campaign)?;
    let channel = Channel::parse(&args.channel)?;

    let plan = campaign.plan.clone().ok_or_else(|| {
        anyhow!(
            "campaign {} has no plan yet; submit round-2 answers first",
            campaign.id
        )
    })?;

    let content = client.channel_content(
        &ContentSource::Context {
            round1: &campaign.round1,
            answers: &campaign.round2_answers,
            plan: &plan,
        },
        channel,
        args.count,
    );
    if content.is_degraded() {
        eprintln!("content generation unavailable; stored an empty batch");
    }
    let items = content.into_inner();
    let stored = items.len();
    match channel {
        Channel::Email => campaign.content_email = items,
        Channel::Social => campaign.content_social = items,
    }
    campaign.recompute_progress(Local::now().date_naive());
    store.save_campaign(&campaign)?;

    println!(
        "stored {stored} {} drafts for campaign {}",
        args.channel, campaign.id
    );
    Ok(())
}
