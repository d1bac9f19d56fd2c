//! Materials step: store uploaded files and draft channel content from
//! them.
use anyhow::Result;
use chrono::Local;

use crate::cli::MaterialsArgs;
use crate::store::Store;
use crate::suggest::{Channel, ContentSource, SuggestClient};

/// Append material files to the campaign and refresh both content batches
/// from the uploaded set. Repeatable; materials are append-only.
pub fn run_materials(args: &MaterialsArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    let client = SuggestClient::from_env();
    let mut campaign = store.load_campaign(&args.campaign)?;

    for file in &args.files {
        let stored = store.store_material(&campaign.id, file)?;
        println!("stored {}", stored.filename);
        campaign.materials.push(stored);
    }
    // uploads are durable before the provider calls
    store.save_campaign(&campaign)?;

    let source = ContentSource::Materials(&campaign.materials);
    let emails = client.channel_content(&source, Channel::Email, args.count);
    let tweets = client.channel_content(&source, Channel::Social, args.count);
    if emails.is_degraded() && tweets.is_degraded() {
        eprintln!("content drafting unavailable; stored empty batches");
    }
    campaign.content_email = emails.into_inner();
    campaign.content_social = tweets.into_inner();
    campaign.recompute_progress(Local::now().date_naive());
    store.save_campaign(&campaign)?;

    println!(
        "campaign {} now holds {} materials, {} email drafts, {} social drafts",
        campaign.id,
        campaign.materials.len(),
        campaign.content_email.len(),
        campaign.content_social.len()
    );
    Ok(())
}
