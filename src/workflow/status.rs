//! Read-side commands: show one campaign, list all, delete.
use anyhow::Result;
use chrono::Local;

use crate::cli::{DeleteArgs, OverviewArgs, ShowArgs};
use crate::store::Store;

pub fn run_show(args: &ShowArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    let mut campaign = store.load_campaign(&args.campaign)?;
    campaign.recompute_progress(Local::now().date_naive());
    store.save_campaign(&campaign)?;

    println!("campaign {} ({})", campaign.id, campaign.name);
    println!("stage: {}", campaign.stage().label());
    println!(
        "dates: {} to {} ({}% complete)",
        or_unset(&campaign.start_date),
        or_unset(&campaign.end_date),
        campaign.progress_pct
    );
    println!("goal: {}", campaign.round1.goal);
    println!("objective: {}", campaign.round1.objective);
    println!("audience: {}", campaign.round1.audience);

    if !campaign.round2_questions.is_empty() {
        println!("round 2:");
        for question in &campaign.round2_questions {
            let answer = campaign
                .round2_answers
                .get(&question.field_name)
                .map(String::as_str)
                .unwrap_or("(unanswered)");
            println!("  {}: {answer}", question.label);
        }
    }
    if let Some(plan) = &campaign.plan {
        println!("plan:\n{plan}");
    }
    if !campaign.materials.is_empty() {
        println!("materials:");
        for material in &campaign.materials {
            println!("  {} ({})", material.filename, material.storage_path);
        }
    }
    print_content("email drafts", &campaign.content_email);
    print_content("social drafts", &campaign.content_social);
    if !campaign.recipients.is_empty() {
        println!("recipients:");
        for recipient in &campaign.recipients {
            let state = campaign
                .engagement
                .get(recipient)
                .copied()
                .unwrap_or_default();
            println!(
                "  {recipient} opened={} clicked={}",
                state.opened, state.clicked
            );
        }
    }
    Ok(())
}

pub fn run_overview(args: &OverviewArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    let today = Local::now().date_naive();
    let mut campaigns = store.list_campaigns()?;
    if campaigns.is_empty() {
        println!("no campaigns yet");
        return Ok(());
    }
    for campaign in &mut campaigns {
        campaign.recompute_progress(today);
        store.save_campaign(campaign)?;
        println!(
            "{}  {:32}  {:18}  {:3}%",
            campaign.id,
            campaign.name,
            campaign.stage().label(),
            campaign.progress_pct
        );
    }
    Ok(())
}

pub fn run_delete(args: &DeleteArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    store.delete_campaign(&args.campaign)?;
    println!("deleted campaign {}", args.campaign);
    Ok(())
}

fn print_content(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{label}:");
    for (index, item) in items.iter().enumerate() {
        println!("  [{index}] {item}");
    }
}

fn or_unset(date: &str) -> &str {
    if date.is_empty() {
        "(unset)"
    } else {
        date
    }
}
