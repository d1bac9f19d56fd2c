//! Workflow create step: capture round-1 data, resolve dates, issue
//! clarifying questions.
use anyhow::Result;
use chrono::Local;

use super::print_questions;
use crate::campaign::{Campaign, Round1};
use crate::cli::CreateArgs;
use crate::dates;
use crate::store::Store;
use crate::suggest::SuggestClient;

pub fn run_create(args: &CreateArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    let client = SuggestClient::from_env();

    let start_date = dates::resolve_date_input(&args.start_kind, &args.start);
    let end_date = dates::resolve_date_input(&args.end_kind, &args.end);
    let round1 = Round1 {
        goal: args.goal.clone(),
        objective: args.objective.clone(),
        audience: args.audience.clone(),
    };
    let mut campaign = Campaign::new(args.name.clone(), start_date, end_date, round1);
    // round 1 is durable before the provider call
    store.save_campaign(&campaign)?;

    let questions = client.clarifying_questions(&campaign.round1);
    if questions.is_degraded() {
        eprintln!("clarifying questions unavailable; continuing with none");
    }
    campaign.round2_questions = questions.into_inner();
    campaign.recompute_progress(Local::now().date_naive());
    store.save_campaign(&campaign)?;

    println!("created campaign {}", campaign.id);
    if !campaign.start_date.is_empty() || !campaign.end_date.is_empty() {
        println!(
            "runs {} to {}",
            or_unset(&campaign.start_date),
            or_unset(&campaign.end_date)
        );
    }
    print_questions(&campaign);
    Ok(())
}

fn or_unset(date: &str) -> &str {
    if date.is_empty() {
        "(unset)"
    } else {
        date
    }
}
