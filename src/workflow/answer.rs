//! Workflow round-2 step: show questions, capture answers, synthesize the
//! plan.
use anyhow::Result;
use chrono::Local;
use std::collections::BTreeMap;

use super::{parse_key_value_pairs, print_questions};
use crate::campaign::annotate_answer;
use crate::cli::{AnswerArgs, QuestionsArgs};
use crate::store::Store;
use crate::suggest::SuggestClient;

pub fn run_questions(args: &QuestionsArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    let mut campaign = store.load_campaign(&args.campaign)?;
    campaign.recompute_progress(Local::now().date_naive());
    store.save_campaign(&campaign)?;

    println!("campaign {} ({})", campaign.id, campaign.name);
    print_questions(&campaign);
    Ok(())
}

/// Capture round-2 answers and generate the plan.
///
/// Answers are collected per issued question; a question with no submitted
/// value records an empty answer. No-info answers get the needs-suggestions
/// marker. The plan is stored even when generation degrades to the sentinel,
/// so the workflow always advances.
pub fn run_answer(args: &AnswerArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    let client = SuggestClient::from_env();
    let mut campaign = store.load_campaign(&args.campaign)?;

    let provided = parse_key_value_pairs(&args.answers)?;
    for field in provided.keys() {
        if !campaign
            .round2_questions
            .iter()
            .any(|question| question.field_name == *field)
        {
            eprintln!("ignoring answer for unknown field {field:?}");
        }
    }

    let mut answers = BTreeMap::new();
    for question in &campaign.round2_questions {
        let value = provided
            .get(&question.field_name)
            .map(String::as_str)
            .unwrap_or_default();
        answers.insert(question.field_name.clone(), annotate_answer(value));
    }
    campaign.round2_answers = answers;
    // answers are durable before the provider call
    store.save_campaign(&campaign)?;

    let plan = client.generate_plan(&campaign.round1, &campaign.round2_answers);
    campaign.plan = Some(plan);
    campaign.recompute_progress(Local::now().date_naive());
    store.save_campaign(&campaign)?;

    println!(
        "captured {} answers for campaign {}",
        campaign.round2_answers.len(),
        campaign.id
    );
    if let Some(plan) = &campaign.plan {
        println!("\n{plan}");
    }
    Ok(())
}
