//! Form-assist commands: field suggestions for round 1 and round 2.
//!
//! Pure pass-through to the Suggestion Service; nothing is persisted.
use anyhow::Result;
use std::collections::BTreeMap;

use super::parse_key_value_pairs;
use crate::cli::{FillArgs, SuggestArgs};
use crate::suggest::{Suggestion, SuggestClient};

pub fn run_suggest(args: &SuggestArgs) -> Result<()> {
    let client = SuggestClient::from_env();
    let partial = parse_key_value_pairs(&args.context)?;
    let suggestions = client.suggest_fields(&args.goal, &args.field, &partial, &args.typed);
    if suggestions.is_degraded() {
        println!("no suggestions available");
        return Ok(());
    }
    print_suggestions(&suggestions.into_inner());
    Ok(())
}

pub fn run_fill(args: &FillArgs) -> Result<()> {
    let client = SuggestClient::from_env();
    let mut typed = BTreeMap::new();
    typed.insert("campaign_name".to_string(), args.name.clone());
    typed.insert("objective".to_string(), args.objective.clone());
    typed.insert("target_audience".to_string(), args.audience.clone());

    for (field, suggestions) in client.fill_all_fields(&args.goal, &typed) {
        println!("{field}:");
        if suggestions.is_empty() {
            println!("  (no suggestions available)");
            continue;
        }
        print_suggestions(&suggestions);
    }
    Ok(())
}

fn print_suggestions(suggestions: &[Suggestion]) {
    for suggestion in suggestions {
        if suggestion.tier.is_empty() {
            println!("  {}", suggestion.text);
        } else {
            println!("  [{}] {}", suggestion.tier, suggestion.text);
        }
        if !suggestion.explanation.is_empty() {
            println!("      {}", suggestion.explanation);
        }
    }
}
