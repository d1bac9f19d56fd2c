//! Stage commands for the campaign workflow.
//!
//! Each step is intentionally small: read the campaign, apply one stage
//! transition, persist, report. Provider degradation never blocks a
//! transition.
mod answer;
mod assist;
mod content;
mod create;
mod materials;
mod status;

pub use answer::{run_answer, run_questions};
pub use assist::{run_fill, run_suggest};
pub use content::run_generate;
pub use create::run_create;
pub use materials::run_materials;
pub use status::{run_delete, run_overview, run_show};

use anyhow::{anyhow, Result};
use std::collections::BTreeMap;

use crate::campaign::{Campaign, Question};

/// Parse `field=value` CLI pairs into a map. Later pairs win.
pub(crate) fn parse_key_value_pairs(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    for pair in pairs {
        let (field, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected field=value, got {pair:?}"))?;
        map.insert(field.trim().to_string(), value.to_string());
    }
    Ok(map)
}

pub(crate) fn print_questions(campaign: &Campaign) {
    if campaign.round2_questions.is_empty() {
        println!("no clarifying questions on file");
        return;
    }
    println!("clarifying questions:");
    for Question {
        label,
        kind,
        field_name,
    } in &campaign.round2_questions
    {
        println!("  {field_name} ({kind}): {label}");
    }
}
