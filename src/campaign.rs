//! Campaign aggregate: stage data, recipients, and engagement tracking.
//!
//! Every stage blob is a typed structure with defaulted fields so a record
//! written by an older build, or a truncated one, loads as empty structures
//! instead of failing.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dates;

pub const NEEDS_SUGGESTIONS_SUFFIX: &str = " (Needs suggestions)";

const NO_INFO_ANSWERS: [&str; 3] = ["idk", "no", "none"];

const ID_LEN: usize = 8;
const ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Goal/objective/audience data collected at creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Round1 {
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub audience: String,
}

impl Round1 {
    pub fn is_empty(&self) -> bool {
        self.goal.is_empty() && self.objective.is_empty() && self.audience.is_empty()
    }
}

/// One clarifying question issued after round 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub field_name: String,
}

/// An uploaded material file, stored by name under the campaign's uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRef {
    pub filename: String,
    pub storage_path: String,
}

/// Per-recipient open/click state. Flips are monotonic.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(default)]
    pub opened: bool,
    #[serde(default)]
    pub clicked: bool,
}

/// Furthest workflow stage whose data is present on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Created,
    Round1Captured,
    QuestionsIssued,
    Round2Captured,
    PlanGenerated,
    MaterialsUploaded,
    ContentGenerated,
    Distributing,
    Tracking,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Created => "created",
            Stage::Round1Captured => "round 1 captured",
            Stage::QuestionsIssued => "questions issued",
            Stage::Round2Captured => "round 2 captured",
            Stage::PlanGenerated => "plan generated",
            Stage::MaterialsUploaded => "materials uploaded",
            Stage::ContentGenerated => "content generated",
            Stage::Distributing => "distributing",
            Stage::Tracking => "tracking",
        }
    }
}

/// One outreach workflow instance. Persisted as a single JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub round1: Round1,
    #[serde(default)]
    pub round2_questions: Vec<Question>,
    #[serde(default)]
    pub round2_answers: BTreeMap<String, String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub materials: Vec<MaterialRef>,
    #[serde(default)]
    pub content_email: Vec<String>,
    #[serde(default)]
    pub content_social: Vec<String>,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub engagement: BTreeMap<String, Engagement>,
    #[serde(default)]
    pub progress_pct: u8,
}

impl Campaign {
    pub fn new(name: String, start_date: String, end_date: String, round1: Round1) -> Campaign {
        Campaign {
            id: new_id(),
            name,
            start_date,
            end_date,
            round1,
            round2_questions: Vec::new(),
            round2_answers: BTreeMap::new(),
            plan: None,
            materials: Vec::new(),
            content_email: Vec::new(),
            content_social: Vec::new(),
            recipients: Vec::new(),
            engagement: BTreeMap::new(),
            progress_pct: 0,
        }
    }

    /// Replace the recipient list and reset engagement to exactly that set,
    /// all flags false. Duplicates stay in the list; the engagement key set
    /// collapses them.
    pub fn set_recipients(&mut self, recipients: Vec<String>) {
        self.engagement = recipients
            .iter()
            .map(|recipient| (recipient.clone(), Engagement::default()))
            .collect();
        self.recipients = recipients;
    }

    /// Record an open event. Returns true when the flag actually flipped;
    /// unknown recipients and repeats are no-ops.
    pub fn record_open(&mut self, recipient: &str) -> bool {
        match self.engagement.get_mut(recipient) {
            Some(state) if !state.opened => {
                state.opened = true;
                true
            }
            _ => false,
        }
    }

    /// Record a click event, with the same no-op rules as [`record_open`].
    ///
    /// [`record_open`]: Campaign::record_open
    pub fn record_click(&mut self, recipient: &str) -> bool {
        match self.engagement.get_mut(recipient) {
            Some(state) if !state.clicked => {
                state.clicked = true;
                true
            }
            _ => false,
        }
    }

    pub fn opened_count(&self) -> usize {
        self.engagement.values().filter(|state| state.opened).count()
    }

    pub fn clicked_count(&self) -> usize {
        self.engagement.values().filter(|state| state.clicked).count()
    }

    /// Recompute `progress_pct` as of `today`; leaves the stored value when
    /// the date range is missing or degenerate.
    pub fn recompute_progress(&mut self, today: NaiveDate) {
        if let Some(pct) = dates::progress_between(&self.start_date, &self.end_date, today) {
            self.progress_pct = pct;
        }
    }

    pub fn stage(&self) -> Stage {
        if self
            .engagement
            .values()
            .any(|state| state.opened || state.clicked)
        {
            return Stage::Tracking;
        }
        if !self.recipients.is_empty() {
            return Stage::Distributing;
        }
        if !self.content_email.is_empty() || !self.content_social.is_empty() {
            return Stage::ContentGenerated;
        }
        if !self.materials.is_empty() {
            return Stage::MaterialsUploaded;
        }
        if self.plan.is_some() {
            return Stage::PlanGenerated;
        }
        if !self.round2_answers.is_empty() {
            return Stage::Round2Captured;
        }
        if !self.round2_questions.is_empty() {
            return Stage::QuestionsIssued;
        }
        if !self.round1.is_empty() {
            return Stage::Round1Captured;
        }
        Stage::Created
    }
}

/// Opaque short campaign id: 8 lowercase alphanumerics.
pub fn new_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ID_CHARS[rng.gen_range(0..ID_CHARS.len())] as char)
        .collect()
}

/// Apply the round-2 no-info annotation rule.
///
/// A value whose trimmed, lowercased form is exactly `idk`, `no`, or `none`
/// is stored as the trimmed value plus a needs-suggestions marker; anything
/// else is stored verbatim.
pub fn annotate_answer(value: &str) -> String {
    let trimmed = value.trim();
    if NO_INFO_ANSWERS
        .iter()
        .any(|no_info| trimmed.eq_ignore_ascii_case(no_info))
    {
        format!("{trimmed}{NEEDS_SUGGESTIONS_SUFFIX}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "campaign_tests.rs"]
mod tests;
