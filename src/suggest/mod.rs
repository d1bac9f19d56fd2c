//! Suggestion Service client.
//!
//! All content generation goes through one blocking chat-completion call:
//! a system instruction, a user message carrying structured JSON context,
//! and an expected top-level key in the reply (`suggestions`, `questions`,
//! `emails`, `tweets`, or `prompts`). Provider and parse failures degrade to
//! empty content and are logged; they never abort the workflow.
//!
//! The provider is resolved from the environment so any OpenAI-compatible
//! endpoint works:
//!
//! 1. `OUTREACH_SUGGEST_URL` — chat-completions endpoint
//! 2. `OUTREACH_SUGGEST_MODEL` — model name
//! 3. `OUTREACH_SUGGEST_API_KEY` — bearer token, omitted when empty

mod response;

pub use response::Generated;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::env;
use std::time::{Duration, Instant};
use ureq::Agent;

use crate::campaign::{MaterialRef, Question, Round1};

pub const SUGGEST_URL_ENV: &str = "OUTREACH_SUGGEST_URL";
pub const SUGGEST_MODEL_ENV: &str = "OUTREACH_SUGGEST_MODEL";
pub const SUGGEST_API_KEY_ENV: &str = "OUTREACH_SUGGEST_API_KEY";

/// Stored as the plan when the provider fails, so downstream stages always
/// have some plan text.
pub const PLAN_ERROR_SENTINEL: &str = "Error generating final campaign plan.";

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4";
const TEMPERATURE: f64 = 0.7;
const CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// One field suggestion. Tier is expected to be Conservative, Realistic, or
/// Ambitious, but provider output is stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub explanation: String,
}

/// Outbound content channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Social,
}

impl Channel {
    pub fn parse(raw: &str) -> Result<Channel> {
        match raw {
            "email" => Ok(Channel::Email),
            "social" => Ok(Channel::Social),
            other => bail!("unknown channel {other:?} (expected email or social)"),
        }
    }

    fn key(self) -> &'static str {
        match self {
            Channel::Email => "emails",
            Channel::Social => "tweets",
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Channel::Email => "short newsletter email paragraphs",
            Channel::Social => "short tweets",
        }
    }
}

/// What channel content is generated from.
pub enum ContentSource<'a> {
    /// Uploaded material filenames, used right after an upload.
    Materials(&'a [MaterialRef]),
    /// Full campaign context, used to regenerate content on demand.
    Context {
        round1: &'a Round1,
        answers: &'a BTreeMap<String, String>,
        plan: &'a str,
    },
}

pub struct SuggestClient {
    agent: Agent,
    endpoint: String,
    model: String,
    api_key: String,
}

impl SuggestClient {
    pub fn from_env() -> SuggestClient {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(CALL_TIMEOUT))
            .build()
            .into();
        SuggestClient {
            agent,
            endpoint: env::var(SUGGEST_URL_ENV).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            model: env::var(SUGGEST_MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_key: env::var(SUGGEST_API_KEY_ENV).unwrap_or_default(),
        }
    }

    /// Short suggestions for one round-1 or round-2 field. Three are
    /// requested; callers must not assume the count.
    pub fn suggest_fields(
        &self,
        goal: &str,
        field_name: &str,
        partial: &BTreeMap<String, String>,
        typed: &str,
    ) -> Generated<Vec<Suggestion>> {
        let system = "You are a helpful assistant generating short suggestions for one campaign \
                      field. Each suggestion has 'text', 'tier' (Conservative, Realistic, \
                      Ambitious), and 'explanation'. Return valid JSON with a 'suggestions' array.";
        let mut user = format!(
            "Field: '{field_name}'\n{instruction}\n\nCampaign Goal: {goal}\nPartial data: {partial}\n",
            instruction = field_instruction(field_name),
            partial = pretty(partial),
        );
        if typed.trim().is_empty() {
            user.push_str(
                "No user typed text. Please produce 3 short suggestions, each with 'tier' and \
                 'explanation'. Return them in JSON under 'suggestions'.",
            );
        } else {
            user.push_str(&format!(
                "The user typed partial text: '{typed}'\nPlease produce 3 short suggestions, \
                 each with 'tier' and 'explanation'. Return them in JSON under 'suggestions'.",
            ));
        }
        self.generate(system, &user, "field suggestions", |value| {
            response::typed_list::<Suggestion>(value, "suggestions")
        })
    }

    /// Suggestions for every typed field at once, one provider call per
    /// field with the fields answered so far as shared context.
    pub fn fill_all_fields(
        &self,
        goal: &str,
        typed: &BTreeMap<String, String>,
    ) -> BTreeMap<String, Vec<Suggestion>> {
        let mut results = BTreeMap::new();
        let partial = BTreeMap::new();
        for (field_name, typed_value) in typed {
            let suggestions = self
                .suggest_fields(goal, field_name, &partial, typed_value)
                .into_inner();
            results.insert(field_name.clone(), suggestions);
        }
        results
    }

    /// Round-2 clarifying questions from the round-1 data. Questions about
    /// campaign duration are excluded: duration is owned by the date fields.
    pub fn clarifying_questions(&self, round1: &Round1) -> Generated<Vec<Question>> {
        let system = "You are a helpful assistant collecting more information about a planned \
                      outreach campaign. The user gave round 1 data. Produce clarifying round 2 \
                      questions in JSON. No question about campaign duration.";
        let user = format!(
            "Round 1 data:\n{}\nGenerate clarifying questions in JSON. e.g.\n{{ \"questions\": [\n   \
             {{\"label\": \"Any constraints?\",\"type\":\"text\",\"field_name\":\"constraints\"}}\n ]}}",
            pretty(round1),
        );
        self.generate(system, &user, "clarifying questions", question_list)
    }

    /// Narrative plan from round 1 + round 2. Returns the sentinel error
    /// string on any failure instead of raising.
    pub fn generate_plan(&self, round1: &Round1, answers: &BTreeMap<String, String>) -> String {
        let system = "You are an expert campaign strategist for a non-profit. Produce a final \
                      plan in Markdown from the round 1 and round 2 data. Don't mention you're AI.";
        let user = format!(
            "Round 1 data:\n{}\nRound 2 data:\n{}\nGenerate the final plan in Markdown with \
             styled sections.",
            pretty(round1),
            pretty(answers),
        );
        match self.complete(system, &user) {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => {
                tracing::warn!("plan generation returned empty text");
                PLAN_ERROR_SENTINEL.to_string()
            }
            Err(err) => {
                tracing::warn!(error = %err, "plan generation failed");
                PLAN_ERROR_SENTINEL.to_string()
            }
        }
    }

    /// An ordered batch of channel content strings. Degrades to empty.
    pub fn channel_content(
        &self,
        source: &ContentSource<'_>,
        channel: Channel,
        count: usize,
    ) -> Generated<Vec<String>> {
        let (system, user) = match source {
            ContentSource::Materials(materials) => {
                let filenames = materials
                    .iter()
                    .map(|m| m.filename.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                (
                    format!(
                        "You are a creative copywriter generating {} for a nonprofit campaign.",
                        channel.unit(),
                    ),
                    format!(
                        "Materials: {filenames}\nGenerate {count} short prompts or hooks for the \
                         messages.\nReturn JSON like {{ \"prompts\": [...] }}",
                    ),
                )
            }
            ContentSource::Context {
                round1,
                answers,
                plan,
            } => (
                format!(
                    "You are a creative marketing copywriter. Generate a set of {}. Return JSON \
                     like {{ \"{}\": [...] }}. Use the campaign info to highlight the goals, \
                     timeline, and calls to action.",
                    channel.unit(),
                    channel.key(),
                ),
                format!(
                    "Round 1 data:\n{}\nRound 2 data:\n{}\nPlan:\n{plan}\nGenerate about {count} \
                     {}. Provide JSON as described.",
                    pretty(round1),
                    pretty(answers),
                    channel.unit(),
                ),
            ),
        };
        self.generate(&system, &user, "channel content", |value| {
            response::string_list(value, channel.key())
                .or_else(|| response::string_list(value, "prompts"))
        })
    }

    /// One call with the uniform degrade-to-empty normalization rule.
    fn generate<T: Default>(
        &self,
        system: &str,
        user: &str,
        what: &'static str,
        select: impl Fn(&Value) -> Option<T>,
    ) -> Generated<T> {
        match self.complete(system, user) {
            Ok(text) => match response::parse_object(&text).as_ref().and_then(select) {
                Some(content) => Generated::Full(content),
                None => {
                    tracing::warn!(what, "provider output had no usable content");
                    Generated::degraded()
                }
            },
            Err(err) => {
                tracing::warn!(what, error = %err, "provider call failed");
                Generated::degraded()
            }
        }
    }

    /// Send one chat-completion request and return the reply text.
    fn complete(&self, system: &str, user: &str) -> Result<String> {
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": TEMPERATURE,
        });
        let started = Instant::now();
        let mut request = self.agent.post(self.endpoint.as_str());
        if !self.api_key.is_empty() {
            let bearer = format!("Bearer {}", self.api_key);
            request = request.header("Authorization", bearer.as_str());
        }
        let mut response = request
            .send_json(&payload)
            .context("call suggestion service")?;
        let envelope: Value = response
            .body_mut()
            .read_json()
            .context("read suggestion service response")?;
        let content = envelope["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow!("suggestion service response missing message content"))?
            .trim()
            .to_string();
        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            prompt_bytes = user.len(),
            response_bytes = content.len(),
            "suggestion call complete"
        );
        Ok(content)
    }
}

fn field_instruction(field_name: &str) -> &'static str {
    match field_name {
        "campaign_name" => "Generate short, catchy campaign name ideas matching the goal.",
        "objective" => "Generate short objective statements describing the campaign's aims.",
        "target_audience" => "Generate short descriptions of who the campaign is targeting.",
        _ => "Generate short suggestions for this field.",
    }
}

/// Questions from a provider object, minus duration questions and entries
/// with no answer field to collect into.
fn question_list(value: &Value) -> Option<Vec<Question>> {
    let questions: Vec<Question> = response::typed_list(value, "questions")?;
    Some(
        questions
            .into_iter()
            .filter(|question| !question.field_name.is_empty())
            .filter(|question| !is_duration_question(question))
            .collect(),
    )
}

fn is_duration_question(question: &Question) -> bool {
    let label = question.label.to_lowercase();
    question.field_name.to_lowercase().contains("duration")
        || label.contains("duration")
        || label.contains("how long")
}

fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
