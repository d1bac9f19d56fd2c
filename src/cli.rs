//! CLI argument parsing for the campaign workflow.
//!
//! The CLI is intentionally thin: every subcommand is one short-lived
//! action that reads the campaign, mutates it, and persists it, so the
//! stage logic lives in the workflow and dispatch modules rather than here.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_SERVE_ADDR: &str = "127.0.0.1:8080";

/// Root CLI entrypoint for the campaign workflow.
#[derive(Parser, Debug)]
#[command(
    name = "outreach",
    version,
    about = "AI-guided outreach campaign workflow: plan, generate, send, track",
    after_help = "Workflow:\n  create       Capture round-1 data and issue clarifying questions\n  answer       Submit round-2 answers and synthesize the plan\n  materials    Upload material files and draft channel content\n  generate     Regenerate email or social content on demand\n  recipients   Set the recipient list (resets engagement)\n  send         Send the newsletter or one snippet by mail\n  post         Publish one social post\n  serve        Host the open/click tracking endpoint\n  analytics    Summarize engagement across campaigns\n\nExamples:\n  outreach create --name \"Spring Drive\" --goal \"Raise funds\"\n  outreach answer --campaign ab12cd34 constraints=\"small budget\"\n  outreach recipients --campaign ab12cd34 --list \"a@x.com,b@x.com\"\n  outreach send --campaign ab12cd34\n  outreach serve --addr 0.0.0.0:8080",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level workflow commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Create(CreateArgs),
    Questions(QuestionsArgs),
    Answer(AnswerArgs),
    Show(ShowArgs),
    Overview(OverviewArgs),
    Suggest(SuggestArgs),
    Fill(FillArgs),
    Materials(MaterialsArgs),
    Generate(GenerateArgs),
    Recipients(RecipientsArgs),
    Links(LinksArgs),
    Send(SendArgs),
    Post(PostArgs),
    Serve(ServeArgs),
    Analytics(AnalyticsArgs),
    Delete(DeleteArgs),
    Config(ConfigArgs),
    EsignToken(EsignArgs),
}

/// Create a campaign from round-1 data and issue clarifying questions.
#[derive(Parser, Debug)]
#[command(about = "Create a campaign and issue clarifying questions")]
pub struct CreateArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Campaign name
    #[arg(long)]
    pub name: String,

    /// What the campaign is trying to achieve
    #[arg(long, default_value = "")]
    pub goal: String,

    /// Concrete objective statement
    #[arg(long, default_value = "")]
    pub objective: String,

    /// Who the campaign is targeting
    #[arg(long, default_value = "")]
    pub audience: String,

    /// Start date kind: exact, days, weeks, or months
    #[arg(long, value_name = "KIND", default_value = "exact")]
    pub start_kind: String,

    /// Start date value: a YYYY-MM-DD literal, "unit:n", or a bare count
    #[arg(long, value_name = "VALUE", default_value = "")]
    pub start: String,

    /// End date kind: exact, days, weeks, or months
    #[arg(long, value_name = "KIND", default_value = "exact")]
    pub end_kind: String,

    /// End date value: a YYYY-MM-DD literal, "unit:n", or a bare count
    #[arg(long, value_name = "VALUE", default_value = "")]
    pub end: String,
}

/// Show the clarifying questions issued for a campaign.
#[derive(Parser, Debug)]
#[command(about = "Show the clarifying questions for a campaign")]
pub struct QuestionsArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub campaign: String,
}

/// Submit round-2 answers and synthesize the plan.
#[derive(Parser, Debug)]
#[command(about = "Submit round-2 answers and synthesize the campaign plan")]
pub struct AnswerArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub campaign: String,

    /// Answers as field=value pairs; unanswered questions record ""
    #[arg(value_name = "FIELD=VALUE")]
    pub answers: Vec<String>,
}

/// Show one campaign in full.
#[derive(Parser, Debug)]
#[command(about = "Show one campaign's stage data and engagement")]
pub struct ShowArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub campaign: String,
}

/// List all campaigns with stage and progress.
#[derive(Parser, Debug)]
#[command(about = "List all campaigns with stage and progress")]
pub struct OverviewArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Ask for suggestions for a single form field.
#[derive(Parser, Debug)]
#[command(about = "Suggest values for one campaign field")]
pub struct SuggestArgs {
    /// Campaign goal used as context
    #[arg(long, default_value = "")]
    pub goal: String,

    /// Field to suggest for (campaign_name, objective, target_audience, ...)
    #[arg(long, value_name = "FIELD")]
    pub field: String,

    /// Partial text the user already typed
    #[arg(long, default_value = "")]
    pub typed: String,

    /// Already-answered fields as field=value pairs
    #[arg(value_name = "FIELD=VALUE")]
    pub context: Vec<String>,
}

/// Ask for suggestions for all round-1 fields at once.
#[derive(Parser, Debug)]
#[command(about = "Suggest values for every round-1 field")]
pub struct FillArgs {
    /// Campaign goal used as context
    #[arg(long, default_value = "")]
    pub goal: String,

    /// Partial campaign name already typed
    #[arg(long, default_value = "")]
    pub name: String,

    /// Partial objective already typed
    #[arg(long, default_value = "")]
    pub objective: String,

    /// Partial audience already typed
    #[arg(long, default_value = "")]
    pub audience: String,
}

/// Upload material files and draft channel content from them.
#[derive(Parser, Debug)]
#[command(about = "Upload material files and draft channel content")]
pub struct MaterialsArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub campaign: String,

    /// Material files to store
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// How many content hooks to request per channel
    #[arg(long, default_value_t = 50)]
    pub count: usize,
}

/// Regenerate content for one channel from the campaign context.
#[derive(Parser, Debug)]
#[command(about = "Regenerate email or social content for a campaign")]
pub struct GenerateArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub campaign: String,

    /// Channel: email or social
    #[arg(long)]
    pub channel: String,

    /// How many items to request
    #[arg(long, default_value_t = 5)]
    pub count: usize,
}

/// Set the recipient list, resetting engagement tracking.
#[derive(Parser, Debug)]
#[command(about = "Set the recipient list (resets engagement tracking)")]
pub struct RecipientsArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub campaign: String,

    /// Addresses separated by commas or newlines
    #[arg(long, value_name = "ADDRESSES")]
    pub list: String,
}

/// Print per-recipient tracking links.
#[derive(Parser, Debug)]
#[command(about = "Print per-recipient open/click tracking links")]
pub struct LinksArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub campaign: String,

    /// Public base URL of the tracking endpoint
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

/// Send mail to the whole recipient list.
#[derive(Parser, Debug)]
#[command(about = "Send the newsletter, one draft, or ad-hoc text by mail")]
pub struct SendArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub campaign: String,

    /// Send a single generated email draft by index instead of the
    /// combined newsletter
    #[arg(long, value_name = "INDEX", conflicts_with = "body")]
    pub snippet: Option<usize>,

    /// Send this ad-hoc snippet text instead of generated content
    #[arg(long, value_name = "TEXT")]
    pub body: Option<String>,
}

/// Publish one social post.
#[derive(Parser, Debug)]
#[command(about = "Publish one social post")]
pub struct PostArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub campaign: String,

    /// Post this text
    #[arg(long, value_name = "TEXT", conflicts_with = "index")]
    pub text: Option<String>,

    /// Post a generated social draft by index
    #[arg(long, value_name = "INDEX")]
    pub index: Option<usize>,

    /// Credential set name (default: the first configured set)
    #[arg(long, value_name = "NAME")]
    pub credentials: Option<String>,
}

/// Host the tracking endpoint.
#[derive(Parser, Debug)]
#[command(about = "Host the open/click tracking endpoint")]
pub struct ServeArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Listen address
    #[arg(long, value_name = "ADDR", default_value = DEFAULT_SERVE_ADDR)]
    pub addr: String,
}

/// Summarize engagement across campaigns.
#[derive(Parser, Debug)]
#[command(about = "Summarize recipients, opens, and clicks per campaign")]
pub struct AnalyticsArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Delete a campaign and its uploads.
#[derive(Parser, Debug)]
#[command(about = "Delete a campaign and its uploaded materials")]
pub struct DeleteArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Campaign id
    #[arg(long, value_name = "ID")]
    pub campaign: String,
}

/// Delivery settings.
#[derive(Parser, Debug)]
#[command(about = "Update mail transport and social credential settings")]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    Email(EmailConfigArgs),
    SocialAdd(SocialAddArgs),
    SocialRemove(SocialRemoveArgs),
    SocialList(SocialListArgs),
}

/// Update the singleton mail transport config; unset flags keep their
/// current values.
#[derive(Parser, Debug)]
#[command(about = "Update the mail transport settings")]
pub struct EmailConfigArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Transport mode: local or authenticated
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Relay host
    #[arg(long)]
    pub host: Option<String>,

    /// Relay port
    #[arg(long)]
    pub port: Option<u16>,

    /// Login user for the authenticated mode
    #[arg(long)]
    pub user: Option<String>,

    /// Login secret for the authenticated mode
    #[arg(long)]
    pub secret: Option<String>,

    /// Sender address for outbound mail
    #[arg(long, value_name = "ADDRESS")]
    pub sender: Option<String>,
}

/// Append a named social credential set.
#[derive(Parser, Debug)]
#[command(about = "Add a named social credential set")]
pub struct SocialAddArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Name for this credential set
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub api_key: String,

    #[arg(long, default_value = "")]
    pub api_secret: String,

    #[arg(long, default_value = "")]
    pub access_token: String,

    #[arg(long, default_value = "")]
    pub access_token_secret: String,
}

/// Remove a social credential set by name.
#[derive(Parser, Debug)]
#[command(about = "Remove a social credential set by name")]
pub struct SocialRemoveArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Name of the credential set to remove
    #[arg(long)]
    pub name: String,
}

/// List configured social credential set names.
#[derive(Parser, Debug)]
#[command(about = "List social credential set names")]
pub struct SocialListArgs {
    /// Store root (default: $OUTREACH_DATA_DIR, else the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Request an e-signature access token.
#[derive(Parser, Debug)]
#[command(about = "Request an e-signature access token (stub integration)")]
pub struct EsignArgs {}
