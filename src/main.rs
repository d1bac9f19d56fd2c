use anyhow::Result;
use clap::Parser;

mod campaign;
mod cli;
mod dates;
mod dispatch;
mod esign;
mod settings;
mod store;
mod suggest;
mod workflow;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    init_tracing();
    let args = RootArgs::parse();

    match args.command {
        Command::Create(args) => workflow::run_create(&args),
        Command::Questions(args) => workflow::run_questions(&args),
        Command::Answer(args) => workflow::run_answer(&args),
        Command::Show(args) => workflow::run_show(&args),
        Command::Overview(args) => workflow::run_overview(&args),
        Command::Suggest(args) => workflow::run_suggest(&args),
        Command::Fill(args) => workflow::run_fill(&args),
        Command::Materials(args) => workflow::run_materials(&args),
        Command::Generate(args) => workflow::run_generate(&args),
        Command::Recipients(args) => dispatch::commands::run_recipients(&args),
        Command::Links(args) => dispatch::commands::run_links(&args),
        Command::Send(args) => dispatch::commands::run_send(&args),
        Command::Post(args) => dispatch::commands::run_post(&args),
        Command::Serve(args) => dispatch::commands::run_serve(&args),
        Command::Analytics(args) => dispatch::commands::run_analytics(&args),
        Command::Delete(args) => workflow::run_delete(&args),
        Command::Config(args) => settings::run_config(&args),
        Command::EsignToken(args) => esign::run_esign_token(&args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
