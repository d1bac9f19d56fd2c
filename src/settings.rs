//! Delivery settings commands: the singleton mail config and the named
//! social credential sets.
use anyhow::{bail, Result};

use crate::cli::{
    ConfigArgs, ConfigCommand, EmailConfigArgs, SocialAddArgs, SocialListArgs, SocialRemoveArgs,
};
use crate::store::{MailMode, SocialCredentialSet, Store};

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommand::Email(args) => run_config_email(args),
        ConfigCommand::SocialAdd(args) => run_social_add(args),
        ConfigCommand::SocialRemove(args) => run_social_remove(args),
        ConfigCommand::SocialList(args) => run_social_list(args),
    }
}

/// Update the mail transport config in place; unset flags keep their
/// current (or default) values.
fn run_config_email(args: &EmailConfigArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    let mut config = store.load_mail_config()?;

    if let Some(mode) = &args.mode {
        config.mode = match mode.as_str() {
            "local" => MailMode::Local,
            "authenticated" => MailMode::Authenticated,
            other => bail!("unknown mail mode {other:?} (expected local or authenticated)"),
        };
    }
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(user) = &args.user {
        config.user = user.clone();
    }
    if let Some(secret) = &args.secret {
        config.secret = secret.clone();
    }
    if let Some(sender) = &args.sender {
        config.sender_address = sender.clone();
    }

    store.update_mail_config(&config)?;
    println!(
        "mail settings updated: mode={} relay={}:{} sender={}",
        match config.mode {
            MailMode::Local => "local",
            MailMode::Authenticated => "authenticated",
        },
        config.host,
        config.port,
        config.sender_address
    );
    Ok(())
}

fn run_social_add(args: &SocialAddArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    store.add_social_set(SocialCredentialSet {
        name: args.name.clone(),
        api_key: args.api_key.clone(),
        api_secret: args.api_secret.clone(),
        access_token: args.access_token.clone(),
        access_token_secret: args.access_token_secret.clone(),
    })?;
    println!("added social credential set {}", args.name);
    Ok(())
}

fn run_social_remove(args: &SocialRemoveArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    if !store.remove_social_set(&args.name)? {
        bail!("no social credential set named {:?}", args.name);
    }
    println!("removed social credential set {}", args.name);
    Ok(())
}

fn run_social_list(args: &SocialListArgs) -> Result<()> {
    let store = Store::open(args.data_dir.as_deref())?;
    let sets = store.load_social_sets()?;
    if sets.is_empty() {
        println!("no social credential sets configured");
        return Ok(());
    }
    for set in sets {
        println!("{}", set.name);
    }
    Ok(())
}
