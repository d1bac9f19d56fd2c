//! JSON-file store for campaigns and delivery configuration.
//!
//! Layout under the data root:
//!
//! ```text
//! campaigns/<id>.json   one document per campaign
//! mail_config.json      singleton mail transport settings
//! social.json           list of named social credential sets
//! uploads/<id>/<name>   raw bytes of uploaded materials
//! ```
//!
//! Records are pretty-printed JSON. Unknown fields are ignored and absent
//! fields default, so older or truncated records load as empty structures.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::campaign::{Campaign, MaterialRef};

pub const DATA_DIR_ENV: &str = "OUTREACH_DATA_DIR";

const CAMPAIGNS_DIR: &str = "campaigns";
const UPLOADS_DIR: &str = "uploads";
const MAIL_CONFIG_FILE: &str = "mail_config.json";
const SOCIAL_FILE: &str = "social.json";

/// Mail transport selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailMode {
    Local,
    Authenticated,
}

/// Singleton mail transport settings, created lazily with local-relay
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_mode")]
    pub mode: MailMode,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_sender")]
    pub sender_address: String,
}

impl Default for MailConfig {
    fn default() -> MailConfig {
        MailConfig {
            mode: default_mode(),
            host: default_host(),
            port: default_port(),
            user: String::new(),
            secret: String::new(),
            sender_address: default_sender(),
        }
    }
}

fn default_mode() -> MailMode {
    MailMode::Local
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    1025
}

fn default_sender() -> String {
    "noreply@example.org".to_string()
}

/// Named credential set for the social-posting provider. Appended, never
/// edited; removable only by explicit delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialCredentialSet {
    pub name: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub access_token_secret: String,
}

pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open (creating if needed) the store at `data_dir`, the
    /// `OUTREACH_DATA_DIR` environment variable, or the platform data dir.
    pub fn open(data_dir: Option<&Path>) -> Result<Store> {
        let root = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => match env::var_os(DATA_DIR_ENV) {
                Some(dir) => PathBuf::from(dir),
                None => dirs::data_dir()
                    .ok_or_else(|| anyhow!("no platform data dir; pass --data-dir"))?
                    .join("outreach"),
            },
        };
        fs::create_dir_all(root.join(CAMPAIGNS_DIR))
            .with_context(|| format!("create store at {}", root.display()))?;
        Ok(Store { root })
    }

    fn campaign_path(&self, id: &str) -> PathBuf {
        self.root.join(CAMPAIGNS_DIR).join(format!("{id}.json"))
    }

    fn uploads_dir(&self, id: &str) -> PathBuf {
        self.root.join(UPLOADS_DIR).join(id)
    }

    pub fn save_campaign(&self, campaign: &Campaign) -> Result<()> {
        let path = self.campaign_path(&campaign.id);
        let text = serde_json::to_string_pretty(campaign).context("serialize campaign")?;
        fs::write(&path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Load one campaign. An unknown id is a hard failure.
    pub fn load_campaign(&self, id: &str) -> Result<Campaign> {
        let path = self.campaign_path(id);
        let bytes =
            fs::read(&path).with_context(|| format!("unknown campaign {id} ({})", path.display()))?;
        let campaign: Campaign =
            serde_json::from_slice(&bytes).with_context(|| format!("parse campaign {id}"))?;
        Ok(campaign)
    }

    pub fn delete_campaign(&self, id: &str) -> Result<()> {
        let path = self.campaign_path(id);
        fs::remove_file(&path).with_context(|| format!("unknown campaign {id}"))?;
        let uploads = self.uploads_dir(id);
        if uploads.is_dir() {
            fs::remove_dir_all(&uploads)
                .with_context(|| format!("remove uploads {}", uploads.display()))?;
        }
        Ok(())
    }

    /// All campaigns, sorted by id. Unreadable records are skipped with a
    /// warning rather than failing the listing.
    pub fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let dir = self.root.join(CAMPAIGNS_DIR);
        let mut campaigns = Vec::new();
        for entry in fs::read_dir(&dir).with_context(|| format!("read {}", dir.display()))? {
            let entry = entry.context("read campaign dir entry")?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match fs::read(&path)
                .map_err(anyhow::Error::from)
                .and_then(|bytes| serde_json::from_slice::<Campaign>(&bytes).map_err(Into::into))
            {
                Ok(campaign) => campaigns.push(campaign),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable campaign record");
                }
            }
        }
        campaigns.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(campaigns)
    }

    /// Load the mail config, writing local-relay defaults on first use.
    pub fn load_mail_config(&self) -> Result<MailConfig> {
        let path = self.root.join(MAIL_CONFIG_FILE);
        if !path.is_file() {
            let config = MailConfig::default();
            self.update_mail_config(&config)?;
            return Ok(config);
        }
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let config: MailConfig =
            serde_json::from_slice(&bytes).context("parse mail config JSON")?;
        Ok(config)
    }

    pub fn update_mail_config(&self, config: &MailConfig) -> Result<()> {
        let path = self.root.join(MAIL_CONFIG_FILE);
        let text = serde_json::to_string_pretty(config).context("serialize mail config")?;
        fs::write(&path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// All social credential sets; an absent file is an empty list.
    pub fn load_social_sets(&self) -> Result<Vec<SocialCredentialSet>> {
        let path = self.root.join(SOCIAL_FILE);
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let sets: Vec<SocialCredentialSet> =
            serde_json::from_slice(&bytes).context("parse social credentials JSON")?;
        Ok(sets)
    }

    pub fn add_social_set(&self, set: SocialCredentialSet) -> Result<()> {
        if set.name.trim().is_empty() {
            return Err(anyhow!("social credential set name is required"));
        }
        let mut sets = self.load_social_sets()?;
        sets.push(set);
        self.write_social_sets(&sets)
    }

    /// Remove a credential set by name; returns whether one was removed.
    pub fn remove_social_set(&self, name: &str) -> Result<bool> {
        let mut sets = self.load_social_sets()?;
        let before = sets.len();
        sets.retain(|set| set.name != name);
        let removed = sets.len() != before;
        if removed {
            self.write_social_sets(&sets)?;
        }
        Ok(removed)
    }

    fn write_social_sets(&self, sets: &[SocialCredentialSet]) -> Result<()> {
        let path = self.root.join(SOCIAL_FILE);
        let text = serde_json::to_string_pretty(sets).context("serialize social credentials")?;
        fs::write(&path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Copy a material file into the campaign's uploads, returning the
    /// stored descriptor. Only the file name is kept from the source path.
    pub fn store_material(&self, campaign_id: &str, source: &Path) -> Result<MaterialRef> {
        let filename = source
            .file_name()
            .and_then(|name| name.to_str())
            .map(sanitize_filename)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| anyhow!("material {} has no usable file name", source.display()))?;
        let dir = self.uploads_dir(campaign_id);
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        let dest = dir.join(&filename);
        fs::copy(source, &dest)
            .with_context(|| format!("store material {}", source.display()))?;
        Ok(MaterialRef {
            filename,
            storage_path: dest.display().to_string(),
        })
    }
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
