//! Distribution and tracking: per-recipient links, batch mail, social
//! posts, and engagement aggregation.

pub mod commands;
pub mod mail;
pub mod serve;
pub mod social;

use regex::Regex;
use serde::Serialize;

use crate::campaign::Campaign;

/// Tracking URLs for one recipient. A GET against either URL is the event.
#[derive(Debug, Clone, Serialize)]
pub struct TrackingLink {
    pub recipient: String,
    pub open_url: String,
    pub click_url: String,
}

/// Split a pasted recipient blob on commas and newlines. Duplicates are
/// kept: the list is ordered input, not a set.
pub fn parse_recipient_list(raw: &str) -> Vec<String> {
    let separators = Regex::new(r"[,\r\n]+").expect("static recipient separator pattern");
    separators
        .split(raw)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// One open/click link pair per recipient, embedding the campaign id and
/// the percent-encoded recipient address. Built fresh on every call.
pub fn tracking_links(campaign: &Campaign, base_url: &str) -> Vec<TrackingLink> {
    let base = base_url.trim_end_matches('/');
    campaign
        .recipients
        .iter()
        .map(|recipient| {
            let encoded = urlencoding::encode(recipient);
            TrackingLink {
                recipient: recipient.clone(),
                open_url: format!("{base}/track/open/{}/{encoded}", campaign.id),
                click_url: format!("{base}/track/click/{}/{encoded}", campaign.id),
            }
        })
        .collect()
}

/// Aggregated engagement counters for one campaign.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignSummary {
    pub id: String,
    pub name: String,
    pub total_recipients: usize,
    pub opened_count: usize,
    pub clicked_count: usize,
    pub progress_pct: u8,
}

/// Pure aggregation over current state; no side effects.
pub fn summarize(campaigns: &[Campaign]) -> Vec<CampaignSummary> {
    campaigns
        .iter()
        .map(|campaign| CampaignSummary {
            id: campaign.id.clone(),
            name: campaign.name.clone(),
            total_recipients: campaign.recipients.len(),
            opened_count: campaign.opened_count(),
            clicked_count: campaign.clicked_count(),
            progress_pct: campaign.progress_pct,
        })
        .collect()
}
