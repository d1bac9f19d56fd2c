//! Blocking HTTP endpoint for tracking links.
//!
//! A GET against `/track/open/<id>/<recipient>` or
//! `/track/click/<id>/<recipient>` IS the engagement event. The links are
//! fetched by mail clients and scanners, so handlers take no
//! authentication, tolerate arbitrary repetition, and never disturb the
//! server on bad input.

use anyhow::{anyhow, Result};

use crate::store::Store;

enum EventKind {
    Open,
    Click,
}

struct Reply {
    status: u16,
    body: &'static str,
}

/// Serve tracking events until the process is stopped.
pub fn run_tracking_server(store: &Store, addr: &str) -> Result<()> {
    let server = tiny_http::Server::http(addr)
        .map_err(|err| anyhow!("bind tracking server on {addr}: {err}"))?;
    tracing::info!(addr, "tracking server listening");
    println!("tracking server listening on {addr}");
    for request in server.incoming_requests() {
        let reply = handle_request(store, request.url());
        let response = tiny_http::Response::from_string(reply.body).with_status_code(reply.status);
        if let Err(err) = request.respond(response) {
            tracing::warn!(error = %err, "tracking response failed");
        }
    }
    Ok(())
}

fn handle_request(store: &Store, url: &str) -> Reply {
    let path = url.split('?').next().unwrap_or(url);
    let mut segments = path.trim_start_matches('/').splitn(4, '/');
    let (prefix, kind, id, recipient) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    );
    if prefix != Some("track") {
        return Reply {
            status: 404,
            body: "not found",
        };
    }
    let kind = match kind {
        Some("open") => EventKind::Open,
        Some("click") => EventKind::Click,
        _ => {
            return Reply {
                status: 404,
                body: "not found",
            }
        }
    };
    let (Some(id), Some(recipient)) = (id, recipient) else {
        return Reply {
            status: 404,
            body: "not found",
        };
    };
    let recipient = match urlencoding::decode(recipient) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            return Reply {
                status: 400,
                body: "bad recipient encoding",
            }
        }
    };

    match record_event(store, &kind, id, &recipient) {
        Ok(()) => Reply {
            status: 200,
            body: match kind {
                EventKind::Open => "open recorded, you may close this tab",
                EventKind::Click => "click recorded, you may close this tab",
            },
        },
        Err(err) => {
            tracing::warn!(id, error = %err, "tracking event for unknown campaign");
            Reply {
                status: 404,
                body: "unknown campaign",
            }
        }
    }
}

/// Monotonic flip on the campaign record. Repeats and unknown recipients
/// change nothing and skip the write.
fn record_event(store: &Store, kind: &EventKind, id: &str, recipient: &str) -> Result<()> {
    let mut campaign = store.load_campaign(id)?;
    let changed = match kind {
        EventKind::Open => campaign.record_open(recipient),
        EventKind::Click => campaign.record_click(recipient),
    };
    if changed {
        tracing::info!(id, recipient, "engagement recorded");
        store.save_campaign(&campaign)?;
    }
    Ok(())
}
