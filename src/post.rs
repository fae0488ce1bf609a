use std::path::Path;

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use crate::http_client::http_client;
use crate::narrative::truncate_segment;

/// Posting API credentials and endpoint, read from the environment (a
/// local `.env` is loaded by the binary before this runs).
#[derive(Debug, Clone)]
pub struct PostConfig {
    pub api_base: String,
    pub token: String,
}

impl PostConfig {
    pub fn from_env() -> Result<Self> {
        let api_base = std::env::var("POST_API_BASE")
            .ok()
            .map(|s| s.trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .context("POST_API_BASE is not set")?;
        let token = std::env::var("POST_API_TOKEN")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .context("POST_API_TOKEN is not set")?;
        Ok(Self { api_base, token })
    }
}

#[derive(Debug, Deserialize)]
struct PostResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MediaResponse {
    media_id: String,
}

#[derive(Debug, Deserialize, Default)]
struct SearchResponse {
    #[serde(default)]
    statuses: Vec<SearchStatus>,
}

#[derive(Debug, Deserialize)]
struct SearchStatus {
    #[serde(default)]
    text: String,
}

/// Best-effort check whether the header was already posted from this
/// account. Freshly created posts take a while to become searchable, so a
/// re-run inside that window can still double-post; the local ledger is
/// the primary guard.
pub fn already_posted(cfg: &PostConfig, header: &str) -> Result<bool> {
    let client = http_client()?;
    let resp = client
        .get(format!("{}/statuses/search", cfg.api_base))
        .bearer_auth(&cfg.token)
        .query(&[("query", header), ("scope", "self")])
        .send()
        .context("duplicate search request failed")?;
    if !resp.status().is_success() {
        // Search is advisory; a failing search never blocks the post.
        return Ok(false);
    }
    let found: SearchResponse = resp.json().unwrap_or_default();
    Ok(found.statuses.iter().any(|s| s.text.contains(header)))
}

/// Post the segments as a reply thread, in order. Media files (if any
/// exist on disk) are attached to the first segments, one file per
/// segment, mirroring the chart-then-shot-chart layout of the thread.
pub fn post_thread(cfg: &PostConfig, segments: &[String], media_paths: &[&Path]) -> Result<()> {
    if segments.is_empty() {
        bail!("nothing to post");
    }
    let mut reply_to: Option<String> = None;
    for (idx, segment) in segments.iter().enumerate() {
        let media_id = match media_paths.get(idx) {
            Some(path) if path.exists() => Some(upload_media(cfg, path)?),
            _ => None,
        };
        let id = post_segment(cfg, segment, media_id.as_deref(), reply_to.as_deref())?;
        reply_to = Some(id);
    }
    Ok(())
}

fn post_segment(
    cfg: &PostConfig,
    text: &str,
    media_id: Option<&str>,
    reply_to: Option<&str>,
) -> Result<String> {
    let client = http_client()?;
    // The limit is enforced at composition time too; this is the boundary
    // where the medium actually rejects oversized posts.
    let text = truncate_segment(text);
    let mut payload = json!({ "text": text });
    if let Some(media_id) = media_id {
        payload["media_ids"] = json!([media_id]);
    }
    if let Some(reply_to) = reply_to {
        payload["in_reply_to"] = json!(reply_to);
    }

    let resp = client
        .post(format!("{}/statuses", cfg.api_base))
        .bearer_auth(&cfg.token)
        .json(&payload)
        .send()
        .context("status post failed")?
        .error_for_status()
        .context("posting API rejected the status")?;
    let posted: PostResponse = resp.json().context("unexpected status response")?;
    Ok(posted.id)
}

fn upload_media(cfg: &PostConfig, path: &Path) -> Result<String> {
    let client = http_client()?;
    let bytes =
        std::fs::read(path).with_context(|| format!("read media file {}", path.display()))?;
    let payload = json!({ "media_data": BASE64.encode(&bytes) });
    let resp = client
        .post(format!("{}/media/upload", cfg.api_base))
        .bearer_auth(&cfg.token)
        .json(&payload)
        .send()
        .context("media upload failed")?
        .error_for_status()
        .context("posting API rejected the media upload")?;
    let media: MediaResponse = resp.json().context("unexpected media response")?;
    Ok(media.media_id)
}
