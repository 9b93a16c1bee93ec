use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::model::{ItemMapping, LatestPrices, PriceQuote};

pub fn build_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(AppError::Client)
}

pub async fn load_mapping(client: &reqwest::Client, base_url: &str) -> Result<Vec<ItemMapping>> {
    let url = format!("{}/mapping", base_url);
    let items: Vec<ItemMapping> = get_json(client, &url, "item mapping").await?;

    debug!(count = items.len(), "item mapping loaded");
    Ok(items)
}

pub async fn load_latest(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<HashMap<u32, PriceQuote>> {
    let url = format!("{}/latest", base_url);
    let latest: LatestPrices = get_json(client, &url, "latest prices").await?;

    debug!(count = latest.data.len(), "latest prices loaded");
    Ok(latest.data)
}

// One GET, no retries. Any non-2xx status is a hard failure. Events stay at
// debug: stderr carries nothing but the final error line unless RUST_LOG asks.
async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    what: &'static str,
) -> Result<T> {
    let request_failed = |source| AppError::Request { url: url.to_string(), source };

    let response = client.get(url).send().await.map_err(request_failed)?;

    let status = response.status();
    if !status.is_success() {
        debug!(url = %url, status = %status, "{} request rejected", what);
        return Err(AppError::Http {
            url: url.to_string(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let body = response.text().await.map_err(request_failed)?;
    debug!(url = %url, body_len = body.len(), "{} response received", what);

    serde_json::from_str(&body).map_err(|source| {
        debug!(
            url = %url,
            error = %source,
            body_preview = %preview(&body),
            "{} JSON parse failed",
            what
        );
        AppError::Decode { what, source }
    })
}

/// First 200 chars of a body with control characters escaped, so a log
/// event never spans more than one line.
fn preview(body: &str) -> String {
    body.chars().take(200).flat_map(char::escape_default).collect()
}
