use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::btv::{ApiError, BUILD_ID_REGEX};
use crate::config::{ChannelDescriptor, Config};
use crate::extract;

/// One GET, bounded by the client's timeout, parsed as JSON.
///
/// # Errors
/// Errors on timeout, non-2xx status, network failure or an unparseable body.
#[instrument(skip(client))]
pub async fn fetch_json(client: &Client, url: &str) -> Result<Value, ApiError> {
    let res = client.get(url).send().await?;
    if !res.status().is_success() {
        return Err(ApiError::HttpStatus(res.status()));
    }
    res.json::<Value>().await.map_err(ApiError::from)
}

/// Scrapes the landing page for the current build token, falling back to the
/// configured one when the page is unreachable or no longer carries it.
#[instrument(skip(client, config))]
pub async fn discover_build_id(client: &Client, config: &Config) -> String {
    match scrape_build_id(client, &config.base_url).await {
        Ok(build_id) => {
            debug!("Discovered build token {build_id}");
            build_id
        }
        Err(err) => {
            warn!(
                "Build token discovery failed ({err}), using configured fallback {}",
                config.fallback_build_id
            );
            config.fallback_build_id.clone()
        }
    }
}

async fn scrape_build_id(client: &Client, base_url: &str) -> Result<String, ApiError> {
    let res = client.get(base_url).send().await?;
    if !res.status().is_success() {
        return Err(ApiError::HttpStatus(res.status()));
    }
    let body = res.text().await.map_err(ApiError::from)?;

    BUILD_ID_REGEX
        .captures(&body)
        .map(|captures| captures[1].to_string())
        .ok_or(ApiError::Missing("buildId"))
}

/// Fetches the site's channel catalog and turns it into descriptors.
///
/// Catalog entries that carry no usable name or slug are skipped with a
/// warning; an entirely missing channel list is an error (the caller treats
/// it as fatal).
///
/// # Errors
/// Errors when the catalog endpoint is unreachable or has no channel list.
#[instrument(skip(client, config))]
pub async fn fetch_catalog(
    client: &Client,
    config: &Config,
    build_id: &str,
) -> Result<Vec<ChannelDescriptor>, ApiError> {
    let url = format!("{}/_next/data/{build_id}/index.json", config.base_url);
    let root = fetch_json(client, &url).await?;
    descriptors_from_catalog(&root)
}

/// Parsing half of [`fetch_catalog`].
///
/// # Errors
/// Errors when the response has no channel list at all.
pub fn descriptors_from_catalog(root: &Value) -> Result<Vec<ChannelDescriptor>, ApiError> {
    let Some(Value::Array(entries)) = extract::find(root, "channels") else {
        return Err(ApiError::Missing("channel list"));
    };

    let mut descriptors = Vec::with_capacity(entries.len());
    for entry in entries {
        let slug = extract::find_str(entry, "slug").or_else(|| extract::find_str(entry, "id"));
        let name = extract::find_str(entry, "display_name")
            .or_else(|| extract::find_str(entry, "name"))
            .or_else(|| extract::find_str(entry, "title"));
        match (name, slug) {
            (Some(name), Some(slug)) => descriptors.push(ChannelDescriptor {
                display_name: name,
                group: extract::find_str(entry, "group").unwrap_or_else(|| "BTV".to_string()),
                api_slug: slug,
            }),
            _ => warn!("Skipping catalog entry without name/slug: {entry}"),
        }
    }

    Ok(descriptors)
}

/// Fetches the per-channel page data containing the live-stream identifier.
///
/// # Errors
/// Errors on timeout, non-2xx status, network failure or an unparseable body.
#[instrument(skip(client, config))]
pub async fn fetch_channel_detail(
    client: &Client,
    config: &Config,
    build_id: &str,
    slug: &str,
) -> Result<Value, ApiError> {
    // The site expects literal %20 in the path segment, not +
    let encoded = slug.replace(' ', "%20");
    let url = format!(
        "{}/_next/data/{build_id}/channel/{encoded}.json?id={encoded}",
        config.base_url
    );
    fetch_json(client, &url).await
}
