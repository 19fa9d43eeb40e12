use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::btv::{ChannelRecord, ResolveError, api, cdn};
use crate::config::{ChannelDescriptor, Config};
use crate::extract;

/// Fetches one channel's page data and extracts a [`ChannelRecord`] from it.
///
/// # Errors
/// Errors when the fetch fails or no identifier can be found anywhere in the
/// response. Either way the caller skips this channel and keeps going.
#[instrument(skip(client, config, build_id), fields(channel = %channel.display_name))]
pub async fn resolve_channel(
    client: &Client,
    config: &Config,
    build_id: &str,
    channel: &ChannelDescriptor,
) -> Result<ChannelRecord, ResolveError> {
    let detail = api::fetch_channel_detail(client, config, build_id, &channel.api_slug).await?;
    record_from_detail(&detail, channel, config)
}

/// Splits per-channel outcomes into resolved records and the display names
/// of the channels that failed. A failed channel is logged and skipped;
/// it never stops the channels after it. Both lists keep the input order.
pub fn partition_outcomes(
    outcomes: impl IntoIterator<Item = (String, Result<ChannelRecord, ResolveError>)>,
) -> (Vec<ChannelRecord>, Vec<String>) {
    let mut records = Vec::new();
    let mut failures = Vec::new();

    for (name, outcome) in outcomes {
        match outcome {
            Ok(record) => {
                info!("{} -> {}", record.name, record.url);
                records.push(record);
            }
            Err(err) => {
                warn!("Skipping {name}: {err}");
                failures.push(name);
            }
        }
    }

    (records, failures)
}

/// Pure extraction half of [`resolve_channel`], so it can be exercised
/// against canned responses.
///
/// # Errors
/// Errors when the response carries no `identifier`.
pub fn record_from_detail(
    detail: &Value,
    channel: &ChannelDescriptor,
    config: &Config,
) -> Result<ChannelRecord, ResolveError> {
    let scope = channel_scope(detail, &channel.api_slug);

    let identifier = extract::find_str(scope, "identifier")
        .or_else(|| extract::find_str(detail, "identifier"))
        .ok_or(ResolveError::FieldNotFound("identifier"))?;

    // Some responses drop userId entirely; the identifier doubles as the
    // stream id there.
    let user_id = extract::find_str(scope, "userId")
        .or_else(|| extract::find_str(detail, "userId"))
        .unwrap_or_else(|| identifier.clone());

    let country = extract::find_str(scope, "country")
        .or_else(|| extract::find_str(detail, "country"))
        .unwrap_or_else(|| config.country.clone());

    let raw_logo =
        extract::find_str(scope, "poster").or_else(|| extract::find_str(detail, "logo"));
    let logo = cdn::normalize_logo(config, &channel.display_name, raw_logo.as_deref());

    debug!("Resolved identifier {identifier}, user id {user_id}");

    Ok(ChannelRecord {
        name: channel.display_name.clone(),
        group: channel.group.clone(),
        url: cdn::stream_url(&config.base_url, &identifier, &country, &user_id),
        identifier,
        user_id,
        logo,
    })
}

/// Narrows the search to the response section that belongs to this channel.
///
/// Prefers the `currentChannel` block; failing that, picks the entry matching
/// our slug out of the sibling channel list. Falls back to the whole document
/// so the generic search still has a chance.
fn channel_scope<'a>(detail: &'a Value, slug: &str) -> &'a Value {
    if let Some(current) = extract::get_by_path(detail, &["pageProps", "currentChannel"]) {
        return current;
    }

    if let Some(Value::Array(channels)) = extract::get_by_path(detail, &["pageProps", "channels"])
    {
        for entry in channels {
            let entry_slug =
                extract::find_str(entry, "slug").or_else(|| extract::find_str(entry, "id"));
            if entry_slug.as_deref() == Some(slug) {
                return entry;
            }
        }
    }

    detail
}
