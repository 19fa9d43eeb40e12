use reqwest::Client;
use tracing::{debug, warn};

use crate::btv::ChannelRecord;
use crate::config::Config;

/// Shown for a channel the API gives no logo for and no default is known.
pub const PLACEHOLDER_LOGO: &str = "https://www.btvlive.gov.bd/images/placeholder.png";

/// Composes the playable HLS URL. The identifier is an opaque token from the
/// API and is not validated here.
#[must_use]
pub fn stream_url(base_url: &str, identifier: &str, country: &str, user_id: &str) -> String {
    format!(
        "{}/live/{identifier}/{country}/{user_id}/index.m3u8",
        base_url.trim_end_matches('/')
    )
}

/// Turns whatever the API returned for a logo into an absolute URL.
///
/// Precedence: manual per-channel override, already-absolute passthrough,
/// CDN-relative (`cms/`) rewrite, site-relative (`/`) rewrite, non-empty
/// passthrough, then the per-channel default or [`PLACEHOLDER_LOGO`].
#[must_use]
pub fn normalize_logo(config: &Config, display_name: &str, raw: Option<&str>) -> String {
    if let Some(url) = config.logo_override(display_name) {
        return url.to_string();
    }

    match raw {
        Some(logo) if logo.starts_with("http://") || logo.starts_with("https://") => {
            logo.to_string()
        }
        Some(logo) if logo.starts_with("cms/") => {
            format!("{}/{logo}", config.cdn_base_url.trim_end_matches('/'))
        }
        Some(logo) if logo.starts_with('/') => {
            format!("{}{logo}", config.base_url.trim_end_matches('/'))
        }
        Some(logo) if !logo.is_empty() => logo.to_string(),
        _ => config
            .default_logo(display_name)
            .unwrap_or(PLACEHOLDER_LOGO)
            .to_string(),
    }
}

/// HEAD-checks a resolved logo URL. Purely informational: failures are
/// logged and never affect playlist generation.
pub async fn verify_logo(client: &Client, record: &ChannelRecord) {
    match client.head(&record.logo).send().await {
        Ok(res) if res.status().is_success() => {
            debug!("Logo for {} is reachable", record.name);
        }
        Ok(res) => warn!("Logo for {} returned {}", record.name, res.status()),
        Err(err) => warn!("Logo check for {} failed: {err}", record.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            base_url: "https://site.example".to_string(),
            cdn_base_url: "https://cdn.example/".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn builds_stream_url() {
        assert_eq!(
            stream_url("https://site.example/", "abc123", "BD", "42"),
            "https://site.example/live/abc123/BD/42/index.m3u8"
        );
    }

    #[test]
    fn absolute_logo_passes_through() {
        let config = test_config();
        assert_eq!(
            normalize_logo(&config, "BTV", Some("https://elsewhere.example/x.png")),
            "https://elsewhere.example/x.png"
        );
    }

    #[test]
    fn cms_relative_logo_gets_cdn_base() {
        let config = test_config();
        assert_eq!(
            normalize_logo(&config, "BTV", Some("cms/cms/channel_poster/x.jpg")),
            "https://cdn.example/cms/cms/channel_poster/x.jpg"
        );
    }

    #[test]
    fn site_relative_logo_gets_site_base() {
        let config = test_config();
        assert_eq!(
            normalize_logo(&config, "BTV", Some("/images/x.png")),
            "https://site.example/images/x.png"
        );
    }

    #[test]
    fn missing_logo_falls_back_to_default_table() {
        let config = test_config();
        assert_eq!(
            normalize_logo(&config, "BTV", None),
            "https://www.btvlive.gov.bd/images/btv-logo.png"
        );
        assert_eq!(
            normalize_logo(&config, "Unknown Channel", Some("")),
            PLACEHOLDER_LOGO
        );
    }

    #[test]
    fn manual_override_beats_api_value() {
        let config = test_config();
        assert_eq!(
            normalize_logo(&config, "BTV চট্টগ্রাম", Some("https://stale.example/old.png")),
            "https://www.btvlive.gov.bd/images/btv-chattogram-logo.png"
        );
    }
}
