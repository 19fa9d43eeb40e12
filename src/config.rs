use std::collections::HashMap;

/// A channel to resolve.
///
/// `api_slug` is the file name the site's data endpoints use for the channel,
/// which is not always the on-screen display name.
#[derive(Debug, Clone)]
pub struct ChannelDescriptor {
    pub display_name: String,
    pub api_slug: String,
    pub group: String,
}

impl ChannelDescriptor {
    fn new(display_name: &str, api_slug: &str, group: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            api_slug: api_slug.to_string(),
            group: group.to_string(),
        }
    }
}

/// Everything the pipeline needs to know about the site, resolved once at
/// startup and passed by reference from there on.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub cdn_base_url: String,
    pub country: String,
    /// Used when scraping the landing page for the current build token fails.
    pub fallback_build_id: String,
    pub channels: Vec<ChannelDescriptor>,
    /// Wins over whatever the API returns. Keyed by display name.
    pub logo_overrides: HashMap<String, String>,
    /// Used when the API returns no logo at all. Keyed by display name.
    pub default_logos: HashMap<String, String>,
}

impl Config {
    #[must_use]
    pub fn logo_override(&self, display_name: &str) -> Option<&str> {
        self.logo_overrides.get(display_name).map(String::as_str)
    }

    #[must_use]
    pub fn default_logo(&self, display_name: &str) -> Option<&str> {
        self.default_logos.get(display_name).map(String::as_str)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://www.btvlive.gov.bd".to_string(),
            cdn_base_url: "https://cdn.btvlive.gov.bd".to_string(),
            country: "BD".to_string(),
            fallback_build_id: "wr5BMimBGS-yN5Rc2tmam".to_string(),
            channels: vec![
                ChannelDescriptor::new("BTV", "BTV", "BTV"),
                ChannelDescriptor::new("BTV World", "BTV World", "BTV"),
                ChannelDescriptor::new("সংসদ টেলিভিশন", "Sangsad Television", "Parliament"),
                ChannelDescriptor::new("BTV চট্টগ্রাম", "BTV Chattogram", "BTV"),
            ],
            // The API serves a stale poster for Chattogram, so pin it
            logo_overrides: HashMap::from([(
                "BTV চট্টগ্রাম".to_string(),
                "https://www.btvlive.gov.bd/images/btv-chattogram-logo.png".to_string(),
            )]),
            default_logos: HashMap::from([
                (
                    "BTV".to_string(),
                    "https://www.btvlive.gov.bd/images/btv-logo.png".to_string(),
                ),
                (
                    "BTV World".to_string(),
                    "https://www.btvlive.gov.bd/images/btv-world-logo.png".to_string(),
                ),
                (
                    "সংসদ টেলিভিশন".to_string(),
                    "https://www.btvlive.gov.bd/images/sangsad-logo.png".to_string(),
                ),
            ]),
        }
    }
}
