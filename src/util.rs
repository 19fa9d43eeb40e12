use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};

/// Builds the HTTP client used for every request in a run: identifying
/// `User-Agent`, bounded connect and overall timeouts.
///
/// # Panics
/// Panics when the TLS backend cannot be initialized.
#[must_use]
pub fn init_http_client() -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.insert(
        "User-Agent",
        HeaderValue::from_str(&format!(
            "{}/{} (+{})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_REPOSITORY")
        ))
        .expect("static User-Agent is always a valid header value"),
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(15))
        .build()
        .expect("Unable to build HTTP client")
}
