use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub mod api;
pub mod cdn;
pub mod error;
pub mod resolve;

pub use error::{ApiError, ResolveError};

/// Next.js embeds the current deployment's build token in every page.
pub static BUILD_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""buildId"\s*:\s*"([^"]+)""#).unwrap());

/// A fully-resolved channel: everything both output files need.
///
/// Only constructed once `identifier` and a usable stream id are in hand;
/// channels missing either never become records.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelRecord {
    pub name: String,
    pub group: String,
    pub identifier: String,
    pub user_id: String,
    pub logo: String,
    pub url: String,
}
