#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![warn(clippy::perf)]
#![warn(clippy::complexity)]
#![warn(clippy::style)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use btv::{api, cdn, resolve};
use chrono::Utc;
use clap::Parser;
use config::Config;
use tracing::{info, warn};
use util::init_http_client;

pub mod btv;
pub mod config;
pub mod extract;
pub mod playlist;
pub mod util;

/// Generates an M3U playlist (and JSON mirror) of BTV live streams
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory where the playlist and JSON mirror are written
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Fetch the channel list from the site catalog instead of using the
    /// embedded defaults
    #[arg(long)]
    fetch_catalog: bool,

    /// HEAD-check every resolved logo URL (informational only)
    #[arg(long)]
    verify_logos: bool,

    /// Resolve channels and report, but write no files
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = Config::default();
    let client = init_http_client();

    let build_id = api::discover_build_id(&client, &config).await;
    info!("Using build token {build_id}");

    let channels = if args.fetch_catalog {
        api::fetch_catalog(&client, &config, &build_id)
            .await
            .context("Fetching channel catalog")?
    } else {
        config.channels.clone()
    };
    info!("Resolving {} channels from {}", channels.len(), config.base_url);

    // One channel at a time; a failed channel is skipped, never fatal
    let mut outcomes = Vec::with_capacity(channels.len());
    for channel in &channels {
        info!("Fetching {}", channel.display_name);
        let outcome = resolve::resolve_channel(&client, &config, &build_id, channel).await;
        outcomes.push((channel.display_name.clone(), outcome));
    }
    let (records, failures) = resolve::partition_outcomes(outcomes);

    if records.is_empty() {
        bail!("None of the {} channels resolved", channels.len());
    }

    if args.verify_logos {
        for record in &records {
            cdn::verify_logo(&client, record).await;
        }
    }

    let now = Utc::now();
    let m3u = playlist::render_m3u(&records, &config, now);
    let document = playlist::build_document(&records, &config, now);

    if args.dry_run {
        info!("Dry run, skipping file writes");
    } else {
        tokio::fs::create_dir_all(&args.output_dir)
            .await
            .context("Creating output directory")?;
        tokio::fs::write(args.output_dir.join("btv_channels.m3u8"), m3u)
            .await
            .context("Writing playlist")?;
        tokio::fs::write(
            args.output_dir.join("btv_channels.json"),
            serde_json::to_vec_pretty(&document).context("Serializing JSON mirror")?,
        )
        .await
        .context("Writing JSON mirror")?;
        info!("Wrote btv_channels.m3u8 and btv_channels.json to {:?}", args.output_dir);
    }

    info!(
        "Attempted {} channels: {} resolved, {} failed",
        channels.len(),
        records.len(),
        failures.len()
    );
    if !failures.is_empty() {
        warn!("Failed channels: {}", failures.join(", "));
    }

    Ok(())
}
