use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::btv::ChannelRecord;
use crate::config::Config;

/// The JSON mirror of the playlist, for programmatic consumers.
#[derive(Debug, Serialize)]
pub struct PlaylistDocument {
    pub last_updated: String,
    pub country: String,
    pub total_channels: usize,
    pub channels: Vec<ChannelRecord>,
}

/// Renders the extended-M3U playlist. Entries keep the input order.
///
/// The timestamp is passed in so the caller can stamp both output files with
/// the same instant.
#[must_use]
pub fn render_m3u(records: &[ChannelRecord], config: &Config, now: DateTime<Utc>) -> String {
    let mut out = String::from("#EXTM3U\n");
    out.push_str("#PLAYLIST: বাংলাদেশ টেলিভিশন চ্যানেল\n");
    out.push_str(&format!("#UPDATED: {}\n", now.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!("#SOURCE: {}\n", config.base_url));
    out.push_str(&format!("#TOTAL CHANNELS: {}\n\n", records.len()));

    for record in records {
        out.push_str(&format!(
            "#EXTINF:-1 tvg-id=\"{}\" tvg-name=\"{}\" tvg-logo=\"{}\" group-title=\"{}\",{}\n",
            record.identifier, record.name, record.logo, record.group, record.name
        ));
        out.push_str(&record.url);
        out.push_str("\n\n");
    }

    out
}

#[must_use]
pub fn build_document(
    records: &[ChannelRecord],
    config: &Config,
    now: DateTime<Utc>,
) -> PlaylistDocument {
    PlaylistDocument {
        last_updated: now.to_rfc3339(),
        country: config.country.clone(),
        total_channels: records.len(),
        channels: records.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use indoc::indoc;

    use super::*;

    fn record(name: &str, identifier: &str) -> ChannelRecord {
        ChannelRecord {
            name: name.to_string(),
            group: "BTV".to_string(),
            identifier: identifier.to_string(),
            user_id: identifier.to_string(),
            logo: format!("https://cdn.example/{identifier}.png"),
            url: format!("https://site.example/live/{identifier}/BD/{identifier}/index.m3u8"),
        }
    }

    fn test_config() -> Config {
        Config {
            base_url: "https://site.example".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn renders_one_entry_per_record_in_input_order() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let records = [record("BTV World", "w1"), record("BTV", "b1")];

        let m3u = render_m3u(&records, &test_config(), now);

        assert_eq!(
            m3u,
            indoc! {r#"
                #EXTM3U
                #PLAYLIST: বাংলাদেশ টেলিভিশন চ্যানেল
                #UPDATED: 2026-08-25 12:00:00
                #SOURCE: https://site.example
                #TOTAL CHANNELS: 2

                #EXTINF:-1 tvg-id="w1" tvg-name="BTV World" tvg-logo="https://cdn.example/w1.png" group-title="BTV",BTV World
                https://site.example/live/w1/BD/w1/index.m3u8

                #EXTINF:-1 tvg-id="b1" tvg-name="BTV" tvg-logo="https://cdn.example/b1.png" group-title="BTV",BTV
                https://site.example/live/b1/BD/b1/index.m3u8

            "#}
        );
    }

    #[test]
    fn reruns_differ_only_in_timestamp() {
        let records = [record("BTV", "b1")];
        let config = test_config();

        let first = render_m3u(
            &records,
            &config,
            Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap(),
        );
        let second = render_m3u(
            &records,
            &config,
            Utc.with_ymd_and_hms(2026, 8, 25, 13, 30, 0).unwrap(),
        );

        let diff: Vec<(&str, &str)> = first
            .lines()
            .zip(second.lines())
            .filter(|(a, b)| a != b)
            .collect();
        assert_eq!(
            diff,
            [("#UPDATED: 2026-08-25 12:00:00", "#UPDATED: 2026-08-25 13:30:00")]
        );
    }

    #[test]
    fn document_mirrors_the_records() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let records = [record("BTV", "b1")];

        let document = build_document(&records, &test_config(), now);
        let json = serde_json::to_value(&document).unwrap();

        assert_eq!(json["last_updated"], "2026-08-25T12:00:00+00:00");
        assert_eq!(json["country"], "BD");
        assert_eq!(json["total_channels"], 1);
        assert_eq!(json["channels"][0]["identifier"], "b1");
        assert_eq!(
            json["channels"][0]["url"],
            "https://site.example/live/b1/BD/b1/index.m3u8"
        );
    }
}
