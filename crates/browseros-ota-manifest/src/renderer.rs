//! Canonical manifest rendering.
//!
//! Output is a pure function of the state and channel: enclosures follow
//! platform-key order and every URL is rebuilt from the version and platform,
//! never from a stored archive path.

use crate::channel::Channel;
use crate::model::{ManifestState, PlatformKey, SignedArtifact};
use crate::parser::SPARKLE_NS;
use crate::platform::archive_file_name;

/// Feed description shared by all channels.
pub const DESCRIPTION: &str = "BrowserOS Server binary updates";

/// MIME type of every enclosure.
pub const ENCLOSURE_TYPE: &str = "application/zip";

/// Renders the manifest document for a channel.
pub fn render(state: &ManifestState, channel: Channel) -> String {
    let config = channel.config();
    let version = escape(state.version());

    let enclosures = state
        .artifacts()
        .map(|artifact| render_enclosure(artifact, channel, state.version()))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<rss xmlns:sparkle="{ns}" version="2.0">
  <channel>
    <title>{title}</title>
    <link>{link}</link>
    <description>{DESCRIPTION}</description>
    <language>en</language>

    <item>
      <sparkle:version>{version}</sparkle:version>
      <pubDate>{pub_date}</pubDate>

{enclosures}
    </item>

  </channel>
</rss>
"#,
        ns = SPARKLE_NS,
        title = escape(config.title),
        link = escape(config.feed_url),
        pub_date = escape(state.pub_date()),
    )
}

/// Download URL of a platform archive on a channel.
pub fn enclosure_url(channel: Channel, version: &str, platform: &PlatformKey) -> String {
    format!(
        "{}/{}",
        channel.config().download_base,
        archive_file_name(version, platform)
    )
}

fn render_enclosure(artifact: &SignedArtifact, channel: Channel, version: &str) -> String {
    format!(
        r#"      <!-- {comment} -->
      <enclosure
        url="{url}"
        sparkle:os="{os}"
        sparkle:arch="{arch}"
        sparkle:edSignature="{signature}"
        length="{length}"
        type="{ENCLOSURE_TYPE}"/>"#,
        comment = enclosure_comment(&artifact.os, &artifact.arch).replace("--", "- -"),
        url = escape(&enclosure_url(channel, version, &artifact.platform)),
        os = escape(&artifact.os),
        arch = escape(&artifact.arch),
        signature = escape(&artifact.signature),
        length = artifact.length,
    )
}

/// Human label placed above each enclosure, e.g. `macOS arm64` or `Linux x86_64`.
fn enclosure_comment(os: &str, arch: &str) -> String {
    if os == "macos" {
        return format!("macOS {arch}");
    }
    let mut chars = os.chars();
    let label: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    };
    format!("{label} {arch}")
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
