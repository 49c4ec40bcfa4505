//! Parsing of previously published manifests.
//!
//! Every failure here means "no prior state": a missing, empty, malformed or
//! structurally incomplete document, or one with a corrupt enclosure length,
//! yields `None` so the first release of a channel can still be published.

use regex::Regex;
use roxmltree::{Document, Node, ParsingOptions};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::model::{ManifestState, PlatformKey, SignedArtifact};

/// Sparkle XML namespace URI.
pub const SPARKLE_NS: &str = "http://www.andymatuschak.org/xml-namespaces/sparkle";

fn archive_platform_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"_([a-z]+_[a-z0-9]+)\.zip$").expect("invalid regex"))
}

/// Parses a manifest document.
///
/// Returns `None` when the document is empty, is not UTF-8 XML, or lacks the
/// `channel`, `item` or `sparkle:version` element. Enclosures missing `url`,
/// `sparkle:os`, `sparkle:arch` or `sparkle:edSignature`, or whose archive
/// name does not end in `_<os>_<arch>.zip`, are skipped. A kept enclosure
/// whose `length` is not a non-negative integer makes the whole document
/// unusable.
pub fn parse(document: &[u8]) -> Option<ManifestState> {
    if document.iter().all(u8::is_ascii_whitespace) {
        debug!("manifest document is empty");
        return None;
    }

    let text = match std::str::from_utf8(document) {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "manifest document is not UTF-8");
            return None;
        }
    };

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = match Document::parse_with_options(text, options) {
        Ok(doc) => doc,
        Err(err) => {
            warn!(error = %err, "malformed manifest XML");
            return None;
        }
    };

    let Some(channel) = plain_child(doc.root_element(), "channel") else {
        warn!("manifest has no channel element");
        return None;
    };
    let Some(item) = plain_child(channel, "item") else {
        warn!("manifest channel has no item element");
        return None;
    };
    let Some(version) = item
        .children()
        .find(|n| n.has_tag_name((SPARKLE_NS, "version")))
        .and_then(|n| n.text())
    else {
        warn!("manifest item has no sparkle:version");
        return None;
    };
    let pub_date = plain_child(item, "pubDate")
        .and_then(|n| n.text())
        .unwrap_or_default();

    let mut artifacts = Vec::new();
    for enclosure in item.children().filter(|n| is_plain_element(n, "enclosure")) {
        let url = enclosure.attribute("url").unwrap_or_default();
        match parse_enclosure(enclosure) {
            Ok(artifact) => artifacts.push(artifact),
            Err(EnclosureError::Incomplete(reason)) => {
                warn!(url, reason, "skipping enclosure");
            }
            Err(EnclosureError::InvalidLength(length)) => {
                warn!(url, length, "manifest enclosure has an invalid length");
                return None;
            }
        }
    }

    let state = ManifestState::new(version, pub_date, artifacts);
    debug!(version = state.version(), platforms = state.len(), "parsed manifest");
    Some(state)
}

/// Reads and parses a manifest file.
///
/// A missing or unreadable file is treated like an unusable document.
pub fn load<P: AsRef<Path>>(path: P) -> Option<ManifestState> {
    let path = path.as_ref();
    match std::fs::read(path) {
        Ok(bytes) => parse(&bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no existing manifest");
            None
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read existing manifest");
            None
        }
    }
}

/// Recovers the platform key from an archive file name such as
/// `browseros_server_0.0.37_darwin_arm64.zip`.
pub fn platform_from_file_name(file_name: &str) -> Option<PlatformKey> {
    archive_platform_regex()
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| PlatformKey::parse(m.as_str()).ok())
}

enum EnclosureError<'a> {
    /// Missing attribute or unrecognized archive name; the enclosure is dropped.
    Incomplete(&'static str),
    /// Corrupt `length`; the document is dropped.
    InvalidLength(&'a str),
}

impl From<&'static str> for EnclosureError<'_> {
    fn from(reason: &'static str) -> Self {
        Self::Incomplete(reason)
    }
}

fn parse_enclosure<'a>(node: Node<'a, '_>) -> Result<SignedArtifact, EnclosureError<'a>> {
    let url = required(node.attribute("url"), "missing url")?;
    let os = required(node.attribute((SPARKLE_NS, "os")), "missing sparkle:os")?;
    let arch = required(node.attribute((SPARKLE_NS, "arch")), "missing sparkle:arch")?;
    let signature = required(
        node.attribute((SPARKLE_NS, "edSignature")),
        "missing sparkle:edSignature",
    )?;

    let file_name = url.rsplit('/').next().unwrap_or(url);
    let platform =
        platform_from_file_name(file_name).ok_or("archive name has no platform suffix")?;

    let raw_length = node.attribute("length").unwrap_or("0");
    let length = raw_length
        .trim()
        .parse::<u64>()
        .map_err(|_| EnclosureError::InvalidLength(raw_length))?;

    Ok(SignedArtifact {
        platform,
        archive_path: PathBuf::from(file_name),
        signature: signature.to_string(),
        length,
        os: os.to_string(),
        arch: arch.to_string(),
    })
}

fn required<'a>(value: Option<&'a str>, reason: &'static str) -> Result<&'a str, &'static str> {
    value.filter(|v| !v.is_empty()).ok_or(reason)
}

fn is_plain_element(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().namespace().is_none() && node.tag_name().name() == name
}

fn plain_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_plain_element(n, name))
}
