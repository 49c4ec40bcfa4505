use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::errors::ManifestError;

/// Pattern for `<os>_<arch>` platform identifiers.
pub(crate) const PLATFORM_KEY_PATTERN: &str = r"^[a-z]+_[a-z0-9]+$";

fn platform_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PLATFORM_KEY_PATTERN).expect("invalid regex"))
}

/// Canonical `<os>_<arch>` identifier such as `darwin_arm64`.
///
/// Ordering is the lexicographic order of the underlying string, which is the
/// order enclosures appear in a rendered manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformKey(String);

impl PlatformKey {
    /// Parses a validated platform key.
    pub fn parse(value: impl Into<String>) -> Result<Self, ManifestError> {
        let s = value.into();
        if !platform_key_regex().is_match(&s) {
            return Err(ManifestError::PatternMismatch {
                field: "PlatformKey",
                value: s,
            });
        }
        Ok(Self(s))
    }

    /// Creates a key without validation; callers are responsible for conformity.
    pub(crate) fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PlatformKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// One signed per-platform archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedArtifact {
    /// Platform the archive targets.
    pub platform: PlatformKey,
    /// Local archive path (or the URL filename when loaded from a manifest).
    pub archive_path: PathBuf,
    /// Base64 Ed25519 signature over the archive bytes.
    pub signature: String,
    /// Byte length of the signed archive.
    pub length: u64,
    /// Sparkle os value (`macos`, `linux`, `windows`).
    pub os: String,
    /// Sparkle arch value (`arm64`, `x86_64`).
    pub arch: String,
}

/// Version, publish date and per-platform artifacts of one manifest.
///
/// Holds exactly one artifact per platform key and always iterates them in
/// platform-key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestState {
    version: String,
    pub_date: String,
    artifacts: BTreeMap<PlatformKey, SignedArtifact>,
}

impl ManifestState {
    /// Builds a state; a later artifact replaces an earlier one with the same platform.
    pub fn new(
        version: impl Into<String>,
        pub_date: impl Into<String>,
        artifacts: impl IntoIterator<Item = SignedArtifact>,
    ) -> Self {
        let artifacts = artifacts
            .into_iter()
            .map(|artifact| (artifact.platform.clone(), artifact))
            .collect();
        Self {
            version: version.into(),
            pub_date: pub_date.into(),
            artifacts,
        }
    }

    /// Release version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// First-publish timestamp of this version (RFC 822 style).
    pub fn pub_date(&self) -> &str {
        &self.pub_date
    }

    /// Artifacts sorted by platform key.
    pub fn artifacts(&self) -> impl Iterator<Item = &SignedArtifact> + '_ {
        self.artifacts.values()
    }

    /// Platform keys in sorted order.
    pub fn platforms(&self) -> impl Iterator<Item = &PlatformKey> + '_ {
        self.artifacts.keys()
    }

    /// Looks up the artifact for one platform.
    pub fn get(&self, platform: &PlatformKey) -> Option<&SignedArtifact> {
        self.artifacts.get(platform)
    }

    /// Number of platforms.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the state has no artifacts.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
