use std::fmt;
use std::str::FromStr;

use crate::errors::ManifestError;

/// Fixed endpoints of one distribution channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Feed title.
    pub title: &'static str,
    /// Public URL of the published manifest.
    pub feed_url: &'static str,
    /// Base URL archives are downloaded from (no trailing slash).
    pub download_base: &'static str,
    /// File name of the manifest in the manifest directory.
    pub manifest_file_name: &'static str,
}

static ALPHA: ChannelConfig = ChannelConfig {
    title: "BrowserOS Server (Alpha)",
    feed_url: "https://cdn.browseros.com/appcast-server.alpha.xml",
    download_base: "https://cdn.browseros.com/server",
    manifest_file_name: "appcast-server.alpha.xml",
};

static PROD: ChannelConfig = ChannelConfig {
    title: "BrowserOS Server",
    feed_url: "https://cdn.browseros.com/appcast-server.xml",
    download_base: "https://cdn.browseros.com/server",
    manifest_file_name: "appcast-server.xml",
};

/// Distribution track a manifest is published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Channel {
    /// Pre-release track.
    #[default]
    Alpha,
    /// Production track.
    Prod,
}

impl Channel {
    /// Endpoints for this channel.
    pub fn config(self) -> &'static ChannelConfig {
        match self {
            Channel::Alpha => &ALPHA,
            Channel::Prod => &PROD,
        }
    }

    /// Channel name as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Channel::Alpha => "alpha",
            Channel::Prod => "prod",
        }
    }
}

impl FromStr for Channel {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alpha" => Ok(Channel::Alpha),
            "prod" => Ok(Channel::Prod),
            other => Err(ManifestError::UnknownChannel(other.to_string())),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
