use crate::errors::ManifestError;
use crate::model::PlatformKey;

/// Prefix shared by every published server archive.
pub const ARCHIVE_PREFIX: &str = "browseros_server";

/// A server build target and the binary the build produces for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerPlatform {
    /// Platform key (`<os>_<arch>`).
    pub key: &'static str,
    /// File name of the built server binary.
    pub binary: &'static str,
    /// Sparkle os value.
    pub os: &'static str,
    /// Sparkle arch value.
    pub arch: &'static str,
}

/// Every platform the server is built and published for.
pub static SERVER_PLATFORMS: [ServerPlatform; 5] = [
    ServerPlatform {
        key: "darwin_arm64",
        binary: "browseros-server-darwin-arm64",
        os: "macos",
        arch: "arm64",
    },
    ServerPlatform {
        key: "darwin_x64",
        binary: "browseros-server-darwin-x64",
        os: "macos",
        arch: "x86_64",
    },
    ServerPlatform {
        key: "linux_arm64",
        binary: "browseros-server-linux-arm64",
        os: "linux",
        arch: "arm64",
    },
    ServerPlatform {
        key: "linux_x64",
        binary: "browseros-server-linux-x64",
        os: "linux",
        arch: "x86_64",
    },
    ServerPlatform {
        key: "windows_x64",
        binary: "browseros-server-windows-x64.exe",
        os: "windows",
        arch: "x86_64",
    },
];

impl ServerPlatform {
    /// Looks a platform up by key.
    pub fn find(key: &str) -> Result<&'static ServerPlatform, ManifestError> {
        PlatformKey::parse(key)?;
        SERVER_PLATFORMS
            .iter()
            .find(|platform| platform.key == key)
            .ok_or_else(|| ManifestError::UnknownPlatform(key.to_string()))
    }

    /// Typed platform key.
    pub fn platform_key(&self) -> PlatformKey {
        PlatformKey::new_unchecked(self.key)
    }

    /// Whether the packaged executable needs the `.exe` suffix.
    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }
}

/// Archive file name for a version and platform, e.g.
/// `browseros_server_1.0.0_darwin_arm64.zip`.
pub fn archive_file_name(version: &str, platform: &PlatformKey) -> String {
    format!("{ARCHIVE_PREFIX}_{version}_{platform}.zip")
}
