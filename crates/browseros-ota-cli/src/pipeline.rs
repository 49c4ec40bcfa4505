//! Batch packaging and signing of server platforms.
//!
//! Platforms are independent: each is packaged and signed on its own scoped
//! thread, and a failure only removes that platform from the batch. The
//! batch is returned once every job has finished.

use browseros_ota_manifest::{archive_file_name, ServerPlatform, SignedArtifact};
use browseros_ota_package::PackagingError;
use browseros_ota_signing::{Signer, SigningError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::thread;
use thiserror::Error;
use tracing::{info, warn};

/// Why one platform could not be built.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Packaging the binary failed.
    #[error(transparent)]
    Packaging(#[from] PackagingError),
    /// Signing the archive failed.
    #[error(transparent)]
    Signing(#[from] SigningError),
    /// The worker thread panicked.
    #[error("worker panicked")]
    Panicked,
}

/// A platform excluded from the batch.
#[derive(Debug)]
pub struct PlatformFailure {
    /// Platform key.
    pub platform: &'static str,
    /// Failure cause.
    pub error: ArtifactError,
}

impl fmt::Display for PlatformFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.platform, self.error)
    }
}

/// Result of building a batch of platforms.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successfully signed artifacts, in platform table order.
    pub signed: Vec<SignedArtifact>,
    /// Platforms that failed.
    pub failed: Vec<PlatformFailure>,
}

/// Inputs shared by every platform job.
pub struct BatchInput<'a> {
    pub signer: &'a Signer,
    pub version: &'a str,
    pub binaries_dir: &'a Path,
    pub out_dir: &'a Path,
}

/// Packages and signs every platform, concurrently.
pub fn build_artifacts(input: &BatchInput<'_>, platforms: &[&'static ServerPlatform]) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    thread::scope(|scope| {
        let jobs: Vec<_> = platforms
            .iter()
            .map(|&platform| (platform, scope.spawn(move || build_artifact(input, platform))))
            .collect();

        for (platform, job) in jobs {
            match job.join().unwrap_or(Err(ArtifactError::Panicked)) {
                Ok(artifact) => {
                    info!(platform = platform.key, length = artifact.length, "signed platform archive");
                    outcome.signed.push(artifact);
                }
                Err(error) => {
                    warn!(platform = platform.key, error = %error, "platform excluded from release");
                    outcome.failed.push(PlatformFailure {
                        platform: platform.key,
                        error,
                    });
                }
            }
        }
    });

    outcome
}

/// Local archive path for a platform.
pub fn archive_path(out_dir: &Path, version: &str, platform: &ServerPlatform) -> PathBuf {
    out_dir.join(archive_file_name(version, &platform.platform_key()))
}

fn build_artifact(
    input: &BatchInput<'_>,
    platform: &'static ServerPlatform,
) -> Result<SignedArtifact, ArtifactError> {
    let binary = input.binaries_dir.join(platform.binary);
    let archive = archive_path(input.out_dir, input.version, platform);

    browseros_ota_package::package(&binary, &archive, platform.is_windows())?;
    let signed = input.signer.sign_file(&archive)?;

    Ok(SignedArtifact {
        platform: platform.platform_key(),
        archive_path: archive,
        signature: signed.signature,
        length: signed.length,
        os: platform.os.to_string(),
        arch: platform.arch.to_string(),
    })
}
