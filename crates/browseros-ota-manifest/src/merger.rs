//! Merging of new signing results into prior manifest state.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::model::{ManifestState, SignedArtifact};

/// `strftime` format of manifest publish dates, always in UTC.
pub const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Formats a publish date, e.g. `Mon, 19 Oct 2026 08:30:00 +0000`.
pub fn format_pub_date(at: DateTime<Utc>) -> String {
    at.format(PUB_DATE_FORMAT).to_string()
}

/// Merges newly signed artifacts into the prior state, stamping fresh
/// publishes with the current time.
///
/// See [`merge_at`].
pub fn merge(
    new_version: &str,
    new_artifacts: impl IntoIterator<Item = SignedArtifact>,
    existing: Option<&ManifestState>,
) -> ManifestState {
    merge_at(new_version, new_artifacts, existing, Utc::now())
}

/// Merges newly signed artifacts into the prior state.
///
/// - Same version as `existing`: the existing artifacts overlaid with the new
///   ones (new wins per platform) and the existing publish date.
/// - Otherwise: only the new artifacts, published at `now`.
///
/// Re-running with the same version and artifacts against the result yields
/// the same result.
pub fn merge_at(
    new_version: &str,
    new_artifacts: impl IntoIterator<Item = SignedArtifact>,
    existing: Option<&ManifestState>,
    now: DateTime<Utc>,
) -> ManifestState {
    let new_artifacts: Vec<SignedArtifact> = new_artifacts.into_iter().collect();

    match existing {
        Some(existing) if existing.version() == new_version => {
            info!(
                version = new_version,
                kept = existing.len(),
                updated = new_artifacts.len(),
                "merging with existing manifest"
            );
            ManifestState::new(
                new_version,
                existing.pub_date(),
                existing.artifacts().cloned().chain(new_artifacts),
            )
        }
        _ => {
            if let Some(existing) = existing {
                info!(
                    from = existing.version(),
                    to = new_version,
                    dropped = existing.len(),
                    "version changed, replacing manifest"
                );
            }
            ManifestState::new(new_version, format_pub_date(now), new_artifacts)
        }
    }
}
