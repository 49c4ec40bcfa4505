//! Output formatting utilities.

use browseros_ota_manifest::SignedArtifact;

/// Prints the artifact table header.
#[allow(clippy::print_literal)]
pub fn print_artifact_header() {
    println!(
        "{:<14} {:<8} {:<8} {:>12} {}",
        "PLATFORM", "OS", "ARCH", "LENGTH", "SIGNATURE"
    );
    println!("{}", "-".repeat(100));
}

/// Formats an artifact as a table row.
pub fn format_artifact_row(artifact: &SignedArtifact) -> String {
    format!(
        "{:<14} {:<8} {:<8} {:>12} {}",
        artifact.platform,
        artifact.os,
        artifact.arch,
        artifact.length,
        truncate(&artifact.signature, 52)
    )
}

/// Shortens a value to at most `max_len` characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
