//! Publish command implementation.

use crate::pipeline::{self, BatchInput, BatchOutcome};
use browseros_ota_manifest::{merger, parser, renderer, Channel, ServerPlatform, SERVER_PLATFORMS};
use browseros_ota_signing::Signer;
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub struct PublishArgs {
    pub version: String,
    pub channel: Channel,
    pub binaries_dir: PathBuf,
    pub out_dir: PathBuf,
    pub appcast_dir: PathBuf,
    pub platforms: Vec<&'static ServerPlatform>,
    pub key: String,
    pub dry_run: bool,
}

pub fn run(args: PublishArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Without a usable key nothing can be signed, so fail before any packaging.
    let signer =
        Signer::from_key_material(&args.key).map_err(|e| format!("Invalid signing key: {}", e))?;

    let platforms: Vec<&'static ServerPlatform> = if args.platforms.is_empty() {
        SERVER_PLATFORMS.iter().collect()
    } else {
        args.platforms
    };

    info!(
        version = %args.version,
        channel = %args.channel,
        platforms = platforms.len(),
        "publishing server release"
    );

    let input = BatchInput {
        signer: &signer,
        version: &args.version,
        binaries_dir: &args.binaries_dir,
        out_dir: &args.out_dir,
    };
    let outcome = pipeline::build_artifacts(&input, &platforms);

    let summary = format_summary(&outcome);
    if args.dry_run {
        eprint!("{}", summary);
    } else {
        print!("{}", summary);
    }

    if outcome.signed.is_empty() {
        return Err("No platform archives were signed; manifest not updated".into());
    }

    let manifest_path = args
        .appcast_dir
        .join(args.channel.config().manifest_file_name);
    let existing = parser::load(&manifest_path);
    let state = merger::merge(&args.version, outcome.signed, existing.as_ref());
    let xml = renderer::render(&state, args.channel);

    if args.dry_run {
        print!("{}", xml);
        return Ok(());
    }

    fs::create_dir_all(&args.appcast_dir).map_err(|e| {
        format!(
            "Failed to create manifest directory {}: {}",
            args.appcast_dir.display(),
            e
        )
    })?;
    fs::write(&manifest_path, xml)
        .map_err(|e| format!("Failed to write manifest {}: {}", manifest_path.display(), e))?;

    println!(
        "Wrote {} ({} platform(s), version {})",
        manifest_path.display(),
        state.len(),
        state.version()
    );
    Ok(())
}

fn format_summary(outcome: &BatchOutcome) -> String {
    let mut summary = format!(
        "Signed {} platform(s), {} failed\n",
        outcome.signed.len(),
        outcome.failed.len()
    );
    for artifact in &outcome.signed {
        summary.push_str(&format!("  ok     {}\n", artifact.platform));
    }
    for failure in &outcome.failed {
        summary.push_str(&format!("  failed {}\n", failure));
    }
    summary
}
