//! Inspect command implementation.

use crate::output;
use browseros_ota_manifest::parser;
use std::path::PathBuf;

pub fn run(manifest: PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let state = parser::load(&manifest)
        .ok_or_else(|| format!("No usable manifest in {}", manifest.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    println!("Version:   {}", state.version());
    println!("Published: {}", state.pub_date());
    println!();
    output::print_artifact_header();
    for artifact in state.artifacts() {
        println!("{}", output::format_artifact_row(artifact));
    }
    Ok(())
}
