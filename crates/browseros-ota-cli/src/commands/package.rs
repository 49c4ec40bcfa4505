//! Package command implementation.

use std::path::PathBuf;

pub fn run(binary: PathBuf, output: PathBuf, windows: bool) -> Result<(), Box<dyn std::error::Error>> {
    browseros_ota_package::package(&binary, &output, windows)?;
    println!("Created {}", output.display());
    Ok(())
}
