//! Sign command implementation.

use crate::output::truncate;
use browseros_ota_signing::Signer;
use serde_json::json;
use std::path::PathBuf;

pub fn run(
    files: Vec<PathBuf>,
    key: String,
    json_output: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let signer =
        Signer::from_key_material(&key).map_err(|e| format!("Invalid signing key: {}", e))?;

    let mut signed = Vec::new();
    let mut failed = Vec::new();

    for file in &files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        match signer.sign_file(file) {
            Ok(signature) => signed.push((name, signature)),
            Err(e) => {
                if !json_output {
                    eprintln!("Error signing {}: {}", name, e);
                }
                failed.push((name, e.to_string()));
            }
        }
    }

    if json_output {
        let signed_json: Vec<_> = signed
            .iter()
            .map(|(name, s)| json!({ "file": name, "signature": s.signature, "length": s.length }))
            .collect();
        let failed_json: Vec<_> = failed
            .iter()
            .map(|(name, error)| json!({ "file": name, "error": error }))
            .collect();
        let report = json!({
            "public_key": signer.public_key_base64(),
            "signed": signed_json,
            "failed": failed_json,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Public key: {}", signer.public_key_base64());
        println!("{:<48} {:>12} {}", "FILE", "LENGTH", "SIGNATURE");
        println!("{}", "-".repeat(100));
        for (name, s) in &signed {
            println!("{:<48} {:>12} {}", truncate(name, 48), s.length, s.signature);
        }
        println!("Signed {} of {} file(s)", signed.len(), files.len());
    }

    if strict && !failed.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
