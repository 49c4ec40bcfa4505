//! Integration tests for CLI commands.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn test_key() -> String {
    let mut blob = vec![0x21u8; 32];
    blob.extend([0x42u8; 32]);
    STANDARD.encode(blob)
}

fn run_cli(args: &[&str], key: Option<&str>) -> (bool, String, String) {
    let mut command = Command::new(env!("CARGO_BIN_EXE_browseros-ota"));
    command
        .args(args)
        .env_remove("SPARKLE_PRIVATE_KEY")
        .env_remove("BROWSEROS_OTA_APPCAST_DIR")
        .env("RUST_LOG", "warn");
    if let Some(key) = key {
        command.env("SPARKLE_PRIVATE_KEY", key);
    }
    let output = command.output().expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    let success = output.status.success();

    (success, stdout, stderr)
}

struct Workspace {
    _temp_dir: TempDir,
    bins: PathBuf,
    dist: PathBuf,
    appcast: PathBuf,
}

impl Workspace {
    fn new(binaries: &[&str]) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let bins = temp_dir.path().join("bins");
        fs::create_dir_all(&bins).unwrap();
        for name in binaries {
            fs::write(bins.join(name), format!("binary {name}")).unwrap();
        }
        Self {
            dist: temp_dir.path().join("dist"),
            appcast: temp_dir.path().join("appcast"),
            bins,
            _temp_dir: temp_dir,
        }
    }

    fn publish(&self, version: &str, extra: &[&str]) -> (bool, String, String) {
        let mut args = vec![
            "publish",
            "--version",
            version,
            "--binaries-dir",
            path_str(&self.bins),
            "--out-dir",
            path_str(&self.dist),
            "--appcast-dir",
            path_str(&self.appcast),
        ];
        args.extend_from_slice(extra);
        run_cli(&args, Some(&test_key()))
    }

    fn manifest(&self, file_name: &str) -> String {
        fs::read_to_string(self.appcast.join(file_name)).unwrap()
    }
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn pub_date(xml: &str) -> &str {
    let start = xml.find("<pubDate>").unwrap() + "<pubDate>".len();
    let end = xml.find("</pubDate>").unwrap();
    &xml[start..end]
}

#[test]
fn test_sign_is_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("BrowserOS.dmg");
    fs::write(&file, b"disk image").unwrap();

    let (success, first, _) = run_cli(&["sign", path_str(&file), "--json"], Some(&test_key()));
    assert!(success);
    let (_, second, _) = run_cli(&["sign", path_str(&file), "--json"], Some(&test_key()));

    let first: serde_json::Value = serde_json::from_str(&first).unwrap();
    let second: serde_json::Value = serde_json::from_str(&second).unwrap();
    assert_eq!(first, second);
    assert_eq!(first["signed"][0]["file"], "BrowserOS.dmg");
    assert_eq!(first["signed"][0]["length"], 10);
    assert_eq!(first["failed"].as_array().unwrap().len(), 0);
}

#[test]
fn test_sign_rejects_bad_key_length() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("a.zip");
    fs::write(&file, b"zip").unwrap();

    let bad_key = STANDARD.encode([1u8; 10]);
    let (success, _, stderr) = run_cli(&["sign", path_str(&file)], Some(&bad_key));
    assert!(!success);
    assert!(stderr.contains("10 bytes"));
}

#[test]
fn test_sign_strict_fails_on_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let present = temp_dir.path().join("present.zip");
    fs::write(&present, b"zip").unwrap();
    let missing = temp_dir.path().join("missing.zip");

    let args = ["sign", path_str(&present), path_str(&missing)];
    let (success, stdout, stderr) = run_cli(&args, Some(&test_key()));
    assert!(success);
    assert!(stdout.contains("Signed 1 of 2 file(s)"));
    assert!(stderr.contains("missing.zip"));

    let mut strict = args.to_vec();
    strict.push("--strict");
    let (success, _, _) = run_cli(&strict, Some(&test_key()));
    assert!(!success);
}

#[test]
fn test_publish_first_release() {
    let ws = Workspace::new(&["browseros-server-linux-x64", "browseros-server-darwin-arm64"]);

    let (success, stdout, _) = ws.publish(
        "1.0.0",
        &["--platform", "linux_x64", "--platform", "darwin_arm64"],
    );
    assert!(success);
    assert!(stdout.contains("Signed 2 platform(s), 0 failed"));

    let xml = ws.manifest("appcast-server.alpha.xml");
    assert_eq!(xml.matches("<enclosure").count(), 2);
    assert!(xml.find("darwin_arm64").unwrap() < xml.find("linux_x64").unwrap());
    assert!(xml.contains("<title>BrowserOS Server (Alpha)</title>"));
    assert!(ws.dist.join("browseros_server_1.0.0_linux_x64.zip").is_file());
    assert!(ws.dist.join("browseros_server_1.0.0_darwin_arm64.zip").is_file());
}

#[test]
fn test_publish_skips_missing_platforms() {
    let ws = Workspace::new(&["browseros-server-windows-x64.exe"]);

    let (success, stdout, _) = ws.publish("1.0.0", &["--channel", "prod"]);
    assert!(success);
    assert!(stdout.contains("Signed 1 platform(s), 4 failed"));
    assert!(stdout.contains("failed linux_x64"));

    let xml = ws.manifest("appcast-server.xml");
    assert_eq!(xml.matches("<enclosure").count(), 1);
    assert!(xml.contains("sparkle:os=\"windows\""));
}

#[test]
fn test_publish_same_version_merges_and_keeps_date() {
    let ws = Workspace::new(&[
        "browseros-server-windows-x64.exe",
        "browseros-server-darwin-arm64",
    ]);

    let (success, _, _) = ws.publish("1.0.0", &["--platform", "windows_x64"]);
    assert!(success);
    let first = ws.manifest("appcast-server.alpha.xml");

    let (success, _, _) = ws.publish("1.0.0", &["--platform", "darwin_arm64"]);
    assert!(success);
    let second = ws.manifest("appcast-server.alpha.xml");

    assert_eq!(second.matches("<enclosure").count(), 2);
    assert_eq!(pub_date(&first), pub_date(&second));
}

#[test]
fn test_publish_new_version_replaces_platforms() {
    let ws = Workspace::new(&[
        "browseros-server-windows-x64.exe",
        "browseros-server-linux-x64",
    ]);

    assert!(ws.publish("1.0.0", &["--platform", "windows_x64"]).0);
    assert!(ws.publish("1.0.1", &["--platform", "linux_x64"]).0);

    let xml = ws.manifest("appcast-server.alpha.xml");
    assert!(xml.contains("<sparkle:version>1.0.1</sparkle:version>"));
    assert!(xml.contains("linux_x64"));
    assert!(!xml.contains("windows_x64"));
}

#[test]
fn test_publish_replaces_corrupt_manifest() {
    let ws = Workspace::new(&["browseros-server-linux-x64"]);
    fs::create_dir_all(&ws.appcast).unwrap();
    fs::write(ws.appcast.join("appcast-server.alpha.xml"), "<rss><channel>").unwrap();

    let (success, _, _) = ws.publish("1.0.0", &["--platform", "linux_x64"]);
    assert!(success);
    assert!(ws.manifest("appcast-server.alpha.xml").contains("linux_x64"));
}

#[test]
fn test_publish_dry_run_prints_manifest() {
    let ws = Workspace::new(&["browseros-server-linux-x64"]);

    let (success, stdout, _) = ws.publish("1.0.0", &["--platform", "linux_x64", "--dry-run"]);
    assert!(success);
    assert!(stdout.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(!ws.appcast.join("appcast-server.alpha.xml").exists());
}

#[test]
fn test_publish_without_binaries_fails() {
    let ws = Workspace::new(&[]);

    let (success, _, stderr) = ws.publish("1.0.0", &[]);
    assert!(!success);
    assert!(stderr.contains("No platform archives were signed"));
    assert!(!ws.appcast.join("appcast-server.alpha.xml").exists());
}

#[test]
fn test_publish_rejects_unknown_channel_and_platform() {
    let ws = Workspace::new(&["browseros-server-linux-x64"]);

    let (success, _, stderr) = ws.publish("1.0.0", &["--channel", "beta"]);
    assert!(!success);
    assert!(stderr.contains("unknown channel"));

    let (success, _, stderr) = ws.publish("1.0.0", &["--platform", "freebsd_x64"]);
    assert!(!success);
    assert!(stderr.contains("freebsd_x64"));
}

#[test]
fn test_inspect_lists_platforms() {
    let ws = Workspace::new(&["browseros-server-linux-x64", "browseros-server-darwin-x64"]);
    assert!(ws.publish("3.1.4", &[]).0);
    let manifest = ws.appcast.join("appcast-server.alpha.xml");

    let (success, stdout, _) = run_cli(&["inspect", path_str(&manifest)], None);
    assert!(success);
    assert!(stdout.contains("Version:   3.1.4"));
    assert!(stdout.contains("darwin_x64"));

    let (success, stdout, _) = run_cli(&["inspect", path_str(&manifest), "--json"], None);
    assert!(success);
    let state: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(state["version"], "3.1.4");
    assert_eq!(state["artifacts"]["linux_x64"]["arch"], "x86_64");
}

#[test]
fn test_inspect_rejects_missing_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("none.xml");

    let (success, _, stderr) = run_cli(&["inspect", path_str(&path)], None);
    assert!(!success);
    assert!(stderr.contains("No usable manifest"));
}

#[test]
fn test_package_command() {
    let temp_dir = TempDir::new().unwrap();
    let binary = temp_dir.path().join("server.exe");
    fs::write(&binary, b"MZ").unwrap();
    let output = temp_dir.path().join("server.zip");

    let (success, stdout, _) = run_cli(
        &["package", path_str(&binary), path_str(&output), "--windows"],
        None,
    );
    assert!(success);
    assert!(stdout.contains("Created"));
    assert!(output.is_file());
}
