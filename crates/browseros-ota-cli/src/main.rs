//! BrowserOS OTA CLI - signs server archives and publishes Sparkle manifests.

use browseros_ota_manifest::{Channel, ManifestError, ServerPlatform};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;
mod pipeline;

use commands::{inspect, package, publish, sign};

#[derive(Parser)]
#[command(name = "browseros-ota")]
#[command(about = "Sign BrowserOS server builds and publish update manifests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign files and print their Sparkle signatures
    Sign {
        /// Files to sign
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Signing key (base64 or raw, 32 or 64 bytes)
        #[arg(long, env = "SPARKLE_PRIVATE_KEY", hide_env_values = true)]
        key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Exit with error code if any file fails to sign
        #[arg(long)]
        strict: bool,
    },
    /// Package a server binary into an update archive
    Package {
        /// Path to the server binary
        binary: PathBuf,
        /// Output archive path
        output: PathBuf,
        /// Package as a Windows executable
        #[arg(long)]
        windows: bool,
    },
    /// Package, sign and publish server archives for a release
    Publish {
        /// Release version
        #[arg(long)]
        version: String,
        /// Distribution channel (alpha or prod)
        #[arg(long, default_value = "alpha", value_parser = parse_channel)]
        channel: Channel,
        /// Directory holding the built server binaries
        #[arg(long)]
        binaries_dir: PathBuf,
        /// Directory archives are written to
        #[arg(long, default_value = "dist")]
        out_dir: PathBuf,
        /// Directory holding the channel manifests
        #[arg(long, env = "BROWSEROS_OTA_APPCAST_DIR", default_value = "config/appcast")]
        appcast_dir: PathBuf,
        /// Restrict to these platforms (default: all)
        #[arg(long = "platform", value_name = "PLATFORM", value_parser = parse_platform)]
        platforms: Vec<&'static ServerPlatform>,
        /// Signing key (base64 or raw, 32 or 64 bytes)
        #[arg(long, env = "SPARKLE_PRIVATE_KEY", hide_env_values = true)]
        key: String,
        /// Print the manifest instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the contents of a manifest
    Inspect {
        /// Path to manifest file
        manifest: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_channel(value: &str) -> Result<Channel, ManifestError> {
    value.parse()
}

fn parse_platform(value: &str) -> Result<&'static ServerPlatform, ManifestError> {
    ServerPlatform::find(value)
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sign {
            files,
            key,
            json,
            strict,
        } => sign::run(files, key, json, strict),
        Commands::Package {
            binary,
            output,
            windows,
        } => package::run(binary, output, windows),
        Commands::Publish {
            version,
            channel,
            binaries_dir,
            out_dir,
            appcast_dir,
            platforms,
            key,
            dry_run,
        } => publish::run(publish::PublishArgs {
            version,
            channel,
            binaries_dir,
            out_dir,
            appcast_dir,
            platforms,
            key,
            dry_run,
        }),
        Commands::Inspect { manifest, json } => inspect::run(manifest, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
