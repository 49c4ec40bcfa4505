//! Release manifest (Sparkle appcast) handling for BrowserOS server updates.
//!
//! The pipeline is:
//! - [`parser`] loads a previously published manifest into a [`ManifestState`]
//!   (or `None` when there is no usable prior state)
//! - [`merger`] combines freshly signed artifacts with that prior state
//! - [`renderer`] emits the canonical XML document for a [`Channel`]
//!
//! ## Quick Start
//!
//! ```rust
//! use browseros_ota_manifest::{merger, parser, renderer, Channel, PlatformKey, SignedArtifact};
//!
//! let artifact = SignedArtifact {
//!     platform: PlatformKey::parse("linux_x64")?,
//!     archive_path: "browseros_server_1.0.0_linux_x64.zip".into(),
//!     signature: "c2lnbmF0dXJl".to_string(),
//!     length: 1024,
//!     os: "linux".to_string(),
//!     arch: "x86_64".to_string(),
//! };
//!
//! let state = merger::merge("1.0.0", vec![artifact], None);
//! let xml = renderer::render(&state, Channel::Alpha);
//!
//! let reparsed = parser::parse(xml.as_bytes()).expect("rendered manifest parses");
//! assert_eq!(reparsed.version(), "1.0.0");
//! assert_eq!(reparsed.len(), 1);
//! # Ok::<(), browseros_ota_manifest::ManifestError>(())
//! ```
//!
#![deny(missing_docs)]

/// Distribution channels and their fixed endpoints.
pub mod channel;
/// Error types for manifest operations.
pub mod errors;
/// Merging of new signing results into prior state.
pub mod merger;
/// Manifest data model.
pub mod model;
/// Parsing of previously published manifests.
pub mod parser;
/// Server platform table and archive naming.
pub mod platform;
/// Canonical XML rendering.
pub mod renderer;

pub use channel::{Channel, ChannelConfig};
pub use errors::ManifestError;
pub use model::{ManifestState, PlatformKey, SignedArtifact};
pub use parser::SPARKLE_NS;
pub use platform::{archive_file_name, ServerPlatform, SERVER_PLATFORMS};
