//! Ed25519 signing primitives for BrowserOS server update artifacts.
//!
//! Key material arrives as a single string (usually `SPARKLE_PRIVATE_KEY`)
//! holding either base64 or raw bytes of a 32-byte seed or a 64-byte
//! seed + public key blob. Signatures are plain Ed25519 over the full
//! artifact bytes, base64 encoded, as Sparkle clients expect in
//! `sparkle:edSignature`.
//!
#![deny(missing_docs)]

/// Error types for key parsing and signing.
pub mod errors;
/// Key material decoding.
pub mod key;
/// Artifact signing.
pub mod signer;

pub use errors::{KeyFormatError, SigningError};
pub use key::{parse_key, SigningKey, SEED_LENGTH, SPARKLE_KEY_LENGTH};
pub use signer::{ArtifactSignature, Signer};
