//! Artifact signing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ed25519_dalek::Signer as _;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::errors::{KeyFormatError, SigningError};
use crate::key::{parse_key, SigningKey};

/// Signature and declared length of one signed artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSignature {
    /// Base64 of the 64-byte Ed25519 signature.
    pub signature: String,
    /// Exact byte count of the signed content.
    pub length: u64,
}

/// Signs artifact bytes with a single Ed25519 key.
///
/// Ed25519 is deterministic, so identical key and input always yield an
/// identical signature.
pub struct Signer {
    key: SigningKey,
}

impl Signer {
    /// Wraps an already-parsed key.
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Parses key material and builds a signer from it.
    ///
    /// See [`parse_key`] for the accepted formats.
    pub fn from_key_material(raw: &str) -> Result<Self, KeyFormatError> {
        parse_key(raw).map(Self::new)
    }

    /// Signs the full byte content.
    pub fn sign(&self, bytes: &[u8]) -> ArtifactSignature {
        let signature = self.key.sign(bytes);
        ArtifactSignature {
            signature: STANDARD.encode(signature.to_bytes()),
            length: bytes.len() as u64,
        }
    }

    /// Reads a file and signs its contents.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::Io`] if the file cannot be read.
    pub fn sign_file<P: AsRef<Path>>(&self, path: P) -> Result<ArtifactSignature, SigningError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| SigningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let signed = self.sign(&bytes);
        debug!(path = %path.display(), length = signed.length, "signed artifact");
        Ok(signed)
    }

    /// Base64 of the derived public key, as configured in update clients.
    pub fn public_key_base64(&self) -> String {
        STANDARD.encode(self.key.verifying_key().as_bytes())
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signer([REDACTED])")
    }
}
