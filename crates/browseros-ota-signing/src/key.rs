//! Decoding of Sparkle-style Ed25519 private keys.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use crate::errors::KeyFormatError;

pub use ed25519_dalek::SigningKey;

/// Length of an Ed25519 private seed.
pub const SEED_LENGTH: usize = 32;
/// Length of a Sparkle key blob (seed followed by the public key).
pub const SPARKLE_KEY_LENGTH: usize = 64;

/// Parses a signing key from its configured string form.
///
/// The value is first decoded as standard base64. If that fails, each
/// character is taken as one raw byte (code points above `U+00FF` are
/// rejected). The decoded bytes must then be either a 32-byte seed or a
/// 64-byte `seed || public key` blob; the embedded public key of the latter
/// is ignored.
///
/// # Example
///
/// ```rust
/// use browseros_ota_signing::parse_key;
///
/// let key = parse_key("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=")?;
/// assert_eq!(key.to_bytes(), [0u8; 32]);
/// # Ok::<(), browseros_ota_signing::KeyFormatError>(())
/// ```
///
/// # Errors
///
/// Returns [`KeyFormatError::InvalidLength`] when the decoded length is
/// neither 32 nor 64, and [`KeyFormatError::NonLatin1Char`] when the raw
/// fallback meets a multi-byte character.
pub fn parse_key(raw: &str) -> Result<SigningKey, KeyFormatError> {
    let bytes = decode_key_bytes(raw)?;
    seed_from_bytes(&bytes).map(|seed| SigningKey::from_bytes(&seed))
}

fn decode_key_bytes(raw: &str) -> Result<Vec<u8>, KeyFormatError> {
    // Surrounding whitespace only matters for the base64 attempt; raw keys keep every byte.
    match STANDARD.decode(raw.trim()) {
        Ok(bytes) => Ok(bytes),
        Err(err) => {
            debug!(error = %err, "signing key is not base64, using raw bytes");
            raw_bytes(raw)
        }
    }
}

fn raw_bytes(raw: &str) -> Result<Vec<u8>, KeyFormatError> {
    raw.chars()
        .enumerate()
        .map(|(index, ch)| u8::try_from(ch).map_err(|_| KeyFormatError::NonLatin1Char { ch, index }))
        .collect()
}

fn seed_from_bytes(bytes: &[u8]) -> Result<[u8; SEED_LENGTH], KeyFormatError> {
    let seed = match bytes.len() {
        SPARKLE_KEY_LENGTH => &bytes[..SEED_LENGTH],
        SEED_LENGTH => bytes,
        len => return Err(KeyFormatError::InvalidLength { len }),
    };
    seed.try_into()
        .map_err(|_| KeyFormatError::InvalidLength { len: bytes.len() })
}
