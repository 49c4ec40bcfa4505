use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while decoding signing key material.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum KeyFormatError {
    /// Decoded key material has an unsupported byte length.
    #[error("invalid signing key length: {len} bytes (expected 32 or 64)")]
    InvalidLength {
        /// Observed byte length after decoding.
        len: usize,
    },
    /// Raw key material contains a character that does not fit in one byte.
    #[error("signing key character {ch:?} at index {index} does not fit in a single byte")]
    NonLatin1Char {
        /// Offending character.
        ch: char,
        /// Character index within the raw value.
        index: usize,
    },
}

/// Errors raised while signing an artifact.
#[derive(Error, Debug)]
pub enum SigningError {
    /// The artifact could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
