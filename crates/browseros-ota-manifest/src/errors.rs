use thiserror::Error;

/// Errors raised at the manifest crate's boundaries.
///
/// Parsing a prior manifest never fails; unusable documents are reported as
/// absent state instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ManifestError {
    /// Channel name is not one of the fixed channels.
    #[error("unknown channel '{0}' (expected 'alpha' or 'prod')")]
    UnknownChannel(String),
    /// Platform key does not match `<os>_<arch>`.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// Platform key is valid but not part of the server platform table.
    #[error("unknown server platform '{0}'")]
    UnknownPlatform(String),
}
