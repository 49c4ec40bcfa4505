use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while packaging a binary.
#[derive(Error, Debug)]
pub enum PackagingError {
    /// Source binary does not exist or is not a file.
    #[error("binary not found: {}", .0.display())]
    MissingBinary(PathBuf),
    /// Staging directory could not be prepared.
    #[error("failed to stage {}: {source}", path.display())]
    Staging {
        /// Path being staged.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Archive could not be written.
    #[error("failed to write archive {}: {source}", path.display())]
    Archive {
        /// Output archive path.
        path: PathBuf,
        /// Underlying zip error.
        #[source]
        source: zip::result::ZipError,
    },
}
