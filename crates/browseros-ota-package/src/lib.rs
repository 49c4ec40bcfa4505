//! Packaging of server binaries into update archives.
//!
//! Every archive holds a single file at `resources/bin/browseros_server`
//! (`browseros_server.exe` for Windows), deflate compressed.
//!
#![deny(missing_docs)]

/// Error types for packaging.
pub mod errors;
/// Archive staging and writing.
pub mod packager;

pub use errors::PackagingError;
pub use packager::{executable_name, package, BIN_DIR, EXECUTABLE_STEM};
