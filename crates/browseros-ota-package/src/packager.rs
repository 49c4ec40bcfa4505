use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::PackagingError;

/// Directory inside the archive holding the executable.
pub const BIN_DIR: &str = "resources/bin";
/// Executable name without platform suffix.
pub const EXECUTABLE_STEM: &str = "browseros_server";

/// Name of the packaged executable for a target.
pub fn executable_name(is_windows: bool) -> String {
    if is_windows {
        format!("{EXECUTABLE_STEM}.exe")
    } else {
        EXECUTABLE_STEM.to_string()
    }
}

/// Packages `binary` into a deflate archive at `output` containing only
/// `resources/bin/<executable>`.
///
/// The binary is staged in a temporary directory next to `output`, which is
/// removed before this returns on every path. If writing the archive fails,
/// the partially written `output` is deleted before the error is returned.
///
/// # Errors
///
/// Returns [`PackagingError`] if the binary is missing, staging fails, or the
/// archive cannot be written.
pub fn package(binary: &Path, output: &Path, is_windows: bool) -> Result<(), PackagingError> {
    if !binary.is_file() {
        return Err(PackagingError::MissingBinary(binary.to_path_buf()));
    }

    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|source| PackagingError::Staging {
        path: parent.clone(),
        source,
    })?;

    let staging = tempfile::Builder::new()
        .prefix("staging_")
        .tempdir_in(&parent)
        .map_err(|source| PackagingError::Staging {
            path: parent.clone(),
            source,
        })?;

    let bin_dir = staging.path().join(BIN_DIR);
    let staged = bin_dir.join(executable_name(is_windows));
    fs::create_dir_all(&bin_dir)
        .and_then(|_| fs::copy(binary, &staged))
        .map_err(|source| PackagingError::Staging {
            path: staged.clone(),
            source,
        })?;
    debug!(staging = %staging.path().display(), "staged binary");

    create_archive(staging.path(), output).map_err(|source| PackagingError::Archive {
        path: output.to_path_buf(),
        source,
    })?;

    info!(archive = %output.display(), "created archive");
    Ok(())
}

/// Writes the archive, deleting `output` again if any step fails.
fn create_archive(root: &Path, output: &Path) -> Result<(), ZipError> {
    let result = write_archive(root, output);
    if result.is_err() {
        if let Err(err) = fs::remove_file(output) {
            if err.kind() != io::ErrorKind::NotFound {
                warn!(path = %output.display(), error = %err, "failed to remove partial archive");
            }
        }
    }
    result
}

fn write_archive(root: &Path, output: &Path) -> Result<(), ZipError> {
    let mut zip = ZipWriter::new(File::create(output)?);
    for path in collect_files(root)? {
        let name = archive_name(root, &path);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(file_mode(&path)?);
        zip.start_file(name, options)?;
        io::copy(&mut File::open(&path)?, &mut zip)?;
    }
    zip.finish()?;
    Ok(())
}

/// Files under `root`, depth first, sorted by path for stable archives.
fn collect_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

fn archive_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(unix)]
fn file_mode(path: &Path) -> io::Result<u32> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::metadata(path)?.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn file_mode(_path: &Path) -> io::Result<u32> {
    Ok(0o755)
}
