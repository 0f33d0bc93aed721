//! On-disk storage for golden baselines.
//!
//! A baseline is a plain UTF-8 file with no header or metadata; its entire
//! content is the comparand. Files are named `<sanitized name>.golden`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extension used for every baseline.
pub const EXTENSION: &str = "golden";

/// Mode of every written baseline. Temp files start out owner-only.
#[cfg(unix)]
const BASELINE_MODE: u32 = 0o644;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
}

impl StoreError {
    fn from_io(path: &Path, e: std::io::Error) -> Self {
        if e.kind() == ErrorKind::PermissionDenied {
            StoreError::PermissionDenied(path.to_path_buf())
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    }
}

/// Maps a caller-supplied name onto a filesystem-safe basename.
///
/// Anything outside `[A-Za-z0-9._-]` becomes `_`, so separators can never
/// point outside the baseline directory. An empty name becomes `_`.
pub fn sanitize_name(name: &str) -> String {
    if name.is_empty() {
        return "_".to_string();
    }

    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Returns `dir/<sanitized name>.golden`.
pub fn baseline_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", sanitize_name(name), EXTENSION))
}

/// Read a baseline. A missing file is `Ok(None)`, not an error.
pub fn read(path: &Path) -> Result<Option<String>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!("Read baseline {} ({} bytes)", path.display(), content.len());
            Ok(Some(content))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No baseline at {}", path.display());
            Ok(None)
        }
        Err(e) => Err(StoreError::from_io(path, e)),
    }
}

/// Write a baseline, creating missing parent directories.
///
/// The content is written to a temporary file in the target directory,
/// fsynced, and renamed into place, so the previous baseline is replaced in
/// full and readers never observe a partial file.
pub fn write(path: &Path, content: &str) -> Result<(), StoreError> {
    use std::io::Write;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(parent).map_err(|e| StoreError::from_io(parent, e))?;

    let mut temp_file =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| StoreError::from_io(parent, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(BASELINE_MODE))
            .map_err(|e| StoreError::from_io(path, e))?;
    }

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| StoreError::from_io(path, e))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| StoreError::from_io(path, e))?;

    temp_file
        .persist(path)
        .map_err(|e| StoreError::from_io(path, e.error))?;

    info!("Wrote baseline {}", path.display());

    Ok(())
}
