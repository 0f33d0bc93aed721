//! Default baseline directories derived from where a check was called.
//!
//! The engine never inspects the stack itself. Call sites are captured at
//! compile time by [`call_site!`](crate::call_site) and turned into a
//! directory by a [`DirResolver`].

use std::path::{Path, PathBuf};
use tracing::debug;

/// Conventional baseline directory, relative to the calling source file.
pub const DEFAULT_SUBDIR: &str = "testdata/snapshots";

/// Opaque token identifying the source file a check was made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    manifest_dir: &'static str,
    file: &'static str,
}

impl CallSite {
    pub const fn new(manifest_dir: &'static str, file: &'static str) -> Self {
        CallSite { manifest_dir, file }
    }

    pub fn manifest_dir(&self) -> &'static str {
        self.manifest_dir
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Absolute path of the calling source file, if it can be found.
    ///
    /// `file!()` is relative to the workspace root rather than the package,
    /// so the manifest directory and each of its ancestors are tried in
    /// turn. Already-absolute paths are returned as-is when they exist.
    pub fn source_file(&self) -> Option<PathBuf> {
        let file = Path::new(self.file);
        if file.as_os_str().is_empty() {
            return None;
        }
        if file.is_absolute() {
            return file.is_file().then(|| file.to_path_buf());
        }

        Path::new(self.manifest_dir)
            .ancestors()
            .map(|base| base.join(file))
            .find(|candidate| candidate.is_file())
    }
}

/// Capture the current [`CallSite`].
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(env!("CARGO_MANIFEST_DIR"), file!())
    };
}

/// Maps a call site to the directory its baselines live in.
pub trait DirResolver {
    /// `None` means the call site could not be located.
    fn resolve(&self, site: &CallSite) -> Option<PathBuf>;
}

impl<F> DirResolver for F
where
    F: Fn(&CallSite) -> Option<PathBuf>,
{
    fn resolve(&self, site: &CallSite) -> Option<PathBuf> {
        self(site)
    }
}

/// Resolves to `<directory of the calling file>/testdata/snapshots`.
///
/// The result only depends on the source file, never on the working
/// directory the test binary runs from.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallerRelative;

impl DirResolver for CallerRelative {
    fn resolve(&self, site: &CallSite) -> Option<PathBuf> {
        let source = site.source_file()?;
        let dir = source.parent()?.join(DEFAULT_SUBDIR);
        debug!("Resolved {} to baseline directory {}", site.file, dir.display());
        Some(dir)
    }
}
