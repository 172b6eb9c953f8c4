//! Temporary configuration directories.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory removed on drop, addressed with UTF-8 paths.
///
/// ```
/// use strata_test_helpers::fixtures::ConfigDir;
///
/// let dir = ConfigDir::new()?;
/// let path = dir.write("conf.d/app.json", r#"{"port": 1}"#)?;
/// assert!(path.starts_with(dir.path()));
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct ConfigDir {
    root: Utf8PathBuf,
    _dir: TempDir,
}

impl ConfigDir {
    /// Create an empty directory.
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be created or its path is not UTF-8.
    pub fn new() -> io::Result<Self> {
        let dir = TempDir::new()?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| io::Error::other(format!("non UTF-8 temp dir: {}", path.display())))?;
        Ok(Self { root, _dir: dir })
    }

    /// Root of the directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    pub fn write(&self, relative: &str, contents: &str) -> io::Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}
