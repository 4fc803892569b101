//! Parent directory creation and file creation.

use crate::error::{Error, Result};
use crate::options::WriteOptions;
use std::fs::{DirBuilder, File};
use std::path::Path;

/// Create the parent directories of `file`.
///
/// A path without any `/` or `\` separator names a file in the working
/// directory, so nothing is created. Otherwise every missing directory of the
/// parent is created with mode `0o777` (before umask). Calling this again on
/// a path whose parents already exist is a no-op.
///
/// The parent is everything before the last separator. A path ending in a
/// separator therefore names a directory, and that directory is created
/// too: `out/logs/` creates both `out` and `out/logs`.
///
/// # Errors
///
/// Returns [`Error::CreateDir`] if a directory cannot be created, for example
/// when permission is denied or a component already exists as a regular file.
///
/// # Example
///
/// ```no_run
/// hashcopy::mkdir_parent("out/reports/2024/summary.txt")?;
/// assert!(std::path::Path::new("out/reports/2024").is_dir());
/// # Ok::<(), hashcopy::Error>(())
/// ```
pub fn mkdir_parent(file: impl AsRef<Path>) -> Result<()> {
    mkdir_parent_with(file, &WriteOptions::default())
}

/// [`mkdir_parent`] with explicit options (directory mode).
pub fn mkdir_parent_with(file: impl AsRef<Path>, options: &WriteOptions) -> Result<()> {
    let file = file.as_ref();
    if !has_separator(file) {
        return Ok(());
    }

    let parent = if ends_with_separator(file) {
        file
    } else {
        match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => return Ok(()),
        }
    };

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(options.dir_mode);
    }
    #[cfg(not(unix))]
    let _ = options;

    builder.create(parent).map_err(|source| Error::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;

    #[cfg(feature = "tracing")]
    tracing::debug!(dir = %parent.display(), "ensured parent directory");

    Ok(())
}

/// Create `file` for writing, creating its parent directories first.
///
/// An existing file is truncated, matching [`File::create`].
///
/// # Errors
///
/// Returns [`Error::CreateDir`] if the parents cannot be created and
/// [`Error::Create`] if the file itself cannot be created.
pub fn create(file: impl AsRef<Path>) -> Result<File> {
    create_with(file, &WriteOptions::default())
}

/// [`create`] with explicit options.
pub fn create_with(file: impl AsRef<Path>, options: &WriteOptions) -> Result<File> {
    let file = file.as_ref();
    mkdir_parent_with(file, options)?;
    File::create(file).map_err(|source| Error::Create {
        path: file.to_path_buf(),
        source,
    })
}

fn has_separator(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().contains(['/', '\\'])
}

fn ends_with_separator(path: &Path) -> bool {
    matches!(path.as_os_str().as_encoded_bytes().last(), Some(b'/' | b'\\'))
}
