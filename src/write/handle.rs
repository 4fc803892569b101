//! Scoped file handles with reported close.
//!
//! `std::fs::File` closes on drop and discards the result. [`ScopedFile`]
//! closes explicitly so a failure can be turned into a [`CloseWarning`] and
//! handed to the warning sink, on the success path and on every early return.

use crate::error::{CloseWarning, Error, Result};
use crate::options::WriteOptions;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// An open file that reports close failures instead of dropping them.
pub(crate) struct ScopedFile<'a> {
    // `None` only after the handle has been closed.
    file: Option<File>,
    path: PathBuf,
    options: &'a WriteOptions,
}

impl<'a> ScopedFile<'a> {
    pub(crate) fn new(file: File, path: &Path, options: &'a WriteOptions) -> Self {
        Self {
            file: Some(file),
            path: path.to_path_buf(),
            options,
        }
    }

    /// Create `path` (and its parent directories) for writing.
    pub(crate) fn create(path: &Path, options: &'a WriteOptions) -> Result<Self> {
        let file = super::dir::create_with(path, options)?;
        Ok(Self::new(file, path, options))
    }

    /// Open an existing file for reading.
    pub(crate) fn open(path: &Path, options: &'a WriteOptions) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file, path, options))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn file_mut(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("file handle already closed"))
    }

    /// Truncate to zero length and rewind, so the next write starts a fresh file.
    pub(crate) fn reset(&mut self) -> Result<()> {
        let path = self.path.clone();
        let file = self.file_mut().map_err(|source| Error::Truncate {
            path: path.clone(),
            source,
        })?;
        file.set_len(0).map_err(|source| Error::Truncate {
            path: path.clone(),
            source,
        })?;
        file.seek(SeekFrom::Start(0))
            .map_err(|source| Error::Seek { path, source })?;
        Ok(())
    }

    /// Finish a written file: sync if configured, then close.
    ///
    /// A sync failure is a primary error; a close failure is only reported.
    pub(crate) fn finish(mut self) -> Result<()> {
        if self.options.fsync {
            let path = self.path.clone();
            self.file_mut()
                .and_then(|file| file.sync_all())
                .map_err(|source| Error::Sync { path, source })?;
        }
        self.close();
        Ok(())
    }

    /// Close the handle now, reporting any failure as a warning.
    pub(crate) fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(file) = self.file.take() {
            if let Err(source) = close_file(file) {
                report_close_failure(
                    self.options,
                    CloseWarning {
                        path: self.path.clone(),
                        source,
                    },
                );
            }
        }
    }
}

impl Drop for ScopedFile<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

impl Read for ScopedFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file_mut()?.read(buf)
    }
}

impl Write for ScopedFile<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file_mut()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file_mut()?.flush()
    }
}

/// Close a file and surface the result that `Drop` would discard.
#[cfg(unix)]
fn close_file(file: File) -> io::Result<()> {
    use std::os::fd::IntoRawFd;

    let fd = file.into_raw_fd();
    // SAFETY: `into_raw_fd` released ownership of `fd`; nothing else closes it.
    if unsafe { libc::close(fd) } == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn close_file(file: File) -> io::Result<()> {
    drop(file);
    Ok(())
}

pub(crate) fn report_close_failure(options: &WriteOptions, warning: CloseWarning) {
    options.warn(&warning.to_string());
}
