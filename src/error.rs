//! Error types for hashcopy.
//!
//! This module provides the [`Error`] enum containing all failures a write or
//! copy operation can return, the [`CloseWarning`] diagnostic for handles that
//! failed to close, and the [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Directories | [`Error::CreateDir`] |
//! | Open | [`Error::Create`], [`Error::Open`] |
//! | Transfer | [`Error::Read`], [`Error::Write`], [`Error::Sync`] |
//! | Overwrite | [`Error::Truncate`], [`Error::Seek`] |
//! | Startup | [`Error::DirectoryLookup`] |
//!
//! Every variant except [`Error::DirectoryLookup`] names the path involved and
//! carries the underlying [`io::Error`].

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for hashcopy operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Which process directory a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    /// The user's home directory
    Home,
    /// The process working directory
    Working,
}

impl fmt::Display for DirKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("home"),
            Self::Working => f.write_str("working"),
        }
    }
}

/// Errors that can occur during write and copy operations.
///
/// All IO variants include the path being operated on to aid debugging.
/// Use [`Error::io_error`] to reach the underlying system error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to create the parent directories of a file
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to create (or truncate) the destination file
    #[error("Failed to create file {path}: {source}")]
    Create {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to open the source file for reading
    #[error("Failed to open source {path}: {source}")]
    Open {
        /// Source path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed while reading input bytes
    #[error("Failed to read from {path}: {source}")]
    Read {
        /// Path being read from. A caller-supplied reader has no path of its
        /// own, so the buffer saves report the destination being filled.
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed while writing to the destination
    #[error("Failed to write to {path}: {source}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to truncate an existing destination before overwriting it
    #[error("Failed to truncate {path}: {source}")]
    Truncate {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to rewind the destination before overwriting it
    #[error("Failed to seek in {path}: {source}")]
    Seek {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to flush the destination to disk
    #[error("Failed to sync {path}: {source}")]
    Sync {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// The home or working directory could not be resolved
    ///
    /// The process-wide lookups in [`crate::dirs`] treat this as fatal;
    /// [`crate::Dirs::resolve`] returns it so startup code can decide.
    #[error("Failed to resolve {kind} directory: {source}")]
    DirectoryLookup {
        /// Which directory was being resolved
        kind: DirKind,
        /// Underlying error
        source: io::Error,
    },
}

impl Error {
    /// The underlying system error.
    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::CreateDir { source, .. }
            | Self::Create { source, .. }
            | Self::Open { source, .. }
            | Self::Read { source, .. }
            | Self::Write { source, .. }
            | Self::Truncate { source, .. }
            | Self::Seek { source, .. }
            | Self::Sync { source, .. }
            | Self::DirectoryLookup { source, .. } => source,
        }
    }

    /// The path the failing operation was working on, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::CreateDir { path, .. }
            | Self::Create { path, .. }
            | Self::Open { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Truncate { path, .. }
            | Self::Seek { path, .. }
            | Self::Sync { path, .. } => Some(path),
            Self::DirectoryLookup { .. } => None,
        }
    }
}

/// A file handle failed to close after its operation finished.
///
/// Never returned as the error of an operation. It is formatted and handed to
/// the warning handler in [`WriteOptions`](crate::WriteOptions), or logged via
/// `tracing` when no handler is set.
#[derive(Error, Debug)]
#[error("Failed to close {path}: {source}")]
pub struct CloseWarning {
    /// Path of the handle that failed to close
    pub path: PathBuf,
    /// Underlying error
    pub source: io::Error,
}
