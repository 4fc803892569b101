//! Builder API for hashing copies.
//!
//! The builder pattern provides a fluent interface for configuring and
//! executing [`copy_with_hash_with`]. This is often more convenient than
//! manually constructing [`WriteOptions`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use hashcopy::CopyBuilder;
//!
//! let copy = CopyBuilder::new("incoming/report.pdf", "store/ab/report.pdf").run()?;
//! println!("{} bytes, sha256 {}", copy.bytes_copied, copy.digest);
//! # Ok::<(), hashcopy::Error>(())
//! ```
//!
//! ## With Options
//!
//! ```no_run
//! use hashcopy::CopyBuilder;
//!
//! let copy = CopyBuilder::new("big.iso", "mirror/big.iso")
//!     .chunk_size(1024 * 1024) // 1 MiB reads
//!     .fsync()                 // Durable before returning
//!     .run()?;
//! # Ok::<(), hashcopy::Error>(())
//! ```

use crate::error::Result;
use crate::options::WriteOptions;
use crate::write::{HashedCopy, copy_with_hash_with};
use std::path::{Path, PathBuf};

/// A builder for configuring and executing a hashing copy.
///
/// # Example
///
/// ```no_run
/// use hashcopy::CopyBuilder;
///
/// let copy = CopyBuilder::new("src.bin", "dst/src.bin")
///     .dir_mode(0o755)
///     .run()?;
/// assert_eq!(copy.digest.to_hex().len(), 64);
/// # Ok::<(), hashcopy::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: WriteOptions,
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` with the given source and destination paths.
    ///
    /// Uses default options (4 KiB chunks, no fsync, `0o777` directories).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: WriteOptions::default(),
        }
    }

    /// Set the number of bytes read and written per step.
    ///
    /// Clamped to at least 1.
    #[must_use]
    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.options = self.options.with_chunk_size(bytes);
        self
    }

    /// Sync the destination to disk before returning.
    #[must_use]
    pub fn fsync(mut self) -> Self {
        self.options = self.options.with_fsync();
        self
    }

    /// Set the mode for any parent directories that get created.
    #[must_use]
    pub fn dir_mode(mut self, mode: u32) -> Self {
        self.options = self.options.with_dir_mode(mode);
        self
    }

    /// Set a warning handler for close diagnostics.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hashcopy::CopyBuilder;
    ///
    /// fn log_warning(msg: &str) {
    ///     eprintln!("Warning: {}", msg);
    /// }
    ///
    /// let copy = CopyBuilder::new("src", "dst")
    ///     .warn_handler(log_warning)
    ///     .run()?;
    /// # Ok::<(), hashcopy::Error>(())
    /// ```
    #[must_use]
    pub fn warn_handler(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Replace all options at once.
    #[must_use]
    pub fn options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the configured options.
    pub fn get_options(&self) -> &WriteOptions {
        &self.options
    }

    /// Run the copy and return the digest and byte count.
    ///
    /// # Errors
    ///
    /// See [`copy_with_hash`](crate::copy_with_hash).
    pub fn run(self) -> Result<HashedCopy> {
        copy_with_hash_with(&self.src, &self.dst, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write::hash_file;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_builder_basic() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("in.txt");
        let dst = dir.path().join("nested/out.txt");
        fs::write(&src, "builder content").unwrap();

        let copy = CopyBuilder::new(&src, &dst).run().unwrap();

        assert_eq!(copy.bytes_copied, 15);
        assert_eq!(copy.digest, hash_file(&dst).unwrap());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "builder content");
    }

    #[test]
    fn test_builder_options_chain() {
        let builder = CopyBuilder::new("a", "b")
            .chunk_size(0)
            .fsync()
            .dir_mode(0o750);

        let options = builder.get_options();
        assert_eq!(options.chunk_size, 1);
        assert!(options.fsync);
        assert_eq!(options.dir_mode, 0o750);
    }

    #[test]
    fn test_builder_replace_options() {
        let options = WriteOptions::default().with_chunk_size(123);
        let builder = CopyBuilder::new("a", "b").fsync().options(options);
        assert_eq!(builder.get_options().chunk_size, 123);
        assert!(!builder.get_options().fsync);
    }

    #[test]
    fn test_builder_small_chunks_with_fsync() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("in.bin");
        let dst = dir.path().join("out.bin");
        fs::write(&src, vec![9u8; 1_000]).unwrap();

        let copy = CopyBuilder::new(&src, &dst)
            .chunk_size(3)
            .fsync()
            .run()
            .unwrap();

        assert_eq!(copy.bytes_copied, 1_000);
        assert_eq!(fs::read(&dst).unwrap(), vec![9u8; 1_000]);
    }
}
