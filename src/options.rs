//! Configuration options for write and copy operations.
//!
//! This module provides [`WriteOptions`] for tuning how files are written.
//!
//! # Example
//!
//! ```
//! use hashcopy::WriteOptions;
//!
//! let options = WriteOptions::default()
//!     .with_chunk_size(64 * 1024)
//!     .with_fsync();
//! assert_eq!(options.chunk_size, 64 * 1024);
//! ```

/// Size of each chunk streamed from a reader into a file (4 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 4_096;

/// Mode for directories created by [`mkdir_parent`](crate::mkdir_parent),
/// before the process umask is applied.
pub const DEFAULT_DIR_MODE: u32 = 0o777;

/// Options for write and copy operations.
///
/// Use [`Default::default()`] to get sensible defaults, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `chunk_size` | 4096 | Bytes per streamed chunk |
/// | `dir_mode` | `0o777` | Mode of created directories (Unix, before umask) |
/// | `fsync` | `false` | Sync to disk before the handle is released |
/// | `warn_handler` | `None` | Sink for close diagnostics |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteOptions {
    /// Number of bytes read and written per step when streaming (default: 4096)
    ///
    /// Bounds memory use: streamed payloads are never buffered whole.
    pub chunk_size: usize,

    /// Permission bits for created parent directories (default: `0o777`)
    ///
    /// Ignored on platforms without Unix permissions.
    pub dir_mode: u32,

    /// Whether to sync the destination to disk before closing it (default: false)
    pub fsync: bool,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            dir_mode: DEFAULT_DIR_MODE,
            fsync: false,
            warn_handler: None,
        }
    }
}

impl WriteOptions {
    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Set the streaming chunk size
    ///
    /// Value is clamped to at least 1 so a read can always make progress.
    #[must_use]
    pub fn with_chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes.max(1);
        self
    }

    /// Set the mode used for created parent directories
    #[must_use]
    pub fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    /// Sync the destination to disk before releasing it
    #[must_use]
    pub fn with_fsync(mut self) -> Self {
        self.fsync = true;
        self
    }

    /// Skip the sync before release (the default)
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }

    /// Chunk size actually used for streaming; a zero set through the public
    /// field still reads one byte at a time.
    pub(crate) fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}
