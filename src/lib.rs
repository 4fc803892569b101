//! # hashcopy
//!
//! Single-pass hashing file copy and small file-writing helpers for Rust.
//!
//! ## Core Features
//!
//! - **Hashing copy**: [`copy_with_hash`] copies a file and returns the SHA-256
//!   of the copied bytes, computed while copying rather than in a second pass
//! - **Bounded memory**: files are streamed in fixed-size chunks
//! - **Parent directories**: every write creates missing parents first
//! - **Overwrite variants**: [`save_or_overwrite`] truncates and rewinds so no
//!   trailing bytes from a longer previous file survive
//! - **Reported close**: close failures are never dropped silently; they go to
//!   a warning handler or `tracing`
//! - **Safe file names**: [`sanitize_file_path`] reduces any key to one
//!   lowercase path component
//!
//! ## Quick Start
//!
//! ```no_run
//! use hashcopy::{copy_with_hash, sanitize_file_path};
//!
//! let name = sanitize_file_path("../Quarterly Report.PDF"); // "quarterly_report.pdf"
//! let digest = copy_with_hash("upload.tmp", format!("store/{name}"))?;
//! println!("stored {name} as {digest}");
//! # Ok::<(), hashcopy::Error>(())
//! ```
//!
//! ### Builder API
//!
//! ```no_run
//! use hashcopy::CopyBuilder;
//!
//! let copy = CopyBuilder::new("data.bin", "backup/data.bin")
//!     .chunk_size(256 * 1024)
//!     .fsync()
//!     .run()?;
//! println!("{} bytes, {}", copy.bytes_copied, copy.digest);
//! # Ok::<(), hashcopy::Error>(())
//! ```
//!
//! ## Known Limitations
//!
//! - Writes are not atomic. A failed copy or save can leave a partially
//!   written destination.
//! - [`copy_with_hash`] creates the destination before opening the source,
//!   so a missing source leaves an empty destination file behind.
//! - Concurrent writers to the same path race. Serialize them, for example
//!   with [`locks::use_mutex`].
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Structured logging with tracing crate (default) |
//! | `serde` | Serialize/Deserialize for [`WriteOptions`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
pub mod dirs;
mod error;
pub mod locks;
mod options;
mod sanitize;
mod write;

pub use builder::CopyBuilder;
pub use dirs::Dirs;
pub use error::{CloseWarning, DirKind, Error, Result};
pub use options::{DEFAULT_CHUNK_SIZE, DEFAULT_DIR_MODE, WriteOptions};
pub use sanitize::sanitize_file_path;
pub use write::{
    Digest, HashedCopy, HashingReader, copy_with_hash, copy_with_hash_with, create, create_with,
    hash_file, mkdir_parent, mkdir_parent_with, save, save_buffer, save_buffer_with,
    save_or_overwrite, save_or_overwrite_buffer, save_or_overwrite_buffer_with,
    save_or_overwrite_with, save_with,
};
