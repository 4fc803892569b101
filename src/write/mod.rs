//! File write and copy operations.
//!
//! This module provides the parent-directory helper, the save family, and
//! the single-pass hashing copy. Every handle opened here is released on all
//! exit paths, and close failures are reported as warnings rather than
//! returned.

mod dir;
mod handle;
mod hash;
mod save;

// Re-export public API
pub use dir::{create, create_with, mkdir_parent, mkdir_parent_with};
pub use hash::{Digest, HashedCopy, HashingReader, copy_with_hash, copy_with_hash_with, hash_file};
pub use save::{
    save, save_buffer, save_buffer_with, save_or_overwrite, save_or_overwrite_buffer,
    save_or_overwrite_buffer_with, save_or_overwrite_with, save_with,
};
