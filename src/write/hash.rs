//! Single-pass copy with SHA-256 hashing.
//!
//! [`copy_with_hash`] streams a source file into a destination through a
//! [`HashingReader`], so every byte is hashed exactly once, on its way to
//! the destination. The digest returned is always the digest of the bytes
//! that were written.

use super::handle::ScopedFile;
use super::save::stream_chunks;
use crate::error::{Error, Result};
use crate::options::WriteOptions;
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

/// A SHA-256 digest.
///
/// Displays as 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Length of the digest in bytes.
    pub const LEN: usize = 32;

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex encoding (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    fn from_hasher(hasher: Sha256) -> Self {
        let mut bytes = [0u8; Self::LEN];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = hex::FromHexError;

    /// Parse a 64-character hex string (either case).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

/// Reader adapter that hashes every byte it hands out.
///
/// Wrap the source of a copy in this and the hash is computed as a side
/// effect of reading, without a second pass.
///
/// # Example
///
/// ```
/// use hashcopy::HashingReader;
/// use std::io::Read;
///
/// let mut reader = HashingReader::new(&b"abc"[..]);
/// let mut out = Vec::new();
/// reader.read_to_end(&mut out)?;
/// let (digest, _) = reader.finish();
/// assert_eq!(
///     digest.to_hex(),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct HashingReader<R> {
    inner: R,
    hasher: Sha256,
}

impl<R: Read> HashingReader<R> {
    /// Wrap `inner`, starting from an empty hash.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
        }
    }

    /// Digest of everything read so far, and the inner reader.
    pub fn finish(self) -> (Digest, R) {
        (Digest::from_hasher(self.hasher), self.inner)
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

/// Result of a hashing copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashedCopy {
    /// Digest of the bytes written to the destination
    pub digest: Digest,
    /// Number of bytes written to the destination
    pub bytes_copied: u64,
}

/// Copy `source` to `dest` and return the hex SHA-256 digest of the copied bytes.
///
/// Parent directories of `dest` are created as needed. An existing `dest` is
/// truncated. The file is streamed in bounded chunks, so files larger than
/// memory are fine.
///
/// # Errors
///
/// - [`Error::CreateDir`] / [`Error::Create`] if the destination cannot be created
/// - [`Error::Open`] if the source cannot be opened
/// - [`Error::Read`] / [`Error::Write`] if the transfer fails
///
/// Nothing is rolled back on failure. The destination is created before the
/// source is opened, so a missing source leaves an empty destination file.
///
/// # Example
///
/// ```no_run
/// let digest = hashcopy::copy_with_hash("upload.tmp", "store/objects/blob")?;
/// assert_eq!(digest.len(), 64);
/// # Ok::<(), hashcopy::Error>(())
/// ```
pub fn copy_with_hash(source: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<String> {
    copy_with_hash_with(source, dest, &WriteOptions::default()).map(|copy| copy.digest.to_hex())
}

/// [`copy_with_hash`] with explicit options, returning the raw digest and
/// byte count.
pub fn copy_with_hash_with(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    options: &WriteOptions,
) -> Result<HashedCopy> {
    let source = source.as_ref();
    let dest = dest.as_ref();

    let mut dst_file = ScopedFile::create(dest, options)?;
    let src_file = ScopedFile::open(source, options)?;

    let mut reader = HashingReader::new(src_file);
    let bytes_copied = stream_chunks(
        &mut reader,
        source,
        &mut dst_file,
        dest,
        options.effective_chunk_size(),
    )?;
    let (digest, src_file) = reader.finish();

    dst_file.finish()?;
    src_file.close();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        src = %source.display(),
        dst = %dest.display(),
        bytes = bytes_copied,
        %digest,
        "copied with hash"
    );

    Ok(HashedCopy {
        digest,
        bytes_copied,
    })
}

/// SHA-256 digest of an existing file, streamed with the default chunk size.
///
/// # Errors
///
/// Returns [`Error::Open`] if the file cannot be opened and [`Error::Read`]
/// if reading fails.
pub fn hash_file(path: impl AsRef<Path>) -> Result<Digest> {
    let path = path.as_ref();
    let options = WriteOptions::default();
    let mut reader = HashingReader::new(ScopedFile::open(path, &options)?);
    stream_chunks(
        &mut reader,
        path,
        &mut io::sink(),
        path,
        options.effective_chunk_size(),
    )?;
    let (digest, file) = reader.finish();
    file.close();
    Ok(digest)
}
