//! Save and save-or-overwrite helpers.
//!
//! Both families create parent directories and the file before writing.
//! The overwrite variants additionally truncate and rewind the handle, so the
//! final content is exactly the new payload whatever was there before.
//!
//! | Function | Payload | Truncates explicitly |
//! |----------|---------|----------------------|
//! | [`save`] | `&[u8]` | no |
//! | [`save_or_overwrite`] | `&[u8]` | yes |
//! | [`save_buffer`] | `impl Read` | no |
//! | [`save_or_overwrite_buffer`] | `impl Read` | yes |
//!
//! File creation itself truncates on every supported platform, so a plain
//! [`save`] over a longer existing file also leaves only the new bytes.

use super::handle::ScopedFile;
use crate::error::{Error, Result};
use crate::options::WriteOptions;
use std::io::{self, Read, Write};
use std::path::Path;

/// Write `data` to `file`, creating the file and its parent directories.
///
/// # Errors
///
/// Returns the first failure: [`Error::CreateDir`], [`Error::Create`] or
/// [`Error::Write`].
///
/// # Example
///
/// ```no_run
/// hashcopy::save("cache/entry.json", br#"{"ok":true}"#)?;
/// # Ok::<(), hashcopy::Error>(())
/// ```
pub fn save(file: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    save_with(file, data, &WriteOptions::default())
}

/// [`save`] with explicit options.
pub fn save_with(file: impl AsRef<Path>, data: &[u8], options: &WriteOptions) -> Result<()> {
    let file = file.as_ref();
    let mut handle = ScopedFile::create(file, options)?;
    write_payload(&mut handle, data)?;
    handle.finish()
}

/// Write `data` to `file`, replacing any previous content.
///
/// The handle is truncated to zero length and rewound before the write.
///
/// # Errors
///
/// Returns the first failure: [`Error::CreateDir`], [`Error::Create`],
/// [`Error::Truncate`], [`Error::Seek`] or [`Error::Write`].
pub fn save_or_overwrite(file: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    save_or_overwrite_with(file, data, &WriteOptions::default())
}

/// [`save_or_overwrite`] with explicit options.
pub fn save_or_overwrite_with(
    file: impl AsRef<Path>,
    data: &[u8],
    options: &WriteOptions,
) -> Result<()> {
    let file = file.as_ref();
    let mut handle = ScopedFile::create(file, options)?;
    handle.reset()?;
    write_payload(&mut handle, data)?;
    handle.finish()
}

/// Stream `reader` into `file` in fixed-size chunks.
///
/// Memory use is bounded by [`WriteOptions::chunk_size`] (4096 bytes by
/// default) regardless of how much the reader yields.
///
/// # Errors
///
/// As [`save`], plus [`Error::Read`] if the reader fails.
pub fn save_buffer<R: Read>(file: impl AsRef<Path>, reader: R) -> Result<()> {
    save_buffer_with(file, reader, &WriteOptions::default())
}

/// [`save_buffer`] with explicit options.
pub fn save_buffer_with<R: Read>(
    file: impl AsRef<Path>,
    mut reader: R,
    options: &WriteOptions,
) -> Result<()> {
    let file = file.as_ref();
    let mut handle = ScopedFile::create(file, options)?;
    stream_chunks(
        &mut reader,
        file,
        &mut handle,
        file,
        options.effective_chunk_size(),
    )?;
    handle.finish()
}

/// Stream `reader` into `file`, replacing any previous content.
///
/// # Errors
///
/// As [`save_or_overwrite`], plus [`Error::Read`] if the reader fails.
pub fn save_or_overwrite_buffer<R: Read>(file: impl AsRef<Path>, reader: R) -> Result<()> {
    save_or_overwrite_buffer_with(file, reader, &WriteOptions::default())
}

/// [`save_or_overwrite_buffer`] with explicit options.
pub fn save_or_overwrite_buffer_with<R: Read>(
    file: impl AsRef<Path>,
    mut reader: R,
    options: &WriteOptions,
) -> Result<()> {
    let file = file.as_ref();
    let mut handle = ScopedFile::create(file, options)?;
    handle.reset()?;
    stream_chunks(
        &mut reader,
        file,
        &mut handle,
        file,
        options.effective_chunk_size(),
    )?;
    handle.finish()
}

fn write_payload(handle: &mut ScopedFile<'_>, data: &[u8]) -> Result<()> {
    handle.write_all(data).map_err(|source| Error::Write {
        path: handle.path().to_path_buf(),
        source,
    })
}

/// Move every byte from `reader` to `writer`, `chunk_size` bytes at a time.
///
/// Each chunk is written in full before the next read. Interrupted reads are
/// retried. Returns the number of bytes moved.
pub(crate) fn stream_chunks<R, W>(
    reader: &mut R,
    read_path: &Path,
    writer: &mut W,
    write_path: &Path,
    chunk_size: usize,
) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut total: u64 = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(Error::Read {
                    path: read_path.to_path_buf(),
                    source,
                });
            }
        };

        writer.write_all(&buf[..n]).map_err(|source| Error::Write {
            path: write_path.to_path_buf(),
            source,
        })?;
        total += n as u64;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    /// Reader that yields some bytes, then fails.
    struct FailingReader {
        remaining: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::other("source went away"));
            }
            let n = buf.len().min(self.remaining);
            buf[..n].fill(b'z');
            self.remaining -= n;
            Ok(n)
        }
    }

    /// Reader that reports `Interrupted` before every successful read.
    struct InterruptingReader {
        inner: Cursor<Vec<u8>>,
        interrupt_next: bool,
    }

    impl Read for InterruptingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.interrupt_next {
                self.interrupt_next = false;
                return Err(io::ErrorKind::Interrupted.into());
            }
            self.interrupt_next = true;
            self.inner.read(buf)
        }
    }

    #[test]
    fn test_save_creates_parents() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a/b/data.bin");

        save(&file, b"payload").unwrap();

        assert_eq!(fs::read(&file).unwrap(), b"payload");
    }

    #[test]
    fn test_save_or_overwrite_shrinks_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("greeting.txt");

        save_or_overwrite(&file, b"hello world").unwrap();
        save_or_overwrite(&file, b"hi").unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "hi");
    }

    #[test]
    fn test_save_buffer_multiple_chunks() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("stream.bin");
        let payload: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();

        let options = WriteOptions::default().with_chunk_size(7);
        save_buffer_with(&file, Cursor::new(payload.clone()), &options).unwrap();

        assert_eq!(fs::read(&file).unwrap(), payload);
    }

    #[test]
    fn test_save_or_overwrite_buffer_shrinks_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("stream.txt");

        save_or_overwrite_buffer(&file, Cursor::new(b"a much longer payload".to_vec())).unwrap();
        save_or_overwrite_buffer(&file, Cursor::new(b"short".to_vec())).unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "short");
    }

    #[test]
    fn test_save_buffer_reader_failure_aborts() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("partial.bin");

        let options = WriteOptions::default().with_chunk_size(4);
        let result = save_buffer_with(&file, FailingReader { remaining: 10 }, &options);

        match result {
            Err(Error::Read { path, .. }) => assert_eq!(path, file),
            other => panic!("expected Read error, got {other:?}"),
        }
        // No rollback: what was written before the failure stays
        assert_eq!(fs::read(&file).unwrap(), vec![b'z'; 10]);
    }

    #[test]
    fn test_stream_chunks_retries_interrupted() {
        let mut reader = InterruptingReader {
            inner: Cursor::new(b"interrupted but complete".to_vec()),
            interrupt_next: true,
        };
        let mut out = Vec::new();

        let moved = stream_chunks(
            &mut reader,
            Path::new("in"),
            &mut out,
            Path::new("out"),
            5,
        )
        .unwrap();

        assert_eq!(moved, 24);
        assert_eq!(out, b"interrupted but complete");
    }

    #[test]
    fn test_save_with_fsync() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("durable.txt");

        save_with(&file, b"synced", &WriteOptions::default().with_fsync()).unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "synced");
    }

    #[test]
    fn test_save_into_directory_path_fails() {
        let dir = tempdir().unwrap();
        let result = save(dir.path(), b"data");
        assert!(matches!(result, Err(Error::Create { .. })));
    }
}
