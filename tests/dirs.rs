//! Integration tests that depend on the process working directory.
//!
//! Every test here changes or reads the current directory, so they run
//! serially and restore it afterwards.

use hashcopy::dirs::{join_working_dir, try_working_dir, working_dir};
use hashcopy::{Dirs, copy_with_hash, mkdir_parent, save};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Switch into `dir` for the lifetime of the guard.
struct CwdGuard {
    previous: PathBuf,
}

impl CwdGuard {
    fn enter(dir: &Path) -> Self {
        let previous = env::current_dir().unwrap();
        env::set_current_dir(dir).unwrap();
        Self { previous }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.previous);
    }
}

#[test]
#[serial]
fn test_bare_file_name_lands_in_working_dir() {
    let dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::enter(dir.path());

    mkdir_parent("bare.txt").unwrap();
    save("bare.txt", b"relative").unwrap();

    assert_eq!(fs::read(dir.path().join("bare.txt")).unwrap(), b"relative");
}

#[test]
#[serial]
fn test_relative_copy_creates_relative_parents() {
    let dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::enter(dir.path());
    fs::write("source.txt", b"relative copy").unwrap();

    copy_with_hash("source.txt", "out/nested/copy.txt").unwrap();

    assert!(dir.path().join("out/nested").is_dir());
    assert_eq!(
        fs::read(dir.path().join("out/nested/copy.txt")).unwrap(),
        b"relative copy"
    );
}

#[test]
#[serial]
fn test_cached_working_dir_is_a_snapshot() {
    let first = working_dir().to_path_buf();

    let dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::enter(dir.path());

    assert_eq!(working_dir(), first.as_path());
    assert_eq!(try_working_dir().unwrap(), first.as_path());
    assert_eq!(
        join_working_dir(["a", "b.txt"]),
        first.join("a").join("b.txt")
    );

    // A fresh resolution sees the new directory
    let resolved = Dirs::resolve().unwrap();
    assert_eq!(
        resolved.working().canonicalize().unwrap(),
        dir.path().canonicalize().unwrap()
    );
}

#[test]
#[serial]
fn test_injected_dirs_drive_paths() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let dirs = Dirs::new(home.path(), work.path());

    let target = dirs.join_home([".cache", "app", "entry.bin"]);
    save(&target, b"cached").unwrap();

    assert_eq!(
        fs::read(home.path().join(".cache/app/entry.bin")).unwrap(),
        b"cached"
    );
    assert_eq!(
        dirs.join_working(["../escape"]),
        work.path().parent().unwrap().join("escape")
    );
}
