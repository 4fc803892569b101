//! Home and working directory lookups.
//!
//! Two ways to get at these directories:
//!
//! - [`Dirs`] resolves both once, fallibly, and is passed around as
//!   configuration. Prefer this: failure is an ordinary [`Error`] at startup
//!   and tests can inject any paths with [`Dirs::new`].
//! - [`home_dir`] / [`working_dir`] and the `join_*` helpers resolve lazily on
//!   first use and cache the answer for the life of the process. A failed
//!   first lookup is fatal and panics. [`try_home_dir`] / [`try_working_dir`]
//!   expose the same cache without panicking; only successes are cached.
//!
//! The cached working directory is a snapshot: later `set_current_dir` calls
//! do not change it.

use crate::error::{DirKind, Error, Result};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

static HOME_DIR: OnceLock<PathBuf> = OnceLock::new();
static WORKING_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Resolved home and working directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dirs {
    home: PathBuf,
    working: PathBuf,
}

impl Dirs {
    /// Use the given directories as-is.
    pub fn new(home: impl Into<PathBuf>, working: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            working: working.into(),
        }
    }

    /// Look up both directories for the current process.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryLookup`] naming the directory that could not
    /// be resolved.
    pub fn resolve() -> Result<Self> {
        Ok(Self {
            home: lookup_home()?,
            working: lookup_working()?,
        })
    }

    /// The home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// The working directory.
    pub fn working(&self) -> &Path {
        &self.working
    }

    /// Join `parts` under the home directory. See [`join_under`].
    pub fn join_home<I, P>(&self, parts: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        join_under(&self.home, parts)
    }

    /// Join `parts` under the working directory. See [`join_under`].
    pub fn join_working<I, P>(&self, parts: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        join_under(&self.working, parts)
    }
}

/// Join `parts` onto `base` lexically.
///
/// Root and prefix components inside `parts` are ignored (a part of `/etc`
/// joins as `etc`), `.` is dropped and `..` removes the previous component.
/// The filesystem is not consulted.
///
/// `..` never climbs above a root: `/` joined with `..` stays `/`. A relative
/// base has no such floor, so once its components run out each further `..`
/// is kept (`a` joined with `../..` is `..`).
pub fn join_under<I, P>(base: &Path, parts: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut joined = base.to_path_buf();
    for part in parts {
        for component in part.as_ref().components() {
            match component {
                Component::Normal(name) => joined.push(name),
                Component::ParentDir => parent_of(&mut joined),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
    }
    joined
}

fn parent_of(joined: &mut PathBuf) {
    match joined.components().next_back() {
        Some(Component::Normal(_)) => {
            joined.pop();
        }
        Some(Component::RootDir | Component::Prefix(_)) => {}
        Some(Component::CurDir) => {
            joined.pop();
            joined.push("..");
        }
        Some(Component::ParentDir) | None => joined.push(".."),
    }
}

/// The home directory, resolved on first use and cached.
///
/// # Errors
///
/// Returns [`Error::DirectoryLookup`] if it cannot be resolved. A failure is
/// not cached, so a later call tries again.
pub fn try_home_dir() -> Result<&'static Path> {
    if let Some(home) = HOME_DIR.get() {
        return Ok(home);
    }
    let home = lookup_home()?;
    Ok(HOME_DIR.get_or_init(|| home))
}

/// The working directory at first use, cached.
///
/// # Errors
///
/// Returns [`Error::DirectoryLookup`] if it cannot be resolved. A failure is
/// not cached.
pub fn try_working_dir() -> Result<&'static Path> {
    if let Some(working) = WORKING_DIR.get() {
        return Ok(working);
    }
    let working = lookup_working()?;
    Ok(WORKING_DIR.get_or_init(|| working))
}

/// The home directory, resolved on first use and cached.
///
/// # Panics
///
/// Panics if the home directory cannot be resolved. Use [`try_home_dir`] or
/// [`Dirs::resolve`] to handle that case.
pub fn home_dir() -> &'static Path {
    match try_home_dir() {
        Ok(home) => home,
        Err(err) => fatal(&err),
    }
}

/// The working directory at first use, cached.
///
/// # Panics
///
/// Panics if the working directory cannot be resolved.
pub fn working_dir() -> &'static Path {
    match try_working_dir() {
        Ok(working) => working,
        Err(err) => fatal(&err),
    }
}

/// Join `parts` under [`home_dir`].
///
/// # Panics
///
/// Panics if the home directory cannot be resolved.
pub fn join_home_path<I, P>(parts: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    join_under(home_dir(), parts)
}

/// Join `parts` under [`working_dir`].
///
/// # Panics
///
/// Panics if the working directory cannot be resolved.
pub fn join_working_dir<I, P>(parts: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    join_under(working_dir(), parts)
}

fn fatal(err: &Error) -> ! {
    #[cfg(feature = "tracing")]
    tracing::error!("{}", err);
    panic!("{err}")
}

fn lookup_home() -> Result<PathBuf> {
    #[allow(deprecated)]
    let home = std::env::home_dir();
    home.filter(|path| !path.as_os_str().is_empty())
        .ok_or_else(|| Error::DirectoryLookup {
            kind: DirKind::Home,
            source: io::Error::new(io::ErrorKind::NotFound, "home directory is not set"),
        })
}

fn lookup_working() -> Result<PathBuf> {
    std::env::current_dir().map_err(|source| Error::DirectoryLookup {
        kind: DirKind::Working,
        source,
    })
}
