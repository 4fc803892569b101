//! Run a closure while holding a lock.
//!
//! These helpers block until the lock is acquired and release it when the
//! closure returns, or when it unwinds. They add no timeout or cancellation.
//!
//! A poisoned lock is recovered rather than propagated: the helpers keep no
//! invariant of their own, so the data is handed to the closure as-is.
//!
//! # Example
//!
//! Serializing writers to one destination:
//!
//! ```no_run
//! use hashcopy::{locks::use_mutex, save_or_overwrite};
//! use std::sync::Mutex;
//!
//! static INDEX_LOCK: Mutex<()> = Mutex::new(());
//!
//! use_mutex(&INDEX_LOCK, |_| save_or_overwrite("index.json", b"{}"))?;
//! # Ok::<(), hashcopy::Error>(())
//! ```

use std::sync::{Mutex, PoisonError, RwLock};

/// Lock `mutex`, run `f` with the protected value, then unlock.
pub fn use_mutex<T: ?Sized, R>(mutex: &Mutex<T>, f: impl FnOnce(&mut T) -> R) -> R {
    let mut guard = mutex.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Take a shared read lock, run `f`, then release it.
///
/// Other readers may hold the lock at the same time.
pub fn use_read<T: ?Sized, R>(lock: &RwLock<T>, f: impl FnOnce(&T) -> R) -> R {
    let guard = lock.read().unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Take the exclusive write lock, run `f`, then release it.
pub fn use_write<T: ?Sized, R>(lock: &RwLock<T>, f: impl FnOnce(&mut T) -> R) -> R {
    let mut guard = lock.write().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}
