//! Poison-tolerant locking.
//!
//! Formatting itself never locks. The only mutex in the crate guards the
//! logger's output writer, and a panic in one logging call must not silence
//! every later one.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the data if a previous holder panicked.
///
/// # Example
///
/// ```rust
/// use std::sync::Mutex;
/// use aurora_term::sync::lock_recover;
///
/// let mutex = Mutex::new(42);
/// let guard = lock_recover(&mutex);
/// assert_eq!(*guard, 42);
/// ```
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
