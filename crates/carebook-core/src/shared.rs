//! # Shared Store
//!
//! The entity store behind a mutex, for callers that hand it to more than
//! one thread (a web server's handlers, a desktop app's command handlers).
//!
//! ## Thread Safety
//! Every create runs inside one lock acquisition, so ID allocation and the
//! append that follows cannot interleave with another create.
//! ```text
//! thread A: lock ──► allocate P1001 ──► push ──► unlock
//! thread B:                                      lock ──► allocate P1002 ...
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use crate::clock::{Clock, SystemClock};
use crate::store::EntityStore;

/// Cloneable handle to one [`EntityStore`].
///
/// ## Why Not RwLock?
/// Creates dominate and each holds the lock for microseconds.
#[derive(Debug)]
pub struct SharedStore<C = SystemClock> {
    inner: Arc<Mutex<EntityStore<C>>>,
}

impl<C: Clock> SharedStore<C> {
    pub fn new(store: EntityStore<C>) -> Self {
        SharedStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with read access to the store.
    ///
    /// ## Usage
    /// ```rust
    /// use carebook_core::{EntityStore, SharedStore};
    ///
    /// let shared = SharedStore::new(EntityStore::new());
    /// let count = shared.with_store(|store| store.list_pharmacies().len());
    /// assert_eq!(count, 2);
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&EntityStore<C>) -> R,
    {
        let store = self.lock();
        f(&store)
    }

    /// Runs `f` with exclusive write access to the store.
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut EntityStore<C>) -> R,
    {
        let mut store = self.lock();
        f(&mut store)
    }

    fn lock(&self) -> MutexGuard<'_, EntityStore<C>> {
        self.inner.lock().expect("Store mutex poisoned")
    }
}

impl<C> Clone for SharedStore<C> {
    fn clone(&self) -> Self {
        SharedStore {
            inner: Arc::clone(&self.inner),
        }
    }
}
