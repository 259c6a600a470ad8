//! Per-sender session storage.
//!
//! Each key owns its own lock, so a read-modify-write on one sender's session
//! never blocks another sender. Two messages from the same sender serialize on
//! that sender's lock and are processed one after the other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use shopkeep_core::SenderId;

#[derive(Debug)]
pub struct SessionStore<V> {
    sessions: RwLock<HashMap<SenderId, Arc<Mutex<V>>>>,
}

impl<V> SessionStore<V> {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Run `f` with exclusive access to the session for `key`, creating it
    /// with `init` on first use.
    pub fn with_session<R>(
        &self,
        key: &SenderId,
        init: impl FnOnce() -> V,
        f: impl FnOnce(&mut V) -> R,
    ) -> R {
        let slot = self.slot(key, init);
        // A panic mid-update leaves the session as it was written so far; keep serving it.
        let mut session = slot.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }

    /// Copy of the session for `key`, if one exists.
    pub fn get(&self, key: &SenderId) -> Option<V>
    where
        V: Clone,
    {
        let slot = {
            let map = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
            let slot = map.get(key).cloned();
            slot
        }?;
        let session = slot.lock().unwrap_or_else(PoisonError::into_inner);
        Some(session.clone())
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, key: &SenderId, init: impl FnOnce() -> V) -> Arc<Mutex<V>> {
        {
            let map = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = map.get(key) {
                return Arc::clone(slot);
            }
        }
        let mut map = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            map.entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(init()))),
        )
    }
}

impl<V> Default for SessionStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
