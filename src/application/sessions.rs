//! Per-user session state: active dialogs and write serialization.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::domain::conversation::Dialog;
use crate::domain::foundation::UserId;

/// Map of active dialogs, keyed by user id.
///
/// A user has at most one dialog at a time; starting a new one discards the
/// old. Dialogs are removed on completion or cancel, so the map only holds
/// users mid-conversation.
pub struct SessionMap {
    dialogs: RwLock<HashMap<UserId, Dialog>>,
}

impl SessionMap {
    /// Creates an empty session map.
    pub fn new() -> Self {
        Self {
            dialogs: RwLock::new(HashMap::new()),
        }
    }

    /// Starts (or replaces) the user's dialog.
    pub async fn start(&self, user_id: UserId, dialog: Dialog) {
        self.dialogs.write().await.insert(user_id, dialog);
    }

    /// Takes the user's dialog out of the map, if active.
    ///
    /// The caller either finishes it or puts it back via
    /// [`SessionMap::start`] after a validation retry.
    pub async fn take(&self, user_id: UserId) -> Option<Dialog> {
        self.dialogs.write().await.remove(&user_id)
    }

    /// Discards the user's dialog; returns true if one was active.
    pub async fn cancel(&self, user_id: UserId) -> bool {
        self.dialogs.write().await.remove(&user_id).is_some()
    }

    /// Returns true if the user has an active dialog.
    pub async fn is_active(&self, user_id: UserId) -> bool {
        self.dialogs.read().await.contains_key(&user_id)
    }
}

impl Default for SessionMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-user exclusive locks serializing event handling.
///
/// All read-then-write sequences against one user's rows (invite duplicate
/// guard, report count-then-ban, profile edits) run under that user's lock,
/// closing the check-then-act races without changing semantics.
pub struct UserLocks {
    locks: RwLock<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserLocks {
    /// Creates an empty lock map.
    pub fn new() -> Self {
        Self {
            locks: RwLock::new(HashMap::new()),
        }
    }

    async fn lock_for(&self, user_id: UserId) -> Arc<Mutex<()>> {
        if let Some(lock) = self.locks.read().await.get(&user_id) {
            return Arc::clone(lock);
        }
        let mut locks = self.locks.write().await;
        Arc::clone(locks.entry(user_id).or_default())
    }

    /// Acquires the lock for one user.
    pub async fn acquire(&self, user_id: UserId) -> OwnedMutexGuard<()> {
        self.lock_for(user_id).await.lock_owned().await
    }

    /// Acquires locks for two users in id order, so concurrent pair
    /// operations cannot deadlock.
    pub async fn acquire_pair(
        &self,
        a: UserId,
        b: UserId,
    ) -> (OwnedMutexGuard<()>, Option<OwnedMutexGuard<()>>) {
        if a == b {
            return (self.acquire(a).await, None);
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        let first_guard = self.acquire(first).await;
        let second_guard = self.acquire(second).await;
        (first_guard, Some(second_guard))
    }
}

impl Default for UserLocks {
    fn default() -> Self {
        Self::new()
    }
}
