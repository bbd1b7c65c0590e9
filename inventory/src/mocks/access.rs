//! Mock access policy for testing.

use crate::error::{InventoryError, Result};
use crate::model::{Actor, RoomId, UserId};
use crate::providers::AccessPolicy;
use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock access policy.
///
/// Allows everything by default; individual actors can be denied with
/// [`MockAccessPolicy::deny`]. Counts checks so tests can assert how
/// often the policy was consulted (e.g. around the decision cache).
#[derive(Debug, Clone)]
pub struct MockAccessPolicy {
    denied: Arc<Mutex<HashSet<UserId>>>,
    checks: Arc<AtomicUsize>,
}

impl MockAccessPolicy {
    /// Create a policy that allows every write.
    #[must_use]
    pub fn new() -> Self {
        Self {
            denied: Arc::new(Mutex::new(HashSet::new())),
            checks: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Deny all writes from one actor.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the lock is poisoned.
    pub fn deny(&self, user_id: UserId) -> Result<()> {
        let mut denied = self.denied.lock().map_err(|_| InventoryError::Internal)?;
        denied.insert(user_id);
        Ok(())
    }

    /// Number of times the policy has been consulted.
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

impl Default for MockAccessPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessPolicy for MockAccessPolicy {
    fn authorize_room_write(
        &self,
        actor: &Actor,
        _room_id: RoomId,
    ) -> impl Future<Output = Result<()>> + Send {
        let denied = Arc::clone(&self.denied);
        let checks = Arc::clone(&self.checks);
        let user_id = actor.user_id;

        async move {
            checks.fetch_add(1, Ordering::SeqCst);
            let denied = denied.lock().map_err(|_| InventoryError::Internal)?;
            if denied.contains(&user_id) {
                Err(InventoryError::Forbidden {
                    required: "inventory write access".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }
}
