//! Access policy for inventory writes.
//!
//! Identity itself (sessions, tokens, role resolution) is an external
//! collaborator. What this crate needs from it is a single decision:
//! may this actor mutate this room's inventory? Block, unblock and
//! set-availability all gate on it.

use crate::error::{InventoryError, Result};
use crate::model::{Actor, RoomId, UserId};
use crate::providers::{HotelDirectory, RoomCatalog};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Authorizes writes to a room's availability ledger.
pub trait AccessPolicy: Send + Sync {
    /// Check whether `actor` may mutate `room_id`'s inventory.
    ///
    /// # Errors
    ///
    /// - `Forbidden` when the actor lacks the required permission
    /// - `RoomNotFound` when the room cannot be resolved
    /// - `Database` when a backing lookup fails
    fn authorize_room_write(
        &self,
        actor: &Actor,
        room_id: RoomId,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Default policy: admins may mutate anything; otherwise the actor must
/// own the hotel the room belongs to.
#[derive(Debug, Clone)]
pub struct OwnerOrAdminPolicy<C, D> {
    catalog: C,
    directory: D,
}

impl<C, D> OwnerOrAdminPolicy<C, D> {
    /// Create a policy over the given catalog and directory.
    pub const fn new(catalog: C, directory: D) -> Self {
        Self { catalog, directory }
    }
}

impl<C, D> AccessPolicy for OwnerOrAdminPolicy<C, D>
where
    C: RoomCatalog,
    D: HotelDirectory,
{
    async fn authorize_room_write(&self, actor: &Actor, room_id: RoomId) -> Result<()> {
        if actor.is_admin() {
            return Ok(());
        }

        let room = self
            .catalog
            .room_by_id(room_id)
            .await?
            .ok_or(InventoryError::RoomNotFound { room_id: room_id.0 })?;

        let hotel = self
            .directory
            .hotel_by_id(room.hotel_id)
            .await?
            .ok_or(InventoryError::HotelNotFound {
                hotel_id: room.hotel_id.0,
            })?;

        if hotel.owner_id == actor.user_id {
            Ok(())
        } else {
            Err(InventoryError::Forbidden {
                required: format!("ownership of hotel {}", hotel.id),
            })
        }
    }
}

/// A cached authorization decision.
#[derive(Debug, Clone)]
struct CachedDecision {
    /// The decision: `Ok` or `Forbidden`. Other outcomes are not cached.
    outcome: Result<()>,
    /// When the entry stops being served.
    expires_at: Instant,
    /// Insertion time, used for oldest-first eviction.
    inserted_at: Instant,
}

/// Bounded, time-expiring decision cache around an [`AccessPolicy`].
///
/// Permission checks on write paths hit the catalog and directory; a
/// hotel owner blocking a month of dates would otherwise pay those
/// lookups per request. This wrapper memoizes allow/deny decisions per
/// `(actor, room)` for a fixed TTL with explicit invalidation, rather
/// than any ambient shared state.
///
/// Only `Ok` and `Forbidden` outcomes are cached; `RoomNotFound` and
/// storage errors always fall through to the inner policy.
#[derive(Debug, Clone)]
pub struct CachedAccessPolicy<P> {
    inner: P,
    ttl: Duration,
    capacity: usize,
    entries: Arc<Mutex<HashMap<(UserId, RoomId), CachedDecision>>>,
}

impl<P> CachedAccessPolicy<P> {
    /// Wrap `inner` with the given TTL and maximum entry count.
    #[must_use]
    pub fn new(inner: P, ttl: Duration, capacity: usize) -> Self {
        Self {
            inner,
            ttl,
            capacity,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Drop every cached decision for one actor.
    ///
    /// Call this when an actor's roles or hotel ownership change.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the cache lock is poisoned.
    pub fn invalidate_actor(&self, user_id: UserId) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| InventoryError::Internal)?;
        entries.retain(|(cached_user, _), _| *cached_user != user_id);
        Ok(())
    }

    /// Number of live (possibly expired, not yet evicted) entries.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the cache lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        let entries = self.entries.lock().map_err(|_| InventoryError::Internal)?;
        Ok(entries.len())
    }

    /// Whether the cache holds no entries.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the cache lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<P> AccessPolicy for CachedAccessPolicy<P>
where
    P: AccessPolicy,
{
    async fn authorize_room_write(&self, actor: &Actor, room_id: RoomId) -> Result<()> {
        let key = (actor.user_id, room_id);
        let now = Instant::now();

        {
            let entries = self.entries.lock().map_err(|_| InventoryError::Internal)?;
            if let Some(decision) = entries.get(&key) {
                if decision.expires_at > now {
                    return decision.outcome.clone();
                }
            }
        }

        let outcome = self.inner.authorize_room_write(actor, room_id).await;

        let cacheable = matches!(outcome, Ok(()) | Err(InventoryError::Forbidden { .. }));
        if cacheable {
            let mut entries = self.entries.lock().map_err(|_| InventoryError::Internal)?;

            if entries.len() >= self.capacity && !entries.contains_key(&key) {
                entries.retain(|_, decision| decision.expires_at > now);
            }
            if entries.len() >= self.capacity && !entries.contains_key(&key) {
                // Still full after dropping expired entries: evict the oldest.
                if let Some(oldest) = entries
                    .iter()
                    .min_by_key(|(_, decision)| decision.inserted_at)
                    .map(|(k, _)| *k)
                {
                    entries.remove(&oldest);
                }
            }

            entries.insert(
                key,
                CachedDecision {
                    outcome: outcome.clone(),
                    expires_at: now + self.ttl,
                    inserted_at: now,
                },
            );
        }

        outcome
    }
}
