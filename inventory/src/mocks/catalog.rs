//! Mock room catalog for testing.

use crate::error::{InventoryError, Result};
use crate::model::{HotelId, Room, RoomId};
use crate::providers::RoomCatalog;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock room catalog.
///
/// Uses in-memory storage for testing. Seed it with
/// [`MockRoomCatalog::insert_room`].
#[derive(Debug, Clone)]
pub struct MockRoomCatalog {
    rooms: Arc<Mutex<HashMap<RoomId, Room>>>,
}

impl MockRoomCatalog {
    /// Create an empty mock catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed a room into the catalog.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the lock is poisoned.
    pub fn insert_room(&self, room: Room) -> Result<()> {
        let mut rooms = self.rooms.lock().map_err(|_| InventoryError::Internal)?;
        rooms.insert(room.id, room);
        Ok(())
    }
}

impl Default for MockRoomCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomCatalog for MockRoomCatalog {
    fn room_by_id(&self, room_id: RoomId) -> impl Future<Output = Result<Option<Room>>> + Send {
        let rooms = Arc::clone(&self.rooms);

        async move {
            let rooms = rooms.lock().map_err(|_| InventoryError::Internal)?;
            Ok(rooms.get(&room_id).cloned())
        }
    }

    fn rooms_by_ids(&self, room_ids: &[RoomId]) -> impl Future<Output = Result<Vec<Room>>> + Send {
        let rooms = Arc::clone(&self.rooms);
        let room_ids = room_ids.to_vec();

        async move {
            let rooms = rooms.lock().map_err(|_| InventoryError::Internal)?;
            Ok(room_ids
                .iter()
                .filter_map(|id| rooms.get(id).cloned())
                .collect())
        }
    }

    fn rooms_for_hotel(&self, hotel_id: HotelId) -> impl Future<Output = Result<Vec<Room>>> + Send {
        let rooms = Arc::clone(&self.rooms);

        async move {
            let rooms = rooms.lock().map_err(|_| InventoryError::Internal)?;
            let mut matched: Vec<Room> = rooms
                .values()
                .filter(|room| room.hotel_id == hotel_id)
                .cloned()
                .collect();
            matched.sort_by_key(|room| room.id.0);
            Ok(matched)
        }
    }

    fn rooms_for_hotels(
        &self,
        hotel_ids: &[HotelId],
    ) -> impl Future<Output = Result<Vec<Room>>> + Send {
        let rooms = Arc::clone(&self.rooms);
        let hotel_ids = hotel_ids.to_vec();

        async move {
            let rooms = rooms.lock().map_err(|_| InventoryError::Internal)?;
            let mut matched: Vec<Room> = rooms
                .values()
                .filter(|room| hotel_ids.contains(&room.hotel_id))
                .cloned()
                .collect();
            matched.sort_by_key(|room| room.id.0);
            Ok(matched)
        }
    }
}
