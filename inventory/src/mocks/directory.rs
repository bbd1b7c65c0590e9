//! Mock hotel directory for testing.

use crate::error::{InventoryError, Result};
use crate::model::{Hotel, HotelId, HotelStatus};
use crate::providers::HotelDirectory;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock hotel directory.
///
/// Uses in-memory storage for testing. Seed it with
/// [`MockHotelDirectory::insert_hotel`].
#[derive(Debug, Clone)]
pub struct MockHotelDirectory {
    hotels: Arc<Mutex<HashMap<HotelId, Hotel>>>,
}

impl MockHotelDirectory {
    /// Create an empty mock directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hotels: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed a hotel into the directory.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the lock is poisoned.
    pub fn insert_hotel(&self, hotel: Hotel) -> Result<()> {
        let mut hotels = self.hotels.lock().map_err(|_| InventoryError::Internal)?;
        hotels.insert(hotel.id, hotel);
        Ok(())
    }
}

impl Default for MockHotelDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl HotelDirectory for MockHotelDirectory {
    fn hotel_by_id(&self, hotel_id: HotelId) -> impl Future<Output = Result<Option<Hotel>>> + Send {
        let hotels = Arc::clone(&self.hotels);

        async move {
            let hotels = hotels.lock().map_err(|_| InventoryError::Internal)?;
            Ok(hotels.get(&hotel_id).cloned())
        }
    }

    fn search_approved(
        &self,
        city: &str,
        hotel_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> impl Future<Output = Result<Vec<Hotel>>> + Send {
        let hotels = Arc::clone(&self.hotels);
        let city = city.to_lowercase();
        let hotel_type = hotel_type.map(str::to_string);

        async move {
            let hotels = hotels.lock().map_err(|_| InventoryError::Internal)?;
            let mut matched: Vec<Hotel> = hotels
                .values()
                .filter(|hotel| {
                    hotel.status == HotelStatus::Approved
                        && hotel.city.to_lowercase() == city
                        && hotel_type
                            .as_deref()
                            .is_none_or(|wanted| hotel.hotel_type == wanted)
                })
                .cloned()
                .collect();
            matched.sort_by(|a, b| a.name.cmp(&b.name));

            let offset = usize::try_from(offset.max(0)).unwrap_or(0);
            let limit = usize::try_from(limit.max(0)).unwrap_or(0);
            Ok(matched.into_iter().skip(offset).take(limit).collect())
        }
    }
}
