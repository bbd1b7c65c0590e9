//! The search service.
//!
//! Composes the hotel directory, the room catalog and the availability
//! engine into the two read models the platform serves: a paginated
//! "available hotels in a city" search and a single hotel's detail view
//! with room-level availability.

use crate::criteria::{SearchCriteria, SearchRequest};
use crate::error::{Result, SearchError};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use stayhub_inventory::providers::{AccessPolicy, AvailabilityLedger, HotelDirectory, RoomCatalog};
use stayhub_inventory::{
    AvailabilityService, Hotel, HotelId, HotelRooms, HotelStatus, InventoryError, Room,
};
use std::collections::HashMap;

/// Factor by which the candidate page is oversampled to compensate for
/// hotels dropped for lack of availability.
const OVERSAMPLE_FACTOR: u32 = 2;

/// One hotel in a search result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummary {
    /// Hotel id.
    pub hotel_id: HotelId,
    /// Display name.
    pub name: String,
    /// City as listed in the directory.
    pub city: String,
    /// Category (e.g. "HOTEL").
    pub hotel_type: String,
    /// Minimum base price among the hotel's available rooms.
    pub min_base_price: f64,
    /// Fixed to `"AVAILABLE"`: hotels without availability never appear.
    pub availability_status: String,
}

/// Pagination envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number, echoed from the request.
    pub page: u32,
    /// Page size, echoed from the request.
    pub limit: u32,
    /// Count of available results returned on this page — not the true
    /// total of all matching-and-available hotels (see
    /// [`SearchService::search_hotels`]).
    pub total: u32,
    /// `total` divided into pages of `limit`.
    pub total_pages: u32,
}

/// A full search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Available hotels, at most `limit`.
    pub data: Vec<HotelSummary>,
    /// Pagination envelope.
    pub pagination: Pagination,
}

/// One room in a hotel detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetails {
    /// Room id.
    pub id: stayhub_inventory::RoomId,
    /// Display name of the room type.
    pub room_type: String,
    /// Static per-night base price.
    pub base_price: f64,
    /// Maximum guests per unit.
    pub max_occupancy: i32,
    /// Total physical units.
    pub quantity: i32,
    /// Whether the room can host the requested stay.
    pub is_available: bool,
    /// Worst-night remaining inventory over the stay: the *minimum*
    /// available count across the stay's nights, the conservative bound
    /// for a multi-night booking. Zero when unavailable.
    pub available_count: i32,
}

/// A hotel detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelDetails {
    /// Hotel id.
    pub hotel_id: HotelId,
    /// Display name.
    pub name: String,
    /// City as listed in the directory.
    pub city: String,
    /// Category.
    pub hotel_type: String,
    /// Rooms with per-room availability.
    pub rooms: Vec<RoomDetails>,
}

/// Search over approved hotels with availability.
#[derive(Debug, Clone)]
pub struct SearchService<L, C, P, D> {
    availability: AvailabilityService<L, C, P>,
    catalog: C,
    directory: D,
}

impl<L, C, P, D> SearchService<L, C, P, D>
where
    L: AvailabilityLedger,
    C: RoomCatalog,
    P: AccessPolicy,
    D: HotelDirectory,
{
    /// Create a search service.
    ///
    /// The catalog handle is the same one the availability service
    /// wraps; search needs it directly for the one-query
    /// rooms-for-hotels fetch.
    pub const fn new(
        availability: AvailabilityService<L, C, P>,
        catalog: C,
        directory: D,
    ) -> Self {
        Self {
            availability,
            catalog,
            directory,
        }
    }

    /// Paginated search for available hotels in a city.
    ///
    /// Validates and normalizes the request, fetches an oversampled
    /// candidate page (`limit × 2` approved hotels at the page offset),
    /// resolves all candidate rooms in one catalog query, runs one
    /// batched availability check across every room, and returns up to
    /// `limit` hotels that have at least one available room.
    ///
    /// Because filtering happens after a fixed-size page fetch,
    /// `pagination.total` counts the available results *returned*, not
    /// the true total of matching-and-available hotels; candidates past
    /// the oversampled page are not counted.
    ///
    /// # Errors
    ///
    /// - `Validation` for missing/malformed criteria
    /// - `Inventory` when a storage query fails
    #[tracing::instrument(level = "debug", skip(self, request))]
    pub async fn search_hotels(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let criteria = request.validate()?;

        // Widen before multiplying: page is caller-controlled and only
        // floored to 1, so the product can exceed u32.
        let offset = i64::from(criteria.page - 1) * i64::from(criteria.limit);
        let candidate_limit = i64::from(criteria.limit * OVERSAMPLE_FACTOR);

        let candidates = self
            .directory
            .search_approved(
                &criteria.city,
                criteria.hotel_type.as_deref(),
                candidate_limit,
                offset,
            )
            .await
            .map_err(SearchError::Inventory)?;

        if candidates.is_empty() {
            return Ok(empty_response(&criteria));
        }

        let hotel_ids: Vec<HotelId> = candidates.iter().map(|hotel| hotel.id).collect();
        let rooms = self
            .catalog
            .rooms_for_hotels(&hotel_ids)
            .await
            .map_err(SearchError::Inventory)?;

        let mut rooms_by_hotel: HashMap<HotelId, Vec<Room>> = HashMap::new();
        for room in rooms {
            rooms_by_hotel.entry(room.hotel_id).or_default().push(room);
        }

        let hotel_rooms: Vec<HotelRooms> = candidates
            .iter()
            .map(|hotel| HotelRooms {
                hotel_id: hotel.id,
                rooms: rooms_by_hotel.remove(&hotel.id).unwrap_or_default(),
            })
            .collect();

        let available = self
            .availability
            .hotels_with_availability(
                &hotel_rooms,
                criteria.check_in,
                criteria.check_out,
                criteria.guests,
            )
            .await
            .map_err(SearchError::Inventory)?;

        let data: Vec<HotelSummary> = candidates
            .into_iter()
            .filter_map(|hotel| {
                available.get(&hotel.id).map(|summary| HotelSummary {
                    hotel_id: hotel.id,
                    name: hotel.name,
                    city: hotel.city,
                    hotel_type: hotel.hotel_type,
                    min_base_price: summary.min_base_price,
                    availability_status: "AVAILABLE".to_string(),
                })
            })
            .take(criteria.limit as usize)
            .collect();

        let total = u32::try_from(data.len()).unwrap_or(u32::MAX);
        Ok(SearchResponse {
            data,
            pagination: Pagination {
                page: criteria.page,
                limit: criteria.limit,
                total,
                total_pages: total.div_ceil(criteria.limit),
            },
        })
    }

    /// One approved hotel with room-level availability.
    ///
    /// With a date range, each room reports whether it can host the
    /// stay and its worst-night remaining count; without dates every
    /// room is reported available at full quantity.
    ///
    /// # Errors
    ///
    /// - `HotelNotFound` when the hotel does not exist or is not approved
    /// - `Validation` when a date range is supplied with
    ///   `check_out <= check_in`
    /// - `Inventory` when a storage query fails
    pub async fn get_hotel_details(
        &self,
        hotel_id: HotelId,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        guests: Option<i32>,
    ) -> Result<HotelDetails> {
        let hotel = self
            .directory
            .hotel_by_id(hotel_id)
            .await
            .map_err(SearchError::Inventory)?
            .filter(|hotel| hotel.status == HotelStatus::Approved)
            .ok_or(InventoryError::HotelNotFound {
                hotel_id: hotel_id.0,
            })?;

        let rooms = self
            .catalog
            .rooms_for_hotel(hotel.id)
            .await
            .map_err(SearchError::Inventory)?;

        let details = match (check_in, check_out) {
            (Some(check_in), Some(check_out)) => {
                if check_out <= check_in {
                    return Err(SearchError::validation(
                        "checkOutDate must be after checkInDate",
                    ));
                }
                let guests = guests.unwrap_or(1);
                self.rooms_with_stay_availability(rooms, check_in, check_out, guests)
                    .await?
            }
            _ => rooms
                .into_iter()
                .map(|room| RoomDetails {
                    id: room.id,
                    room_type: room.room_type,
                    base_price: room.base_price,
                    max_occupancy: room.max_occupancy,
                    quantity: room.quantity,
                    is_available: true,
                    available_count: room.quantity,
                })
                .collect(),
        };

        Ok(hotel_details(hotel, details))
    }

    /// Per-room stay availability for a detail view.
    ///
    /// Uses the naive single-room path: detail views carry a handful of
    /// rooms, and the calendar read is needed anyway for the
    /// minimum-count computation.
    async fn rooms_with_stay_availability(
        &self,
        rooms: Vec<Room>,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: i32,
    ) -> Result<Vec<RoomDetails>> {
        let last_night = check_out - Duration::days(1);

        let mut details = Vec::with_capacity(rooms.len());
        for room in rooms {
            let is_available = self
                .availability
                .is_room_available(room.id, check_in, check_out, guests)
                .await
                .map_err(SearchError::Inventory)?;

            let available_count = if is_available {
                self.availability
                    .get_availability_calendar(room.id, check_in, last_night)
                    .await
                    .map_err(SearchError::Inventory)?
                    .iter()
                    .map(|day| day.available_count)
                    .min()
                    .unwrap_or(room.quantity)
            } else {
                0
            };

            details.push(RoomDetails {
                id: room.id,
                room_type: room.room_type,
                base_price: room.base_price,
                max_occupancy: room.max_occupancy,
                quantity: room.quantity,
                is_available,
                available_count,
            });
        }
        Ok(details)
    }
}

fn empty_response(criteria: &SearchCriteria) -> SearchResponse {
    SearchResponse {
        data: Vec::new(),
        pagination: Pagination {
            page: criteria.page,
            limit: criteria.limit,
            total: 0,
            total_pages: 0,
        },
    }
}

fn hotel_details(hotel: Hotel, rooms: Vec<RoomDetails>) -> HotelDetails {
    HotelDetails {
        hotel_id: hotel.id,
        name: hotel.name,
        city: hotel.city,
        hotel_type: hotel.hotel_type,
        rooms,
    }
}
