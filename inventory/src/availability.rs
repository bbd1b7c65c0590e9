//! The availability service.
//!
//! All operations over the ledger live here: initialization, range
//! checks, calendar materialization, blocking and the batched
//! multi-room check that backs search.
//!
//! # Night ranges
//!
//! Every stay is the half-open night range `[check_in, check_out)`: a
//! guest departing on day N does not occupy night N. Calendar reads use
//! the inclusive range `[start, end]` because they render days, not
//! stays.
//!
//! # Consistency
//!
//! Writes are last-write-wins upserts with no locking; batched reads are
//! point-in-time snapshots. Callers that go on to actually reserve a
//! room must re-check at booking time — that compare-and-set lives
//! outside this crate.

use crate::config::InventoryConfig;
use crate::error::{InventoryError, Result};
use crate::model::{Actor, AvailabilityDay, HotelId, Room, RoomAvailability, RoomId};
use crate::providers::{AccessPolicy, AvailabilityLedger, RoomCatalog};
use chrono::{NaiveDate, Utc};
use std::collections::{HashMap, HashSet};

/// Per-room result of the batched availability check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomAvailabilitySnapshot {
    /// Whether the room can host the stay.
    pub is_available: bool,
    /// The room's static base price, echoed for min-price aggregation.
    pub base_price: f64,
}

/// One hotel with its rooms, as assembled by the search layer.
#[derive(Debug, Clone)]
pub struct HotelRooms {
    /// The hotel.
    pub hotel_id: HotelId,
    /// The hotel's rooms (catalog metadata).
    pub rooms: Vec<Room>,
}

/// Availability summary for a hotel that has at least one available room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotelAvailability {
    /// Minimum base price among the hotel's available rooms.
    pub min_base_price: f64,
}

/// Operations over the availability ledger.
///
/// Generic over the ledger store, the room catalog and the access
/// policy so tests run against in-memory mocks.
#[derive(Debug, Clone)]
pub struct AvailabilityService<L, C, P> {
    ledger: L,
    catalog: C,
    policy: P,
    config: InventoryConfig,
}

impl<L, C, P> AvailabilityService<L, C, P>
where
    L: AvailabilityLedger,
    C: RoomCatalog,
    P: AccessPolicy,
{
    /// Create a service over the given providers.
    pub const fn new(ledger: L, catalog: C, policy: P, config: InventoryConfig) -> Self {
        Self {
            ledger,
            catalog,
            policy,
            config,
        }
    }

    /// Resolve a room or fail with `RoomNotFound`.
    async fn require_room(&self, room_id: RoomId) -> Result<Room> {
        self.catalog
            .room_by_id(room_id)
            .await?
            .ok_or(InventoryError::RoomNotFound { room_id: room_id.0 })
    }

    /// Write the initial ledger rows for a newly provisioned room.
    ///
    /// One row per calendar day from today through `today +
    /// horizon_days`, each with `available_count = quantity` and no
    /// block. The write is a plain bulk upsert: re-running it is safe
    /// against duplication but overwrites any blocks placed since —
    /// provisioning is expected to call it once per room.
    ///
    /// # Errors
    ///
    /// - `RoomNotFound` if the room id is unknown to the catalog
    /// - `Forbidden` when the actor is neither owner nor admin —
    ///   re-initialization overwrites existing blocks, so it is gated
    ///   like every other ledger mutation
    /// - `InvalidRange` if `quantity` is negative
    /// - `Database` if the write fails (partial writes are repaired by
    ///   re-running to completion)
    #[tracing::instrument(level = "debug", skip(self, actor))]
    pub async fn initialize_room_availability(
        &self,
        actor: &Actor,
        room_id: RoomId,
        quantity: i32,
    ) -> Result<()> {
        self.require_room(room_id).await?;
        self.policy.authorize_room_write(actor, room_id).await?;

        if quantity < 0 {
            return Err(InventoryError::invalid_range(format!(
                "quantity must be non-negative, got {quantity}"
            )));
        }

        let today = Utc::now().date_naive();
        let rows: Vec<RoomAvailability> = (0..=self.config.horizon_days)
            .map(|offset| RoomAvailability {
                room_id,
                date: today + chrono::Duration::days(offset),
                available_count: quantity,
                is_blocked: false,
                block_reason: None,
            })
            .collect();

        self.ledger.upsert_many(&rows).await?;
        tracing::info!(%room_id, quantity, days = rows.len(), "initialized room availability");
        Ok(())
    }

    /// Whether one room can host a stay.
    ///
    /// Returns `false` (not an error) when the room id is unknown or
    /// `guests` exceeds the room's occupancy. Otherwise the room is
    /// available iff no night in `[check_in, check_out)` is sold out.
    /// Nights without a ledger row default to full availability.
    ///
    /// # Errors
    ///
    /// Returns error if a storage query fails.
    pub async fn is_room_available(
        &self,
        room_id: RoomId,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: i32,
    ) -> Result<bool> {
        let Some(room) = self.catalog.room_by_id(room_id).await? else {
            return Ok(false);
        };
        if guests > room.max_occupancy {
            return Ok(false);
        }

        let sold_out = self
            .ledger
            .sold_out_dates(&[room_id], check_in, check_out)
            .await?;
        Ok(sold_out.is_empty())
    }

    /// Rooms of one hotel that can host a stay.
    ///
    /// The naive per-room path, retained for single-hotel detail views
    /// where the room count is small. Search goes through
    /// [`batch_check_room_availability`](Self::batch_check_room_availability).
    ///
    /// # Errors
    ///
    /// Returns error if a storage query fails.
    pub async fn get_available_rooms(
        &self,
        hotel_id: HotelId,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: i32,
    ) -> Result<Vec<Room>> {
        let rooms = self.catalog.rooms_for_hotel(hotel_id).await?;

        let mut available = Vec::new();
        for room in rooms {
            if self
                .is_room_available(room.id, check_in, check_out, guests)
                .await?
            {
                available.push(room);
            }
        }
        Ok(available)
    }

    /// Block every night in `[start, end)` for administrative reasons.
    ///
    /// Each night is upserted with `available_count = 0`, `is_blocked =
    /// true` and the given reason. Not atomic across the range;
    /// re-running the same call to completion repairs a partial write.
    ///
    /// # Errors
    ///
    /// - `InvalidRange` when `start >= end`
    /// - `RoomNotFound` for unknown rooms
    /// - `Forbidden` when the actor is neither owner nor admin
    /// - `Database` if a write fails
    #[tracing::instrument(level = "debug", skip(self, actor, reason))]
    pub async fn block_dates(
        &self,
        actor: &Actor,
        room_id: RoomId,
        start: NaiveDate,
        end: NaiveDate,
        reason: Option<String>,
    ) -> Result<()> {
        if start >= end {
            return Err(InventoryError::invalid_range(format!(
                "start date {start} must be before end date {end}"
            )));
        }
        self.require_room(room_id).await?;
        self.policy.authorize_room_write(actor, room_id).await?;

        let rows: Vec<RoomAvailability> = nights(start, end)
            .map(|date| RoomAvailability {
                room_id,
                date,
                available_count: 0,
                is_blocked: true,
                block_reason: reason.clone(),
            })
            .collect();

        self.ledger.upsert_many(&rows).await?;
        tracing::info!(%room_id, %start, %end, nights = rows.len(), "blocked dates");
        Ok(())
    }

    /// Unblock every night in `[start, end)`.
    ///
    /// Each night is reset to the room's full `quantity` with the block
    /// flag and reason cleared. Note this resets rather than restoring a
    /// prior partial-booking count: the model has no booked counter
    /// distinct from the block flag, so unblocking after a partial
    /// sellout is deliberately lossy.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`block_dates`](Self::block_dates).
    #[tracing::instrument(level = "debug", skip(self, actor))]
    pub async fn unblock_dates(
        &self,
        actor: &Actor,
        room_id: RoomId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<()> {
        if start >= end {
            return Err(InventoryError::invalid_range(format!(
                "start date {start} must be before end date {end}"
            )));
        }
        let room = self.require_room(room_id).await?;
        self.policy.authorize_room_write(actor, room_id).await?;

        let rows: Vec<RoomAvailability> = nights(start, end)
            .map(|date| RoomAvailability {
                room_id,
                date,
                available_count: room.quantity,
                is_blocked: false,
                block_reason: None,
            })
            .collect();

        self.ledger.upsert_many(&rows).await?;
        tracing::info!(%room_id, %start, %end, nights = rows.len(), "unblocked dates");
        Ok(())
    }

    /// Override a single date's available count.
    ///
    /// The block flag is derived: a count of zero marks the date
    /// blocked, anything else clears it.
    ///
    /// # Errors
    ///
    /// - `InvalidRange` when `count` is outside `[0, room.quantity]`
    /// - `RoomNotFound` for unknown rooms
    /// - `Forbidden` when the actor is neither owner nor admin
    /// - `Database` if the write fails
    #[tracing::instrument(level = "debug", skip(self, actor))]
    pub async fn set_availability(
        &self,
        actor: &Actor,
        room_id: RoomId,
        date: NaiveDate,
        count: i32,
    ) -> Result<()> {
        let room = self.require_room(room_id).await?;
        self.policy.authorize_room_write(actor, room_id).await?;

        if count < 0 || count > room.quantity {
            return Err(InventoryError::invalid_range(format!(
                "count {count} must be within [0, {}]",
                room.quantity
            )));
        }

        self.ledger
            .upsert(&RoomAvailability {
                room_id,
                date,
                available_count: count,
                is_blocked: count == 0,
                block_reason: None,
            })
            .await
    }

    /// Materialize one calendar entry per date in the inclusive range
    /// `[start, end]`.
    ///
    /// Dates without a ledger row are filled with the room's full
    /// `quantity`, unblocked — the lazy-default read model consumed by
    /// calendar UIs and by detail-view minimum computation.
    ///
    /// # Errors
    ///
    /// - `RoomNotFound` for unknown rooms (the default fill needs the
    ///   room's quantity)
    /// - `InvalidRange` when `start > end`
    /// - `Database` if the read fails
    pub async fn get_availability_calendar(
        &self,
        room_id: RoomId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AvailabilityDay>> {
        if start > end {
            return Err(InventoryError::invalid_range(format!(
                "start date {start} must not be after end date {end}"
            )));
        }
        let room = self.require_room(room_id).await?;

        let rows = self.ledger.get_range(room_id, start, end).await?;
        let by_date: HashMap<NaiveDate, RoomAvailability> =
            rows.into_iter().map(|row| (row.date, row)).collect();

        let calendar = start
            .iter_days()
            .take_while(|date| *date <= end)
            .map(|date| match by_date.get(&date) {
                Some(row) => AvailabilityDay {
                    date,
                    available_count: row.available_count,
                    total_count: room.quantity,
                    is_blocked: row.is_blocked,
                    block_reason: row.block_reason.clone(),
                },
                None => AvailabilityDay {
                    date,
                    available_count: room.quantity,
                    total_count: room.quantity,
                    is_blocked: false,
                    block_reason: None,
                },
            })
            .collect();

        Ok(calendar)
    }

    /// Availability for many rooms in at most two storage queries.
    ///
    /// One catalog query fetches metadata for all ids; one ledger query
    /// fetches every sold-out `(room, night)` pair across the
    /// occupancy-eligible ids. A room is available iff it passes the
    /// occupancy filter and owns no pair in that set — the same answer
    /// as calling [`is_room_available`](Self::is_room_available) per
    /// room, without the per-room query.
    ///
    /// Ids unknown to the catalog are absent from the result.
    ///
    /// # Errors
    ///
    /// Returns error if a storage query fails.
    #[tracing::instrument(level = "debug", skip(self, room_ids), fields(rooms = room_ids.len()))]
    pub async fn batch_check_room_availability(
        &self,
        room_ids: &[RoomId],
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: i32,
    ) -> Result<HashMap<RoomId, RoomAvailabilitySnapshot>> {
        if room_ids.is_empty() {
            return Ok(HashMap::new());
        }

        // Phase 1: one query for all room metadata.
        let rooms = self.catalog.rooms_by_ids(room_ids).await?;

        let mut result = HashMap::with_capacity(rooms.len());
        let mut eligible: Vec<RoomId> = Vec::with_capacity(rooms.len());
        for room in &rooms {
            if room.max_occupancy >= guests {
                eligible.push(room.id);
            } else {
                result.insert(
                    room.id,
                    RoomAvailabilitySnapshot {
                        is_available: false,
                        base_price: room.base_price,
                    },
                );
            }
        }

        // Phase 2: one query for every sold-out night across all
        // eligible rooms, then distribute back in memory.
        let sold_out_rooms: HashSet<RoomId> = if eligible.is_empty() {
            HashSet::new()
        } else {
            self.ledger
                .sold_out_dates(&eligible, check_in, check_out)
                .await?
                .into_iter()
                .map(|(room_id, _)| room_id)
                .collect()
        };

        for room in rooms {
            if room.max_occupancy >= guests {
                result.insert(
                    room.id,
                    RoomAvailabilitySnapshot {
                        is_available: !sold_out_rooms.contains(&room.id),
                        base_price: room.base_price,
                    },
                );
            }
        }

        Ok(result)
    }

    /// Availability for many hotels via a single flattened batch check.
    ///
    /// All room ids are flattened into one
    /// [`batch_check_room_availability`](Self::batch_check_room_availability)
    /// call, then regrouped by owning hotel. A hotel qualifies if at
    /// least one of its rooms is available; its price is the minimum
    /// base price among those available rooms.
    ///
    /// # Errors
    ///
    /// Returns error if a storage query fails.
    pub async fn hotels_with_availability(
        &self,
        hotels: &[HotelRooms],
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: i32,
    ) -> Result<HashMap<HotelId, HotelAvailability>> {
        let all_room_ids: Vec<RoomId> = hotels
            .iter()
            .flat_map(|hotel| hotel.rooms.iter().map(|room| room.id))
            .collect();

        let snapshots = self
            .batch_check_room_availability(&all_room_ids, check_in, check_out, guests)
            .await?;

        let mut result = HashMap::new();
        for hotel in hotels {
            let min_price = hotel
                .rooms
                .iter()
                .filter(|room| {
                    snapshots
                        .get(&room.id)
                        .is_some_and(|snapshot| snapshot.is_available)
                })
                .map(|room| room.base_price)
                .fold(f64::INFINITY, f64::min);

            if min_price.is_finite() {
                result.insert(
                    hotel.hotel_id,
                    HotelAvailability {
                        min_base_price: min_price,
                    },
                );
            }
        }

        Ok(result)
    }
}

/// Iterator over the nights of the half-open range `[start, end)`.
fn nights(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |date| *date < end)
}
