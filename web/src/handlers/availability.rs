//! Availability ledger endpoints.
//!
//! Every mutation requires an authenticated actor; the service layer
//! enforces the owner-or-admin policy on top of that.

use crate::error::AppError;
use crate::extractors::AuthenticatedActor;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stayhub_inventory::{AvailabilityDay, HotelId, Room, RoomId};

/// Body for the room provisioning hook.
#[derive(Debug, Deserialize)]
pub struct InitializeRequest {
    /// Units of this room type.
    pub quantity: i32,
}

/// `POST /api/v1/rooms/:room_id/availability/initialize` — seed the
/// ledger for a newly provisioned room. Owner-or-admin only, like
/// every other ledger mutation.
pub async fn initialize(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(room_id): Path<uuid::Uuid>,
    Json(body): Json<InitializeRequest>,
) -> Result<StatusCode, AppError> {
    state
        .availability
        .initialize_room_availability(&actor, RoomId(room_id), body.quantity)
        .await?;
    Ok(StatusCode::CREATED)
}

/// Stay parameters shared by the availability check endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayQuery {
    /// Check-in date, `YYYY-MM-DD`.
    pub check_in_date: NaiveDate,
    /// Check-out date, `YYYY-MM-DD` (exclusive night).
    pub check_out_date: NaiveDate,
    /// Guest count (default 1).
    pub guests: Option<i32>,
}

/// Response for a single-room availability check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityCheckResponse {
    /// Whether the room can host the stay.
    pub is_available: bool,
}

/// `GET /api/v1/rooms/:room_id/availability` — single-room stay check.
pub async fn check_room(
    State(state): State<AppState>,
    Path(room_id): Path<uuid::Uuid>,
    Query(stay): Query<StayQuery>,
) -> Result<Json<AvailabilityCheckResponse>, AppError> {
    let is_available = state
        .availability
        .is_room_available(
            RoomId(room_id),
            stay.check_in_date,
            stay.check_out_date,
            stay.guests.unwrap_or(1),
        )
        .await?;
    Ok(Json(AvailabilityCheckResponse { is_available }))
}

/// `GET /api/v1/hotels/:hotel_id/rooms/available` — rooms of one hotel
/// that can host the stay.
pub async fn available_rooms(
    State(state): State<AppState>,
    Path(hotel_id): Path<uuid::Uuid>,
    Query(stay): Query<StayQuery>,
) -> Result<Json<Vec<Room>>, AppError> {
    let rooms = state
        .availability
        .get_available_rooms(
            HotelId(hotel_id),
            stay.check_in_date,
            stay.check_out_date,
            stay.guests.unwrap_or(1),
        )
        .await?;
    Ok(Json(rooms))
}

/// Inclusive date range for calendar reads.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// First date of the calendar window.
    pub start: NaiveDate,
    /// Last date of the calendar window (inclusive).
    pub end: NaiveDate,
}

/// `GET /api/v1/rooms/:room_id/availability/calendar` — one entry per
/// date in `[start, end]`, gap-filled with the room's full quantity.
pub async fn calendar(
    State(state): State<AppState>,
    Path(room_id): Path<uuid::Uuid>,
    Query(range): Query<CalendarQuery>,
) -> Result<Json<Vec<AvailabilityDay>>, AppError> {
    let days = state
        .availability
        .get_availability_calendar(RoomId(room_id), range.start, range.end)
        .await?;
    Ok(Json(days))
}

/// Body for block and unblock requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeRequest {
    /// First night of the range, `YYYY-MM-DD`.
    pub start_date: NaiveDate,
    /// Exclusive end of the range, `YYYY-MM-DD`.
    pub end_date: NaiveDate,
    /// Optional reason (blocks only).
    pub reason: Option<String>,
}

/// `POST /api/v1/rooms/:room_id/availability/block`.
pub async fn block_dates(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(room_id): Path<uuid::Uuid>,
    Json(body): Json<DateRangeRequest>,
) -> Result<StatusCode, AppError> {
    state
        .availability
        .block_dates(
            &actor,
            RoomId(room_id),
            body.start_date,
            body.end_date,
            body.reason,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/v1/rooms/:room_id/availability/unblock`.
pub async fn unblock_dates(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(room_id): Path<uuid::Uuid>,
    Json(body): Json<DateRangeRequest>,
) -> Result<StatusCode, AppError> {
    state
        .availability
        .unblock_dates(&actor, RoomId(room_id), body.start_date, body.end_date)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Body for a single-date count override.
#[derive(Debug, Deserialize)]
pub struct SetAvailabilityRequest {
    /// The date to override.
    pub date: NaiveDate,
    /// New available count, within `[0, room.quantity]`.
    pub count: i32,
}

/// `PUT /api/v1/rooms/:room_id/availability` — override one date's
/// available count.
pub async fn set_availability(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(room_id): Path<uuid::Uuid>,
    Json(body): Json<SetAvailabilityRequest>,
) -> Result<StatusCode, AppError> {
    state
        .availability
        .set_availability(&actor, RoomId(room_id), body.date, body.count)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
