//! Search and hotel detail endpoints.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use stayhub_inventory::HotelId;
use stayhub_search::{HotelDetails, SearchRequest, SearchResponse};

/// `GET /api/v1/search` — paginated city search.
///
/// All criteria arrive as query parameters; validation errors come back
/// as 400 with the first violated rule.
pub async fn search_hotels(
    State(state): State<AppState>,
    Query(request): Query<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let response = state.search.search_hotels(&request).await?;
    Ok(Json(response))
}

/// Query parameters for the hotel detail view.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelDetailsQuery {
    /// Optional check-in date, `YYYY-MM-DD`.
    pub check_in_date: Option<String>,
    /// Optional check-out date, `YYYY-MM-DD`.
    pub check_out_date: Option<String>,
    /// Optional guest count.
    pub guests: Option<i32>,
}

/// `GET /api/v1/hotels/:hotel_id` — hotel detail with per-room
/// availability.
///
/// Without dates the view reports every room at full quantity; with
/// dates each room carries its stay availability and the minimum
/// available count across the stay's nights.
pub async fn hotel_details(
    State(state): State<AppState>,
    Path(hotel_id): Path<uuid::Uuid>,
    Query(query): Query<HotelDetailsQuery>,
) -> Result<Json<HotelDetails>, AppError> {
    let check_in = parse_optional_date(query.check_in_date.as_deref(), "checkInDate")?;
    let check_out = parse_optional_date(query.check_out_date.as_deref(), "checkOutDate")?;

    let details = state
        .search
        .get_hotel_details(HotelId(hotel_id), check_in, check_out, query.guests)
        .await?;
    Ok(Json(details))
}

fn parse_optional_date(raw: Option<&str>, field: &str) -> Result<Option<NaiveDate>, AppError> {
    raw.map(|value| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request(format!("{field} must be a YYYY-MM-DD date")))
    })
    .transpose()
}
