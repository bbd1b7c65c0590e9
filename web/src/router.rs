//! Route composition.

use crate::handlers::{availability, health, search};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the full application router.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/search", get(search::search_hotels))
        .route("/hotels/:hotel_id", get(search::hotel_details))
        .route(
            "/hotels/:hotel_id/rooms/available",
            get(availability::available_rooms),
        )
        .route(
            "/rooms/:room_id/availability",
            get(availability::check_room).put(availability::set_availability),
        )
        .route(
            "/rooms/:room_id/availability/initialize",
            post(availability::initialize),
        )
        .route(
            "/rooms/:room_id/availability/block",
            post(availability::block_dates),
        )
        .route(
            "/rooms/:room_id/availability/unblock",
            post(availability::unblock_dates),
        )
        .route(
            "/rooms/:room_id/availability/calendar",
            get(availability::calendar),
        );

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
