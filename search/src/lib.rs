//! # Stayhub Search
//!
//! City search and hotel detail assembly over the availability engine.
//!
//! The pipeline behind a search request:
//!
//! ```text
//! SearchRequest ─▶ validate + normalize city
//!               ─▶ approved hotels in city   (1 directory query, limit × 2)
//!               ─▶ rooms for all candidates  (1 catalog query)
//!               ─▶ batched availability      (2 queries, any N rooms)
//!               ─▶ regroup by hotel, truncate to limit
//! ```
//!
//! Four storage round trips per search, independent of how many hotels
//! and rooms the city holds.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod criteria;
pub mod error;
pub mod service;

// Re-export main types for convenience
pub use criteria::{normalize_city, SearchCriteria, SearchRequest};
pub use error::{Result, SearchError};
pub use service::{
    HotelDetails, HotelSummary, Pagination, RoomDetails, SearchResponse, SearchService,
};
