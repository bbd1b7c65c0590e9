//! Search criteria validation and city normalization.
//!
//! Criteria arrive as raw strings (this is the HTTP boundary's shape)
//! and leave as typed [`SearchCriteria`] or a `Validation` error with a
//! reason the caller can show verbatim.

use crate::error::{Result, SearchError};
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Maximum stay length, in nights.
pub const MAX_STAY_NIGHTS: i64 = 30;

/// How far in the future stays may be searched, in days.
pub const MAX_BOOKING_WINDOW_DAYS: i64 = 365;

/// Default results per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Hard cap on results per page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw search input, exactly as received from the HTTP layer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// City to search in.
    pub city: Option<String>,
    /// Check-in date, `YYYY-MM-DD`.
    pub check_in_date: Option<String>,
    /// Check-out date, `YYYY-MM-DD`.
    pub check_out_date: Option<String>,
    /// Number of guests; defaults to 1.
    pub guests: Option<i32>,
    /// Optional hotel-type filter (e.g. "HOTEL", "HOSTEL").
    pub hotel_type: Option<String>,
    /// 1-based page number; defaults to 1.
    pub page: Option<u32>,
    /// Page size; defaults to [`DEFAULT_PAGE_SIZE`].
    pub limit: Option<u32>,
}

/// Validated, normalized search criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Normalized city string (see [`normalize_city`]).
    pub city: String,
    /// First night of the stay.
    pub check_in: NaiveDate,
    /// Checkout date; the night range is `[check_in, check_out)`.
    pub check_out: NaiveDate,
    /// Number of guests.
    pub guests: i32,
    /// Optional hotel-type filter.
    pub hotel_type: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl SearchRequest {
    /// Validate the raw request into typed criteria.
    ///
    /// Enforces, in order: city present; both dates present and
    /// parseable; checkout strictly after check-in; check-in not in the
    /// past (date-only comparison); stay at most
    /// [`MAX_STAY_NIGHTS`] nights; both dates within
    /// [`MAX_BOOKING_WINDOW_DAYS`] of today; guests at least 1.
    ///
    /// # Errors
    ///
    /// Returns `Validation` with a human-readable reason for the first
    /// violated rule.
    pub fn validate(&self) -> Result<SearchCriteria> {
        let city = self
            .city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .ok_or_else(|| SearchError::validation("city is required"))?;

        let check_in = parse_date(self.check_in_date.as_deref(), "checkInDate")?;
        let check_out = parse_date(self.check_out_date.as_deref(), "checkOutDate")?;

        if check_out <= check_in {
            return Err(SearchError::validation(
                "checkOutDate must be after checkInDate",
            ));
        }

        let today = Utc::now().date_naive();
        if check_in < today {
            return Err(SearchError::validation("checkInDate cannot be in the past"));
        }

        let nights = (check_out - check_in).num_days();
        if nights > MAX_STAY_NIGHTS {
            return Err(SearchError::validation(format!(
                "stay cannot exceed {MAX_STAY_NIGHTS} nights"
            )));
        }

        let horizon = today + Duration::days(MAX_BOOKING_WINDOW_DAYS);
        if check_in > horizon || check_out > horizon {
            return Err(SearchError::validation(format!(
                "dates must be within {MAX_BOOKING_WINDOW_DAYS} days from today"
            )));
        }

        let guests = self.guests.unwrap_or(1);
        if guests < 1 {
            return Err(SearchError::validation("guests must be at least 1"));
        }

        Ok(SearchCriteria {
            city: normalize_city(city),
            check_in,
            check_out,
            guests,
            hotel_type: self.hotel_type.clone(),
            page: self.page.unwrap_or(1).max(1),
            limit: self
                .limit
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        })
    }
}

fn parse_date(raw: Option<&str>, field: &str) -> Result<NaiveDate> {
    let raw = raw
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| SearchError::validation(format!("{field} is required")))?;

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| SearchError::validation(format!("{field} must be a valid YYYY-MM-DD date")))
}

/// Decorative prefixes dropped before matching.
const CITY_PREFIXES: &[&str] = &["new ", "old ", "greater ", "metro "];

/// Decorative suffixes dropped before matching.
const CITY_SUFFIXES: &[&str] = &[" city", " town", " district"];

/// Known alternate spellings mapped to the directory's canonical name.
const CITY_ALIASES: &[(&str, &str)] = &[
    ("bombay", "mumbai"),
    ("calcutta", "kolkata"),
    ("madras", "chennai"),
    ("bengaluru", "bangalore"),
    ("gurgaon", "gurugram"),
    ("cochin", "kochi"),
    ("benares", "varanasi"),
    ("trivandrum", "thiruvananthapuram"),
    ("pondicherry", "puducherry"),
];

/// Normalize a user-entered city string for directory matching.
///
/// Trims, lowercases, strips one decorative prefix and one suffix, then
/// maps known aliases to the canonical name ("New Delhi" → "delhi",
/// "Bombay" → "mumbai").
#[must_use]
pub fn normalize_city(raw: &str) -> String {
    let mut city = raw.trim().to_lowercase();

    for prefix in CITY_PREFIXES {
        if let Some(stripped) = city.strip_prefix(prefix) {
            city = stripped.trim().to_string();
            break;
        }
    }
    for suffix in CITY_SUFFIXES {
        if let Some(stripped) = city.strip_suffix(suffix) {
            city = stripped.trim().to_string();
            break;
        }
    }

    for &(alias, canonical) in CITY_ALIASES {
        if city == alias {
            return canonical.to_string();
        }
    }
    city
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(city: &str, check_in: &str, check_out: &str) -> SearchRequest {
        SearchRequest {
            city: Some(city.to_string()),
            check_in_date: Some(check_in.to_string()),
            check_out_date: Some(check_out.to_string()),
            ..SearchRequest::default()
        }
    }

    fn future(offset: i64) -> String {
        (Utc::now().date_naive() + Duration::days(offset))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[test]
    fn test_normalize_city_table() {
        assert_eq!(normalize_city("  Mumbai  "), "mumbai");
        assert_eq!(normalize_city("Bombay"), "mumbai");
        assert_eq!(normalize_city("New Delhi"), "delhi");
        assert_eq!(normalize_city("Greater Noida"), "noida");
        assert_eq!(normalize_city("Panaji City"), "panaji");
        assert_eq!(normalize_city("Metro Manila"), "manila");
        assert_eq!(normalize_city("Bengaluru"), "bangalore");
        assert_eq!(normalize_city("Alleppey Town"), "alleppey");
    }

    #[test]
    fn test_validate_happy_path() {
        let criteria = request("Bombay", &future(1), &future(3)).validate().unwrap();
        assert_eq!(criteria.city, "mumbai");
        assert_eq!(criteria.guests, 1);
        assert_eq!(criteria.page, 1);
        assert_eq!(criteria.limit, DEFAULT_PAGE_SIZE);
        assert_eq!((criteria.check_out - criteria.check_in).num_days(), 2);
    }

    #[test]
    fn test_validate_missing_fields() {
        let missing_city = SearchRequest {
            check_in_date: Some(future(1)),
            check_out_date: Some(future(2)),
            ..SearchRequest::default()
        };
        let err = missing_city.validate().unwrap_err();
        assert_eq!(err, SearchError::validation("city is required"));

        let missing_date = SearchRequest {
            city: Some("mumbai".to_string()),
            check_in_date: Some(future(1)),
            ..SearchRequest::default()
        };
        let err = missing_date.validate().unwrap_err();
        assert_eq!(err, SearchError::validation("checkOutDate is required"));
    }

    #[test]
    fn test_validate_malformed_date() {
        let err = request("mumbai", "2026/09/01", &future(3))
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::validation("checkInDate must be a valid YYYY-MM-DD date")
        );
    }

    #[test]
    fn test_validate_checkout_not_after_checkin() {
        // Equal dates are a zero-night stay, rejected.
        let err = request("mumbai", &future(2), &future(2))
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::validation("checkOutDate must be after checkInDate")
        );

        let err = request("mumbai", &future(3), &future(2))
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::validation("checkOutDate must be after checkInDate")
        );
    }

    #[test]
    fn test_validate_past_checkin() {
        let err = request("mumbai", &future(-1), &future(2))
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::validation("checkInDate cannot be in the past")
        );
    }

    #[test]
    fn test_validate_stay_length_cap() {
        // 30 nights is allowed, 31 is not.
        assert!(request("mumbai", &future(1), &future(31)).validate().is_ok());
        let err = request("mumbai", &future(1), &future(32))
            .validate()
            .unwrap_err();
        assert!(matches!(err, SearchError::Validation { .. }));
    }

    #[test]
    fn test_validate_booking_window_cap() {
        let err = request("mumbai", &future(360), &future(370))
            .validate()
            .unwrap_err();
        assert!(matches!(err, SearchError::Validation { .. }));
    }

    #[test]
    fn test_validate_guests_and_paging_bounds() {
        let mut req = request("mumbai", &future(1), &future(3));
        req.guests = Some(0);
        assert!(req.validate().is_err());

        req.guests = Some(2);
        req.page = Some(0);
        req.limit = Some(10_000);
        let criteria = req.validate().unwrap();
        assert_eq!(criteria.page, 1);
        assert_eq!(criteria.limit, MAX_PAGE_SIZE);
    }
}
