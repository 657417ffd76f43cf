//! Interval conflict detection over existing bookings.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use luxedrive_core::result::AppResult;
use luxedrive_core::types::TimeRange;
use luxedrive_entity::booking::Booking;

/// Result of an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    /// Whether the vehicle is free for the whole interval.
    pub available: bool,
    /// When unavailable, the earliest return date among the conflicting
    /// bookings.
    pub next_available_date: Option<DateTime<Utc>>,
}

impl Availability {
    /// A free vehicle.
    pub fn free() -> Self {
        Self {
            available: true,
            next_available_date: None,
        }
    }
}

/// Decide whether `vehicle_id` is free during `[start, end)` given the
/// bookings in `existing`.
///
/// Bookings for other vehicles and bookings that no longer occupy their
/// vehicle (completed, cancelled) are ignored. Fails with a validation
/// error when `start >= end`.
pub fn check_availability(
    vehicle_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    existing: &[Booking],
) -> AppResult<Availability> {
    let range = TimeRange::new(start, end)?;

    let next_available_date = existing
        .iter()
        .filter(|b| b.vehicle_id == vehicle_id)
        .filter(|b| b.blocks(range.start(), range.end()))
        .map(|b| b.return_date)
        .min();

    Ok(match next_available_date {
        Some(date) => Availability {
            available: false,
            next_available_date: Some(date),
        },
        None => Availability::free(),
    })
}
