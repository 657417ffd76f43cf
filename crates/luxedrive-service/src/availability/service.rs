//! Store-backed availability queries for the public vehicle endpoints.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use luxedrive_core::result::AppResult;
use luxedrive_core::types::TimeRange;
use luxedrive_database::stores::BookingStore;
use luxedrive_entity::booking::BookingStatus;

use super::checker::{Availability, check_availability};

/// One occupied interval of a vehicle, for calendar display.
#[derive(Debug, Clone, Serialize)]
pub struct BookedRange {
    pub id: Uuid,
    pub pickup_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub status: BookingStatus,
    /// Driver name on the booking.
    pub user_name: String,
}

/// Answers "is this vehicle free" and "when is it taken".
#[derive(Clone)]
pub struct AvailabilityService {
    bookings: Arc<dyn BookingStore>,
}

impl AvailabilityService {
    /// Creates a new availability service.
    pub fn new(bookings: Arc<dyn BookingStore>) -> Self {
        Self { bookings }
    }

    /// Check one vehicle for `[start, end)`.
    pub async fn check(
        &self,
        vehicle_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Availability> {
        let range = TimeRange::new(start, end)?;
        let candidates = self
            .bookings
            .find_occupying(vehicle_id, range.start(), range.end())
            .await?;
        let result = check_availability(vehicle_id, range.start(), range.end(), &candidates)?;
        debug!(
            vehicle_id = %vehicle_id,
            available = result.available,
            "Availability checked"
        );
        Ok(result)
    }

    /// Occupied intervals of a vehicle, ordered by pickup date.
    pub async fn booked_ranges(&self, vehicle_id: Uuid) -> AppResult<Vec<BookedRange>> {
        let rows = self.bookings.list_occupying_for_vehicle(vehicle_id).await?;
        Ok(rows
            .into_iter()
            .map(|b| BookedRange {
                id: b.id,
                pickup_date: b.pickup_date,
                return_date: b.return_date,
                status: b.status,
                user_name: b.driver_name,
            })
            .collect())
    }
}
