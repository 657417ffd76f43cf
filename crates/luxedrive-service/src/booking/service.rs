//! Booking use cases: guarded creation, visibility-scoped reads, and
//! partial updates.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use luxedrive_core::config::booking::BookingConfig;
use luxedrive_core::error::AppError;
use luxedrive_core::result::AppResult;
use luxedrive_core::types::TimeRange;
use luxedrive_database::stores::{BookingInsert, BookingStore, BookingUpdate, VehicleStore};
use luxedrive_entity::booking::model::DEFAULT_PAYMENT_METHOD;
use luxedrive_entity::booking::{
    Booking, BookingChanges, BookingStatus, NewBooking, PaymentStatus,
};

use super::reference::assign_reference;
use crate::availability::check_availability;
use crate::context::RequestContext;
use crate::notification::NotificationDispatcher;

/// Error text returned when the requested interval is taken.
pub const UNAVAILABLE_MESSAGE: &str = "This vehicle is not available for the selected dates. \
     Please choose different dates or a different vehicle.";

/// Short form used alongside the next available date.
pub const UNAVAILABLE_SHORT_MESSAGE: &str = "This vehicle is not available for the selected dates.";

/// Customer-supplied booking data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub vehicle_id: Uuid,
    pub pickup_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub pickup_location: String,
    pub return_location: String,
    pub driver_name: String,
    pub driver_email: String,
    pub driver_phone: String,
    pub license_number: String,
    pub enhancements: serde_json::Value,
    pub base_price: Decimal,
    pub enhancements_price: Decimal,
    pub total_price: Decimal,
    pub payment_method: Option<String>,
}

/// Orchestrates bookings and fires the new-booking notification.
#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingStore>,
    vehicles: Arc<dyn VehicleStore>,
    dispatcher: Arc<NotificationDispatcher>,
    reference_max_attempts: u32,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        bookings: Arc<dyn BookingStore>,
        vehicles: Arc<dyn VehicleStore>,
        dispatcher: Arc<NotificationDispatcher>,
        config: &BookingConfig,
    ) -> Self {
        Self {
            bookings,
            vehicles,
            dispatcher,
            reference_max_attempts: config.reference_max_attempts.max(1),
        }
    }

    /// Create a booking for the caller.
    ///
    /// The overlap check and the insert are atomic per vehicle. On success
    /// the new-booking notification is dispatched exactly once; its outcome
    /// never affects the returned booking.
    pub async fn create_booking(
        &self,
        ctx: &RequestContext,
        req: BookingRequest,
    ) -> AppResult<Booking> {
        let range = TimeRange::new(req.pickup_date, req.return_date)?;

        if self.vehicles.find_by_id(req.vehicle_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "Vehicle {} does not exist",
                req.vehicle_id
            )));
        }

        let mut new = NewBooking {
            user_id: ctx.user_id,
            vehicle_id: req.vehicle_id,
            pickup_date: range.start(),
            return_date: range.end(),
            pickup_location: req.pickup_location,
            return_location: req.return_location,
            driver_name: req.driver_name,
            driver_email: req.driver_email,
            driver_phone: req.driver_phone,
            license_number: req.license_number,
            enhancements: req.enhancements,
            base_price: req.base_price,
            enhancements_price: req.enhancements_price,
            total_price: req.total_price,
            payment_status: PaymentStatus::Pending,
            payment_method: req
                .payment_method
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            status: BookingStatus::Pending,
            booking_reference: None,
        };

        let booking = self.insert_with_fresh_reference(&mut new).await?;

        info!(
            booking_id = %booking.id,
            reference = %booking.booking_reference,
            vehicle_id = %booking.vehicle_id,
            user_id = %ctx.user_id,
            "Booking created"
        );

        self.dispatcher.dispatch(&booking).await;

        Ok(booking)
    }

    async fn insert_with_fresh_reference(&self, new: &mut NewBooking) -> AppResult<Booking> {
        for attempt in 1..=self.reference_max_attempts {
            assign_reference(&mut new.booking_reference);

            match self.bookings.insert_if_available(new).await? {
                BookingInsert::Created(booking) => return Ok(booking),
                BookingInsert::Conflicts(conflicts) => {
                    return Err(unavailable(
                        new.vehicle_id,
                        new.pickup_date,
                        new.return_date,
                        &conflicts,
                    ));
                }
                BookingInsert::DuplicateReference => {
                    warn!(
                        attempt,
                        reference = ?new.booking_reference,
                        "Booking reference collision, regenerating"
                    );
                    new.booking_reference = None;
                }
            }
        }

        Err(AppError::reference_exhausted(format!(
            "Could not allocate a unique booking reference after {} attempts",
            self.reference_max_attempts
        )))
    }

    /// Bookings visible to the caller, newest first.
    pub async fn list_bookings(&self, ctx: &RequestContext) -> AppResult<Vec<Booking>> {
        self.bookings.list(ctx.owner_filter()).await
    }

    /// A single booking, if visible to the caller.
    pub async fn get_booking(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .filter(|b| ctx.is_staff || b.user_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found("Booking not found"))
    }

    /// Apply a partial update. Customers cannot change `status` or
    /// `payment_status`; those fields are dropped from their requests.
    /// Updates never fire the new-booking notification.
    pub async fn update_booking(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        changes: BookingChanges,
    ) -> AppResult<Booking> {
        let existing = self.get_booking(ctx, id).await?;

        let changes = if ctx.is_staff {
            changes
        } else {
            changes.without_staff_fields()
        };

        let updated = match self.bookings.update_if_available(existing.id, &changes).await? {
            BookingUpdate::Updated(booking) => booking,
            BookingUpdate::Conflicts(conflicts) => {
                warn!(
                    booking_id = %existing.id,
                    vehicle_id = %existing.vehicle_id,
                    "Reactivation rejected, vehicle is taken"
                );
                return Err(unavailable(
                    existing.vehicle_id,
                    existing.pickup_date,
                    existing.return_date,
                    &conflicts,
                ));
            }
            BookingUpdate::NotFound => return Err(AppError::not_found("Booking not found")),
        };

        if updated.status != existing.status {
            info!(
                booking_id = %updated.id,
                from = %existing.status,
                to = %updated.status,
                "Booking status changed"
            );
        }

        Ok(updated)
    }
}

/// The 400 returned when `[start, end)` collides with occupying bookings,
/// carrying the earliest date the vehicle frees up.
fn unavailable(
    vehicle_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    conflicts: &[Booking],
) -> AppError {
    let verdict = match check_availability(vehicle_id, start, end, conflicts) {
        Ok(verdict) => verdict,
        Err(err) => return err,
    };
    AppError::unavailable(UNAVAILABLE_MESSAGE).with_details(serde_json::json!({
        "message": UNAVAILABLE_SHORT_MESSAGE,
        "next_available_date": verdict.next_available_date,
    }))
}
