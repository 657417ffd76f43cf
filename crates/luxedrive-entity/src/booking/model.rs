//! Booking entity model.

use chrono::{DateTime, Utc};
use luxedrive_core::types::interval::overlaps;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{BookingStatus, PaymentStatus};

/// Default payment method label.
pub const DEFAULT_PAYMENT_METHOD: &str = "Manual at Pickup";

/// A reservation of one vehicle for the half-open interval
/// `[pickup_date, return_date)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    /// The customer who made the booking.
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub pickup_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub pickup_location: String,
    pub return_location: String,
    pub driver_name: String,
    pub driver_email: String,
    pub driver_phone: String,
    pub license_number: String,
    /// Selected extras as a JSON array.
    pub enhancements: serde_json::Value,
    pub base_price: Decimal,
    pub enhancements_price: Decimal,
    pub total_price: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    pub status: BookingStatus,
    /// Human-facing reference `LX-XXXXXX`, immutable once assigned.
    pub booking_reference: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Whether this booking holds its vehicle during any part of
    /// `[start, end)`.
    pub fn blocks(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.status.is_occupying() && overlaps(self.pickup_date, self.return_date, start, end)
    }
}

/// Data required to persist a new booking. The reference is filled in by
/// the booking service before the row is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub user_id: Uuid,
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
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    pub status: BookingStatus,
    pub booking_reference: Option<String>,
}

/// A partial update. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingChanges {
    pub pickup_location: Option<String>,
    pub return_location: Option<String>,
    pub driver_name: Option<String>,
    pub driver_email: Option<String>,
    pub driver_phone: Option<String>,
    pub license_number: Option<String>,
    pub enhancements: Option<serde_json::Value>,
    pub payment_method: Option<String>,
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl BookingChanges {
    /// Drop the staff-only fields.
    pub fn without_staff_fields(mut self) -> Self {
        self.status = None;
        self.payment_status = None;
        self
    }

    /// Whether applying these changes to a booking in `current` status
    /// makes it occupy its vehicle again.
    pub fn reoccupies(&self, current: BookingStatus) -> bool {
        !current.is_occupying() && self.status.is_some_and(|s| s.is_occupying())
    }

    /// Apply the changes to an in-memory booking.
    pub fn apply_to(&self, booking: &mut Booking) {
        if let Some(v) = &self.pickup_location {
            booking.pickup_location = v.clone();
        }
        if let Some(v) = &self.return_location {
            booking.return_location = v.clone();
        }
        if let Some(v) = &self.driver_name {
            booking.driver_name = v.clone();
        }
        if let Some(v) = &self.driver_email {
            booking.driver_email = v.clone();
        }
        if let Some(v) = &self.driver_phone {
            booking.driver_phone = v.clone();
        }
        if let Some(v) = &self.license_number {
            booking.license_number = v.clone();
        }
        if let Some(v) = &self.enhancements {
            booking.enhancements = v.clone();
        }
        if let Some(v) = &self.payment_method {
            booking.payment_method = v.clone();
        }
        if let Some(v) = self.status {
            booking.status = v;
        }
        if let Some(v) = self.payment_status {
            booking.payment_status = v;
        }
    }
}
