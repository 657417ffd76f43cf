//! Booking and payment status enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a booking.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "booking_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Created, awaiting staff confirmation.
    #[default]
    Pending,
    /// Confirmed by staff.
    Confirmed,
    /// Vehicle is currently out with the customer.
    Active,
    /// Vehicle returned.
    Completed,
    /// Cancelled; the vehicle is free again.
    Cancelled,
}

impl BookingStatus {
    /// All states that hold the vehicle for the booked interval.
    pub const OCCUPYING: [BookingStatus; 3] = [Self::Pending, Self::Confirmed, Self::Active];

    /// Whether a booking in this state blocks other bookings of the same
    /// vehicle.
    pub fn is_occupying(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::Active)
    }

    /// Return the status as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment state of a booking. Payment is collected manually at pickup.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "payment_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    /// Return the status as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Refunded => "REFUNDED",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_live_states_occupy() {
        assert!(BookingStatus::Pending.is_occupying());
        assert!(BookingStatus::Confirmed.is_occupying());
        assert!(BookingStatus::Active.is_occupying());
        assert!(!BookingStatus::Completed.is_occupying());
        assert!(!BookingStatus::Cancelled.is_occupying());
        assert!(BookingStatus::OCCUPYING.iter().all(|s| s.is_occupying()));
    }

    #[test]
    fn test_serde_uses_uppercase_names() {
        let json = serde_json::to_string(&BookingStatus::Cancelled).unwrap();
        assert_eq!(json, "\"CANCELLED\"");
        let parsed: PaymentStatus = serde_json::from_str("\"PAID\"").unwrap();
        assert_eq!(parsed, PaymentStatus::Paid);
    }
}
