//! Booking creation, listing, and updates.

pub mod reference;
pub mod service;

pub use reference::{assign_reference, generate_reference, is_valid_reference};
pub use service::{BookingRequest, BookingService, UNAVAILABLE_MESSAGE, UNAVAILABLE_SHORT_MESSAGE};
