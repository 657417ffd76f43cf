//! Booking (reservation) entities.

pub mod model;
pub mod status;

pub use model::{Booking, BookingChanges, NewBooking};
pub use status::{BookingStatus, PaymentStatus};
