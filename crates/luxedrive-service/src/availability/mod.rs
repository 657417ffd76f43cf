//! Vehicle availability: the pure overlap check and the store-backed
//! queries built on it.

pub mod checker;
pub mod service;

pub use checker::{Availability, check_availability};
pub use service::{AvailabilityService, BookedRange};
