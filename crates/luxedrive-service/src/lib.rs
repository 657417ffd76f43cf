//! # luxedrive-service
//!
//! Business logic service layer for LuxeDrive. Each service orchestrates
//! the store traits from `luxedrive-database` and the auth primitives to
//! implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod availability;
pub mod booking;
pub mod context;
pub mod notification;
pub mod user;
pub mod vehicle;

pub use auth::{AuthService, RegisterRequest};
pub use availability::{Availability, AvailabilityService};
pub use booking::{BookingRequest, BookingService};
pub use context::RequestContext;
pub use notification::{DispatchOutcome, NotificationDispatcher, NotificationList, NotificationService};
pub use user::{CustomerDetail, UserService};
pub use vehicle::VehicleService;
