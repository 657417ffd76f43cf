//! PostgreSQL implementations of the store traits.

pub mod booking;
pub mod notification;
pub mod user;
pub mod vehicle;

pub use booking::BookingRepository;
pub use notification::NotificationRepository;
pub use user::UserRepository;
pub use vehicle::VehicleRepository;
