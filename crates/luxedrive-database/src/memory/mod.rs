//! In-memory store implementations using Tokio locks.
//!
//! Suitable for single-process deployments and tests. Each store keeps its
//! rows in insertion order behind one lock.

pub mod booking;
pub mod notification;
pub mod user;
pub mod vehicle;

pub use booking::MemoryBookingStore;
pub use notification::MemoryNotificationStore;
pub use user::MemoryUserStore;
pub use vehicle::MemoryVehicleStore;
