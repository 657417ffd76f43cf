//! # luxedrive-database
//!
//! Store traits for every LuxeDrive entity, their PostgreSQL repository
//! implementations, and in-memory implementations for single-process use
//! and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod stores;

pub use connection::DatabasePool;
pub use stores::{
    BookingInsert, BookingStore, BookingUpdate, NotificationStore, UserStore, VehicleStore,
};
