//! Background delivery for LuxeDrive.
//!
//! This crate provides:
//! - A bounded delivery pool that accepts rendered messages without
//!   blocking the caller
//! - A runner that performs deliveries with limited concurrency, retries
//!   transient failures, and drains on shutdown
//! - An executor that routes each delivery to its channel handler
//! - HTTP transports for the mail and messaging providers

pub mod executor;
pub mod handlers;
pub mod queue;
pub mod runner;
pub mod transport;

pub use executor::{DeliveryError, DeliveryExecutor, DeliveryHandler};
pub use queue::DeliveryPool;
pub use runner::DeliveryRunner;
