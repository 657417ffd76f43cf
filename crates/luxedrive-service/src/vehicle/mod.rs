//! Fleet management.

pub mod service;

pub use service::VehicleService;
