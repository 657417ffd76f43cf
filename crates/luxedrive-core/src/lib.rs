//! # luxedrive-core
//!
//! Core crate for the LuxeDrive rental backend. Contains configuration
//! schemas, the unified error system, the half-open time-interval
//! type, and the delivery and transport traits implemented by the worker.
//!
//! This crate has **no** internal dependencies on other LuxeDrive crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
