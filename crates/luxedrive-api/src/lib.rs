//! # luxedrive-api
//!
//! HTTP API layer for LuxeDrive built on Axum.
//!
//! Provides the REST endpoints for accounts, the fleet, bookings and
//! notifications, plus middleware (CORS, compression, logging), extractors,
//! DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::{AppState, Stores};
