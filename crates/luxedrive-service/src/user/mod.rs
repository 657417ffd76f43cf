//! Profile and staff-facing customer management.

pub mod service;

pub use service::{CustomerDetail, UserService};
