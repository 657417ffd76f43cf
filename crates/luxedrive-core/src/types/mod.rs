//! Core type definitions used across the LuxeDrive workspace.

pub mod interval;

pub use interval::{TimeRange, parse_instant};
