//! # luxedrive-entity
//!
//! Domain entity models for the LuxeDrive rental backend. Every struct in
//! this crate represents a database table row or the data needed to create
//! one. Row types derive `sqlx::FromRow`; enums map to Postgres enum types.

pub mod booking;
pub mod notification;
pub mod user;
pub mod vehicle;
