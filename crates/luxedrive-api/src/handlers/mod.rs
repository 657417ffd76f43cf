//! Route handlers organized by domain.

pub mod auth;
pub mod booking;
pub mod health;
pub mod notification;
pub mod user;
pub mod vehicle;
