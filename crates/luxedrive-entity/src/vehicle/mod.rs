//! Fleet entities.

pub mod model;

pub use model::{NewVehicle, Vehicle};
