//! Vehicle entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

/// A rentable vehicle in the fleet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Free-form class, e.g. "Supercar" or "SUV".
    pub category: String,
    pub price_per_day: Decimal,
    /// Primary image URL.
    pub image: Option<String>,
    /// Additional image URLs.
    pub gallery: Json<Vec<String>>,
    pub transmission: String,
    pub seats: i32,
    pub engine: Option<String>,
    pub horsepower: i32,
    pub zero_to_sixty: Option<String>,
    pub top_speed: Option<String>,
    /// Display label shown in the catalogue. Not consulted by the
    /// availability check, which only looks at bookings.
    pub availability: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating or replacing a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub category: String,
    pub price_per_day: Decimal,
    pub image: Option<String>,
    pub gallery: Vec<String>,
    pub transmission: String,
    pub seats: i32,
    pub engine: Option<String>,
    pub horsepower: i32,
    pub zero_to_sixty: Option<String>,
    pub top_speed: Option<String>,
    pub availability: String,
}

impl NewVehicle {
    /// Default transmission label.
    pub const DEFAULT_TRANSMISSION: &'static str = "Automatic";
    /// Default seat count.
    pub const DEFAULT_SEATS: i32 = 2;
    /// Default availability label.
    pub const DEFAULT_AVAILABILITY: &'static str = "Available";
}
