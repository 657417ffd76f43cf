//! Request DTOs with validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use luxedrive_core::error::AppError;
use luxedrive_core::result::AppResult;
use luxedrive_core::types::parse_instant;
use luxedrive_entity::booking::{BookingChanges, BookingStatus, PaymentStatus};
use luxedrive_entity::vehicle::NewVehicle;
use luxedrive_service::{BookingRequest, RegisterRequest};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterBody {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl From<RegisterBody> for RegisterRequest {
    fn from(body: RegisterBody) -> Self {
        Self {
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub email: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub refresh: String,
}

/// Vehicle create/replace body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VehicleBody {
    #[validate(length(min = 1, max = 100))]
    pub make: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    pub price_per_day: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default = "default_transmission")]
    pub transmission: String,
    #[serde(default = "default_seats")]
    #[validate(range(min = 1, max = 20))]
    pub seats: i32,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub horsepower: i32,
    #[serde(default)]
    pub zero_to_sixty: Option<String>,
    #[serde(default)]
    pub top_speed: Option<String>,
    #[serde(default = "default_availability")]
    pub availability: String,
}

impl VehicleBody {
    /// Convert into the entity payload. Prices must not be negative.
    pub fn into_new_vehicle(self) -> AppResult<NewVehicle> {
        if self.price_per_day.is_sign_negative() {
            return Err(AppError::validation("price_per_day must not be negative"));
        }
        Ok(NewVehicle {
            make: self.make,
            model: self.model,
            year: self.year,
            category: self.category,
            price_per_day: self.price_per_day,
            image: self.image.filter(|url| !url.is_empty()),
            gallery: self.gallery,
            transmission: self.transmission,
            seats: self.seats,
            engine: self.engine,
            horsepower: self.horsepower,
            zero_to_sixty: self.zero_to_sixty,
            top_speed: self.top_speed,
            availability: self.availability,
        })
    }
}

fn default_transmission() -> String {
    NewVehicle::DEFAULT_TRANSMISSION.to_string()
}

fn default_seats() -> i32 {
    NewVehicle::DEFAULT_SEATS
}

fn default_availability() -> String {
    NewVehicle::DEFAULT_AVAILABILITY.to_string()
}

/// Booking creation body. Dates arrive as strings and accept RFC 3339
/// or naive `YYYY-MM-DD HH:MM[:SS]` in UTC.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookingCreateBody {
    pub vehicle_id: Uuid,
    #[validate(length(min = 1, message = "This field is required."))]
    pub pickup_date: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub return_date: String,
    #[validate(length(min = 1, max = 255))]
    pub pickup_location: String,
    #[validate(length(min = 1, max = 255))]
    pub return_location: String,
    #[validate(length(min = 1, max = 255))]
    pub driver_name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub driver_email: String,
    #[validate(length(min = 1, max = 20))]
    pub driver_phone: String,
    #[validate(length(min = 1, max = 50))]
    pub license_number: String,
    #[serde(default = "empty_array")]
    pub enhancements: serde_json::Value,
    pub base_price: Decimal,
    #[serde(default)]
    pub enhancements_price: Decimal,
    pub total_price: Decimal,
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl BookingCreateBody {
    /// Parse the dates and hand the rest to the booking service.
    pub fn into_request(self) -> AppResult<BookingRequest> {
        if !self.enhancements.is_array() {
            return Err(AppError::validation("enhancements must be a list"));
        }
        if [self.base_price, self.enhancements_price, self.total_price]
            .iter()
            .any(|p| p.is_sign_negative())
        {
            return Err(AppError::validation("Prices must not be negative"));
        }

        Ok(BookingRequest {
            vehicle_id: self.vehicle_id,
            pickup_date: parse_instant(&self.pickup_date)?,
            return_date: parse_instant(&self.return_date)?,
            pickup_location: self.pickup_location,
            return_location: self.return_location,
            driver_name: self.driver_name,
            driver_email: self.driver_email,
            driver_phone: self.driver_phone,
            license_number: self.license_number,
            enhancements: self.enhancements,
            base_price: self.base_price,
            enhancements_price: self.enhancements_price,
            total_price: self.total_price,
            payment_method: self.payment_method,
        })
    }
}

fn empty_array() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

/// Partial booking update. Staff-only fields are dropped by the service
/// for customers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookingPatchBody {
    pub pickup_location: Option<String>,
    pub return_location: Option<String>,
    pub driver_name: Option<String>,
    #[validate(email(message = "Enter a valid email address."))]
    pub driver_email: Option<String>,
    pub driver_phone: Option<String>,
    pub license_number: Option<String>,
    pub enhancements: Option<serde_json::Value>,
    pub payment_method: Option<String>,
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl From<BookingPatchBody> for BookingChanges {
    fn from(body: BookingPatchBody) -> Self {
        Self {
            pickup_location: body.pickup_location,
            return_location: body.return_location,
            driver_name: body.driver_name,
            driver_email: body.driver_email,
            driver_phone: body.driver_phone,
            license_number: body.license_number,
            enhancements: body.enhancements,
            payment_method: body.payment_method,
            status: body.status,
            payment_status: body.payment_status,
        }
    }
}

/// Availability query string.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub pickup_date: Option<String>,
    pub return_date: Option<String>,
}

/// Mark-read request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MarkReadRequest {
    #[serde(default)]
    pub notification_ids: Vec<Uuid>,
    #[serde(default)]
    pub mark_all: bool,
}
