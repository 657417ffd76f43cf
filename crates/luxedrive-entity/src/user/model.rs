//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::tier::MembershipTier;

/// A registered account. Customers and staff share this table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email, unique across accounts.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    /// Loyalty tier.
    pub membership_tier: MembershipTier,
    /// Loyalty points balance.
    pub points: i32,
    pub phone_number: String,
    /// Driving licence number on file.
    pub license_number: String,
    /// Staff accounts manage the fleet and see every booking.
    pub is_staff: bool,
    /// Superusers are the fallback recipients of booking notifications.
    pub is_superuser: bool,
    /// Inactive accounts cannot log in or receive notifications.
    pub is_active: bool,
    /// When the account was created.
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// First and last name joined, or the email when both are blank.
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}
