//! Response DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use luxedrive_auth::TokenPair;
use luxedrive_entity::booking::Booking;
use luxedrive_entity::notification::Notification;
use luxedrive_entity::user::{MembershipTier, User};
use luxedrive_service::availability::BookedRange;
use luxedrive_service::{Availability, CustomerDetail, NotificationList};

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access: pair.access,
            refresh: pair.refresh,
        }
    }
}

/// Public profile of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub license_number: String,
    pub membership_tier: MembershipTier,
    pub points: i32,
    pub date_joined: DateTime<Utc>,
    pub is_staff: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            license_number: user.license_number,
            membership_tier: user.membership_tier,
            points: user.points,
            date_joined: user.date_joined,
            is_staff: user.is_staff,
        }
    }
}

/// A customer with their booking history, for staff.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDetailResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub bookings: Vec<Booking>,
    pub total_bookings: usize,
    pub total_spent: Decimal,
}

impl From<CustomerDetail> for CustomerDetailResponse {
    fn from(detail: CustomerDetail) -> Self {
        Self {
            user: detail.user.into(),
            bookings: detail.bookings,
            total_bookings: detail.total_bookings,
            total_spent: detail.total_spent,
        }
    }
}

/// Availability check result. The message and next date are only present
/// when the vehicle is taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_available_date: Option<DateTime<Utc>>,
}

impl AvailabilityResponse {
    /// Build the response, attaching `message` when unavailable.
    pub fn from_availability(result: Availability, message: &str) -> Self {
        if result.available {
            Self {
                available: true,
                message: None,
                next_available_date: None,
            }
        } else {
            Self {
                available: false,
                message: Some(message.to_string()),
                next_available_date: result.next_available_date,
            }
        }
    }
}

/// Occupied intervals of one vehicle.
#[derive(Debug, Clone, Serialize)]
pub struct BookedDatesResponse {
    pub vehicle_id: Uuid,
    pub bookings: Vec<BookedRange>,
}

/// A notification with its relative age.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    #[serde(flatten)]
    pub notification: Notification,
    pub time_ago: String,
}

impl NotificationResponse {
    /// Render against `now`.
    pub fn at(notification: Notification, now: DateTime<Utc>) -> Self {
        let time_ago = notification.time_ago_at(now);
        Self {
            notification,
            time_ago,
        }
    }
}

/// Notification listing with counters.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
    pub unread_count: i64,
    pub total_count: i64,
}

impl From<NotificationList> for NotificationListResponse {
    fn from(list: NotificationList) -> Self {
        let now = Utc::now();
        Self {
            notifications: list
                .notifications
                .into_iter()
                .map(|n| NotificationResponse::at(n, now))
                .collect(),
            unread_count: list.unread_count,
            total_count: list.total_count,
        }
    }
}

/// Unread counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}
