//! User profile and customer directory operations.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use luxedrive_core::error::AppError;
use luxedrive_core::result::AppResult;
use luxedrive_database::stores::{BookingStore, UserStore};
use luxedrive_entity::booking::Booking;
use luxedrive_entity::user::User;

use crate::context::RequestContext;

/// A customer with their booking history.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDetail {
    pub user: User,
    /// Newest first.
    pub bookings: Vec<Booking>,
    pub total_bookings: usize,
    /// Sum of `total_price` over every booking regardless of status.
    pub total_spent: Decimal,
}

/// Handles profile and customer directory lookups.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    bookings: Arc<dyn BookingStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { users, bookings }
    }

    /// Gets the current user's profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Non-staff accounts (staff only).
    pub async fn list_customers(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        ctx.require_staff()?;
        self.users.list_customers().await
    }

    /// One customer with bookings and spend (staff only). Staff accounts
    /// are not customers and yield `NotFound`.
    pub async fn customer_detail(&self, ctx: &RequestContext, id: Uuid) -> AppResult<CustomerDetail> {
        ctx.require_staff()?;

        let user = self
            .users
            .find_by_id(id)
            .await?
            .filter(|u| !u.is_staff)
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let bookings = self.bookings.list(Some(user.id)).await?;
        let total_spent = bookings.iter().map(|b| b.total_price).sum();

        Ok(CustomerDetail {
            total_bookings: bookings.len(),
            total_spent,
            user,
            bookings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use luxedrive_core::error::ErrorKind;
    use luxedrive_database::memory::{MemoryBookingStore, MemoryUserStore};
    use luxedrive_entity::booking::{BookingStatus, PaymentStatus};
    use luxedrive_entity::user::NewUser;

    fn account(email: &str, is_staff: bool) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "x".to_string(),
            first_name: "Test".to_string(),
            last_name: String::new(),
            is_staff,
            is_superuser: false,
        }
    }

    fn booking(user_id: Uuid, day: u32, total: i64, status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            user_id,
            vehicle_id: Uuid::new_v4(),
            pickup_date: Utc.with_ymd_and_hms(2025, 2, day, 9, 0, 0).unwrap(),
            return_date: Utc.with_ymd_and_hms(2025, 2, day + 1, 9, 0, 0).unwrap(),
            pickup_location: String::new(),
            return_location: String::new(),
            driver_name: "Jane".to_string(),
            driver_email: "jane@example.com".to_string(),
            driver_phone: String::new(),
            license_number: String::new(),
            enhancements: serde_json::json!([]),
            base_price: Decimal::new(total, 0),
            enhancements_price: Decimal::ZERO,
            total_price: Decimal::new(total, 0),
            payment_status: PaymentStatus::Pending,
            payment_method: "Manual at Pickup".to_string(),
            status,
            booking_reference: format!("LX-TEST{day:02}"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_customer_detail_totals() {
        let users = Arc::new(MemoryUserStore::new());
        let bookings = Arc::new(MemoryBookingStore::new());
        let jane = users.create(&account("jane@example.com", false)).await.unwrap();
        bookings.seed(booking(jane.id, 1, 500, BookingStatus::Completed)).await;
        bookings.seed(booking(jane.id, 5, 250, BookingStatus::Cancelled)).await;
        bookings.seed(booking(Uuid::new_v4(), 7, 900, BookingStatus::Pending)).await;

        let service = UserService::new(users, bookings);
        let staff = RequestContext::new(Uuid::new_v4(), "ops@luxedrive.com".into(), true, false);
        let detail = service.customer_detail(&staff, jane.id).await.unwrap();

        assert_eq!(detail.total_bookings, 2);
        assert_eq!(detail.total_spent, Decimal::new(750, 0));
    }

    #[tokio::test]
    async fn test_staff_accounts_are_not_customers() {
        let users = Arc::new(MemoryUserStore::new());
        let ops = users.create(&account("ops@luxedrive.com", true)).await.unwrap();
        users.create(&account("jane@example.com", false)).await.unwrap();
        let service = UserService::new(users, Arc::new(MemoryBookingStore::new()));
        let staff = RequestContext::new(ops.id, ops.email.clone(), true, false);

        let err = service.customer_detail(&staff, ops.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(service.list_customers(&staff).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_customers_cannot_browse_directory() {
        let users = Arc::new(MemoryUserStore::new());
        let jane = users.create(&account("jane@example.com", false)).await.unwrap();
        let service = UserService::new(users, Arc::new(MemoryBookingStore::new()));
        let ctx = RequestContext::new(jane.id, jane.email.clone(), false, false);

        assert_eq!(service.get_profile(&ctx).await.unwrap().id, jane.id);
        let err = service.list_customers(&ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
