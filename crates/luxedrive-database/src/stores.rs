//! Persistence seams used by the service layer.
//!
//! Each trait has a PostgreSQL implementation in [`crate::repositories`]
//! and an in-memory one in [`crate::memory`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use luxedrive_core::result::AppResult;
use luxedrive_entity::booking::{Booking, BookingChanges, NewBooking};
use luxedrive_entity::notification::{NewNotification, Notification, NotificationType};
use luxedrive_entity::user::{NewUser, User};
use luxedrive_entity::vehicle::{NewVehicle, Vehicle};

/// Outcome of a guarded booking insert.
#[derive(Debug, Clone)]
pub enum BookingInsert {
    /// The booking was written.
    Created(Booking),
    /// Occupying bookings overlap the requested interval; nothing was written.
    Conflicts(Vec<Booking>),
    /// Another booking already uses the requested reference; nothing was written.
    DuplicateReference,
}

/// Outcome of a guarded booking update.
#[derive(Debug, Clone)]
pub enum BookingUpdate {
    /// The changes were written.
    Updated(Booking),
    /// The update would reoccupy the vehicle over other occupying
    /// bookings; nothing was written.
    Conflicts(Vec<Booking>),
    /// No booking has the given id.
    NotFound,
}

/// Reservation storage.
#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    /// Check for overlapping occupying bookings and insert, atomically per
    /// vehicle. Two concurrent calls for overlapping intervals of the same
    /// vehicle never both return `Created`.
    async fn insert_if_available(&self, booking: &NewBooking) -> AppResult<BookingInsert>;

    /// Find a booking by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>>;

    /// List bookings newest first, optionally restricted to one customer.
    async fn list(&self, user_id: Option<Uuid>) -> AppResult<Vec<Booking>>;

    /// Occupying bookings of `vehicle_id` overlapping `[start, end)`.
    async fn find_occupying(
        &self,
        vehicle_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>>;

    /// All occupying bookings of a vehicle ordered by pickup date.
    async fn list_occupying_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<Booking>>;

    /// Apply a partial update. When the update moves a cancelled or
    /// completed booking back to an occupying status, the overlap check
    /// and the write are atomic per vehicle, as for inserts.
    async fn update_if_available(
        &self,
        id: Uuid,
        changes: &BookingChanges,
    ) -> AppResult<BookingUpdate>;
}

/// Fleet storage.
#[async_trait]
pub trait VehicleStore: Send + Sync + 'static {
    async fn create(&self, vehicle: &NewVehicle) -> AppResult<Vehicle>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;
    /// All vehicles, newest first.
    async fn list(&self) -> AppResult<Vec<Vehicle>>;
    /// Replace every editable field. Returns `None` if the vehicle does not exist.
    async fn update(&self, id: Uuid, vehicle: &NewVehicle) -> AppResult<Option<Vehicle>>;
    /// Returns `false` if the vehicle did not exist.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Account storage.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Create an account; fails with `Conflict` when the email is taken.
    async fn create(&self, user: &NewUser) -> AppResult<User>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    /// Case-insensitive lookup by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// Non-staff accounts, newest first.
    async fn list_customers(&self) -> AppResult<Vec<User>>;
    /// Active staff account with the given email.
    async fn find_active_staff_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// Any active superuser, oldest first.
    async fn find_active_superuser(&self) -> AppResult<Option<User>>;
}

/// In-app notification storage.
///
/// `recipient` filters restrict queries to one user's notifications;
/// `None` covers every notification (staff view).
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    async fn create(&self, notification: &NewNotification) -> AppResult<Notification>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>>;
    /// Whether a notification of `kind` was already produced for `dedup_key`.
    async fn exists_by_dedup_key(&self, kind: NotificationType, dedup_key: &str) -> AppResult<bool>;
    /// Notifications newest first.
    async fn list(&self, recipient: Option<Uuid>) -> AppResult<Vec<Notification>>;
    async fn count(&self, recipient: Option<Uuid>) -> AppResult<i64>;
    async fn count_unread(&self, recipient: Option<Uuid>) -> AppResult<i64>;
    async fn mark_read(&self, id: Uuid) -> AppResult<()>;
    /// Mark the given unread notifications read; returns how many changed.
    async fn mark_many_read(&self, recipient: Option<Uuid>, ids: &[Uuid]) -> AppResult<u64>;
    /// Mark every unread notification read; returns how many changed.
    async fn mark_all_read(&self, recipient: Option<Uuid>) -> AppResult<u64>;
}
