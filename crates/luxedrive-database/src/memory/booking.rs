//! In-memory booking store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use luxedrive_core::error::AppError;
use luxedrive_core::result::AppResult;
use luxedrive_entity::booking::{Booking, BookingChanges, NewBooking};

use crate::stores::{BookingInsert, BookingStore, BookingUpdate};

/// Booking store backed by a vector under a Tokio mutex. The overlap check
/// and the insert happen under the same lock acquisition.
#[derive(Debug, Clone, Default)]
pub struct MemoryBookingStore {
    bookings: Arc<Mutex<Vec<Booking>>>,
}

impl MemoryBookingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row as-is, bypassing the overlap check.
    pub async fn seed(&self, booking: Booking) {
        self.bookings.lock().await.push(booking);
    }
}

fn newest_first(mut rows: Vec<Booking>) -> Vec<Booking> {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn insert_if_available(&self, booking: &NewBooking) -> AppResult<BookingInsert> {
        let reference = booking
            .booking_reference
            .clone()
            .ok_or_else(|| AppError::internal("Booking reference must be assigned before insert"))?;

        let mut bookings = self.bookings.lock().await;

        let mut conflicts: Vec<Booking> = bookings
            .iter()
            .filter(|b| b.vehicle_id == booking.vehicle_id)
            .filter(|b| b.blocks(booking.pickup_date, booking.return_date))
            .cloned()
            .collect();
        if !conflicts.is_empty() {
            conflicts.sort_by_key(|b| b.return_date);
            return Ok(BookingInsert::Conflicts(conflicts));
        }

        if bookings.iter().any(|b| b.booking_reference == reference) {
            return Ok(BookingInsert::DuplicateReference);
        }

        let now = Utc::now();
        let created = Booking {
            id: Uuid::new_v4(),
            user_id: booking.user_id,
            vehicle_id: booking.vehicle_id,
            pickup_date: booking.pickup_date,
            return_date: booking.return_date,
            pickup_location: booking.pickup_location.clone(),
            return_location: booking.return_location.clone(),
            driver_name: booking.driver_name.clone(),
            driver_email: booking.driver_email.clone(),
            driver_phone: booking.driver_phone.clone(),
            license_number: booking.license_number.clone(),
            enhancements: booking.enhancements.clone(),
            base_price: booking.base_price,
            enhancements_price: booking.enhancements_price,
            total_price: booking.total_price,
            payment_status: booking.payment_status,
            payment_method: booking.payment_method.clone(),
            status: booking.status,
            booking_reference: reference,
            created_at: now,
            updated_at: now,
        };
        bookings.push(created.clone());
        Ok(BookingInsert::Created(created))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let bookings = self.bookings.lock().await;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self, user_id: Option<Uuid>) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.lock().await;
        let rows = bookings
            .iter()
            .filter(|b| user_id.is_none_or(|uid| b.user_id == uid))
            .cloned()
            .collect();
        Ok(newest_first(rows))
    }

    async fn find_occupying(
        &self,
        vehicle_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.lock().await;
        let mut rows: Vec<Booking> = bookings
            .iter()
            .filter(|b| b.vehicle_id == vehicle_id && b.blocks(start, end))
            .cloned()
            .collect();
        rows.sort_by_key(|b| b.return_date);
        Ok(rows)
    }

    async fn list_occupying_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.lock().await;
        let mut rows: Vec<Booking> = bookings
            .iter()
            .filter(|b| b.vehicle_id == vehicle_id && b.status.is_occupying())
            .cloned()
            .collect();
        rows.sort_by_key(|b| b.pickup_date);
        Ok(rows)
    }

    async fn update_if_available(
        &self,
        id: Uuid,
        changes: &BookingChanges,
    ) -> AppResult<BookingUpdate> {
        let mut bookings = self.bookings.lock().await;
        let Some(current) = bookings.iter().find(|b| b.id == id).cloned() else {
            return Ok(BookingUpdate::NotFound);
        };

        if changes.reoccupies(current.status) {
            let mut conflicts: Vec<Booking> = bookings
                .iter()
                .filter(|b| b.id != id && b.vehicle_id == current.vehicle_id)
                .filter(|b| b.blocks(current.pickup_date, current.return_date))
                .cloned()
                .collect();
            if !conflicts.is_empty() {
                conflicts.sort_by_key(|b| b.return_date);
                return Ok(BookingUpdate::Conflicts(conflicts));
            }
        }

        let Some(booking) = bookings.iter_mut().find(|b| b.id == id) else {
            return Ok(BookingUpdate::NotFound);
        };
        changes.apply_to(booking);
        booking.updated_at = Utc::now();
        Ok(BookingUpdate::Updated(booking.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use luxedrive_entity::booking::{BookingStatus, PaymentStatus};
    use rust_decimal::Decimal;

    fn new_booking(vehicle_id: Uuid, from: u32, to: u32, reference: &str) -> NewBooking {
        let at = |d| Utc.with_ymd_and_hms(2025, 6, d, 10, 0, 0).unwrap();
        NewBooking {
            user_id: Uuid::new_v4(),
            vehicle_id,
            pickup_date: at(from),
            return_date: at(to),
            pickup_location: "Airport".to_string(),
            return_location: "Airport".to_string(),
            driver_name: "Sam Lee".to_string(),
            driver_email: "sam@example.com".to_string(),
            driver_phone: "+15550111".to_string(),
            license_number: "L-1".to_string(),
            enhancements: serde_json::json!([]),
            base_price: Decimal::new(30000, 2),
            enhancements_price: Decimal::ZERO,
            total_price: Decimal::new(30000, 2),
            payment_status: PaymentStatus::Pending,
            payment_method: "Manual at Pickup".to_string(),
            status: BookingStatus::Pending,
            booking_reference: Some(reference.to_string()),
        }
    }

    #[tokio::test]
    async fn test_overlapping_insert_is_rejected() {
        let store = MemoryBookingStore::new();
        let vehicle = Uuid::new_v4();

        let first = store
            .insert_if_available(&new_booking(vehicle, 10, 12, "LX-AAAAAA"))
            .await
            .unwrap();
        assert!(matches!(first, BookingInsert::Created(_)));

        let second = store
            .insert_if_available(&new_booking(vehicle, 11, 13, "LX-BBBBBB"))
            .await
            .unwrap();
        match second {
            BookingInsert::Conflicts(conflicts) => assert_eq!(conflicts.len(), 1),
            other => panic!("expected conflict, got {other:?}"),
        }

        let touching = store
            .insert_if_available(&new_booking(vehicle, 12, 14, "LX-CCCCCC"))
            .await
            .unwrap();
        assert!(matches!(touching, BookingInsert::Created(_)));
    }

    #[tokio::test]
    async fn test_duplicate_reference_is_reported() {
        let store = MemoryBookingStore::new();
        store
            .insert_if_available(&new_booking(Uuid::new_v4(), 1, 2, "LX-SAME01"))
            .await
            .unwrap();
        let dup = store
            .insert_if_available(&new_booking(Uuid::new_v4(), 1, 2, "LX-SAME01"))
            .await
            .unwrap();
        assert!(matches!(dup, BookingInsert::DuplicateReference));
    }

    #[tokio::test]
    async fn test_concurrent_overlapping_inserts_admit_one() {
        let store = MemoryBookingStore::new();
        let vehicle = Uuid::new_v4();
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            let booking = new_booking(vehicle, 10, 15, &format!("LX-RACE0{i}"));
            handles.push(tokio::spawn(async move {
                store.insert_if_available(&booking).await.unwrap()
            }));
        }
        let mut created = 0;
        for handle in handles {
            if matches!(handle.await.unwrap(), BookingInsert::Created(_)) {
                created += 1;
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_cancelled_booking_frees_vehicle() {
        let store = MemoryBookingStore::new();
        let vehicle = Uuid::new_v4();
        let BookingInsert::Created(first) = store
            .insert_if_available(&new_booking(vehicle, 10, 12, "LX-CANCEL"))
            .await
            .unwrap()
        else {
            panic!("first insert should succeed");
        };
        let changes = BookingChanges {
            status: Some(BookingStatus::Cancelled),
            ..Default::default()
        };
        store.update_if_available(first.id, &changes).await.unwrap();

        let again = store
            .insert_if_available(&new_booking(vehicle, 10, 12, "LX-AGAIN1"))
            .await
            .unwrap();
        assert!(matches!(again, BookingInsert::Created(_)));
    }

    #[tokio::test]
    async fn test_reactivation_over_newer_booking_is_rejected() {
        let store = MemoryBookingStore::new();
        let vehicle = Uuid::new_v4();
        let BookingInsert::Created(first) = store
            .insert_if_available(&new_booking(vehicle, 10, 12, "LX-FIRST1"))
            .await
            .unwrap()
        else {
            panic!("first insert should succeed");
        };
        let cancel = BookingChanges {
            status: Some(BookingStatus::Cancelled),
            ..Default::default()
        };
        store.update_if_available(first.id, &cancel).await.unwrap();
        store
            .insert_if_available(&new_booking(vehicle, 11, 13, "LX-SECOND"))
            .await
            .unwrap();

        let confirm = BookingChanges {
            status: Some(BookingStatus::Confirmed),
            ..Default::default()
        };
        match store.update_if_available(first.id, &confirm).await.unwrap() {
            BookingUpdate::Conflicts(conflicts) => {
                assert_eq!(conflicts.len(), 1);
                assert_eq!(conflicts[0].booking_reference, "LX-SECOND");
            }
            other => panic!("expected conflict, got {other:?}"),
        }
        let stored = store.find_by_id(first.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Cancelled);
        assert_eq!(store.list_occupying_for_vehicle(vehicle).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_of_missing_booking() {
        let store = MemoryBookingStore::new();
        let result = store
            .update_if_available(Uuid::new_v4(), &BookingChanges::default())
            .await
            .unwrap();
        assert!(matches!(result, BookingUpdate::NotFound));
    }
}
