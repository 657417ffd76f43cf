//! Booking repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use luxedrive_core::error::{AppError, ErrorKind};
use luxedrive_core::result::AppResult;
use luxedrive_entity::booking::{Booking, BookingChanges, NewBooking};

use crate::stores::{BookingInsert, BookingStore, BookingUpdate};

const OCCUPYING_FILTER: &str = "status IN ('PENDING', 'CONFIRMED', 'ACTIVE')";

/// Repository for bookings.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn insert_if_available(&self, booking: &NewBooking) -> AppResult<BookingInsert> {
        let reference = booking
            .booking_reference
            .as_deref()
            .ok_or_else(|| AppError::internal("Booking reference must be assigned before insert"))?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin booking transaction", e)
        })?;

        lock_vehicle(&mut tx, booking.vehicle_id).await?;

        let conflicts = occupying_conflicts(
            &mut tx,
            booking.vehicle_id,
            booking.pickup_date,
            booking.return_date,
            None,
        )
        .await?;

        if !conflicts.is_empty() {
            debug!(
                vehicle_id = %booking.vehicle_id,
                conflicts = conflicts.len(),
                "Booking rejected by overlap check"
            );
            return Ok(BookingInsert::Conflicts(conflicts));
        }

        let inserted = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_id, vehicle_id, pickup_date, return_date, \
             pickup_location, return_location, driver_name, driver_email, driver_phone, \
             license_number, enhancements, base_price, enhancements_price, total_price, \
             payment_status, payment_method, status, booking_reference) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19) \
             ON CONFLICT (booking_reference) DO NOTHING RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(booking.user_id)
        .bind(booking.vehicle_id)
        .bind(booking.pickup_date)
        .bind(booking.return_date)
        .bind(&booking.pickup_location)
        .bind(&booking.return_location)
        .bind(&booking.driver_name)
        .bind(&booking.driver_email)
        .bind(&booking.driver_phone)
        .bind(&booking.license_number)
        .bind(&booking.enhancements)
        .bind(booking.base_price)
        .bind(booking.enhancements_price)
        .bind(booking.total_price)
        .bind(booking.payment_status)
        .bind(&booking.payment_method)
        .bind(booking.status)
        .bind(reference)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert booking", e))?;

        let Some(created) = inserted else {
            return Ok(BookingInsert::DuplicateReference);
        };

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking", e)
        })?;

        Ok(BookingInsert::Created(created))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    async fn list(&self, user_id: Option<Uuid>) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE ($1::uuid IS NULL OR user_id = $1) \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))
    }

    async fn find_occupying(
        &self,
        vehicle_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(&format!(
            "SELECT * FROM bookings WHERE vehicle_id = $1 AND {OCCUPYING_FILTER} \
             AND pickup_date < $3 AND return_date > $2 ORDER BY return_date"
        ))
        .bind(vehicle_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query occupying bookings", e)
        })
    }

    async fn list_occupying_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(&format!(
            "SELECT * FROM bookings WHERE vehicle_id = $1 AND {OCCUPYING_FILTER} \
             ORDER BY pickup_date"
        ))
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list vehicle bookings", e)
        })
    }

    async fn update_if_available(
        &self,
        id: Uuid,
        changes: &BookingChanges,
    ) -> AppResult<BookingUpdate> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin booking transaction", e)
        })?;

        let vehicle_id: Option<Uuid> =
            sqlx::query_scalar("SELECT vehicle_id FROM bookings WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to find booking", e)
                })?;
        let Some(vehicle_id) = vehicle_id else {
            return Ok(BookingUpdate::NotFound);
        };

        lock_vehicle(&mut tx, vehicle_id).await?;

        let current = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))?;
        let Some(current) = current else {
            return Ok(BookingUpdate::NotFound);
        };

        if changes.reoccupies(current.status) {
            let conflicts = occupying_conflicts(
                &mut tx,
                vehicle_id,
                current.pickup_date,
                current.return_date,
                Some(id),
            )
            .await?;
            if !conflicts.is_empty() {
                debug!(
                    booking_id = %id,
                    conflicts = conflicts.len(),
                    "Booking reactivation rejected by overlap check"
                );
                return Ok(BookingUpdate::Conflicts(conflicts));
            }
        }

        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET \
             pickup_location = COALESCE($2, pickup_location), \
             return_location = COALESCE($3, return_location), \
             driver_name = COALESCE($4, driver_name), \
             driver_email = COALESCE($5, driver_email), \
             driver_phone = COALESCE($6, driver_phone), \
             license_number = COALESCE($7, license_number), \
             enhancements = COALESCE($8, enhancements), \
             payment_method = COALESCE($9, payment_method), \
             status = COALESCE($10, status), \
             payment_status = COALESCE($11, payment_status), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.pickup_location)
        .bind(&changes.return_location)
        .bind(&changes.driver_name)
        .bind(&changes.driver_email)
        .bind(&changes.driver_phone)
        .bind(&changes.license_number)
        .bind(&changes.enhancements)
        .bind(&changes.payment_method)
        .bind(changes.status)
        .bind(changes.payment_status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update booking", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking update", e)
        })?;

        Ok(BookingUpdate::Updated(updated))
    }
}

/// Serializes overlap checks and writes per vehicle until the transaction ends.
async fn lock_vehicle(tx: &mut Transaction<'_, Postgres>, vehicle_id: Uuid) -> AppResult<()> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
        .bind(vehicle_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock vehicle", e))?;
    Ok(())
}

/// Occupying bookings of `vehicle_id` overlapping `[start, end)`, other than `exclude`.
async fn occupying_conflicts(
    tx: &mut Transaction<'_, Postgres>,
    vehicle_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> AppResult<Vec<Booking>> {
    sqlx::query_as::<_, Booking>(&format!(
        "SELECT * FROM bookings WHERE vehicle_id = $1 AND {OCCUPYING_FILTER} \
         AND pickup_date < $3 AND return_date > $2 \
         AND ($4::uuid IS NULL OR id <> $4) ORDER BY return_date"
    ))
    .bind(vehicle_id)
    .bind(start)
    .bind(end)
    .bind(exclude)
    .fetch_all(&mut **tx)
    .await
    .map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to check booking conflicts", e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxedrive_entity::booking::BookingStatus;

    #[test]
    fn test_occupying_filter_matches_entity_states() {
        for status in BookingStatus::OCCUPYING {
            assert!(OCCUPYING_FILTER.contains(status.as_str()));
        }
    }
}
