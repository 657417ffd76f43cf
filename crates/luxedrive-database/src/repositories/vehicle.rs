//! Vehicle repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use luxedrive_core::error::{AppError, ErrorKind};
use luxedrive_core::result::AppResult;
use luxedrive_entity::vehicle::{NewVehicle, Vehicle};

use crate::stores::VehicleStore;

/// Repository for the fleet catalogue.
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    /// Create a new vehicle repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for VehicleRepository {
    async fn create(&self, vehicle: &NewVehicle) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            "INSERT INTO vehicles (id, make, model, year, category, price_per_day, image, gallery, \
             transmission, seats, engine, horsepower, zero_to_sixty, top_speed, availability) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.category)
        .bind(vehicle.price_per_day)
        .bind(&vehicle.image)
        .bind(Json(&vehicle.gallery))
        .bind(&vehicle.transmission)
        .bind(vehicle.seats)
        .bind(&vehicle.engine)
        .bind(vehicle.horsepower)
        .bind(&vehicle.zero_to_sixty)
        .bind(&vehicle.top_speed)
        .bind(&vehicle.availability)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create vehicle", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find vehicle", e))
    }

    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list vehicles", e))
    }

    async fn update(&self, id: Uuid, vehicle: &NewVehicle) -> AppResult<Option<Vehicle>> {
        sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET make = $2, model = $3, year = $4, category = $5, \
             price_per_day = $6, image = $7, gallery = $8, transmission = $9, seats = $10, \
             engine = $11, horsepower = $12, zero_to_sixty = $13, top_speed = $14, \
             availability = $15 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.category)
        .bind(vehicle.price_per_day)
        .bind(&vehicle.image)
        .bind(Json(&vehicle.gallery))
        .bind(&vehicle.transmission)
        .bind(vehicle.seats)
        .bind(&vehicle.engine)
        .bind(vehicle.horsepower)
        .bind(&vehicle.zero_to_sixty)
        .bind(&vehicle.top_speed)
        .bind(&vehicle.availability)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update vehicle", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete vehicle", e))?;
        Ok(result.rows_affected() > 0)
    }
}
