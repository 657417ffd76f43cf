//! Vehicle catalogue: public reads, staff-only writes.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use luxedrive_core::error::AppError;
use luxedrive_core::result::AppResult;
use luxedrive_database::stores::VehicleStore;
use luxedrive_entity::vehicle::{NewVehicle, Vehicle};

use crate::context::RequestContext;

/// Manages the fleet.
#[derive(Clone)]
pub struct VehicleService {
    vehicles: Arc<dyn VehicleStore>,
}

impl VehicleService {
    /// Creates a new vehicle service.
    pub fn new(vehicles: Arc<dyn VehicleStore>) -> Self {
        Self { vehicles }
    }

    /// Every vehicle, newest first.
    pub async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.vehicles.list().await
    }

    pub async fn get_vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Vehicle not found"))
    }

    pub async fn create_vehicle(
        &self,
        ctx: &RequestContext,
        vehicle: NewVehicle,
    ) -> AppResult<Vehicle> {
        ctx.require_staff()?;
        let created = self.vehicles.create(&vehicle).await?;
        info!(vehicle_id = %created.id, make = %created.make, model = %created.model, "Vehicle added");
        Ok(created)
    }

    pub async fn update_vehicle(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        vehicle: NewVehicle,
    ) -> AppResult<Vehicle> {
        ctx.require_staff()?;
        let updated = self
            .vehicles
            .update(id, &vehicle)
            .await?
            .ok_or_else(|| AppError::not_found("Vehicle not found"))?;
        info!(vehicle_id = %id, "Vehicle updated");
        Ok(updated)
    }

    /// Remove a vehicle. Its bookings are kept.
    pub async fn delete_vehicle(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        ctx.require_staff()?;
        if !self.vehicles.delete(id).await? {
            return Err(AppError::not_found("Vehicle not found"));
        }
        info!(vehicle_id = %id, "Vehicle removed");
        Ok(())
    }
}
