//! In-memory vehicle store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;
use uuid::Uuid;

use luxedrive_core::result::AppResult;
use luxedrive_entity::vehicle::{NewVehicle, Vehicle};

use crate::stores::VehicleStore;

/// Vehicle store backed by a vector under a Tokio read-write lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryVehicleStore {
    vehicles: Arc<RwLock<Vec<Vehicle>>>,
}

impl MemoryVehicleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn fill(vehicle: &mut Vehicle, from: &NewVehicle) {
    vehicle.make = from.make.clone();
    vehicle.model = from.model.clone();
    vehicle.year = from.year;
    vehicle.category = from.category.clone();
    vehicle.price_per_day = from.price_per_day;
    vehicle.image = from.image.clone();
    vehicle.gallery = Json(from.gallery.clone());
    vehicle.transmission = from.transmission.clone();
    vehicle.seats = from.seats;
    vehicle.engine = from.engine.clone();
    vehicle.horsepower = from.horsepower;
    vehicle.zero_to_sixty = from.zero_to_sixty.clone();
    vehicle.top_speed = from.top_speed.clone();
    vehicle.availability = from.availability.clone();
}

#[async_trait]
impl VehicleStore for MemoryVehicleStore {
    async fn create(&self, vehicle: &NewVehicle) -> AppResult<Vehicle> {
        let mut created = Vehicle {
            id: Uuid::new_v4(),
            make: String::new(),
            model: String::new(),
            year: 0,
            category: String::new(),
            price_per_day: Default::default(),
            image: None,
            gallery: Json(Vec::new()),
            transmission: String::new(),
            seats: 0,
            engine: None,
            horsepower: 0,
            zero_to_sixty: None,
            top_speed: None,
            availability: String::new(),
            created_at: Utc::now(),
        };
        fill(&mut created, vehicle);
        self.vehicles.write().await.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let mut rows = self.vehicles.read().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update(&self, id: Uuid, vehicle: &NewVehicle) -> AppResult<Option<Vehicle>> {
        let mut vehicles = self.vehicles.write().await;
        let Some(existing) = vehicles.iter_mut().find(|v| v.id == id) else {
            return Ok(None);
        };
        fill(existing, vehicle);
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut vehicles = self.vehicles.write().await;
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        Ok(vehicles.len() != before)
    }
}
