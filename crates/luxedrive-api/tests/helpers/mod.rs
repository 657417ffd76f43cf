//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use luxedrive_api::{AppState, Stores, build_app};
use luxedrive_auth::PasswordHasher;
use luxedrive_core::config::AppConfig;
use luxedrive_core::traits::{Delivery, DeliveryQueue};
use luxedrive_database::stores::UserStore;
use luxedrive_entity::user::NewUser;

/// Password used for every account created by the helpers.
pub const PASSWORD: &str = "velvet-canyon-drive-42";

/// Captures deliveries instead of sending them.
#[derive(Default)]
pub struct RecordingQueue {
    deliveries: Mutex<Vec<Delivery>>,
}

impl RecordingQueue {
    pub fn recorded(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }
}

impl DeliveryQueue for RecordingQueue {
    fn submit(&self, delivery: Delivery) -> bool {
        self.deliveries.lock().unwrap().push(delivery);
        true
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Stores behind the router, for direct setup
    pub stores: Stores,
    /// Everything the dispatcher handed to the delivery pool
    pub deliveries: Arc<RecordingQueue>,
}

impl TestApp {
    /// Create a new test application on empty in-memory stores.
    pub fn new() -> Self {
        Self::with_config(test_config(json!({})))
    }

    /// Create a test application with an admin phone configured.
    pub fn with_admin_phone(phone: &str) -> Self {
        Self::with_config(test_config(json!({ "admin_phone": phone })))
    }

    /// Create a test application whose dispatcher hands deliveries to
    /// `queue`. `deliveries` stays empty.
    pub fn with_queue(queue: Arc<dyn DeliveryQueue>) -> Self {
        Self::build(test_config(json!({})), Some(queue))
    }

    fn with_config(config: AppConfig) -> Self {
        Self::build(config, None)
    }

    fn build(config: AppConfig, queue: Option<Arc<dyn DeliveryQueue>>) -> Self {
        let stores = Stores::in_memory();
        let deliveries = Arc::new(RecordingQueue::default());
        let queue = queue.unwrap_or_else(|| Arc::clone(&deliveries) as Arc<dyn DeliveryQueue>);
        let state = AppState::new(config, stores.clone(), queue, None);

        Self {
            router: build_app(state),
            stores,
            deliveries,
        }
    }

    /// Create an account directly in the store and return its ID.
    pub async fn create_user(&self, email: &str, is_staff: bool, is_superuser: bool) -> Uuid {
        let hash = PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("Failed to hash password");
        self.stores
            .users
            .create(&NewUser {
                email: email.to_string(),
                password_hash: hash,
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                is_staff,
                is_superuser,
            })
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Create a superuser admin and return their access token.
    pub async fn admin_token(&self) -> String {
        self.create_user("admin@luxedrive.com", true, true).await;
        self.login("admin@luxedrive.com").await
    }

    /// Create a customer and return their access token.
    pub async fn customer_token(&self, email: &str) -> String {
        self.create_user(email, false, false).await;
        self.login(email).await
    }

    /// Login and return JWT access token
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": email, "password": PASSWORD })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["access"]
            .as_str()
            .expect("No access token in login response")
            .to_string()
    }

    /// Add a vehicle through the API and return its ID.
    pub async fn create_vehicle(&self, admin_token: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/vehicles",
                Some(json!({
                    "make": "Lamborghini",
                    "model": "Huracan",
                    "year": 2024,
                    "category": "Supercar",
                    "price_per_day": "1200.00",
                    "horsepower": 631
                })),
                Some(admin_token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"].as_str().unwrap().to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Booking payload for `vehicle_id` between two days of January 2030,
/// both at 10:00 UTC.
pub fn booking_body(vehicle_id: &str, pickup_day: u32, return_day: u32) -> Value {
    json!({
        "vehicle_id": vehicle_id,
        "pickup_date": format!("2030-01-{pickup_day:02}T10:00:00Z"),
        "return_date": format!("2030-01-{return_day:02}T10:00:00Z"),
        "pickup_location": "Beverly Hills",
        "return_location": "LAX",
        "driver_name": "Jane Doe",
        "driver_email": "jane@example.com",
        "driver_phone": "+15550100",
        "license_number": "D1234567",
        "enhancements": ["chauffeur"],
        "base_price": "2400.00",
        "enhancements_price": "300.00",
        "total_price": "2700.00"
    })
}

fn test_config(notifications: Value) -> AppConfig {
    serde_json::from_value(json!({
        "database": { "url": "postgres://unused" },
        "auth": { "jwt_secret": "integration-test-secret" },
        "notifications": notifications,
    }))
    .expect("Failed to build test config")
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
