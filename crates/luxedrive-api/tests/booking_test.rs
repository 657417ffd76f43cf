//! Integration tests for booking creation, availability, and updates.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use luxedrive_core::traits::Delivery;
use luxedrive_service::booking::{UNAVAILABLE_MESSAGE, UNAVAILABLE_SHORT_MESSAGE, is_valid_reference};

use helpers::{TestApp, booking_body};

struct Fleet {
    app: TestApp,
    admin: String,
    customer: String,
    vehicle_id: String,
}

async fn fleet() -> Fleet {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let customer = app.customer_token("jane@example.com").await;
    let vehicle_id = app.create_vehicle(&admin).await;
    Fleet {
        app,
        admin,
        customer,
        vehicle_id,
    }
}

impl Fleet {
    async fn book(&self, pickup: u32, ret: u32) -> helpers::TestResponse {
        self.app
            .request(
                "POST",
                "/api/bookings",
                Some(booking_body(&self.vehicle_id, pickup, ret)),
                Some(&self.customer),
            )
            .await
    }

    async fn availability(&self, query: &str) -> helpers::TestResponse {
        self.app
            .request(
                "GET",
                &format!("/api/vehicles/{}/availability?{query}", self.vehicle_id),
                None,
                None,
            )
            .await
    }
}

#[tokio::test]
async fn test_create_booking_assigns_reference_and_notifies_once() {
    let f = fleet().await;

    let response = f.book(10, 12).await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    let reference = response.body["booking_reference"].as_str().unwrap();
    assert!(is_valid_reference(reference), "bad reference {reference}");
    assert_eq!(response.body["status"], "PENDING");
    assert_eq!(response.body["payment_status"], "PENDING");
    assert_eq!(response.body["payment_method"], "Manual at Pickup");
    assert_eq!(response.body["total_price"], "2700.00");

    let deliveries = f.app.deliveries.recorded();
    assert_eq!(deliveries.len(), 1);
    match &deliveries[0] {
        Delivery::Mail(mail) => {
            assert_eq!(mail.to, "admin@luxedrive.com");
            assert!(mail.subject.contains(reference));
            assert!(mail.html_body.contains("Jane Doe"));
        }
        other => panic!("expected an email, got {other:?}"),
    }
}

#[tokio::test]
async fn test_admin_phone_adds_text_message() {
    let app = TestApp::with_admin_phone("+15550123");
    let admin = app.admin_token().await;
    let customer = app.customer_token("jane@example.com").await;
    let vehicle_id = app.create_vehicle(&admin).await;

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(&vehicle_id, 10, 12)),
            Some(&customer),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let deliveries = app.deliveries.recorded();
    assert_eq!(deliveries.len(), 2);
    assert!(
        deliveries
            .iter()
            .any(|d| matches!(d, Delivery::Text(t) if t.to == "+15550123"))
    );
}

#[tokio::test]
async fn test_overlapping_booking_is_rejected_with_next_date() {
    let f = fleet().await;
    assert_eq!(f.book(10, 15).await.status, StatusCode::CREATED);

    let response = f.book(12, 18).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], UNAVAILABLE_MESSAGE);
    assert_eq!(response.body["message"], UNAVAILABLE_SHORT_MESSAGE);
    assert_eq!(response.body["next_available_date"], "2030-01-15T10:00:00Z");

    // Containment in either direction conflicts too.
    assert_eq!(f.book(11, 12).await.status, StatusCode::BAD_REQUEST);
    assert_eq!(f.book(9, 20).await.status, StatusCode::BAD_REQUEST);

    // The rejected attempts sent nothing.
    assert_eq!(f.app.deliveries.recorded().len(), 1);
}

#[tokio::test]
async fn test_back_to_back_bookings_are_allowed() {
    let f = fleet().await;
    assert_eq!(f.book(10, 12).await.status, StatusCode::CREATED);
    assert_eq!(f.book(12, 14).await.status, StatusCode::CREATED);
    assert_eq!(f.book(8, 10).await.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_cancelled_booking_frees_the_vehicle() {
    let f = fleet().await;
    let first = f.book(10, 12).await;
    let id = first.body["id"].as_str().unwrap();

    let cancelled = f
        .app
        .request(
            "PATCH",
            &format!("/api/bookings/{id}"),
            Some(json!({ "status": "CANCELLED" })),
            Some(&f.admin),
        )
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["status"], "CANCELLED");

    assert_eq!(f.book(10, 12).await.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_cancelled_booking_cannot_be_reactivated_over_a_newer_one() {
    let f = fleet().await;
    let first = f.book(10, 12).await;
    let id = first.body["id"].as_str().unwrap();
    let path = format!("/api/bookings/{id}");

    let cancelled = f
        .app
        .request("PATCH", &path, Some(json!({ "status": "CANCELLED" })), Some(&f.admin))
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(f.book(10, 12).await.status, StatusCode::CREATED);

    let reactivated = f
        .app
        .request("PATCH", &path, Some(json!({ "status": "CONFIRMED" })), Some(&f.admin))
        .await;
    assert_eq!(reactivated.status, StatusCode::BAD_REQUEST, "{:?}", reactivated.body);
    assert_eq!(reactivated.body["error"], UNAVAILABLE_MESSAGE);
    assert_eq!(reactivated.body["next_available_date"], "2030-01-12T10:00:00Z");

    let stored = f.app.request("GET", &path, None, Some(&f.admin)).await;
    assert_eq!(stored.body["status"], "CANCELLED");
}

#[tokio::test]
async fn test_invalid_booking_input() {
    let f = fleet().await;

    let inverted = f.book(12, 10).await;
    assert_eq!(inverted.status, StatusCode::BAD_REQUEST);

    let mut unparseable = booking_body(&f.vehicle_id, 10, 12);
    unparseable["pickup_date"] = json!("soon");
    let response = f
        .app
        .request("POST", "/api/bookings", Some(unparseable), Some(&f.customer))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let unknown_vehicle = booking_body(&uuid::Uuid::new_v4().to_string(), 10, 12);
    let response = f
        .app
        .request(
            "POST",
            "/api/bookings",
            Some(unknown_vehicle),
            Some(&f.customer),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let anonymous = f
        .app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(&f.vehicle_id, 10, 12)),
            None,
        )
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    assert!(f.app.deliveries.recorded().is_empty());
}

#[tokio::test]
async fn test_availability_endpoint() {
    let f = fleet().await;
    assert_eq!(f.book(10, 15).await.status, StatusCode::CREATED);

    let free = f
        .availability("pickup_date=2030-01-15T10:00:00Z&return_date=2030-01-18T10:00:00Z")
        .await;
    assert_eq!(free.status, StatusCode::OK);
    assert_eq!(free.body, json!({ "available": true }));

    let taken = f
        .availability("pickup_date=2030-01-14%2010:00&return_date=2030-01-16%2010:00")
        .await;
    assert_eq!(taken.status, StatusCode::OK);
    assert_eq!(taken.body["available"], false);
    assert_eq!(taken.body["message"], UNAVAILABLE_SHORT_MESSAGE);
    assert_eq!(taken.body["next_available_date"], "2030-01-15T10:00:00Z");

    let missing = f.availability("pickup_date=2030-01-14T10:00:00Z").await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        missing.body["error"],
        "Please provide pickup_date and return_date"
    );

    let garbage = f
        .availability("pickup_date=tomorrow&return_date=2030-01-16T10:00:00Z")
        .await;
    assert_eq!(garbage.status, StatusCode::BAD_REQUEST);
    assert_eq!(garbage.body["error"], "Invalid date format. Use ISO format.");

    let inverted = f
        .availability("pickup_date=2030-01-16T10:00:00Z&return_date=2030-01-14T10:00:00Z")
        .await;
    assert_eq!(inverted.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_booked_dates_are_ordered_and_skip_cancelled() {
    let f = fleet().await;
    let late = f.book(20, 22).await;
    f.book(1, 3).await;
    let cancelled = f.book(10, 12).await;
    let cancelled_id = cancelled.body["id"].as_str().unwrap();
    f.app
        .request(
            "PATCH",
            &format!("/api/bookings/{cancelled_id}"),
            Some(json!({ "status": "CANCELLED" })),
            Some(&f.admin),
        )
        .await;

    let response = f
        .app
        .request(
            "GET",
            &format!("/api/vehicles/{}/booked-dates", f.vehicle_id),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["vehicle_id"], f.vehicle_id.as_str());

    let ranges = response.body["bookings"].as_array().unwrap();
    assert_eq!(ranges.len(), 2);
    assert_eq!(ranges[0]["pickup_date"], "2030-01-01T10:00:00Z");
    assert_eq!(ranges[1]["id"], late.body["id"]);
    assert_eq!(ranges[1]["user_name"], "Jane Doe");
}

#[tokio::test]
async fn test_customer_patch_cannot_change_status_and_never_notifies() {
    let f = fleet().await;
    let created = f.book(10, 12).await;
    let id = created.body["id"].as_str().unwrap();
    let reference = created.body["booking_reference"].clone();

    let response = f
        .app
        .request(
            "PATCH",
            &format!("/api/bookings/{id}"),
            Some(json!({
                "status": "CONFIRMED",
                "payment_status": "PAID",
                "driver_phone": "+15550199"
            })),
            Some(&f.customer),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "PENDING");
    assert_eq!(response.body["payment_status"], "PENDING");
    assert_eq!(response.body["driver_phone"], "+15550199");
    assert_eq!(response.body["booking_reference"], reference);

    let confirmed = f
        .app
        .request(
            "PATCH",
            &format!("/api/bookings/{id}"),
            Some(json!({ "status": "CONFIRMED" })),
            Some(&f.admin),
        )
        .await;
    assert_eq!(confirmed.body["status"], "CONFIRMED");

    assert_eq!(f.app.deliveries.recorded().len(), 1);
}

#[tokio::test]
async fn test_booking_visibility() {
    let f = fleet().await;
    let created = f.book(10, 12).await;
    let path = format!("/api/bookings/{}", created.body["id"].as_str().unwrap());
    let stranger = f.app.customer_token("sam@example.com").await;

    let hidden = f.app.request("GET", &path, None, Some(&stranger)).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let own = f
        .app
        .request("GET", "/api/bookings", None, Some(&stranger))
        .await;
    assert_eq!(own.body, json!([]));

    let staff = f
        .app
        .request("GET", "/api/bookings", None, Some(&f.admin))
        .await;
    assert_eq!(staff.body.as_array().unwrap().len(), 1);

    let owner = f.app.request("GET", &path, None, Some(&f.customer)).await;
    assert_eq!(owner.status, StatusCode::OK);
}
