//! Route definitions for the LuxeDrive HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the Axum router with every route, the body limit, and request
/// logging. Transport-level layers are added by [`crate::app::build_app`].
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(vehicle_routes())
        .merge(booking_routes())
        .merge(notification_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Registration, tokens, profile, and the staff customer directory
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/token/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/users", get(handlers::user::list_customers))
        .route("/auth/users/{id}", get(handlers::user::customer_detail))
}

/// Fleet CRUD and availability
fn vehicle_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/vehicles",
            get(handlers::vehicle::list_vehicles).post(handlers::vehicle::create_vehicle),
        )
        .route(
            "/vehicles/{id}",
            get(handlers::vehicle::get_vehicle)
                .put(handlers::vehicle::update_vehicle)
                .delete(handlers::vehicle::delete_vehicle),
        )
        .route(
            "/vehicles/{id}/availability",
            get(handlers::vehicle::check_availability),
        )
        .route(
            "/vehicles/{id}/booked-dates",
            get(handlers::vehicle::booked_dates),
        )
}

/// Booking creation, listing, and updates
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            get(handlers::booking::list_bookings).post(handlers::booking::create_booking),
        )
        .route(
            "/bookings/{id}",
            get(handlers::booking::get_booking).patch(handlers::booking::update_booking),
        )
}

/// In-app notifications
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/mark-read",
            post(handlers::notification::mark_read),
        )
        .route(
            "/notifications/mark-all-read",
            post(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            post(handlers::notification::mark_one_read),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
