//! Booking handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use luxedrive_entity::booking::Booking;

use crate::dto::request::{BookingCreateBody, BookingPatchBody};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidJson, parse_uuid};
use crate::state::AppState;

/// POST /api/bookings
///
/// Answers 400 with `{error, message, next_available_date}` when the
/// vehicle is taken for any part of the interval.
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<BookingCreateBody>,
) -> ApiResult<(StatusCode, Json<Booking>)> {
    let request = body.into_request()?;
    let booking = state.booking_service.create_booking(&auth, request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Booking>>> {
    Ok(Json(state.booking_service.list_bookings(&auth).await?))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Booking>> {
    let id = parse_uuid(&id, "Booking")?;
    Ok(Json(state.booking_service.get_booking(&auth, id).await?))
}

/// PATCH /api/bookings/{id}
pub async fn update_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<BookingPatchBody>,
) -> ApiResult<Json<Booking>> {
    let id = parse_uuid(&id, "Booking")?;
    let booking = state
        .booking_service
        .update_booking(&auth, id, body.into())
        .await?;
    Ok(Json(booking))
}
