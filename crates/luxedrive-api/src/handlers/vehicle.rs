//! Fleet handlers, including the public availability endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use luxedrive_core::error::AppError;
use luxedrive_core::types::parse_instant;
use luxedrive_entity::vehicle::Vehicle;
use luxedrive_service::booking::UNAVAILABLE_SHORT_MESSAGE;

use crate::dto::request::{AvailabilityQuery, VehicleBody};
use crate::dto::response::{AvailabilityResponse, BookedDatesResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidJson, parse_uuid};
use crate::state::AppState;

/// GET /api/vehicles
pub async fn list_vehicles(State(state): State<AppState>) -> ApiResult<Json<Vec<Vehicle>>> {
    Ok(Json(state.vehicle_service.list_vehicles().await?))
}

/// GET /api/vehicles/{id}
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vehicle>> {
    let id = parse_uuid(&id, "Vehicle")?;
    Ok(Json(state.vehicle_service.get_vehicle(id).await?))
}

/// POST /api/vehicles
pub async fn create_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<VehicleBody>,
) -> ApiResult<(StatusCode, Json<Vehicle>)> {
    let vehicle = state
        .vehicle_service
        .create_vehicle(&auth, body.into_new_vehicle()?)
        .await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// PUT /api/vehicles/{id}
pub async fn update_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<VehicleBody>,
) -> ApiResult<Json<Vehicle>> {
    let id = parse_uuid(&id, "Vehicle")?;
    let vehicle = state
        .vehicle_service
        .update_vehicle(&auth, id, body.into_new_vehicle()?)
        .await?;
    Ok(Json(vehicle))
}

/// DELETE /api/vehicles/{id}
pub async fn delete_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_uuid(&id, "Vehicle")?;
    state.vehicle_service.delete_vehicle(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/vehicles/{id}/availability?pickup_date=&return_date=
pub async fn check_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<Json<AvailabilityResponse>> {
    let id = parse_uuid(&id, "Vehicle")?;

    let (Some(pickup), Some(ret)) = (
        query.pickup_date.filter(|v| !v.trim().is_empty()),
        query.return_date.filter(|v| !v.trim().is_empty()),
    ) else {
        return Err(AppError::validation("Please provide pickup_date and return_date").into());
    };

    let (start, end) = match (parse_instant(&pickup), parse_instant(&ret)) {
        (Ok(start), Ok(end)) => (start, end),
        _ => return Err(AppError::validation("Invalid date format. Use ISO format.").into()),
    };

    let result = state.availability_service.check(id, start, end).await?;
    Ok(Json(AvailabilityResponse::from_availability(
        result,
        UNAVAILABLE_SHORT_MESSAGE,
    )))
}

/// GET /api/vehicles/{id}/booked-dates
pub async fn booked_dates(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BookedDatesResponse>> {
    let vehicle_id = parse_uuid(&id, "Vehicle")?;
    let bookings = state.availability_service.booked_ranges(vehicle_id).await?;
    Ok(Json(BookedDatesResponse {
        vehicle_id,
        bookings,
    }))
}
