//! Staff-only customer directory.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::response::{CustomerDetailResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, parse_uuid};
use crate::state::AppState;

/// GET /api/auth/users
pub async fn list_customers(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_customers(&auth).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/auth/users/{id}
pub async fn customer_detail(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<CustomerDetailResponse>> {
    let id = parse_uuid(&id, "User")?;
    let detail = state.user_service.customer_detail(&auth, id).await?;
    Ok(Json(detail.into()))
}
