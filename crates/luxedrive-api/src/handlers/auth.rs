//! Auth handlers: register, login, refresh, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterBody};
use crate::dto::response::{TokenResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<RegisterBody>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.auth_service.register(body.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let tokens = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(tokens.into()))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RefreshRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let tokens = state.auth_service.refresh(&req.refresh).await?;
    Ok(Json(tokens.into()))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(user.into()))
}
