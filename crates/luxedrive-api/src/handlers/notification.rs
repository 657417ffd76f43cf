//! Notification handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::request::MarkReadRequest;
use crate::dto::response::{MessageResponse, NotificationListResponse, UnreadCountResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidJson, parse_uuid};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<NotificationListResponse>> {
    let list = state.notification_service.list_notifications(&auth).await?;
    Ok(Json(list.into()))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let unread_count = state.notification_service.unread_count(&auth).await?;
    Ok(Json(UnreadCountResponse { unread_count }))
}

/// POST /api/notifications/mark-read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<MarkReadRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state
        .notification_service
        .mark_read(&auth, &req.notification_ids, req.mark_all)
        .await?;
    Ok(Json(MessageResponse { message }))
}

/// POST /api/notifications/mark-all-read
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(MessageResponse {
        message: "All notifications marked as read".to_string(),
    }))
}

/// POST /api/notifications/{id}/read
pub async fn mark_one_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_uuid(&id, "Notification")?;
    state.notification_service.mark_one_read(&auth, id).await?;
    Ok(Json(MessageResponse {
        message: "Notification marked as read".to_string(),
    }))
}
