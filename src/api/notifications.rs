//! Notification API endpoints.

use axum::extract::{Path, State};
use serde::Serialize;

use super::{error, success, ApiResult};
use crate::models::Notification;
use crate::AppState;

/// Notification listing with its unread count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
}

/// GET /api/notifications - All notifications, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
) -> ApiResult<NotificationsResponse> {
    let revision_id = state.store.revision_id().await;

    let notifications = state.store.notifications().await;
    let unread_count = state.store.unread_notifications().await;

    success(
        NotificationsResponse {
            notifications,
            unread_count,
        },
        revision_id,
    )
}

/// POST /api/notifications/:id/read - Mark one notification read.
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Notification> {
    let revision_id = state.store.revision_id().await;

    match state.store.mark_notification_read(&id).await {
        Ok(notification) => {
            let new_revision = state.store.revision_id().await;
            success(notification, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// Count of notifications flipped to read.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub updated: i64,
}

/// POST /api/notifications/read-all - Mark every notification read.
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
) -> ApiResult<MarkAllReadResponse> {
    let updated = state.store.mark_all_notifications_read().await;
    let revision_id = state.store.revision_id().await;

    success(MarkAllReadResponse { updated }, revision_id)
}
