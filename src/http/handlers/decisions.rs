use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

pub async fn list_for_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.decisions_repo.list_by_order(order_id).await {
        Ok(rows) if rows.is_empty() => (
            axum::http::StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "no allocation decisions for order"})),
        )
            .into_response(),
        Ok(rows) => (axum::http::StatusCode::OK, Json(rows)).into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct RecentDecisionsQuery {
    pub success: Option<bool>,
    pub limit: Option<i64>,
}

pub async fn list_recent(
    State(state): State<AppState>,
    Query(query): Query<RecentDecisionsQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(50).clamp(1, 500);
    match state.decisions_repo.list_recent(query.success, limit).await {
        Ok(rows) => (axum::http::StatusCode::OK, Json(rows)).into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
