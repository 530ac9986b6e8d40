use crate::domain::order::AllocationRequest;
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn allocate(
    State(state): State<AppState>,
    Json(req): Json<AllocationRequest>,
) -> impl IntoResponse {
    match state.allocation_service.allocate(req).await {
        Ok(resp) => (axum::http::StatusCode::OK, Json(resp)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}
