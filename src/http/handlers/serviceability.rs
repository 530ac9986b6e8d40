use crate::domain::order::PaymentMode;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ServiceabilityQuery {
    pub payment_mode: Option<PaymentMode>,
}

pub async fn check(
    State(state): State<AppState>,
    Path(postal_code): Path<String>,
    Query(query): Query<ServiceabilityQuery>,
) -> impl IntoResponse {
    match state
        .allocation_service
        .check_serviceability(&postal_code, query.payment_mode)
        .await
    {
        Ok(records) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({
                "postal_code": postal_code,
                "is_serviceable": !records.is_empty(),
                "candidates": records,
            })),
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
