use crate::domain::order::PaymentMode;
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RulesQuery {
    pub channel_code: Option<String>,
    pub payment_mode: Option<PaymentMode>,
    pub order_value: Option<f64>,
}

/// Read-only listing of the rules that would apply to a hypothetical
/// request. Rule authoring lives in an external administrative surface.
pub async fn list_applicable(
    State(state): State<AppState>,
    Query(query): Query<RulesQuery>,
) -> impl IntoResponse {
    match state
        .rules_repo
        .get_applicable(
            query.channel_code.as_deref(),
            query.payment_mode,
            query.order_value,
        )
        .await
    {
        Ok(rules) => (axum::http::StatusCode::OK, Json(rules)).into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
