use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One allocation attempt, persisted append-only after the decision is
/// finalized. Never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationDecisionRecord {
    pub decision_id: Uuid,
    pub order_id: Uuid,
    pub postal_code: String,
    pub is_allocated: bool,
    pub location_id: Option<Uuid>,
    pub rule_id: Option<Uuid>,
    pub rule_applied: Option<String>,
    pub strategy: Option<String>,
    pub decision_factors_json: serde_json::Value,
    pub candidates_json: serde_json::Value,
    pub carrier_id: Option<String>,
    pub carrier_name: Option<String>,
    pub carrier_source: Option<String>,
    pub estimated_shipping_cost: Option<f64>,
    pub failure_reason: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
