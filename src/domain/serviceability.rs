use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One (location, postal code) serviceability row joined with the owning
/// location. Only rows for active, fulfillment-capable locations ever reach
/// the evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceabilityRecord {
    pub location_id: Uuid,
    pub location_code: String,
    pub location_name: String,
    pub postal_code: String,
    pub is_serviceable: bool,
    pub cod_available: bool,
    pub prepaid_available: bool,
    pub estimated_days: Option<i32>,
    pub shipping_cost: Option<f64>,
    pub priority_rank: i32,
    pub is_active: bool,
}
