use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    Cod,
    Prepaid,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cod => "COD",
            PaymentMode::Prepaid => "PREPAID",
        }
    }

    pub fn parse(s: &str) -> Option<PaymentMode> {
        match s {
            "COD" => Some(PaymentMode::Cod),
            "PREPAID" => Some(PaymentMode::Prepaid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    Confirmed,
    Allocated,
    Packed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Allocated => "ALLOCATED",
            OrderStatus::Packed => "PACKED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<OrderStatus> {
        match s {
            "NEW" => Some(OrderStatus::New),
            "CONFIRMED" => Some(OrderStatus::Confirmed),
            "ALLOCATED" => Some(OrderStatus::Allocated),
            "PACKED" => Some(OrderStatus::Packed),
            "SHIPPED" => Some(OrderStatus::Shipped),
            "DELIVERED" => Some(OrderStatus::Delivered),
            "CANCELLED" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestedItem {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dimensions {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AllocationRequest {
    pub order_id: Uuid,
    pub destination_postal_code: String,
    pub requested_items: Vec<RequestedItem>,
    pub payment_mode: Option<PaymentMode>,
    pub order_value: Option<f64>,
    pub channel_code: Option<String>,
    pub weight_kg: Option<f64>,
    pub dimensions: Option<Dimensions>,
    pub carrier_allocation_strategy: Option<crate::carriers::CarrierAllocationStrategy>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlternativeCandidate {
    pub location_id: Uuid,
    pub location_code: String,
    pub priority_rank: i32,
    pub score: f64,
    pub has_stock: bool,
    pub cod_available: bool,
    pub prepaid_available: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocationResponse {
    pub order_id: Uuid,
    pub is_allocated: bool,
    pub location_id: Option<Uuid>,
    pub location_code: Option<String>,
    pub location_name: Option<String>,
    pub rule_applied: Option<String>,
    pub allocation_type: Option<String>,
    pub decision_factors: Option<serde_json::Value>,
    pub carrier_id: Option<String>,
    pub carrier_name: Option<String>,
    pub carrier_source: Option<String>,
    pub estimated_delivery_days_min: Option<i32>,
    pub estimated_delivery_days_max: Option<i32>,
    pub estimated_shipping_cost: Option<f64>,
    pub cost_breakdown: Option<serde_json::Value>,
    pub failure_reason: Option<String>,
    pub alternatives: Vec<AlternativeCandidate>,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}
