use crate::domain::order::{Dimensions, PaymentMode};
use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod legacy_rates;
pub mod pricing_engine;
pub mod selector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarrierAllocationStrategy {
    CheapestFirst,
    FastestFirst,
    BestSla,
    Balanced,
}

impl CarrierAllocationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarrierAllocationStrategy::CheapestFirst => "CHEAPEST_FIRST",
            CarrierAllocationStrategy::FastestFirst => "FASTEST_FIRST",
            CarrierAllocationStrategy::BestSla => "BEST_SLA",
            CarrierAllocationStrategy::Balanced => "BALANCED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteSource {
    PricingEngine,
    LegacyRateTable,
}

impl QuoteSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteSource::PricingEngine => "PRICING_ENGINE",
            QuoteSource::LegacyRateTable => "LEGACY_RATE_TABLE",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RateRequest {
    pub origin_location_code: String,
    pub destination_postal_code: String,
    pub weight_kg: f64,
    pub dimensions: Option<Dimensions>,
    pub payment_mode: Option<PaymentMode>,
    pub order_value: Option<f64>,
    pub strategy: CarrierAllocationStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeQuote {
    pub carrier_id: String,
    pub carrier_name: String,
    pub total_cost: f64,
    pub delivery_days_min: i32,
    pub delivery_days_max: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierQuote {
    pub carrier_id: String,
    pub carrier_name: String,
    pub total_cost: f64,
    pub delivery_days_min: i32,
    pub delivery_days_max: i32,
    pub strategy: CarrierAllocationStrategy,
    pub score: Option<f64>,
    pub rate_card_id: Option<String>,
    pub cost_breakdown: Option<serde_json::Value>,
    pub source: QuoteSource,
    pub alternatives: Vec<AlternativeQuote>,
}

/// One way of producing a carrier quote. `Ok(None)` means "no route", which
/// is distinct from an upstream error.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn quote(&self, request: &RateRequest) -> Result<Option<CarrierQuote>>;
}
