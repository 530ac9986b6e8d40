use crate::carriers::{
    AlternativeQuote, CarrierQuote, QuoteSource, RateRequest, RateSource,
};
use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

pub struct PricingEngineClient {
    pub base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct PricingEngineAlternative {
    carrier_id: String,
    carrier_name: String,
    total_cost: f64,
    delivery_days_min: i32,
    delivery_days_max: i32,
}

#[derive(Debug, Deserialize)]
struct PricingEngineResponse {
    carrier_id: String,
    carrier_name: String,
    total_cost: f64,
    delivery_days_min: i32,
    delivery_days_max: i32,
    score: Option<f64>,
    rate_card_id: Option<String>,
    cost_breakdown: Option<serde_json::Value>,
    #[serde(default)]
    alternatives: Vec<PricingEngineAlternative>,
}

#[async_trait::async_trait]
impl RateSource for PricingEngineClient {
    fn name(&self) -> &'static str {
        "pricing_engine"
    }

    async fn quote(&self, request: &RateRequest) -> Result<Option<CarrierQuote>> {
        let url = format!("{}/v1/rates/calculate", self.base_url);
        let body = json!({
            "origin_location_code": request.origin_location_code,
            "destination_postal_code": request.destination_postal_code,
            "weight_kg": request.weight_kg,
            "dimensions": request.dimensions,
            "payment_mode": request.payment_mode,
            "order_value": request.order_value,
            "strategy": request.strategy.as_str(),
        });

        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await;

        match resp {
            Ok(r) if r.status().is_success() => {
                let parsed: PricingEngineResponse = r.json().await?;
                Ok(Some(CarrierQuote {
                    carrier_id: parsed.carrier_id,
                    carrier_name: parsed.carrier_name,
                    total_cost: parsed.total_cost,
                    delivery_days_min: parsed.delivery_days_min,
                    delivery_days_max: parsed.delivery_days_max,
                    strategy: request.strategy,
                    score: parsed.score,
                    rate_card_id: parsed.rate_card_id,
                    cost_breakdown: parsed.cost_breakdown,
                    source: QuoteSource::PricingEngine,
                    alternatives: parsed
                        .alternatives
                        .into_iter()
                        .map(|a| AlternativeQuote {
                            carrier_id: a.carrier_id,
                            carrier_name: a.carrier_name,
                            total_cost: a.total_cost,
                            delivery_days_min: a.delivery_days_min,
                            delivery_days_max: a.delivery_days_max,
                        })
                        .collect(),
                }))
            }
            // No route for this lane is a valid answer, not an upstream error.
            Ok(r) if r.status() == StatusCode::NOT_FOUND => Ok(None),
            Ok(r) => {
                let status = r.status();
                let body = r.text().await.unwrap_or_default();
                anyhow::bail!(
                    "pricing engine HTTP {}: {}",
                    status.as_u16(),
                    body.chars().take(200).collect::<String>()
                )
            }
            Err(e) if e.is_timeout() => anyhow::bail!("pricing engine timeout"),
            Err(e) => Err(e.into()),
        }
    }
}
