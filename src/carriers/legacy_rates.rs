use crate::carriers::{
    AlternativeQuote, CarrierQuote, QuoteSource, RateRequest, RateSource,
};
use crate::domain::order::PaymentMode;
use crate::repo::carrier_rates_repo::{CarrierRateRow, CarrierRatesRepo};
use anyhow::Result;

/// Fallback source over the legacy origin–destination rate table. Yields a
/// reduced quote: no cost breakdown, no rate card, at most one alternative.
pub struct LegacyRateSource {
    pub rates_repo: CarrierRatesRepo,
}

fn total_cost(row: &CarrierRateRow, weight_kg: f64) -> f64 {
    row.base_rate + row.per_kg_rate * weight_kg.max(0.0)
}

#[async_trait::async_trait]
impl RateSource for LegacyRateSource {
    fn name(&self) -> &'static str {
        "legacy_rate_table"
    }

    async fn quote(&self, request: &RateRequest) -> Result<Option<CarrierQuote>> {
        let rows = self
            .rates_repo
            .list_rates(&request.origin_location_code, &request.destination_postal_code)
            .await?;

        let eligible: Vec<&CarrierRateRow> = rows
            .iter()
            .filter(|r| request.payment_mode != Some(PaymentMode::Cod) || r.cod_supported)
            .collect();

        let Some(cheapest) = eligible.first() else {
            return Ok(None);
        };

        let alternatives = eligible
            .get(1)
            .map(|r| AlternativeQuote {
                carrier_id: r.carrier_id.clone(),
                carrier_name: r.carrier_name.clone(),
                total_cost: total_cost(r, request.weight_kg),
                delivery_days_min: r.min_days,
                delivery_days_max: r.max_days,
            })
            .into_iter()
            .collect();

        Ok(Some(CarrierQuote {
            carrier_id: cheapest.carrier_id.clone(),
            carrier_name: cheapest.carrier_name.clone(),
            total_cost: total_cost(cheapest, request.weight_kg),
            delivery_days_min: cheapest.min_days,
            delivery_days_max: cheapest.max_days,
            strategy: request.strategy,
            score: None,
            rate_card_id: None,
            cost_breakdown: None,
            source: QuoteSource::LegacyRateTable,
            alternatives,
        }))
    }
}
