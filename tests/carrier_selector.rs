use fulfillment_engine::carriers::selector::CarrierSelector;
use fulfillment_engine::carriers::{
    CarrierAllocationStrategy, CarrierQuote, QuoteSource, RateRequest, RateSource,
};
use std::sync::Arc;

struct ErroringSource;

#[async_trait::async_trait]
impl RateSource for ErroringSource {
    fn name(&self) -> &'static str {
        "erroring"
    }

    async fn quote(&self, _request: &RateRequest) -> anyhow::Result<Option<CarrierQuote>> {
        anyhow::bail!("pricing engine timeout")
    }
}

struct NoRouteSource;

#[async_trait::async_trait]
impl RateSource for NoRouteSource {
    fn name(&self) -> &'static str {
        "no_route"
    }

    async fn quote(&self, _request: &RateRequest) -> anyhow::Result<Option<CarrierQuote>> {
        Ok(None)
    }
}

struct StaticSource {
    carrier_id: &'static str,
    source: QuoteSource,
}

#[async_trait::async_trait]
impl RateSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn quote(&self, request: &RateRequest) -> anyhow::Result<Option<CarrierQuote>> {
        Ok(Some(CarrierQuote {
            carrier_id: self.carrier_id.to_string(),
            carrier_name: self.carrier_id.to_string(),
            total_cost: 85.0,
            delivery_days_min: 2,
            delivery_days_max: 4,
            strategy: request.strategy,
            score: None,
            rate_card_id: None,
            cost_breakdown: None,
            source: self.source,
            alternatives: Vec::new(),
        }))
    }
}

fn request() -> RateRequest {
    RateRequest {
        origin_location_code: "BLR-01".to_string(),
        destination_postal_code: "110016".to_string(),
        weight_kg: 1.2,
        dimensions: None,
        payment_mode: None,
        order_value: Some(1999.0),
        strategy: CarrierAllocationStrategy::CheapestFirst,
    }
}

#[tokio::test]
async fn primary_quote_wins_when_available() {
    let selector = CarrierSelector {
        primary: Arc::new(StaticSource {
            carrier_id: "primary-carrier",
            source: QuoteSource::PricingEngine,
        }),
        fallback: Arc::new(StaticSource {
            carrier_id: "legacy-carrier",
            source: QuoteSource::LegacyRateTable,
        }),
    };

    let quote = selector.select(&request()).await.unwrap();
    assert_eq!(quote.carrier_id, "primary-carrier");
    assert_eq!(quote.source, QuoteSource::PricingEngine);
}

#[tokio::test]
async fn fallback_is_used_when_primary_errors() {
    let selector = CarrierSelector {
        primary: Arc::new(ErroringSource),
        fallback: Arc::new(StaticSource {
            carrier_id: "legacy-carrier",
            source: QuoteSource::LegacyRateTable,
        }),
    };

    let quote = selector.select(&request()).await.unwrap();
    assert_eq!(quote.carrier_id, "legacy-carrier");
    assert_eq!(quote.source, QuoteSource::LegacyRateTable);
}

#[tokio::test]
async fn fallback_is_used_when_primary_has_no_route() {
    let selector = CarrierSelector {
        primary: Arc::new(NoRouteSource),
        fallback: Arc::new(StaticSource {
            carrier_id: "legacy-carrier",
            source: QuoteSource::LegacyRateTable,
        }),
    };

    let quote = selector.select(&request()).await.unwrap();
    assert_eq!(quote.source, QuoteSource::LegacyRateTable);
}

#[tokio::test]
async fn total_failure_yields_no_quote_instead_of_error() {
    let selector = CarrierSelector {
        primary: Arc::new(ErroringSource),
        fallback: Arc::new(ErroringSource),
    };

    assert!(selector.select(&request()).await.is_none());
}
