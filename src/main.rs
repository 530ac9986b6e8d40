use axum::routing::{get, post};
use axum::Router;
use fulfillment_engine::allocation::strategies::StrategySet;
use fulfillment_engine::carriers::legacy_rates::LegacyRateSource;
use fulfillment_engine::carriers::pricing_engine::PricingEngineClient;
use fulfillment_engine::carriers::selector::CarrierSelector;
use fulfillment_engine::config::AppConfig;
use fulfillment_engine::repo::allocation_config_repo::AllocationConfigRepo;
use fulfillment_engine::repo::carrier_rates_repo::CarrierRatesRepo;
use fulfillment_engine::repo::decisions_repo::DecisionsRepo;
use fulfillment_engine::repo::inventory_repo::InventoryRepo;
use fulfillment_engine::repo::orders_repo::OrdersRepo;
use fulfillment_engine::repo::rules_repo::RulesRepo;
use fulfillment_engine::repo::serviceability_repo::ServiceabilityRepo;
use fulfillment_engine::service::allocation_service::AllocationService;
use fulfillment_engine::service::config_cache::ConfigCache;
use fulfillment_engine::service::rule_cache::RuleCache;
use fulfillment_engine::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let rules_repo = RulesRepo { pool: pool.clone() };
    let serviceability_repo = ServiceabilityRepo { pool: pool.clone() };
    let inventory_repo = InventoryRepo { pool: pool.clone() };
    let orders_repo = OrdersRepo { pool: pool.clone() };
    let decisions_repo = DecisionsRepo { pool: pool.clone() };
    let carrier_rates_repo = CarrierRatesRepo { pool: pool.clone() };
    let allocation_config_repo = AllocationConfigRepo { pool: pool.clone() };

    let rule_cache = RuleCache::new(
        rules_repo.clone(),
        std::time::Duration::from_secs(cfg.rule_cache_ttl_secs),
    );
    let config_cache = ConfigCache::new(
        allocation_config_repo,
        std::time::Duration::from_secs(cfg.config_cache_ttl_secs),
    );

    let carrier_selector = Arc::new(CarrierSelector {
        primary: Arc::new(PricingEngineClient {
            base_url: cfg.pricing_engine_base_url.clone(),
            api_key: cfg.pricing_engine_api_key.clone(),
            timeout_ms: cfg.pricing_engine_timeout_ms,
            client: reqwest::Client::new(),
        }),
        fallback: Arc::new(LegacyRateSource {
            rates_repo: carrier_rates_repo,
        }),
    });

    let allocation_service = AllocationService {
        rule_cache,
        config_cache,
        serviceability_repo,
        inventory_repo,
        orders_repo,
        decisions_repo: decisions_repo.clone(),
        carrier_selector,
        strategies: Arc::new(StrategySet::new()),
    };

    let state = AppState {
        allocation_service,
        rules_repo,
        decisions_repo,
    };

    let app = Router::new()
        .route("/health", get(fulfillment_engine::http::handlers::allocations::health))
        .route(
            "/allocations",
            post(fulfillment_engine::http::handlers::allocations::allocate),
        )
        .route(
            "/orders/:order_id/allocation-decisions",
            get(fulfillment_engine::http::handlers::decisions::list_for_order),
        )
        .route(
            "/allocation-decisions",
            get(fulfillment_engine::http::handlers::decisions::list_recent),
        )
        .route(
            "/serviceability/:postal_code",
            get(fulfillment_engine::http::handlers::serviceability::check),
        )
        .route(
            "/allocation-rules",
            get(fulfillment_engine::http::handlers::rules::list_applicable),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
