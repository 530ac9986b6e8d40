pub mod allocation {
    pub mod evaluator;
    pub mod scorer;
    pub mod strategies;
    pub mod types;
}
pub mod carriers;
pub mod config;
pub mod domain {
    pub mod decision;
    pub mod order;
    pub mod rule;
    pub mod serviceability;
}
pub mod http {
    pub mod handlers {
        pub mod allocations;
        pub mod decisions;
        pub mod rules;
        pub mod serviceability;
    }
}
pub mod repo {
    pub mod allocation_config_repo;
    pub mod carrier_rates_repo;
    pub mod decisions_repo;
    pub mod inventory_repo;
    pub mod orders_repo;
    pub mod rules_repo;
    pub mod serviceability_repo;
}
pub mod service {
    pub mod allocation_service;
    pub mod config_cache;
    pub mod rule_cache;
}

#[derive(Clone)]
pub struct AppState {
    pub allocation_service: service::allocation_service::AllocationService,
    pub rules_repo: repo::rules_repo::RulesRepo,
    pub decisions_repo: repo::decisions_repo::DecisionsRepo,
}
