use crate::allocation::evaluator::{evaluate_rules, MAX_ALTERNATIVES};
use crate::allocation::strategies::StrategySet;
use crate::allocation::types::{
    AllocationFailure, AllocationSuccess, CandidateLocation, EvaluationOutcome, FailureKind,
    RankedCandidate,
};
use crate::carriers::selector::CarrierSelector;
use crate::carriers::{CarrierAllocationStrategy, CarrierQuote, RateRequest};
use crate::domain::decision::AllocationDecisionRecord;
use crate::domain::order::{
    AllocationRequest, AllocationResponse, AlternativeCandidate, ErrorEnvelope, ErrorPayload,
    PaymentMode,
};
use crate::domain::rule::AllocationRule;
use crate::domain::serviceability::ServiceabilityRecord;
use crate::repo::decisions_repo::DecisionsRepo;
use crate::repo::inventory_repo::InventoryRepo;
use crate::repo::orders_repo::OrdersRepo;
use crate::repo::serviceability_repo::ServiceabilityRepo;
use crate::service::config_cache::ConfigCache;
use crate::service::rule_cache::RuleCache;
use std::sync::Arc;
use uuid::Uuid;

const DEFAULT_WEIGHT_KG: f64 = 0.5;

#[derive(Clone)]
pub struct AllocationService {
    pub rule_cache: RuleCache,
    pub config_cache: ConfigCache,
    pub serviceability_repo: ServiceabilityRepo,
    pub inventory_repo: InventoryRepo,
    pub orders_repo: OrdersRepo,
    pub decisions_repo: DecisionsRepo,
    pub carrier_selector: Arc<CarrierSelector>,
    pub strategies: Arc<StrategySet>,
}

impl AllocationService {
    pub async fn allocate(
        &self,
        req: AllocationRequest,
    ) -> Result<AllocationResponse, (axum::http::StatusCode, ErrorEnvelope)> {
        validate_request(&req)?;

        let records = self
            .serviceability_repo
            .get_candidates(&req.destination_postal_code)
            .await
            .map_err(internal)?;

        // Hard, immediate failure: no rule is evaluated for an unserviceable
        // destination.
        if records.is_empty() {
            let failure = AllocationFailure {
                kind: FailureKind::LocationNotServiceable,
                reason: FailureKind::LocationNotServiceable.reason(req.payment_mode),
                alternatives: Vec::new(),
            };
            return Ok(self.finalize_failure(&req, failure).await);
        }

        // The request's channel wins; an order persisted with a channel fills
        // the gap when the caller omits it.
        let stored_order = self.orders_repo.get(req.order_id).await.map_err(internal)?;
        let channel_code = req
            .channel_code
            .clone()
            .or_else(|| stored_order.as_ref().and_then(|o| o.channel_code.clone()));

        let mut rules: Vec<AllocationRule> = self
            .rule_cache
            .active_rules()
            .await
            .map_err(internal)?
            .into_iter()
            .filter(|r| r.applies_to(channel_code.as_deref(), req.payment_mode, req.order_value))
            .collect();
        if rules.is_empty() {
            rules.push(AllocationRule::fallback());
        }

        let mut candidates = Vec::with_capacity(records.len());
        for record in records {
            let has_stock = self
                .inventory_repo
                .has_sufficient_stock(record.location_id, &req.requested_items)
                .await
                .map_err(internal)?;
            candidates.push(CandidateLocation { record, has_stock });
        }

        let weights = self.config_cache.factor_weights().await.map_err(internal)?;
        let outcome = evaluate_rules(
            &rules,
            &candidates,
            req.payment_mode,
            &weights,
            &self.strategies,
        );

        match outcome {
            EvaluationOutcome::Allocated(success) => {
                self.finalize_success(&req, &candidates, success).await
            }
            EvaluationOutcome::Failed(failure) => Ok(self.finalize_failure(&req, failure).await),
        }
    }

    async fn finalize_success(
        &self,
        req: &AllocationRequest,
        candidates: &[CandidateLocation],
        success: AllocationSuccess,
    ) -> Result<AllocationResponse, (axum::http::StatusCode, ErrorEnvelope)> {
        let selected = &success.selection.selected;
        let location_name = candidates
            .iter()
            .find(|c| c.record.location_id == selected.location_id)
            .map(|c| c.record.location_name.clone());

        let rate_request = RateRequest {
            origin_location_code: selected.location_code.clone(),
            destination_postal_code: req.destination_postal_code.clone(),
            weight_kg: req.weight_kg.unwrap_or(DEFAULT_WEIGHT_KG),
            dimensions: req.dimensions,
            payment_mode: req.payment_mode,
            order_value: req.order_value,
            strategy: req
                .carrier_allocation_strategy
                .unwrap_or(CarrierAllocationStrategy::CheapestFirst),
        };
        let quote = self.carrier_selector.select(&rate_request).await;

        let now = chrono::Utc::now();
        let mutated = self
            .orders_repo
            .mark_allocated(req.order_id, selected.location_id, now)
            .await
            .map_err(internal)?;
        if !mutated {
            tracing::debug!(order_id = %req.order_id, "order not in NEW/CONFIRMED, allocation recorded without mutation");
        }

        let factors = success.decision_factors();
        let mut top_ranked = success.selection.ranked.clone();
        top_ranked.truncate(MAX_ALTERNATIVES);

        let record = AllocationDecisionRecord {
            decision_id: Uuid::new_v4(),
            order_id: req.order_id,
            postal_code: req.destination_postal_code.clone(),
            is_allocated: true,
            location_id: Some(selected.location_id),
            rule_id: Some(success.rule.rule_id),
            rule_applied: Some(success.rule.rule_name.clone()),
            strategy: Some(success.rule.strategy.as_str().to_string()),
            decision_factors_json: serde_json::to_value(&factors)
                .unwrap_or(serde_json::Value::Null),
            candidates_json: serde_json::to_value(&top_ranked).unwrap_or(serde_json::Value::Null),
            carrier_id: quote.as_ref().map(|q| q.carrier_id.clone()),
            carrier_name: quote.as_ref().map(|q| q.carrier_name.clone()),
            carrier_source: quote.as_ref().map(|q| q.source.as_str().to_string()),
            estimated_shipping_cost: quote.as_ref().map(|q| q.total_cost),
            failure_reason: None,
            created_at: now,
        };
        self.log_decision(&record).await;

        Ok(build_success_response(req, selected, location_name, &success, quote))
    }

    async fn finalize_failure(
        &self,
        req: &AllocationRequest,
        failure: AllocationFailure,
    ) -> AllocationResponse {
        let record = AllocationDecisionRecord {
            decision_id: Uuid::new_v4(),
            order_id: req.order_id,
            postal_code: req.destination_postal_code.clone(),
            is_allocated: false,
            location_id: None,
            rule_id: None,
            rule_applied: None,
            strategy: None,
            decision_factors_json: serde_json::Value::Null,
            candidates_json: serde_json::to_value(&failure.alternatives)
                .unwrap_or(serde_json::Value::Null),
            carrier_id: None,
            carrier_name: None,
            carrier_source: None,
            estimated_shipping_cost: None,
            failure_reason: Some(failure.reason.clone()),
            created_at: chrono::Utc::now(),
        };
        self.log_decision(&record).await;

        AllocationResponse {
            order_id: req.order_id,
            is_allocated: false,
            location_id: None,
            location_code: None,
            location_name: None,
            rule_applied: None,
            allocation_type: None,
            decision_factors: None,
            carrier_id: None,
            carrier_name: None,
            carrier_source: None,
            estimated_delivery_days_min: None,
            estimated_delivery_days_max: None,
            estimated_shipping_cost: None,
            cost_breakdown: None,
            failure_reason: Some(failure.reason),
            alternatives: failure.alternatives.iter().map(to_alternative).collect(),
        }
    }

    /// The decision returned to the caller is already final; a failed log
    /// write is alerted on, never used to unwind the decision.
    async fn log_decision(&self, record: &AllocationDecisionRecord) {
        if let Err(e) = self.decisions_repo.insert(record).await {
            tracing::error!(
                order_id = %record.order_id,
                decision_id = %record.decision_id,
                error = %e,
                "failed to persist allocation decision"
            );
        }
    }

    /// Pincode-only dry check: which locations could service this
    /// destination under the given payment mode, ignoring stock.
    pub async fn check_serviceability(
        &self,
        postal_code: &str,
        payment_mode: Option<PaymentMode>,
    ) -> anyhow::Result<Vec<ServiceabilityRecord>> {
        let records = self.serviceability_repo.get_candidates(postal_code).await?;
        Ok(records
            .into_iter()
            .filter(|r| match payment_mode {
                Some(PaymentMode::Cod) => r.cod_available,
                Some(PaymentMode::Prepaid) => r.prepaid_available,
                None => true,
            })
            .collect())
    }
}

fn build_success_response(
    req: &AllocationRequest,
    selected: &RankedCandidate,
    location_name: Option<String>,
    success: &AllocationSuccess,
    quote: Option<CarrierQuote>,
) -> AllocationResponse {
    AllocationResponse {
        order_id: req.order_id,
        is_allocated: true,
        location_id: Some(selected.location_id),
        location_code: Some(selected.location_code.clone()),
        location_name,
        rule_applied: Some(success.rule.rule_name.clone()),
        allocation_type: Some(success.rule.strategy.as_str().to_string()),
        decision_factors: serde_json::to_value(success.decision_factors()).ok(),
        carrier_id: quote.as_ref().map(|q| q.carrier_id.clone()),
        carrier_name: quote.as_ref().map(|q| q.carrier_name.clone()),
        carrier_source: quote.as_ref().map(|q| q.source.as_str().to_string()),
        estimated_delivery_days_min: quote.as_ref().map(|q| q.delivery_days_min),
        estimated_delivery_days_max: quote.as_ref().map(|q| q.delivery_days_max),
        estimated_shipping_cost: quote.as_ref().map(|q| q.total_cost),
        cost_breakdown: quote.and_then(|q| q.cost_breakdown),
        failure_reason: None,
        alternatives: Vec::new(),
    }
}

fn to_alternative(c: &RankedCandidate) -> AlternativeCandidate {
    AlternativeCandidate {
        location_id: c.location_id,
        location_code: c.location_code.clone(),
        priority_rank: c.priority_rank,
        score: c.score,
        has_stock: c.has_stock,
        cod_available: c.cod_available,
        prepaid_available: c.prepaid_available,
    }
}

fn validate_request(
    req: &AllocationRequest,
) -> Result<(), (axum::http::StatusCode, ErrorEnvelope)> {
    if req.destination_postal_code.trim().is_empty() {
        return Err((
            axum::http::StatusCode::BAD_REQUEST,
            err("INVALID_POSTAL_CODE", "destination_postal_code is required"),
        ));
    }
    if req.requested_items.iter().any(|i| i.quantity <= 0) {
        return Err((
            axum::http::StatusCode::BAD_REQUEST,
            err("INVALID_QUANTITY", "requested quantities must be > 0"),
        ));
    }
    if req.weight_kg.is_some_and(|w| w < 0.0) {
        return Err((
            axum::http::StatusCode::BAD_REQUEST,
            err("INVALID_WEIGHT", "weight_kg must be >= 0"),
        ));
    }
    Ok(())
}

fn err(code: &str, message: &str) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorPayload {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        },
    }
}

fn internal(e: anyhow::Error) -> (axum::http::StatusCode, ErrorEnvelope) {
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        err("INTERNAL_ERROR", &e.to_string()),
    )
}
