use crate::allocation::scorer::rank_candidates;
use crate::allocation::strategies::{effective_factors, StrategySet};
use crate::allocation::types::{
    AllocationFailure, AllocationSuccess, CandidateLocation, EvaluationOutcome, FactorWeights,
    FailureKind, RankedCandidate,
};
use crate::domain::order::PaymentMode;
use crate::domain::rule::{AllocationRule, PriorityFactor};

/// Trace structures carried into the decision log are bounded to this many
/// candidates.
pub const MAX_ALTERNATIVES: usize = 5;

pub fn filter_by_payment_mode(
    candidates: &[CandidateLocation],
    payment_mode: Option<PaymentMode>,
) -> Vec<CandidateLocation> {
    candidates
        .iter()
        .filter(|c| match payment_mode {
            Some(PaymentMode::Cod) => c.record.cod_available,
            Some(PaymentMode::Prepaid) => c.record.prepaid_available,
            None => true,
        })
        .cloned()
        .collect()
}

/// Core first-success loop: rules in ascending priority, each rule sees the
/// payment-filtered candidate set, the first strategy that yields a selection
/// wins. On total exhaustion the failure distinguishes payment-mode
/// incompatibility from stock exhaustion and carries ranked alternatives for
/// manual override.
pub fn evaluate_rules(
    rules: &[AllocationRule],
    candidates: &[CandidateLocation],
    payment_mode: Option<PaymentMode>,
    weights: &FactorWeights,
    strategies: &StrategySet,
) -> EvaluationOutcome {
    if candidates.is_empty() {
        return EvaluationOutcome::Failed(AllocationFailure {
            kind: FailureKind::LocationNotServiceable,
            reason: FailureKind::LocationNotServiceable.reason(payment_mode),
            alternatives: Vec::new(),
        });
    }

    let mut any_payment_compatible = false;
    for rule in rules {
        let filtered = filter_by_payment_mode(candidates, payment_mode);
        if filtered.is_empty() {
            continue;
        }
        any_payment_compatible = true;

        let strategy = strategies.for_strategy(rule.strategy);
        if let Some(selection) = strategy.try_allocate(rule, &filtered, weights) {
            let factors_used = effective_factors(rule, strategy).to_vec();
            return EvaluationOutcome::Allocated(AllocationSuccess {
                rule: rule.clone(),
                selection,
                factors_used,
            });
        }
    }

    let kind = if any_payment_compatible {
        FailureKind::InsufficientInventory
    } else {
        FailureKind::PaymentModeUnsupported
    };
    EvaluationOutcome::Failed(AllocationFailure {
        kind,
        reason: kind.reason(payment_mode),
        alternatives: best_alternatives(candidates, weights),
    })
}

/// Ranked over the unfiltered candidate set so a payment-mode failure still
/// surfaces override options; bounded to the trace limit.
pub fn best_alternatives(
    candidates: &[CandidateLocation],
    weights: &FactorWeights,
) -> Vec<RankedCandidate> {
    let mut ranked = rank_candidates(
        candidates,
        &[PriorityFactor::Proximity, PriorityFactor::Inventory],
        weights,
    );
    ranked.truncate(MAX_ALTERNATIVES);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rule::AllocationStrategy;
    use crate::domain::serviceability::ServiceabilityRecord;
    use uuid::Uuid;

    fn candidate(code: &str, rank: i32, has_stock: bool, cod: bool) -> CandidateLocation {
        CandidateLocation {
            record: ServiceabilityRecord {
                location_id: Uuid::new_v4(),
                location_code: code.to_string(),
                location_name: code.to_string(),
                postal_code: "110016".to_string(),
                is_serviceable: true,
                cod_available: cod,
                prepaid_available: true,
                estimated_days: Some(3),
                shipping_cost: Some(55.0),
                priority_rank: rank,
                is_active: true,
            },
            has_stock,
        }
    }

    fn rule(name: &str, priority: i32, strategy: AllocationStrategy) -> AllocationRule {
        AllocationRule {
            rule_id: Uuid::new_v4(),
            rule_name: name.to_string(),
            channel_code: None,
            priority,
            strategy,
            fixed_location_id: None,
            priority_factors: Vec::new(),
            min_order_value: None,
            max_order_value: None,
            payment_mode: None,
            allow_split: false,
            max_splits: 1,
            is_active: true,
        }
    }

    #[test]
    fn nearest_picks_stocked_better_ranked_location() {
        let strategies = StrategySet::new();
        let weights = FactorWeights::default();
        let w1 = candidate("W1", 2, false, true);
        let w2 = candidate("W2", 1, true, true);
        let rules = vec![rule("nearest", 1, AllocationStrategy::Nearest)];

        match evaluate_rules(&rules, &[w1, w2], None, &weights, &strategies) {
            EvaluationOutcome::Allocated(success) => {
                assert_eq!(success.selection.selected.location_code, "W2");
            }
            EvaluationOutcome::Failed(f) => panic!("expected allocation, got {:?}", f.reason),
        }
    }

    #[test]
    fn failed_fixed_rule_falls_through_to_next_rule() {
        let strategies = StrategySet::new();
        let weights = FactorWeights::default();
        let w2 = candidate("W2", 1, true, true);

        let mut fixed = rule("pin-w3", 1, AllocationStrategy::Fixed);
        fixed.fixed_location_id = Some(Uuid::new_v4());
        let rules = vec![fixed, rule("nearest", 2, AllocationStrategy::Nearest)];

        match evaluate_rules(&rules, &[w2], None, &weights, &strategies) {
            EvaluationOutcome::Allocated(success) => {
                assert_eq!(success.rule.rule_name, "nearest");
            }
            EvaluationOutcome::Failed(f) => panic!("expected allocation, got {:?}", f.reason),
        }
    }

    #[test]
    fn cod_filter_empties_set_into_payment_failure() {
        let strategies = StrategySet::new();
        let weights = FactorWeights::default();
        let w1 = candidate("W1", 1, true, false);
        let rules = vec![rule("nearest", 1, AllocationStrategy::Nearest)];

        match evaluate_rules(&rules, &[w1], Some(PaymentMode::Cod), &weights, &strategies) {
            EvaluationOutcome::Failed(failure) => {
                assert_eq!(failure.kind, FailureKind::PaymentModeUnsupported);
                assert!(failure.reason.contains("COD"));
                assert_eq!(failure.alternatives.len(), 1);
            }
            EvaluationOutcome::Allocated(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn stock_exhaustion_is_reported_as_inventory_failure() {
        let strategies = StrategySet::new();
        let weights = FactorWeights::default();
        let w1 = candidate("W1", 1, false, true);
        let w2 = candidate("W2", 2, false, true);
        let rules = vec![rule("nearest", 1, AllocationStrategy::Nearest)];

        match evaluate_rules(&rules, &[w1, w2], Some(PaymentMode::Cod), &weights, &strategies) {
            EvaluationOutcome::Failed(failure) => {
                assert_eq!(failure.kind, FailureKind::InsufficientInventory);
            }
            EvaluationOutcome::Allocated(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn alternatives_are_bounded_to_trace_limit() {
        let weights = FactorWeights::default();
        let candidates: Vec<_> = (0..8)
            .map(|i| candidate(&format!("W{i}"), i, false, true))
            .collect();
        let alts = best_alternatives(&candidates, &weights);
        assert_eq!(alts.len(), MAX_ALTERNATIVES);
    }
}
