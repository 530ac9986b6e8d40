use fulfillment_engine::allocation::evaluator::evaluate_rules;
use fulfillment_engine::allocation::strategies::StrategySet;
use fulfillment_engine::allocation::types::{
    CandidateLocation, EvaluationOutcome, FactorWeights, FailureKind,
};
use fulfillment_engine::domain::order::PaymentMode;
use fulfillment_engine::domain::rule::{AllocationRule, AllocationStrategy};
use fulfillment_engine::domain::serviceability::ServiceabilityRecord;
use uuid::Uuid;

fn candidate(code: &str, rank: i32, has_stock: bool, cod: bool) -> CandidateLocation {
    CandidateLocation {
        record: ServiceabilityRecord {
            location_id: Uuid::new_v4(),
            location_code: code.to_string(),
            location_name: format!("{code} warehouse"),
            postal_code: "110016".to_string(),
            is_serviceable: true,
            cod_available: cod,
            prepaid_available: true,
            estimated_days: Some(3),
            shipping_cost: Some(60.0),
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

// Scenario: W1 has the worse rank and no stock for the requested SKU, W2 has
// the better rank and stock. NEAREST must land on W2.
#[test]
fn nearest_allocates_to_stocked_better_ranked_warehouse() {
    let strategies = StrategySet::new();
    let weights = FactorWeights::default();
    let w1 = candidate("W1", 2, false, true);
    let w2 = candidate("W2", 1, true, true);
    let rules = vec![rule("nearest-active", 1, AllocationStrategy::Nearest)];

    match evaluate_rules(&rules, &[w1, w2], None, &weights, &strategies) {
        EvaluationOutcome::Allocated(success) => {
            assert_eq!(success.selection.selected.location_code, "W2");
            assert_eq!(success.rule.rule_name, "nearest-active");
        }
        EvaluationOutcome::Failed(f) => panic!("expected allocation, got: {}", f.reason),
    }
}

// R1 pins a location that cannot satisfy the order; R2 must be reached and
// reported as the applied rule.
#[test]
fn rule_priority_is_respected_when_fixed_target_lacks_stock() {
    let strategies = StrategySet::new();
    let weights = FactorWeights::default();
    let location_a = candidate("A", 3, false, true);
    let location_b = candidate("B", 1, true, true);

    let mut r1 = rule("fixed-a", 1, AllocationStrategy::Fixed);
    r1.fixed_location_id = Some(location_a.record.location_id);
    let r2 = rule("nearest-fallback", 2, AllocationStrategy::Nearest);

    match evaluate_rules(&[r1, r2], &[location_a, location_b], None, &weights, &strategies) {
        EvaluationOutcome::Allocated(success) => {
            assert_eq!(success.rule.rule_name, "nearest-fallback");
            assert_eq!(success.selection.selected.location_code, "B");
        }
        EvaluationOutcome::Failed(f) => panic!("expected allocation, got: {}", f.reason),
    }
}

#[test]
fn cod_incapable_candidate_is_never_selected_for_cod_orders() {
    let strategies = StrategySet::new();
    let weights = FactorWeights::default();
    // Best rank, has stock, but no COD support.
    let no_cod = candidate("NOCOD", 1, true, false);
    let with_cod = candidate("COD", 5, true, true);
    let rules = vec![rule("nearest", 1, AllocationStrategy::Nearest)];

    match evaluate_rules(
        &rules,
        &[no_cod, with_cod],
        Some(PaymentMode::Cod),
        &weights,
        &strategies,
    ) {
        EvaluationOutcome::Allocated(success) => {
            assert_eq!(success.selection.selected.location_code, "COD");
        }
        EvaluationOutcome::Failed(f) => panic!("expected allocation, got: {}", f.reason),
    }
}

#[test]
fn unstocked_candidate_is_never_selected_regardless_of_score() {
    let strategies = StrategySet::new();
    let weights = FactorWeights::default();
    let best_but_empty = candidate("EMPTY", 1, false, true);
    let worse_but_stocked = candidate("STOCKED", 9, true, true);
    let rules = vec![rule("nearest", 1, AllocationStrategy::Nearest)];

    match evaluate_rules(
        &rules,
        &[best_but_empty, worse_but_stocked],
        None,
        &weights,
        &strategies,
    ) {
        EvaluationOutcome::Allocated(success) => {
            assert_eq!(success.selection.selected.location_code, "STOCKED");
        }
        EvaluationOutcome::Failed(f) => panic!("expected allocation, got: {}", f.reason),
    }
}

// Scenario: a FIXED rule targets a stocked location that cannot take COD and
// no other rule exists. The failure must read as a payment-mode mismatch,
// not a stock problem.
#[test]
fn fixed_cod_mismatch_reports_payment_failure_not_stock() {
    let strategies = StrategySet::new();
    let weights = FactorWeights::default();
    let w3 = candidate("W3", 1, true, false);

    let mut fixed = rule("fixed-w3", 1, AllocationStrategy::Fixed);
    fixed.fixed_location_id = Some(w3.record.location_id);

    match evaluate_rules(&[fixed], &[w3], Some(PaymentMode::Cod), &weights, &strategies) {
        EvaluationOutcome::Failed(failure) => {
            assert_eq!(failure.kind, FailureKind::PaymentModeUnsupported);
            assert!(failure.reason.contains("COD"), "reason was: {}", failure.reason);
            assert!(!failure.reason.contains("inventory"), "reason was: {}", failure.reason);
        }
        EvaluationOutcome::Allocated(_) => panic!("expected failure"),
    }
}

// Scenario: order_value 15000 excludes the value-capped R1; unbounded R2
// applies and wins.
#[test]
fn value_bounded_rule_is_excluded_before_evaluation() {
    let strategies = StrategySet::new();
    let weights = FactorWeights::default();
    let order_value = Some(15_000.0);

    let mut r1 = rule("capped", 1, AllocationStrategy::Fixed);
    r1.max_order_value = Some(10_000.0);
    r1.fixed_location_id = Some(Uuid::new_v4());
    let r2 = rule("unbounded", 2, AllocationStrategy::Nearest);

    let applicable: Vec<AllocationRule> = [r1, r2]
        .into_iter()
        .filter(|r| r.applies_to(None, None, order_value))
        .collect();
    assert_eq!(applicable.len(), 1);
    assert_eq!(applicable[0].rule_name, "unbounded");

    let w = candidate("W1", 1, true, true);
    match evaluate_rules(&applicable, &[w], None, &weights, &strategies) {
        EvaluationOutcome::Allocated(success) => {
            assert_eq!(success.rule.rule_name, "unbounded");
        }
        EvaluationOutcome::Failed(f) => panic!("expected allocation, got: {}", f.reason),
    }
}

// Identical rules, candidates, and stock snapshot must reproduce the exact
// same decision: same location, same rule, same score.
#[test]
fn evaluation_is_deterministic_for_identical_inputs() {
    let strategies = StrategySet::new();
    let weights = FactorWeights::default();
    let candidates = vec![
        candidate("W1", 2, true, true),
        candidate("W2", 1, true, true),
        candidate("W3", 3, true, true),
    ];
    let rules = vec![rule("nearest", 1, AllocationStrategy::Nearest)];

    let first = evaluate_rules(&rules, &candidates, None, &weights, &strategies);
    let second = evaluate_rules(&rules, &candidates, None, &weights, &strategies);

    match (first, second) {
        (EvaluationOutcome::Allocated(a), EvaluationOutcome::Allocated(b)) => {
            assert_eq!(a.selection.selected.location_id, b.selection.selected.location_id);
            assert_eq!(a.rule.rule_id, b.rule.rule_id);
            assert_eq!(a.selection.selected.score, b.selection.selected.score);
        }
        _ => panic!("expected both evaluations to allocate"),
    }
}

#[test]
fn builtin_fallback_rule_allocates_when_no_rule_is_configured() {
    let strategies = StrategySet::new();
    let weights = FactorWeights::default();
    let w = candidate("W1", 1, true, true);
    let rules = vec![AllocationRule::fallback()];

    match evaluate_rules(&rules, &[w], None, &weights, &strategies) {
        EvaluationOutcome::Allocated(success) => {
            assert_eq!(success.rule.rule_name, "default-nearest");
            assert_eq!(success.rule.strategy, AllocationStrategy::Nearest);
        }
        EvaluationOutcome::Failed(f) => panic!("expected allocation, got: {}", f.reason),
    }
}

#[test]
fn exhausted_rules_surface_at_most_five_alternatives() {
    let strategies = StrategySet::new();
    let weights = FactorWeights::default();
    let candidates: Vec<_> = (0..9)
        .map(|i| candidate(&format!("W{i}"), i, false, true))
        .collect();
    let rules = vec![rule("nearest", 1, AllocationStrategy::Nearest)];

    match evaluate_rules(&rules, &candidates, None, &weights, &strategies) {
        EvaluationOutcome::Failed(failure) => {
            assert_eq!(failure.kind, FailureKind::InsufficientInventory);
            assert_eq!(failure.alternatives.len(), 5);
        }
        EvaluationOutcome::Allocated(_) => panic!("expected failure"),
    }
}
