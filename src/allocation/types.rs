use crate::domain::order::PaymentMode;
use crate::domain::rule::{AllocationRule, PriorityFactor};
use crate::domain::serviceability::ServiceabilityRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A serviceable location under evaluation, with its stock check already
/// resolved against the requested items (vacuously true for an empty list).
#[derive(Debug, Clone)]
pub struct CandidateLocation {
    pub record: ServiceabilityRecord,
    pub has_stock: bool,
}

/// Tunable per-factor weights, loaded from `allocation_config`. Values are
/// clamped to [0, 1] at load so factor-order dominance survives tuning.
#[derive(Debug, Clone)]
pub struct FactorWeights {
    pub proximity_weight: f64,
    pub inventory_weight: f64,
    pub cost_weight: f64,
    pub sla_weight: f64,
}

impl FactorWeights {
    pub fn for_factor(&self, factor: PriorityFactor) -> f64 {
        match factor {
            PriorityFactor::Proximity => self.proximity_weight,
            PriorityFactor::Inventory => self.inventory_weight,
            PriorityFactor::Cost => self.cost_weight,
            PriorityFactor::Sla => self.sla_weight,
        }
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            proximity_weight: 1.0,
            inventory_weight: 1.0,
            cost_weight: 1.0,
            sla_weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub proximity: f64,
    pub inventory: f64,
    pub cost: f64,
    pub sla: f64,
    pub final_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub location_id: Uuid,
    pub location_code: String,
    pub priority_rank: i32,
    pub score: f64,
    pub has_stock: bool,
    pub cod_available: bool,
    pub prepaid_available: bool,
    pub breakdown: ScoreBreakdown,
}

/// What a strategy hands back when it succeeds: the winner plus the full
/// ranking it considered, for the decision trace.
#[derive(Debug, Clone)]
pub struct StrategySelection {
    pub selected: RankedCandidate,
    pub ranked: Vec<RankedCandidate>,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionFactors {
    pub rule_name: String,
    pub strategy: String,
    pub factors: Vec<String>,
    pub score: f64,
    pub candidates_evaluated: usize,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct AllocationSuccess {
    pub rule: AllocationRule,
    pub selection: StrategySelection,
    pub factors_used: Vec<PriorityFactor>,
}

impl AllocationSuccess {
    pub fn decision_factors(&self) -> DecisionFactors {
        DecisionFactors {
            rule_name: self.rule.rule_name.clone(),
            strategy: self.rule.strategy.as_str().to_string(),
            factors: self.factors_used.iter().map(|f| f.as_str().to_string()).collect(),
            score: self.selection.selected.score,
            candidates_evaluated: self.selection.ranked.len(),
            reason: self.selection.reason.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    LocationNotServiceable,
    PaymentModeUnsupported,
    InsufficientInventory,
}

impl FailureKind {
    pub fn reason(&self, payment_mode: Option<PaymentMode>) -> String {
        match self {
            FailureKind::LocationNotServiceable => "location not serviceable".to_string(),
            FailureKind::PaymentModeUnsupported => match payment_mode {
                Some(mode) => format!(
                    "no serviceable location supports payment mode {}",
                    mode.as_str()
                ),
                None => "no serviceable location supports the payment mode".to_string(),
            },
            FailureKind::InsufficientInventory => {
                "insufficient inventory at serviceable locations".to_string()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AllocationFailure {
    pub kind: FailureKind,
    pub reason: String,
    pub alternatives: Vec<RankedCandidate>,
}

#[derive(Debug, Clone)]
pub enum EvaluationOutcome {
    Allocated(AllocationSuccess),
    Failed(AllocationFailure),
}
