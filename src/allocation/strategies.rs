use crate::allocation::scorer::{rank_candidates, score_candidate};
use crate::allocation::types::{CandidateLocation, FactorWeights, StrategySelection};
use crate::domain::rule::{AllocationRule, AllocationStrategy, PriorityFactor};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared contract for the closed strategy set: try to pick a location from
/// the payment-filtered candidates, or fail this rule.
pub trait LocationStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn try_allocate(
        &self,
        rule: &AllocationRule,
        candidates: &[CandidateLocation],
        weights: &FactorWeights,
    ) -> Option<StrategySelection>;

    /// Factor order used when the rule does not configure one.
    fn default_factors(&self) -> &'static [PriorityFactor];
}

/// The rule's configured factor order wins; the strategy supplies the default.
pub fn effective_factors<'a>(
    rule: &'a AllocationRule,
    strategy: &dyn LocationStrategy,
) -> &'a [PriorityFactor] {
    if rule.priority_factors.is_empty() {
        strategy.default_factors()
    } else {
        &rule.priority_factors
    }
}

fn select_by_score(
    rule: &AllocationRule,
    strategy: &dyn LocationStrategy,
    candidates: &[CandidateLocation],
    weights: &FactorWeights,
) -> Option<StrategySelection> {
    let factors = effective_factors(rule, strategy);
    let ranked = rank_candidates(candidates, factors, weights);
    let selected = ranked.iter().find(|c| c.has_stock)?.clone();
    let reason = format!(
        "{}(score={:.4},candidates={})",
        strategy.name(),
        selected.score,
        ranked.len()
    );
    Some(StrategySelection {
        selected,
        ranked,
        reason,
    })
}

pub struct NearestStrategy;

impl LocationStrategy for NearestStrategy {
    fn name(&self) -> &'static str {
        "nearest"
    }

    fn default_factors(&self) -> &'static [PriorityFactor] {
        &[PriorityFactor::Proximity, PriorityFactor::Inventory]
    }

    fn try_allocate(
        &self,
        rule: &AllocationRule,
        candidates: &[CandidateLocation],
        weights: &FactorWeights,
    ) -> Option<StrategySelection> {
        select_by_score(rule, self, candidates, weights)
    }
}

pub struct CostOptimizedStrategy;

impl LocationStrategy for CostOptimizedStrategy {
    fn name(&self) -> &'static str {
        "cost_optimized"
    }

    fn default_factors(&self) -> &'static [PriorityFactor] {
        &[PriorityFactor::Cost, PriorityFactor::Sla, PriorityFactor::Proximity]
    }

    fn try_allocate(
        &self,
        rule: &AllocationRule,
        candidates: &[CandidateLocation],
        weights: &FactorWeights,
    ) -> Option<StrategySelection> {
        select_by_score(rule, self, candidates, weights)
    }
}

pub struct PriorityStrategy;

impl LocationStrategy for PriorityStrategy {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn default_factors(&self) -> &'static [PriorityFactor] {
        &[
            PriorityFactor::Proximity,
            PriorityFactor::Inventory,
            PriorityFactor::Cost,
            PriorityFactor::Sla,
        ]
    }

    fn try_allocate(
        &self,
        rule: &AllocationRule,
        candidates: &[CandidateLocation],
        weights: &FactorWeights,
    ) -> Option<StrategySelection> {
        select_by_score(rule, self, candidates, weights)
    }
}

/// Succeeds only when the rule's pinned location is among the filtered
/// candidates and passes the stock check.
pub struct FixedStrategy;

impl LocationStrategy for FixedStrategy {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn default_factors(&self) -> &'static [PriorityFactor] {
        &[PriorityFactor::Proximity, PriorityFactor::Inventory]
    }

    fn try_allocate(
        &self,
        rule: &AllocationRule,
        candidates: &[CandidateLocation],
        weights: &FactorWeights,
    ) -> Option<StrategySelection> {
        let target = rule.fixed_location_id?;
        let candidate = candidates
            .iter()
            .find(|c| c.record.location_id == target && c.has_stock)?;
        let selected = score_candidate(candidate, self.default_factors(), weights);
        let reason = format!("fixed(location={})", selected.location_code);
        Some(StrategySelection {
            ranked: vec![selected.clone()],
            selected,
            reason,
        })
    }
}

/// First stocked candidate in serviceability rank order.
pub struct FifoStrategy;

impl LocationStrategy for FifoStrategy {
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn default_factors(&self) -> &'static [PriorityFactor] {
        &[PriorityFactor::Proximity]
    }

    fn try_allocate(
        &self,
        rule: &AllocationRule,
        candidates: &[CandidateLocation],
        weights: &FactorWeights,
    ) -> Option<StrategySelection> {
        let factors = effective_factors(rule, self);
        let mut ordered: Vec<&CandidateLocation> = candidates.iter().collect();
        ordered.sort_by(|a, b| {
            a.record
                .priority_rank
                .cmp(&b.record.priority_rank)
                .then(a.record.location_code.cmp(&b.record.location_code))
        });

        let ranked: Vec<_> = ordered
            .iter()
            .map(|c| score_candidate(c, factors, weights))
            .collect();
        let selected = ranked.iter().find(|c| c.has_stock)?.clone();
        let reason = format!("fifo(rank={})", selected.priority_rank);
        Some(StrategySelection {
            selected,
            ranked,
            reason,
        })
    }
}

/// Rotates across stocked candidates. The cursor is in-process state; the
/// rotation order itself stays deterministic (rank, then code).
pub struct RoundRobinStrategy {
    counter: AtomicUsize,
}

impl RoundRobinStrategy {
    pub fn new() -> Self {
        Self {
            counter: AtomicUsize::new(0),
        }
    }
}

impl Default for RoundRobinStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationStrategy for RoundRobinStrategy {
    fn name(&self) -> &'static str {
        "round_robin"
    }

    fn default_factors(&self) -> &'static [PriorityFactor] {
        &[PriorityFactor::Proximity]
    }

    fn try_allocate(
        &self,
        rule: &AllocationRule,
        candidates: &[CandidateLocation],
        weights: &FactorWeights,
    ) -> Option<StrategySelection> {
        let factors = effective_factors(rule, self);
        let mut stocked: Vec<&CandidateLocation> =
            candidates.iter().filter(|c| c.has_stock).collect();
        if stocked.is_empty() {
            return None;
        }
        stocked.sort_by(|a, b| {
            a.record
                .priority_rank
                .cmp(&b.record.priority_rank)
                .then(a.record.location_code.cmp(&b.record.location_code))
        });

        let idx = self.counter.fetch_add(1, Ordering::Relaxed) % stocked.len();
        let ranked: Vec<_> = stocked
            .iter()
            .map(|c| score_candidate(c, factors, weights))
            .collect();
        let selected = ranked[idx].clone();
        let reason = format!("round_robin(index={},total={})", idx, stocked.len());
        Some(StrategySelection {
            selected,
            ranked,
            reason,
        })
    }
}

/// One instance of every strategy, held by the service for the lifetime of
/// the process so the round-robin cursor survives across requests.
pub struct StrategySet {
    nearest: NearestStrategy,
    fixed: FixedStrategy,
    round_robin: RoundRobinStrategy,
    cost_optimized: CostOptimizedStrategy,
    priority: PriorityStrategy,
    fifo: FifoStrategy,
}

impl StrategySet {
    pub fn new() -> Self {
        Self {
            nearest: NearestStrategy,
            fixed: FixedStrategy,
            round_robin: RoundRobinStrategy::new(),
            cost_optimized: CostOptimizedStrategy,
            priority: PriorityStrategy,
            fifo: FifoStrategy,
        }
    }

    pub fn for_strategy(&self, strategy: AllocationStrategy) -> &dyn LocationStrategy {
        match strategy {
            AllocationStrategy::Nearest => &self.nearest,
            AllocationStrategy::Fixed => &self.fixed,
            AllocationStrategy::RoundRobin => &self.round_robin,
            AllocationStrategy::CostOptimized => &self.cost_optimized,
            AllocationStrategy::Priority => &self.priority,
            AllocationStrategy::Fifo => &self.fifo,
        }
    }
}

impl Default for StrategySet {
    fn default() -> Self {
        Self::new()
    }
}
