use crate::allocation::types::{CandidateLocation, FactorWeights, RankedCandidate, ScoreBreakdown};
use crate::domain::rule::PriorityFactor;

/// Geometric position decay applied to the rule's ordered factor list. With
/// per-factor contributions bounded by `decay^i`, the tail of all later
/// factors sums to 0.667 * decay^i, so an earlier factor always outranks the
/// combined later ones.
pub const POSITION_DECAY: f64 = 0.4;

pub fn clamp01(v: f64) -> f64 {
    if v < 0.0 {
        0.0
    } else if v > 1.0 {
        1.0
    } else {
        v
    }
}

/// Lower serviceability rank = preferred.
pub fn proximity_score(priority_rank: i32) -> f64 {
    1.0 / (1.0 + priority_rank.max(0) as f64)
}

pub fn inventory_score(has_stock: bool) -> f64 {
    if has_stock {
        1.0
    } else {
        0.0
    }
}

/// Zero when the shipping cost is unknown.
pub fn cost_score(shipping_cost: Option<f64>) -> f64 {
    match shipping_cost {
        Some(cost) => 1.0 / (1.0 + cost.max(0.0)),
        None => 0.0,
    }
}

pub fn sla_score(estimated_days: Option<i32>) -> f64 {
    match estimated_days {
        Some(days) => 1.0 / (1.0 + days.max(0) as f64),
        None => 0.0,
    }
}

fn raw_factor_score(candidate: &CandidateLocation, factor: PriorityFactor) -> f64 {
    match factor {
        PriorityFactor::Proximity => proximity_score(candidate.record.priority_rank),
        PriorityFactor::Inventory => inventory_score(candidate.has_stock),
        PriorityFactor::Cost => cost_score(candidate.record.shipping_cost),
        PriorityFactor::Sla => sla_score(candidate.record.estimated_days),
    }
}

pub fn score_candidate(
    candidate: &CandidateLocation,
    factors: &[PriorityFactor],
    weights: &FactorWeights,
) -> RankedCandidate {
    let mut breakdown = ScoreBreakdown {
        proximity: 0.0,
        inventory: 0.0,
        cost: 0.0,
        sla: 0.0,
        final_score: 0.0,
    };

    let mut total = 0.0;
    for (position, factor) in factors.iter().enumerate() {
        let raw = clamp01(raw_factor_score(candidate, *factor));
        let weight = clamp01(weights.for_factor(*factor));
        let contribution = raw * weight * POSITION_DECAY.powi(position as i32);
        total += contribution;
        match factor {
            PriorityFactor::Proximity => breakdown.proximity = contribution,
            PriorityFactor::Inventory => breakdown.inventory = contribution,
            PriorityFactor::Cost => breakdown.cost = contribution,
            PriorityFactor::Sla => breakdown.sla = contribution,
        }
    }
    breakdown.final_score = total;

    RankedCandidate {
        location_id: candidate.record.location_id,
        location_code: candidate.record.location_code.clone(),
        priority_rank: candidate.record.priority_rank,
        score: total,
        has_stock: candidate.has_stock,
        cod_available: candidate.record.cod_available,
        prepaid_available: candidate.record.prepaid_available,
        breakdown,
    }
}

/// Score and rank: score descending, then serviceability rank ascending, then
/// location code. The full order is deterministic so identical inputs always
/// reproduce the same decision.
pub fn rank_candidates(
    candidates: &[CandidateLocation],
    factors: &[PriorityFactor],
    weights: &FactorWeights,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .map(|candidate| score_candidate(candidate, factors, weights))
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.priority_rank.cmp(&b.priority_rank))
            .then(a.location_code.cmp(&b.location_code))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::serviceability::ServiceabilityRecord;
    use uuid::Uuid;

    fn candidate(code: &str, rank: i32, has_stock: bool, cost: Option<f64>, days: Option<i32>) -> CandidateLocation {
        CandidateLocation {
            record: ServiceabilityRecord {
                location_id: Uuid::new_v4(),
                location_code: code.to_string(),
                location_name: code.to_string(),
                postal_code: "110016".to_string(),
                is_serviceable: true,
                cod_available: true,
                prepaid_available: true,
                estimated_days: days,
                shipping_cost: cost,
                priority_rank: rank,
                is_active: true,
            },
            has_stock,
        }
    }

    #[test]
    fn better_rank_scores_higher_on_proximity() {
        let weights = FactorWeights::default();
        let factors = [PriorityFactor::Proximity];
        let near = score_candidate(&candidate("W1", 1, true, None, None), &factors, &weights);
        let far = score_candidate(&candidate("W2", 5, true, None, None), &factors, &weights);
        assert!(near.score > far.score);
    }

    #[test]
    fn unknown_cost_contributes_nothing() {
        let weights = FactorWeights::default();
        let factors = [PriorityFactor::Cost];
        let unknown = score_candidate(&candidate("W1", 1, true, None, None), &factors, &weights);
        assert_eq!(unknown.score, 0.0);
    }

    #[test]
    fn earlier_factor_outranks_all_later_ones() {
        let weights = FactorWeights::default();
        let factors = [PriorityFactor::Proximity, PriorityFactor::Cost, PriorityFactor::Sla];
        // Wins outright on proximity, loses on both later factors.
        let near = candidate("W1", 0, true, None, None);
        let far = candidate("W2", 9, true, Some(0.0), Some(0));
        let ranked = rank_candidates(&[far, near], &factors, &weights);
        assert_eq!(ranked[0].location_code, "W1");
    }

    #[test]
    fn ranking_breaks_score_ties_by_rank_then_code() {
        let weights = FactorWeights::default();
        let factors = [PriorityFactor::Inventory];
        let a = candidate("WB", 2, true, None, None);
        let b = candidate("WA", 2, true, None, None);
        let c = candidate("WC", 1, true, None, None);
        let ranked = rank_candidates(&[a, b, c], &factors, &weights);
        assert_eq!(ranked[0].location_code, "WC");
        assert_eq!(ranked[1].location_code, "WA");
        assert_eq!(ranked[2].location_code, "WB");
    }
}
