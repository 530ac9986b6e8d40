use crate::domain::order::PaymentMode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationStrategy {
    Nearest,
    Fixed,
    RoundRobin,
    CostOptimized,
    Priority,
    Fifo,
}

impl AllocationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStrategy::Nearest => "NEAREST",
            AllocationStrategy::Fixed => "FIXED",
            AllocationStrategy::RoundRobin => "ROUND_ROBIN",
            AllocationStrategy::CostOptimized => "COST_OPTIMIZED",
            AllocationStrategy::Priority => "PRIORITY",
            AllocationStrategy::Fifo => "FIFO",
        }
    }

    pub fn parse(s: &str) -> Option<AllocationStrategy> {
        match s {
            "NEAREST" => Some(AllocationStrategy::Nearest),
            "FIXED" => Some(AllocationStrategy::Fixed),
            "ROUND_ROBIN" => Some(AllocationStrategy::RoundRobin),
            "COST_OPTIMIZED" => Some(AllocationStrategy::CostOptimized),
            "PRIORITY" => Some(AllocationStrategy::Priority),
            "FIFO" => Some(AllocationStrategy::Fifo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityFactor {
    Proximity,
    Inventory,
    Cost,
    Sla,
}

impl PriorityFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityFactor::Proximity => "PROXIMITY",
            PriorityFactor::Inventory => "INVENTORY",
            PriorityFactor::Cost => "COST",
            PriorityFactor::Sla => "SLA",
        }
    }

    pub fn parse(s: &str) -> Option<PriorityFactor> {
        match s {
            "PROXIMITY" => Some(PriorityFactor::Proximity),
            "INVENTORY" => Some(PriorityFactor::Inventory),
            "COST" => Some(PriorityFactor::Cost),
            "SLA" => Some(PriorityFactor::Sla),
            _ => None,
        }
    }
}

/// A configured allocation policy. `channel_code = None` means the rule is
/// scoped to all channels; value bounds and payment mode are optional
/// applicability filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRule {
    pub rule_id: Uuid,
    pub rule_name: String,
    pub channel_code: Option<String>,
    pub priority: i32,
    pub strategy: AllocationStrategy,
    pub fixed_location_id: Option<Uuid>,
    pub priority_factors: Vec<PriorityFactor>,
    pub min_order_value: Option<f64>,
    pub max_order_value: Option<f64>,
    pub payment_mode: Option<PaymentMode>,
    pub allow_split: bool,
    pub max_splits: i32,
    pub is_active: bool,
}

impl AllocationRule {
    /// Built-in safety net used when no configured rule matches the request.
    pub fn fallback() -> AllocationRule {
        AllocationRule {
            rule_id: Uuid::nil(),
            rule_name: "default-nearest".to_string(),
            channel_code: None,
            priority: i32::MAX,
            strategy: AllocationStrategy::Nearest,
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

    pub fn applies_to(
        &self,
        channel_code: Option<&str>,
        payment_mode: Option<PaymentMode>,
        order_value: Option<f64>,
    ) -> bool {
        if !self.is_active {
            return false;
        }
        if let Some(scope) = &self.channel_code {
            if channel_code != Some(scope.as_str()) {
                return false;
            }
        }
        if let Some(required) = self.payment_mode {
            if payment_mode != Some(required) {
                return false;
            }
        }
        // A value-bounded rule cannot be verified against an unknown order
        // value, so it does not apply.
        if let Some(min) = self.min_order_value {
            match order_value {
                Some(v) if v >= min => {}
                _ => return false,
            }
        }
        if let Some(max) = self.max_order_value {
            match order_value {
                Some(v) if v <= max => {}
                _ => return false,
            }
        }
        true
    }
}
