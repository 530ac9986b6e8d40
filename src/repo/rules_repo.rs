use crate::domain::order::PaymentMode;
use crate::domain::rule::{AllocationRule, AllocationStrategy, PriorityFactor};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct RulesRepo {
    pub pool: PgPool,
}

const RULE_COLUMNS: &str = "rule_id, rule_name, channel_code, priority, strategy, fixed_location_id, priority_factors, min_order_value, max_order_value, payment_mode, allow_split, max_splits, is_active";

fn map_rule(r: PgRow) -> AllocationRule {
    let strategy: String = r.get("strategy");
    let factors: Vec<String> = r.get("priority_factors");
    let payment_mode: Option<String> = r.get("payment_mode");
    AllocationRule {
        rule_id: r.get("rule_id"),
        rule_name: r.get("rule_name"),
        channel_code: r.get("channel_code"),
        priority: r.get("priority"),
        strategy: AllocationStrategy::parse(&strategy).unwrap_or(AllocationStrategy::Nearest),
        fixed_location_id: r.get("fixed_location_id"),
        priority_factors: factors.iter().filter_map(|f| PriorityFactor::parse(f)).collect(),
        min_order_value: r.get("min_order_value"),
        max_order_value: r.get("max_order_value"),
        payment_mode: payment_mode.as_deref().and_then(PaymentMode::parse),
        allow_split: r.get("allow_split"),
        max_splits: r.get("max_splits"),
        is_active: r.get("is_active"),
    }
}

impl RulesRepo {
    pub async fn list_active(&self) -> anyhow::Result<Vec<AllocationRule>> {
        let rows = sqlx::query(&format!(
            "SELECT {RULE_COLUMNS} FROM allocation_rules WHERE is_active = true ORDER BY priority ASC, rule_name ASC",
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(map_rule).collect())
    }

    /// Active rules matching channel scope (exact or ALL), payment mode, and
    /// order-value bounds, ascending priority. Bounded rules require a known
    /// order value.
    pub async fn get_applicable(
        &self,
        channel_code: Option<&str>,
        payment_mode: Option<PaymentMode>,
        order_value: Option<f64>,
    ) -> anyhow::Result<Vec<AllocationRule>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {RULE_COLUMNS}
            FROM allocation_rules
            WHERE is_active = true
              AND (channel_code IS NULL OR channel_code = $1)
              AND (payment_mode IS NULL OR payment_mode = $2)
              AND (min_order_value IS NULL OR ($3::double precision IS NOT NULL AND min_order_value <= $3))
              AND (max_order_value IS NULL OR ($3::double precision IS NOT NULL AND max_order_value >= $3))
            ORDER BY priority ASC, rule_name ASC
            "#,
        ))
        .bind(channel_code)
        .bind(payment_mode.map(|m| m.as_str()))
        .bind(order_value)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(map_rule).collect())
    }
}
