use crate::allocation::scorer::clamp01;
use crate::allocation::types::FactorWeights;
use anyhow::Result;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct AllocationConfigRepo {
    pub pool: PgPool,
}

impl AllocationConfigRepo {
    /// Tunable factor weights. Clamped to [0, 1] so a misconfigured row
    /// cannot break factor-order dominance.
    pub async fn load_weights(&self) -> Result<FactorWeights> {
        let row = sqlx::query(
            "SELECT proximity_weight, inventory_weight, cost_weight, sla_weight FROM allocation_config WHERE config_id = 'default'",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(match row {
            Some(r) => FactorWeights {
                proximity_weight: clamp01(r.get("proximity_weight")),
                inventory_weight: clamp01(r.get("inventory_weight")),
                cost_weight: clamp01(r.get("cost_weight")),
                sla_weight: clamp01(r.get("sla_weight")),
            },
            None => FactorWeights::default(),
        })
    }
}
