use crate::domain::decision::AllocationDecisionRecord;
use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct DecisionsRepo {
    pub pool: PgPool,
}

const DECISION_COLUMNS: &str = "decision_id, order_id, postal_code, is_allocated, location_id, rule_id, rule_applied, strategy, decision_factors_json, candidates_json, carrier_id, carrier_name, carrier_source, estimated_shipping_cost, failure_reason, created_at";

fn map_decision(r: PgRow) -> AllocationDecisionRecord {
    AllocationDecisionRecord {
        decision_id: r.get("decision_id"),
        order_id: r.get("order_id"),
        postal_code: r.get("postal_code"),
        is_allocated: r.get("is_allocated"),
        location_id: r.get("location_id"),
        rule_id: r.get("rule_id"),
        rule_applied: r.get("rule_applied"),
        strategy: r.get("strategy"),
        decision_factors_json: r.get("decision_factors_json"),
        candidates_json: r.get("candidates_json"),
        carrier_id: r.get("carrier_id"),
        carrier_name: r.get("carrier_name"),
        carrier_source: r.get("carrier_source"),
        estimated_shipping_cost: r.get("estimated_shipping_cost"),
        failure_reason: r.get("failure_reason"),
        created_at: r.get("created_at"),
    }
}

impl DecisionsRepo {
    /// Append-only: each allocation attempt writes one new record, keyed by
    /// its own decision id, and is never updated afterwards.
    pub async fn insert(&self, record: &AllocationDecisionRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO allocation_decisions (
                decision_id, order_id, postal_code, is_allocated, location_id, rule_id,
                rule_applied, strategy, decision_factors_json, candidates_json,
                carrier_id, carrier_name, carrier_source, estimated_shipping_cost,
                failure_reason, created_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16)
            ON CONFLICT (decision_id) DO NOTHING
            "#,
        )
        .bind(record.decision_id)
        .bind(record.order_id)
        .bind(&record.postal_code)
        .bind(record.is_allocated)
        .bind(record.location_id)
        .bind(record.rule_id)
        .bind(&record.rule_applied)
        .bind(&record.strategy)
        .bind(&record.decision_factors_json)
        .bind(&record.candidates_json)
        .bind(&record.carrier_id)
        .bind(&record.carrier_name)
        .bind(&record.carrier_source)
        .bind(record.estimated_shipping_cost)
        .bind(&record.failure_reason)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list_by_order(&self, order_id: Uuid) -> Result<Vec<AllocationDecisionRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {DECISION_COLUMNS} FROM allocation_decisions WHERE order_id = $1 ORDER BY created_at DESC",
        ))
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(map_decision).collect())
    }

    pub async fn list_recent(
        &self,
        success: Option<bool>,
        limit: i64,
    ) -> Result<Vec<AllocationDecisionRecord>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {DECISION_COLUMNS}
            FROM allocation_decisions
            WHERE ($1::boolean IS NULL OR is_allocated = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        ))
        .bind(success)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(map_decision).collect())
    }
}
