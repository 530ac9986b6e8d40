use crate::domain::serviceability::ServiceabilityRecord;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct ServiceabilityRepo {
    pub pool: PgPool,
}

impl ServiceabilityRepo {
    /// Candidate locations for a destination: serviceable, active, owned by
    /// an active fulfillment-capable location, best rank first.
    pub async fn get_candidates(
        &self,
        postal_code: &str,
    ) -> anyhow::Result<Vec<ServiceabilityRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT s.location_id, l.location_code, l.location_name, s.postal_code,
                   s.is_serviceable, s.cod_available, s.prepaid_available,
                   s.estimated_days, s.shipping_cost, s.priority_rank, s.is_active
            FROM serviceability_records s
            JOIN locations l ON l.location_id = s.location_id
            WHERE s.postal_code = $1
              AND s.is_serviceable = true
              AND s.is_active = true
              AND l.is_active = true
              AND l.fulfillment_enabled = true
            ORDER BY s.priority_rank ASC, l.location_code ASC
            "#,
        )
        .bind(postal_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ServiceabilityRecord {
                location_id: r.get("location_id"),
                location_code: r.get("location_code"),
                location_name: r.get("location_name"),
                postal_code: r.get("postal_code"),
                is_serviceable: r.get("is_serviceable"),
                cod_available: r.get("cod_available"),
                prepaid_available: r.get("prepaid_available"),
                estimated_days: r.get("estimated_days"),
                shipping_cost: r.get("shipping_cost"),
                priority_rank: r.get("priority_rank"),
                is_active: r.get("is_active"),
            })
            .collect())
    }
}
