use sqlx::{PgPool, Row};

#[derive(Debug, Clone)]
pub struct CarrierRateRow {
    pub carrier_id: String,
    pub carrier_name: String,
    pub origin_location_code: String,
    pub destination_postal_code: String,
    pub base_rate: f64,
    pub per_kg_rate: f64,
    pub cod_supported: bool,
    pub min_days: i32,
    pub max_days: i32,
}

#[derive(Clone)]
pub struct CarrierRatesRepo {
    pub pool: PgPool,
}

impl CarrierRatesRepo {
    /// Legacy origin–destination rate lanes, cheapest first.
    pub async fn list_rates(
        &self,
        origin_location_code: &str,
        destination_postal_code: &str,
    ) -> anyhow::Result<Vec<CarrierRateRow>> {
        let rows = sqlx::query(
            r#"
            SELECT carrier_id, carrier_name, origin_location_code, destination_postal_code,
                   base_rate, per_kg_rate, cod_supported, min_days, max_days
            FROM carrier_rates
            WHERE is_active = true AND origin_location_code = $1 AND destination_postal_code = $2
            ORDER BY base_rate ASC, carrier_id ASC
            "#,
        )
        .bind(origin_location_code)
        .bind(destination_postal_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CarrierRateRow {
                carrier_id: r.get("carrier_id"),
                carrier_name: r.get("carrier_name"),
                origin_location_code: r.get("origin_location_code"),
                destination_postal_code: r.get("destination_postal_code"),
                base_rate: r.get("base_rate"),
                per_kg_rate: r.get("per_kg_rate"),
                cod_supported: r.get("cod_supported"),
                min_days: r.get("min_days"),
                max_days: r.get("max_days"),
            })
            .collect())
    }
}
