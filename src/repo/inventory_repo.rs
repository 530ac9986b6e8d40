use crate::domain::order::RequestedItem;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct InventoryRepo {
    pub pool: PgPool,
}

impl InventoryRepo {
    /// Snapshot read, already net of external reservations. Missing rows
    /// count as zero.
    pub async fn available_quantity(
        &self,
        location_id: Uuid,
        product_id: &str,
    ) -> anyhow::Result<i64> {
        let row = sqlx::query(
            "SELECT available_quantity FROM location_inventory WHERE location_id = $1 AND product_id = $2",
        )
        .bind(location_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.get::<i64, _>("available_quantity")).unwrap_or(0))
    }

    /// True iff every requested line is covered. Vacuously true for an empty
    /// list (pincode-only dry checks).
    pub async fn has_sufficient_stock(
        &self,
        location_id: Uuid,
        requested_items: &[RequestedItem],
    ) -> anyhow::Result<bool> {
        for item in requested_items {
            let available = self.available_quantity(location_id, &item.product_id).await?;
            if available < item.quantity as i64 {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
