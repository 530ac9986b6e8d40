use crate::domain::order::OrderStatus;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct StoredOrder {
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub assigned_location_id: Option<Uuid>,
    pub channel_code: Option<String>,
    pub confirmed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub allocated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Clone)]
pub struct OrdersRepo {
    pub pool: PgPool,
}

impl OrdersRepo {
    pub async fn get(&self, order_id: Uuid) -> anyhow::Result<Option<StoredOrder>> {
        let row = sqlx::query(
            r#"
            SELECT order_id, status, assigned_location_id, channel_code, confirmed_at, allocated_at
            FROM orders WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| {
            let status: String = r.get("status");
            StoredOrder {
                order_id: r.get("order_id"),
                status: OrderStatus::parse(&status).unwrap_or(OrderStatus::New),
                assigned_location_id: r.get("assigned_location_id"),
                channel_code: r.get("channel_code"),
                confirmed_at: r.get("confirmed_at"),
                allocated_at: r.get("allocated_at"),
            }
        }))
    }

    /// Apply the allocation side effect. Gated in SQL so re-invocation on an
    /// order already past ALLOCATED is a no-op; `confirmed_at` is stamped
    /// only when not already set. Returns whether a row was mutated.
    pub async fn mark_allocated(
        &self,
        order_id: Uuid,
        location_id: Uuid,
        now: chrono::DateTime<chrono::Utc>,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET assigned_location_id = $2,
                allocated_at = $3,
                confirmed_at = COALESCE(confirmed_at, $3),
                status = 'ALLOCATED',
                updated_at = $3
            WHERE order_id = $1 AND status IN ('NEW', 'CONFIRMED')
            "#,
        )
        .bind(order_id)
        .bind(location_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
