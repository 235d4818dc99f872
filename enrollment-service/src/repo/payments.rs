use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Immutable record of a completed payment.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub email: String,
    pub class_id: Uuid,
    pub class_name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub email: String,
    pub class_id: Uuid,
    pub class_name: String,
    pub price: f64,
    /// Cart row consumed by this payment.
    pub selected_class_id: Uuid,
}

pub async fn list_by_email(db: &PgPool, email: &str) -> Result<Vec<Payment>> {
    let rows = sqlx::query_as::<_, Payment>(
        r#"SELECT id, email, class_id, class_name, price, created_at
           FROM payments WHERE email = $1 ORDER BY created_at DESC"#,
    )
    .bind(email)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Payment insert and cart removal commit or roll back together, so a paid
/// class can never linger in the cart. `None` means the named cart row does
/// not belong to this email (nothing is recorded).
pub async fn record(db: &PgPool, new: &NewPayment) -> Result<Option<Payment>> {
    let mut tx = db.begin().await?;

    let payment = sqlx::query_as::<_, Payment>(
        r#"INSERT INTO payments (id, email, class_id, class_name, price)
           VALUES ($1, $2, $3, $4, $5)
           RETURNING id, email, class_id, class_name, price, created_at"#,
    )
    .bind(Uuid::new_v4())
    .bind(&new.email)
    .bind(new.class_id)
    .bind(&new.class_name)
    .bind(new.price)
    .fetch_one(&mut *tx)
    .await?;

    let removed = sqlx::query("DELETE FROM selected_classes WHERE id = $1 AND email = $2")
        .bind(new.selected_class_id)
        .bind(&new.email)
        .execute(&mut *tx)
        .await?;

    if removed.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    tx.commit().await?;
    Ok(Some(payment))
}
