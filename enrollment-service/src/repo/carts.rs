use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A pending, unpaid class selection owned by a student. Carries a snapshot
/// of the class fields the cart page renders.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SelectedClass {
    pub id: Uuid,
    pub class_id: Uuid,
    pub email: String,
    pub name: String,
    pub image: Option<String>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSelectedClass {
    pub class_id: Uuid,
    pub email: String,
    pub name: String,
    pub image: Option<String>,
    pub price: f64,
}

pub async fn list_by_email(db: &PgPool, email: &str) -> Result<Vec<SelectedClass>> {
    let rows = sqlx::query_as::<_, SelectedClass>(
        r#"SELECT id, class_id, email, name, image, price, created_at
           FROM selected_classes WHERE email = $1 ORDER BY created_at DESC"#,
    )
    .bind(email)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert(db: &PgPool, new: &NewSelectedClass) -> Result<SelectedClass> {
    let row = sqlx::query_as::<_, SelectedClass>(
        r#"INSERT INTO selected_classes (id, class_id, email, name, image, price)
           VALUES ($1, $2, $3, $4, $5, $6)
           RETURNING id, class_id, email, name, image, price, created_at"#,
    )
    .bind(Uuid::new_v4())
    .bind(new.class_id)
    .bind(&new.email)
    .bind(&new.name)
    .bind(&new.image)
    .bind(new.price)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Cart rows belong to their email; deleting someone else's row is a no-op.
pub async fn delete(db: &PgPool, id: Uuid, email: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM selected_classes WHERE id = $1 AND email = $2")
        .bind(id)
        .bind(email)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
