use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Read-only testimonial content; no mutation surface exists.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub name: String,
    pub review: String,
    pub rating: i32,
    pub image: Option<String>,
}

pub async fn list_all(db: &PgPool) -> Result<Vec<Review>> {
    let rows = sqlx::query_as::<_, Review>(
        "SELECT id, name, review, rating, image FROM client_reviews",
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}
