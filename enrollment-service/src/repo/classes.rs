use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::POPULAR_LIMIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    Pending,
    Approved,
    Denied,
}

impl ClassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::Pending => "pending",
            ClassStatus::Approved => "approved",
            ClassStatus::Denied => "denied",
        }
    }

    pub fn from_str(value: &str) -> Option<ClassStatus> {
        match value {
            "pending" => Some(ClassStatus::Pending),
            "approved" => Some(ClassStatus::Approved),
            "denied" => Some(ClassStatus::Denied),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub instructor_name: String,
    pub instructor_email: String,
    pub price: f64,
    pub available_seats: i32,
    pub total_students: i32,
    pub status: String,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClass {
    pub name: String,
    pub image: Option<String>,
    pub instructor_name: String,
    pub instructor_email: String,
    pub price: f64,
    pub available_seats: i32,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClass {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub available_seats: Option<i32>,
}

pub async fn list_approved(db: &PgPool) -> Result<Vec<Class>> {
    let rows = sqlx::query_as::<_, Class>(
        r#"SELECT id, name, image, instructor_name, instructor_email, price,
                  available_seats, total_students, status, feedback, created_at
           FROM classes WHERE status = 'approved' ORDER BY created_at DESC"#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_all(db: &PgPool) -> Result<Vec<Class>> {
    let rows = sqlx::query_as::<_, Class>(
        r#"SELECT id, name, image, instructor_name, instructor_email, price,
                  available_seats, total_students, status, feedback, created_at
           FROM classes ORDER BY created_at DESC"#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn popular(db: &PgPool) -> Result<Vec<Class>> {
    let rows = sqlx::query_as::<_, Class>(
        r#"SELECT id, name, image, instructor_name, instructor_email, price,
                  available_seats, total_students, status, feedback, created_at
           FROM classes WHERE status = 'approved'
           ORDER BY total_students DESC
           LIMIT $1"#,
    )
    .bind(POPULAR_LIMIT)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, id: Uuid) -> Result<Option<Class>> {
    let row = sqlx::query_as::<_, Class>(
        r#"SELECT id, name, image, instructor_name, instructor_email, price,
                  available_seats, total_students, status, feedback, created_at
           FROM classes WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn by_instructor(db: &PgPool, email: &str) -> Result<Vec<Class>> {
    let rows = sqlx::query_as::<_, Class>(
        r#"SELECT id, name, image, instructor_name, instructor_email, price,
                  available_seats, total_students, status, feedback, created_at
           FROM classes WHERE instructor_email = $1 ORDER BY created_at DESC"#,
    )
    .bind(email)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// New submissions always start pending, whatever the payload claims.
pub async fn insert(db: &PgPool, new: &NewClass) -> Result<Class> {
    let row = sqlx::query_as::<_, Class>(
        r#"INSERT INTO classes (id, name, image, instructor_name, instructor_email,
                                price, available_seats, total_students, status)
           VALUES ($1, $2, $3, $4, $5, $6, $7, 0, 'pending')
           RETURNING id, name, image, instructor_name, instructor_email, price,
                     available_seats, total_students, status, feedback, created_at"#,
    )
    .bind(Uuid::new_v4())
    .bind(&new.name)
    .bind(&new.image)
    .bind(&new.instructor_name)
    .bind(&new.instructor_email)
    .bind(new.price)
    .bind(new.available_seats)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn set_status(db: &PgPool, id: Uuid, status: ClassStatus) -> Result<Option<Class>> {
    let row = sqlx::query_as::<_, Class>(
        r#"UPDATE classes SET status = $2
           WHERE id = $1
           RETURNING id, name, image, instructor_name, instructor_email, price,
                     available_seats, total_students, status, feedback, created_at"#,
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn set_feedback(db: &PgPool, id: Uuid, feedback: &str) -> Result<Option<Class>> {
    let row = sqlx::query_as::<_, Class>(
        r#"UPDATE classes SET feedback = $2
           WHERE id = $1
           RETURNING id, name, image, instructor_name, instructor_email, price,
                     available_seats, total_students, status, feedback, created_at"#,
    )
    .bind(id)
    .bind(feedback)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn update_fields(db: &PgPool, id: Uuid, fields: &UpdateClass) -> Result<Option<Class>> {
    let row = sqlx::query_as::<_, Class>(
        r#"UPDATE classes
           SET name = COALESCE($2, name),
               image = COALESCE($3, image),
               price = COALESCE($4, price),
               available_seats = COALESCE($5, available_seats)
           WHERE id = $1
           RETURNING id, name, image, instructor_name, instructor_email, price,
                     available_seats, total_students, status, feedback, created_at"#,
    )
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.image)
    .bind(fields.price)
    .bind(fields.available_seats)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// One successful enrollment: seats down by one, student count up by one.
/// The seat guard lives in the predicate, so concurrent calls can never
/// drive `available_seats` negative; a full class returns `None`.
pub async fn enroll(db: &PgPool, id: Uuid) -> Result<Option<Class>> {
    let row = sqlx::query_as::<_, Class>(
        r#"UPDATE classes
           SET total_students = total_students + 1,
               available_seats = available_seats - 1
           WHERE id = $1 AND available_seats > 0
           RETURNING id, name, image, instructor_name, instructor_email, price,
                     available_seats, total_students, status, feedback, created_at"#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips() {
        for status in [
            ClassStatus::Pending,
            ClassStatus::Approved,
            ClassStatus::Denied,
        ] {
            assert_eq!(ClassStatus::from_str(status.as_str()), Some(status));
        }
    }

    #[test]
    fn status_parse_is_strict() {
        assert_eq!(ClassStatus::from_str("Approved"), None);
        assert_eq!(ClassStatus::from_str(""), None);
    }
}
