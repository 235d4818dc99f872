use anyhow::Result;
use chrono::{DateTime, Utc};
use common_auth::Role;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::POPULAR_LIMIT;

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Instructor listing enriched with the summed enrollment count of their
/// approved classes.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InstructorProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub number_of_students: i64,
}

pub async fn list_all(db: &PgPool) -> Result<Vec<User>> {
    let rows = sqlx::query_as::<_, User>(
        r#"SELECT id, name, email, photo_url, role, created_at
           FROM users ORDER BY created_at DESC"#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_instructors(db: &PgPool) -> Result<Vec<User>> {
    let rows = sqlx::query_as::<_, User>(
        r#"SELECT id, name, email, photo_url, role, created_at
           FROM users WHERE role = 'instructor' ORDER BY created_at DESC"#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn popular_instructors(db: &PgPool) -> Result<Vec<InstructorProfile>> {
    let rows = sqlx::query_as::<_, InstructorProfile>(
        r#"SELECT u.id, u.name, u.email, u.photo_url,
                  COALESCE(SUM(c.total_students), 0)::BIGINT AS number_of_students
           FROM users u
           LEFT JOIN classes c
             ON c.instructor_email = u.email AND c.status = 'approved'
           WHERE u.role = 'instructor'
           GROUP BY u.id, u.name, u.email, u.photo_url
           ORDER BY number_of_students DESC
           LIMIT $1"#,
    )
    .bind(POPULAR_LIMIT)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, User>(
        r#"SELECT id, name, email, photo_url, role, created_at
           FROM users WHERE email = $1"#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn role_by_email(db: &PgPool, email: &str) -> Result<Option<String>> {
    let role = sqlx::query_scalar::<_, String>("SELECT role FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(db)
        .await?;
    Ok(role)
}

/// Idempotent first-sign-in insert keyed by email. Returns `None` when the
/// email is already registered, leaving the stored row untouched.
pub async fn insert_if_absent(
    db: &PgPool,
    name: &str,
    email: &str,
    photo_url: Option<&str>,
) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, User>(
        r#"INSERT INTO users (id, name, email, photo_url, role)
           VALUES ($1, $2, $3, $4, 'none')
           ON CONFLICT (email) DO NOTHING
           RETURNING id, name, email, photo_url, role, created_at"#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(photo_url)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn set_role(db: &PgPool, id: Uuid, role: Role) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, User>(
        r#"UPDATE users SET role = $2
           WHERE id = $1
           RETURNING id, name, email, photo_url, role, created_at"#,
    )
    .bind(id)
    .bind(role.as_str())
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
