use crate::models::DbSubject;
use eyre::Result;
use schooltime_core::models::subject::NewSubject;
use sqlx::{Pool, Postgres};

pub async fn list_subjects(pool: &Pool<Postgres>) -> Result<Vec<DbSubject>> {
    let subjects = sqlx::query_as::<_, DbSubject>(
        r#"
        SELECT id, name, code, department, created_at
        FROM subjects
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(subjects)
}

pub async fn get_subject_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbSubject>> {
    let subject = sqlx::query_as::<_, DbSubject>(
        r#"
        SELECT id, name, code, department, created_at
        FROM subjects
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(subject)
}

pub async fn get_subject_by_code(pool: &Pool<Postgres>, code: &str) -> Result<Option<DbSubject>> {
    let subject = sqlx::query_as::<_, DbSubject>(
        r#"
        SELECT id, name, code, department, created_at
        FROM subjects
        WHERE code = $1
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;

    Ok(subject)
}

pub async fn create_subject(pool: &Pool<Postgres>, subject: &NewSubject) -> Result<DbSubject> {
    let created = sqlx::query_as::<_, DbSubject>(
        r#"
        INSERT INTO subjects (name, code, department)
        VALUES ($1, $2, $3)
        RETURNING id, name, code, department, created_at
        "#,
    )
    .bind(&subject.name)
    .bind(&subject.code)
    .bind(&subject.department)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn update_subject(
    pool: &Pool<Postgres>,
    id: i64,
    subject: &NewSubject,
) -> Result<Option<DbSubject>> {
    let updated = sqlx::query_as::<_, DbSubject>(
        r#"
        UPDATE subjects
        SET name = $2, code = $3, department = $4
        WHERE id = $1
        RETURNING id, name, code, department, created_at
        "#,
    )
    .bind(id)
    .bind(&subject.name)
    .bind(&subject.code)
    .bind(&subject.department)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

/// Returns whether a row was deleted.
pub async fn delete_subject(pool: &Pool<Postgres>, id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM subjects
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
