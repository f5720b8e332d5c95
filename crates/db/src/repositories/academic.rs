use crate::models::{DbAcademicYear, DbTerm};
use eyre::Result;
use schooltime_core::models::academic::{NewAcademicYear, NewTerm};
use sqlx::{Pool, Postgres};

// Academic Year Repository

pub async fn get_active_academic_year(pool: &Pool<Postgres>) -> Result<Option<DbAcademicYear>> {
    let year = sqlx::query_as::<_, DbAcademicYear>(
        r#"
        SELECT id, name, start_date, end_date, active, created_at
        FROM academic_years
        WHERE active
        ORDER BY id ASC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(year)
}

pub async fn create_academic_year(
    pool: &Pool<Postgres>,
    year: &NewAcademicYear,
) -> Result<DbAcademicYear> {
    tracing::debug!(
        "Creating academic year: name={}, start={}, end={}, active={}",
        year.name, year.start_date, year.end_date, year.active
    );

    let created = sqlx::query_as::<_, DbAcademicYear>(
        r#"
        INSERT INTO academic_years (name, start_date, end_date, active)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, start_date, end_date, active, created_at
        "#,
    )
    .bind(&year.name)
    .bind(year.start_date)
    .bind(year.end_date)
    .bind(year.active)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

// Term Repository

pub async fn get_active_term(
    pool: &Pool<Postgres>,
    academic_year_id: i64,
) -> Result<Option<DbTerm>> {
    let term = sqlx::query_as::<_, DbTerm>(
        r#"
        SELECT id, academic_year_id, name, start_date, end_date, active, created_at
        FROM terms
        WHERE academic_year_id = $1 AND active
        ORDER BY id ASC
        LIMIT 1
        "#,
    )
    .bind(academic_year_id)
    .fetch_optional(pool)
    .await?;

    Ok(term)
}

pub async fn create_term(pool: &Pool<Postgres>, term: &NewTerm) -> Result<DbTerm> {
    tracing::debug!(
        "Creating term: academic_year_id={}, name={}, active={}",
        term.academic_year_id, term.name, term.active
    );

    let created = sqlx::query_as::<_, DbTerm>(
        r#"
        INSERT INTO terms (academic_year_id, name, start_date, end_date, active)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, academic_year_id, name, start_date, end_date, active, created_at
        "#,
    )
    .bind(term.academic_year_id)
    .bind(&term.name)
    .bind(term.start_date)
    .bind(term.end_date)
    .bind(term.active)
    .fetch_one(pool)
    .await?;

    Ok(created)
}
