use crate::models::DbTimetable;
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Inserts the (class, term) timetable or returns the existing row.
///
/// The no-op update makes `RETURNING` yield the existing row on conflict, so concurrent
/// first access cannot produce two timetables.
pub async fn upsert_timetable(
    pool: &Pool<Postgres>,
    class_id: i64,
    term_id: i64,
) -> Result<DbTimetable> {
    let timetable = sqlx::query_as::<_, DbTimetable>(
        r#"
        INSERT INTO timetables (class_id, term_id)
        VALUES ($1, $2)
        ON CONFLICT (class_id, term_id)
        DO UPDATE SET class_id = EXCLUDED.class_id
        RETURNING id, class_id, term_id, created_at
        "#,
    )
    .bind(class_id)
    .bind(term_id)
    .fetch_one(pool)
    .await?;

    Ok(timetable)
}
