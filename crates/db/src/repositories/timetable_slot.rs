use crate::models::{DbSlotDetail, DbTimetableSlot};
use eyre::Result;
use schooltime_core::models::timetable::{ConflictQuery, NewSlot};
use sqlx::{Pool, Postgres};

const SLOT_DETAIL_SELECT: &str = r#"
    SELECT s.id, s.timetable_id, t.class_id, t.term_id, s.day_of_week, s.period,
           s.subject_id, sub.name AS subject_name, sub.code AS subject_code,
           s.teacher_id, st.full_name AS teacher_name,
           s.room_id, r.name AS room_name
    FROM timetable_slots s
    JOIN timetables t ON t.id = s.timetable_id
    JOIN subjects sub ON sub.id = s.subject_id
    LEFT JOIN staff st ON st.id = s.teacher_id
    LEFT JOIN rooms r ON r.id = s.room_id
"#;

pub async fn create_timetable_slot(pool: &Pool<Postgres>, slot: &NewSlot) -> Result<DbTimetableSlot> {
    let created = sqlx::query_as::<_, DbTimetableSlot>(
        r#"
        INSERT INTO timetable_slots
            (timetable_id, term_id, day_of_week, period, subject_id, teacher_id, room_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, timetable_id, term_id, day_of_week, period, subject_id, teacher_id,
                  room_id, created_at
        "#,
    )
    .bind(slot.timetable_id)
    .bind(slot.term_id)
    .bind(slot.day_of_week)
    .bind(slot.period)
    .bind(slot.subject_id)
    .bind(slot.teacher_id)
    .bind(slot.room_id)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn get_slot_details_by_timetable_id(
    pool: &Pool<Postgres>,
    timetable_id: i64,
) -> Result<Vec<DbSlotDetail>> {
    let sql = format!(
        "{SLOT_DETAIL_SELECT} WHERE s.timetable_id = $1 ORDER BY s.day_of_week ASC, s.period ASC"
    );

    let slots = sqlx::query_as::<_, DbSlotDetail>(&sql)
        .bind(timetable_id)
        .fetch_all(pool)
        .await?;

    Ok(slots)
}

/// Slots in the query's (term, day, period) cell sharing its class, teacher or room.
pub async fn find_colliding_slots(
    pool: &Pool<Postgres>,
    query: &ConflictQuery,
) -> Result<Vec<DbSlotDetail>> {
    let sql = format!(
        r#"{SLOT_DETAIL_SELECT}
        WHERE t.term_id = $1
          AND s.day_of_week = $2
          AND s.period = $3
          AND (
                t.class_id = $4
             OR ($5::BIGINT IS NOT NULL AND s.teacher_id = $5)
             OR ($6::BIGINT IS NOT NULL AND s.room_id = $6)
          )
        ORDER BY s.id ASC
        "#
    );

    tracing::debug!(
        "Finding slot collisions: term_id={}, day={}, period={}, class_id={}, teacher_id={:?}, room_id={:?}",
        query.term_id, query.day_of_week, query.period, query.class_id, query.teacher_id, query.room_id
    );

    let slots = sqlx::query_as::<_, DbSlotDetail>(&sql)
        .bind(query.term_id)
        .bind(query.day_of_week)
        .bind(query.period)
        .bind(query.class_id)
        .bind(query.teacher_id)
        .bind(query.room_id)
        .fetch_all(pool)
        .await?;

    Ok(slots)
}
