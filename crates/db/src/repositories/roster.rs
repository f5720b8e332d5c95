use crate::models::{DbClass, DbRoom, DbStaff};
use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::debug;

pub async fn list_classes(pool: &Pool<Postgres>) -> Result<Vec<DbClass>> {
    let classes = sqlx::query_as::<_, DbClass>(
        r#"
        SELECT id, name, level, created_at
        FROM classes
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(classes)
}

pub async fn create_class(
    pool: &Pool<Postgres>,
    name: &str,
    level: Option<&str>,
) -> Result<DbClass> {
    let class = sqlx::query_as::<_, DbClass>(
        r#"
        INSERT INTO classes (name, level)
        VALUES ($1, $2)
        RETURNING id, name, level, created_at
        "#,
    )
    .bind(name)
    .bind(level)
    .fetch_one(pool)
    .await?;

    debug!("Inserted class {} ({})", class.name, class.id);
    Ok(class)
}

pub async fn list_staff(pool: &Pool<Postgres>) -> Result<Vec<DbStaff>> {
    let staff = sqlx::query_as::<_, DbStaff>(
        r#"
        SELECT id, full_name, created_at
        FROM staff
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(staff)
}

pub async fn create_staff(pool: &Pool<Postgres>, full_name: &str) -> Result<DbStaff> {
    let member = sqlx::query_as::<_, DbStaff>(
        r#"
        INSERT INTO staff (full_name)
        VALUES ($1)
        RETURNING id, full_name, created_at
        "#,
    )
    .bind(full_name)
    .fetch_one(pool)
    .await?;

    Ok(member)
}

pub async fn list_rooms(pool: &Pool<Postgres>) -> Result<Vec<DbRoom>> {
    let rooms = sqlx::query_as::<_, DbRoom>(
        r#"
        SELECT id, name, created_at
        FROM rooms
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rooms)
}

pub async fn create_room(pool: &Pool<Postgres>, name: &str) -> Result<DbRoom> {
    let room = sqlx::query_as::<_, DbRoom>(
        r#"
        INSERT INTO rooms (name)
        VALUES ($1)
        RETURNING id, name, created_at
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(room)
}
