use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub const ACTIVE_YEAR_INDEX: &str = "uniq_academic_years_active";
pub const ACTIVE_TERM_INDEX: &str = "uniq_terms_active_per_year";
pub const SUBJECT_CODE_CONSTRAINT: &str = "uniq_subjects_code";
pub const TIMETABLE_CLASS_TERM_CONSTRAINT: &str = "uniq_timetables_class_term";
pub const SLOT_CLASS_PERIOD_CONSTRAINT: &str = "uniq_slots_timetable_period";
pub const SLOT_TEACHER_PERIOD_INDEX: &str = "uniq_slots_teacher_period";
pub const SLOT_ROOM_PERIOD_INDEX: &str = "uniq_slots_room_period";

/// One statement per entry; every statement is idempotent.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS academic_years (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        start_date DATE NOT NULL,
        end_date DATE NOT NULL,
        active BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT valid_year_range CHECK (end_date >= start_date)
    )
    "#,
    // At most one active academic year.
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS uniq_academic_years_active
        ON academic_years (active) WHERE active
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS terms (
        id BIGSERIAL PRIMARY KEY,
        academic_year_id BIGINT NOT NULL REFERENCES academic_years(id),
        name VARCHAR(255) NOT NULL,
        start_date DATE NOT NULL,
        end_date DATE NOT NULL,
        active BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT valid_term_range CHECK (end_date >= start_date)
    )
    "#,
    // At most one active term per academic year.
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS uniq_terms_active_per_year
        ON terms (academic_year_id) WHERE active
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS classes (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        level VARCHAR(64) NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    ALTER TABLE classes ADD COLUMN IF NOT EXISTS level VARCHAR(64) NULL
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS subjects (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        code VARCHAR(64) NOT NULL,
        department VARCHAR(255) NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT uniq_subjects_code UNIQUE (code)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS staff (
        id BIGSERIAL PRIMARY KEY,
        full_name VARCHAR(255) NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS rooms (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS timetables (
        id BIGSERIAL PRIMARY KEY,
        class_id BIGINT NOT NULL REFERENCES classes(id),
        term_id BIGINT NOT NULL REFERENCES terms(id),
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT uniq_timetables_class_term UNIQUE (class_id, term_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS timetable_slots (
        id BIGSERIAL PRIMARY KEY,
        timetable_id BIGINT NOT NULL REFERENCES timetables(id) ON DELETE CASCADE,
        term_id BIGINT NOT NULL REFERENCES terms(id),
        day_of_week INTEGER NOT NULL,
        period INTEGER NOT NULL,
        subject_id BIGINT NOT NULL REFERENCES subjects(id),
        teacher_id BIGINT NULL REFERENCES staff(id),
        room_id BIGINT NULL REFERENCES rooms(id),
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 1 AND 7),
        CONSTRAINT valid_period CHECK (period >= 1),
        CONSTRAINT uniq_slots_timetable_period UNIQUE (timetable_id, day_of_week, period)
    )
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS uniq_slots_teacher_period
        ON timetable_slots (term_id, day_of_week, period, teacher_id)
        WHERE teacher_id IS NOT NULL
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS uniq_slots_room_period
        ON timetable_slots (term_id, day_of_week, period, room_id)
        WHERE room_id IS NOT NULL
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_terms_academic_year_id ON terms(academic_year_id)
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_timetables_term_id ON timetables(term_id)
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_timetable_slots_cell
        ON timetable_slots (term_id, day_of_week, period)
    "#,
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
