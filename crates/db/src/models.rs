use chrono::{DateTime, NaiveDate, Utc};
use schooltime_core::models::{
    academic::{AcademicYear, Term},
    roster::{Room, SchoolClass, StaffMember},
    subject::Subject,
    timetable::{RoomSummary, SlotDetail, StaffSummary, SubjectSummary, Timetable, TimetableSlot},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAcademicYear {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTerm {
    pub id: i64,
    pub academic_year_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimetable {
    pub id: i64,
    pub class_id: i64,
    pub term_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimetableSlot {
    pub id: i64,
    pub timetable_id: i64,
    pub term_id: i64,
    pub day_of_week: i32,
    pub period: i32,
    pub subject_id: i64,
    pub teacher_id: Option<i64>,
    pub room_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// A slot joined with its timetable, subject, teacher and room.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlotDetail {
    pub id: i64,
    pub timetable_id: i64,
    pub class_id: i64,
    pub term_id: i64,
    pub day_of_week: i32,
    pub period: i32,
    pub subject_id: i64,
    pub subject_name: String,
    pub subject_code: String,
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    pub room_id: Option<i64>,
    pub room_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSubject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClass {
    pub id: i64,
    pub name: String,
    pub level: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStaff {
    pub id: i64,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRoom {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbAcademicYear> for AcademicYear {
    fn from(row: DbAcademicYear) -> Self {
        Self {
            id: row.id,
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

impl From<DbTerm> for Term {
    fn from(row: DbTerm) -> Self {
        Self {
            id: row.id,
            academic_year_id: row.academic_year_id,
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

impl From<DbTimetable> for Timetable {
    fn from(row: DbTimetable) -> Self {
        Self {
            id: row.id,
            class_id: row.class_id,
            term_id: row.term_id,
            created_at: row.created_at,
        }
    }
}

impl From<DbTimetableSlot> for TimetableSlot {
    fn from(row: DbTimetableSlot) -> Self {
        Self {
            id: row.id,
            timetable_id: row.timetable_id,
            term_id: row.term_id,
            day_of_week: row.day_of_week,
            period: row.period,
            subject_id: row.subject_id,
            teacher_id: row.teacher_id,
            room_id: row.room_id,
            created_at: row.created_at,
        }
    }
}

impl From<DbSlotDetail> for SlotDetail {
    fn from(row: DbSlotDetail) -> Self {
        // LEFT JOINs yield a name whenever the foreign key is set.
        let teacher = row.teacher_id.map(|id| StaffSummary {
            id,
            full_name: row.teacher_name.unwrap_or_default(),
        });
        let room = row.room_id.map(|id| RoomSummary {
            id,
            name: row.room_name.unwrap_or_default(),
        });

        Self {
            id: row.id,
            timetable_id: row.timetable_id,
            class_id: row.class_id,
            term_id: row.term_id,
            day_of_week: row.day_of_week,
            period: row.period,
            subject: SubjectSummary {
                id: row.subject_id,
                name: row.subject_name,
                code: row.subject_code,
            },
            teacher,
            room,
        }
    }
}

impl From<DbSubject> for Subject {
    fn from(row: DbSubject) -> Self {
        Self {
            id: row.id,
            name: row.name,
            code: row.code,
            department: row.department,
            created_at: row.created_at,
        }
    }
}

impl From<DbClass> for SchoolClass {
    fn from(row: DbClass) -> Self {
        Self {
            id: row.id,
            name: row.name,
            level: row.level,
            created_at: row.created_at,
        }
    }
}

impl From<DbStaff> for StaffMember {
    fn from(row: DbStaff) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            created_at: row.created_at,
        }
    }
}

impl From<DbRoom> for Room {
    fn from(row: DbRoom) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}
