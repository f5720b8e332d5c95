//! Repository traits the services are written against.
//!
//! [`crate::postgres::PgRepository`] implements them over PostgreSQL and
//! [`crate::mock::local::LocalRepository`] keeps everything in memory while enforcing the
//! same unique constraints. Writes that would break one of those constraints fail with
//! [`SchoolError::Conflict`](schooltime_core::errors::SchoolError::Conflict); every
//! other storage failure is a `SchoolError::Database`.

use async_trait::async_trait;
use schooltime_core::{
    errors::SchoolResult,
    models::{
        academic::{AcademicYear, NewAcademicYear, NewTerm, Term},
        roster::{Room, SchoolClass, StaffMember},
        subject::{NewSubject, Subject},
        timetable::{ConflictQuery, NewSlot, SlotConflict, SlotDetail, Timetable, TimetableSlot},
    },
};

#[async_trait]
pub trait AcademicRepository: Send + Sync {
    async fn active_academic_year(&self) -> SchoolResult<Option<AcademicYear>>;

    /// Fails with a conflict when `year` is active and another active year exists.
    async fn create_academic_year(&self, year: NewAcademicYear) -> SchoolResult<AcademicYear>;

    async fn active_term(&self, academic_year_id: i64) -> SchoolResult<Option<Term>>;

    /// Fails with a conflict when `term` is active and its year already has an active term.
    async fn create_term(&self, term: NewTerm) -> SchoolResult<Term>;
}

#[async_trait]
pub trait TimetableRepository: Send + Sync {
    /// The timetable of `class_id` in `term_id`, created if absent. Never creates duplicates.
    async fn get_or_create_timetable(&self, class_id: i64, term_id: i64)
        -> SchoolResult<Timetable>;

    /// Slots of one timetable ordered by day and period.
    async fn slots_for_timetable(&self, timetable_id: i64) -> SchoolResult<Vec<SlotDetail>>;

    /// Every slot colliding with `query`, ordered by slot id.
    async fn find_conflicts(&self, query: ConflictQuery) -> SchoolResult<Vec<SlotConflict>>;

    async fn create_slot(&self, slot: NewSlot) -> SchoolResult<TimetableSlot>;
}

#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// Newest first.
    async fn list_subjects(&self) -> SchoolResult<Vec<Subject>>;

    async fn subject_by_id(&self, id: i64) -> SchoolResult<Option<Subject>>;

    async fn subject_by_code(&self, code: &str) -> SchoolResult<Option<Subject>>;

    async fn create_subject(&self, subject: NewSubject) -> SchoolResult<Subject>;

    async fn update_subject(&self, id: i64, subject: NewSubject) -> SchoolResult<Subject>;

    async fn delete_subject(&self, id: i64) -> SchoolResult<()>;
}

/// Classes, staff and rooms that timetables and slots reference.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Newest first.
    async fn list_classes(&self) -> SchoolResult<Vec<SchoolClass>>;

    async fn create_class(&self, name: String, level: Option<String>)
        -> SchoolResult<SchoolClass>;

    /// Newest first.
    async fn list_staff(&self) -> SchoolResult<Vec<StaffMember>>;

    async fn create_staff(&self, full_name: String) -> SchoolResult<StaffMember>;

    /// Newest first.
    async fn list_rooms(&self) -> SchoolResult<Vec<Room>>;

    async fn create_room(&self, name: String) -> SchoolResult<Room>;
}

/// Everything the API needs from a store.
pub trait SchoolRepository:
    AcademicRepository + TimetableRepository + SubjectRepository + RosterRepository
{
}

impl<T> SchoolRepository for T where
    T: AcademicRepository + TimetableRepository + SubjectRepository + RosterRepository
{
}
