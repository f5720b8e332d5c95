//! PostgreSQL implementation of the repository traits.

use async_trait::async_trait;
use schooltime_core::{
    errors::{SchoolError, SchoolResult},
    models::{
        academic::{AcademicYear, NewAcademicYear, NewTerm, Term},
        roster::{Room, SchoolClass, StaffMember},
        subject::{NewSubject, Subject},
        timetable::{ConflictQuery, NewSlot, SlotConflict, SlotDetail, Timetable, TimetableSlot},
    },
};

use crate::{
    repositories::{academic, roster, subject, timetable, timetable_slot},
    repository::{AcademicRepository, RosterRepository, SubjectRepository, TimetableRepository},
    unique_violation, DbPool,
};

#[derive(Clone)]
pub struct PgRepository {
    pool: DbPool,
}

impl PgRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Maps unique violations to conflicts and everything else to an opaque database error.
fn storage_error(err: eyre::Report) -> SchoolError {
    if let Some(sqlx::Error::Database(db_err)) = err.downcast_ref::<sqlx::Error>() {
        if db_err.is_unique_violation() {
            return unique_violation(db_err.constraint().unwrap_or("a unique constraint"));
        }
    }
    SchoolError::Database(err)
}

#[async_trait]
impl AcademicRepository for PgRepository {
    async fn active_academic_year(&self) -> SchoolResult<Option<AcademicYear>> {
        let year = academic::get_active_academic_year(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(year.map(Into::into))
    }

    async fn create_academic_year(&self, year: NewAcademicYear) -> SchoolResult<AcademicYear> {
        let created = academic::create_academic_year(&self.pool, &year)
            .await
            .map_err(storage_error)?;
        Ok(created.into())
    }

    async fn active_term(&self, academic_year_id: i64) -> SchoolResult<Option<Term>> {
        let term = academic::get_active_term(&self.pool, academic_year_id)
            .await
            .map_err(storage_error)?;
        Ok(term.map(Into::into))
    }

    async fn create_term(&self, term: NewTerm) -> SchoolResult<Term> {
        let created = academic::create_term(&self.pool, &term)
            .await
            .map_err(storage_error)?;
        Ok(created.into())
    }
}

#[async_trait]
impl TimetableRepository for PgRepository {
    async fn get_or_create_timetable(
        &self,
        class_id: i64,
        term_id: i64,
    ) -> SchoolResult<Timetable> {
        let timetable = timetable::upsert_timetable(&self.pool, class_id, term_id)
            .await
            .map_err(storage_error)?;
        Ok(timetable.into())
    }

    async fn slots_for_timetable(&self, timetable_id: i64) -> SchoolResult<Vec<SlotDetail>> {
        let slots = timetable_slot::get_slot_details_by_timetable_id(&self.pool, timetable_id)
            .await
            .map_err(storage_error)?;
        Ok(slots.into_iter().map(Into::into).collect())
    }

    async fn find_conflicts(&self, query: ConflictQuery) -> SchoolResult<Vec<SlotConflict>> {
        let rows = timetable_slot::find_colliding_slots(&self.pool, &query)
            .await
            .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|row| query.conflict_with(row.into()))
            .collect())
    }

    async fn create_slot(&self, slot: NewSlot) -> SchoolResult<TimetableSlot> {
        let created = timetable_slot::create_timetable_slot(&self.pool, &slot)
            .await
            .map_err(storage_error)?;
        Ok(created.into())
    }
}

#[async_trait]
impl SubjectRepository for PgRepository {
    async fn list_subjects(&self) -> SchoolResult<Vec<Subject>> {
        let subjects = subject::list_subjects(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(subjects.into_iter().map(Into::into).collect())
    }

    async fn subject_by_id(&self, id: i64) -> SchoolResult<Option<Subject>> {
        let found = subject::get_subject_by_id(&self.pool, id)
            .await
            .map_err(storage_error)?;
        Ok(found.map(Into::into))
    }

    async fn subject_by_code(&self, code: &str) -> SchoolResult<Option<Subject>> {
        let found = subject::get_subject_by_code(&self.pool, code)
            .await
            .map_err(storage_error)?;
        Ok(found.map(Into::into))
    }

    async fn create_subject(&self, new_subject: NewSubject) -> SchoolResult<Subject> {
        let created = subject::create_subject(&self.pool, &new_subject)
            .await
            .map_err(storage_error)?;
        Ok(created.into())
    }

    async fn update_subject(&self, id: i64, changes: NewSubject) -> SchoolResult<Subject> {
        subject::update_subject(&self.pool, id, &changes)
            .await
            .map_err(storage_error)?
            .map(Into::into)
            .ok_or_else(|| SchoolError::NotFound("Subject not found".to_string()))
    }

    async fn delete_subject(&self, id: i64) -> SchoolResult<()> {
        let deleted = subject::delete_subject(&self.pool, id)
            .await
            .map_err(storage_error)?;

        if deleted {
            Ok(())
        } else {
            Err(SchoolError::NotFound("Subject not found".to_string()))
        }
    }
}

#[async_trait]
impl RosterRepository for PgRepository {
    async fn list_classes(&self) -> SchoolResult<Vec<SchoolClass>> {
        let classes = roster::list_classes(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(classes.into_iter().map(Into::into).collect())
    }

    async fn create_class(
        &self,
        name: String,
        level: Option<String>,
    ) -> SchoolResult<SchoolClass> {
        let created = roster::create_class(&self.pool, &name, level.as_deref())
            .await
            .map_err(storage_error)?;
        Ok(created.into())
    }

    async fn list_staff(&self) -> SchoolResult<Vec<StaffMember>> {
        let staff = roster::list_staff(&self.pool).await.map_err(storage_error)?;
        Ok(staff.into_iter().map(Into::into).collect())
    }

    async fn create_staff(&self, full_name: String) -> SchoolResult<StaffMember> {
        let created = roster::create_staff(&self.pool, &full_name)
            .await
            .map_err(storage_error)?;
        Ok(created.into())
    }

    async fn list_rooms(&self) -> SchoolResult<Vec<Room>> {
        let rooms = roster::list_rooms(&self.pool).await.map_err(storage_error)?;
        Ok(rooms.into_iter().map(Into::into).collect())
    }

    async fn create_room(&self, name: String) -> SchoolResult<Room> {
        let created = roster::create_room(&self.pool, &name)
            .await
            .map_err(storage_error)?;
        Ok(created.into())
    }
}
