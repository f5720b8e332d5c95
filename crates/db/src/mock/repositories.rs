use async_trait::async_trait;
use mockall::mock;
use schooltime_core::{
    errors::SchoolResult,
    models::{
        academic::{AcademicYear, NewAcademicYear, NewTerm, Term},
        roster::{Room, SchoolClass, StaffMember},
        subject::{NewSubject, Subject},
        timetable::{ConflictQuery, NewSlot, SlotConflict, SlotDetail, Timetable, TimetableSlot},
    },
};

use crate::repository::{
    AcademicRepository, RosterRepository, SubjectRepository, TimetableRepository,
};

// Mock repository for fault injection in tests
mock! {
    pub Repository {}

    #[async_trait]
    impl AcademicRepository for Repository {
        async fn active_academic_year(&self) -> SchoolResult<Option<AcademicYear>>;
        async fn create_academic_year(&self, year: NewAcademicYear) -> SchoolResult<AcademicYear>;
        async fn active_term(&self, academic_year_id: i64) -> SchoolResult<Option<Term>>;
        async fn create_term(&self, term: NewTerm) -> SchoolResult<Term>;
    }

    #[async_trait]
    impl TimetableRepository for Repository {
        async fn get_or_create_timetable(&self, class_id: i64, term_id: i64) -> SchoolResult<Timetable>;
        async fn slots_for_timetable(&self, timetable_id: i64) -> SchoolResult<Vec<SlotDetail>>;
        async fn find_conflicts(&self, query: ConflictQuery) -> SchoolResult<Vec<SlotConflict>>;
        async fn create_slot(&self, slot: NewSlot) -> SchoolResult<TimetableSlot>;
    }

    #[async_trait]
    impl SubjectRepository for Repository {
        async fn list_subjects(&self) -> SchoolResult<Vec<Subject>>;
        async fn subject_by_id(&self, id: i64) -> SchoolResult<Option<Subject>>;
        async fn subject_by_code(&self, code: &str) -> SchoolResult<Option<Subject>>;
        async fn create_subject(&self, subject: NewSubject) -> SchoolResult<Subject>;
        async fn update_subject(&self, id: i64, subject: NewSubject) -> SchoolResult<Subject>;
        async fn delete_subject(&self, id: i64) -> SchoolResult<()>;
    }

    #[async_trait]
    impl RosterRepository for Repository {
        async fn list_classes(&self) -> SchoolResult<Vec<SchoolClass>>;
        async fn create_class(&self, name: String, level: Option<String>) -> SchoolResult<SchoolClass>;
        async fn list_staff(&self) -> SchoolResult<Vec<StaffMember>>;
        async fn create_staff(&self, full_name: String) -> SchoolResult<StaffMember>;
        async fn list_rooms(&self) -> SchoolResult<Vec<Room>>;
        async fn create_room(&self, name: String) -> SchoolResult<Room>;
    }
}
