//! In-memory local repository implementation.
//!
//! Suitable for unit tests and local development. All rows live behind one async lock, and
//! writes enforce the same foreign keys and unique constraints as the PostgreSQL schema, so
//! constraint violations surface exactly as they would from the database.

use async_trait::async_trait;
use chrono::Utc;
use eyre::eyre;
use schooltime_core::{
    errors::{SchoolError, SchoolResult},
    models::{
        academic::{AcademicYear, NewAcademicYear, NewTerm, Term},
        roster::{Room, SchoolClass, StaffMember},
        subject::{NewSubject, Subject},
        timetable::{
            ConflictQuery, NewSlot, RoomSummary, SlotConflict, SlotDetail, StaffSummary,
            SubjectSummary, Timetable, TimetableSlot, FIRST_DAY_OF_WEEK, FIRST_PERIOD,
            LAST_DAY_OF_WEEK,
        },
    },
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    repository::{AcademicRepository, RosterRepository, SubjectRepository, TimetableRepository},
    schema, unique_violation,
};

/// In-memory repository.
///
/// # Example
/// ```
/// use schooltime_db::mock::local::LocalRepository;
///
/// # tokio_test::block_on(async {
/// let repo = LocalRepository::new();
/// repo.insert_class(5, "Grade 5").await;
/// repo.insert_subject(10, "Mathematics", "MATH").await;
/// # });
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    academic_years: BTreeMap<i64, AcademicYear>,
    terms: BTreeMap<i64, Term>,
    classes: BTreeMap<i64, SchoolClass>,
    staff: BTreeMap<i64, StaffMember>,
    rooms: BTreeMap<i64, Room>,
    subjects: BTreeMap<i64, Subject>,
    timetables: BTreeMap<i64, Timetable>,
    slots: BTreeMap<i64, TimetableSlot>,
    unavailable: bool,
}

fn next_id<V>(rows: &BTreeMap<i64, V>) -> i64 {
    rows.keys().next_back().map_or(1, |id| id + 1)
}

fn foreign_key_violation(table: &str, id: i64) -> SchoolError {
    SchoolError::Database(eyre!(
        "insert violates foreign key constraint: {table} row {id} does not exist"
    ))
}

impl LocalData {
    fn ensure_available(&self) -> SchoolResult<()> {
        if self.unavailable {
            return Err(SchoolError::Database(eyre!("connection refused")));
        }
        Ok(())
    }

    fn detail(&self, slot: &TimetableSlot) -> SchoolResult<SlotDetail> {
        let timetable = self
            .timetables
            .get(&slot.timetable_id)
            .ok_or_else(|| foreign_key_violation("timetables", slot.timetable_id))?;
        let subject = self
            .subjects
            .get(&slot.subject_id)
            .ok_or_else(|| foreign_key_violation("subjects", slot.subject_id))?;

        Ok(SlotDetail {
            id: slot.id,
            timetable_id: slot.timetable_id,
            class_id: timetable.class_id,
            term_id: timetable.term_id,
            day_of_week: slot.day_of_week,
            period: slot.period,
            subject: SubjectSummary {
                id: subject.id,
                name: subject.name.clone(),
                code: subject.code.clone(),
            },
            teacher: slot.teacher_id.map(|id| StaffSummary {
                id,
                full_name: self
                    .staff
                    .get(&id)
                    .map(|member| member.full_name.clone())
                    .unwrap_or_default(),
            }),
            room: slot.room_id.map(|id| RoomSummary {
                id,
                name: self
                    .rooms
                    .get(&id)
                    .map(|room| room.name.clone())
                    .unwrap_or_default(),
            }),
        })
    }

    fn check_slot(&self, slot: &NewSlot) -> SchoolResult<()> {
        if !self.timetables.contains_key(&slot.timetable_id) {
            return Err(foreign_key_violation("timetables", slot.timetable_id));
        }
        if !self.terms.contains_key(&slot.term_id) {
            return Err(foreign_key_violation("terms", slot.term_id));
        }
        if !self.subjects.contains_key(&slot.subject_id) {
            return Err(foreign_key_violation("subjects", slot.subject_id));
        }
        if let Some(teacher_id) = slot.teacher_id.filter(|id| !self.staff.contains_key(id)) {
            return Err(foreign_key_violation("staff", teacher_id));
        }
        if let Some(room_id) = slot.room_id.filter(|id| !self.rooms.contains_key(id)) {
            return Err(foreign_key_violation("rooms", room_id));
        }
        if !(FIRST_DAY_OF_WEEK..=LAST_DAY_OF_WEEK).contains(&slot.day_of_week)
            || slot.period < FIRST_PERIOD
        {
            return Err(SchoolError::Database(eyre!(
                "insert violates check constraint on timetable_slots"
            )));
        }

        for existing in self.slots.values() {
            let same_cell = existing.term_id == slot.term_id
                && existing.day_of_week == slot.day_of_week
                && existing.period == slot.period;
            if !same_cell {
                continue;
            }
            if existing.timetable_id == slot.timetable_id {
                return Err(unique_violation(schema::SLOT_CLASS_PERIOD_CONSTRAINT));
            }
            if slot.teacher_id.is_some() && existing.teacher_id == slot.teacher_id {
                return Err(unique_violation(schema::SLOT_TEACHER_PERIOD_INDEX));
            }
            if slot.room_id.is_some() && existing.room_id == slot.room_id {
                return Err(unique_violation(schema::SLOT_ROOM_PERIOD_INDEX));
            }
        }
        Ok(())
    }
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail like a lost database connection.
    pub async fn set_available(&self, available: bool) {
        self.data.write().await.unavailable = !available;
    }

    pub async fn insert_class(&self, id: i64, name: &str) {
        let class = SchoolClass {
            id,
            name: name.to_string(),
            level: None,
            created_at: Utc::now(),
        };
        self.data.write().await.classes.insert(id, class);
    }

    pub async fn insert_staff(&self, id: i64, full_name: &str) {
        let member = StaffMember {
            id,
            full_name: full_name.to_string(),
            created_at: Utc::now(),
        };
        self.data.write().await.staff.insert(id, member);
    }

    pub async fn insert_room(&self, id: i64, name: &str) {
        let room = Room {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.data.write().await.rooms.insert(id, room);
    }

    pub async fn insert_subject(&self, id: i64, name: &str, code: &str) {
        let subject = Subject {
            id,
            name: name.to_string(),
            code: code.to_string(),
            department: None,
            created_at: Utc::now(),
        };
        self.data.write().await.subjects.insert(id, subject);
    }

    /// Stores a term directly, bypassing the single-active check.
    pub async fn insert_term(&self, term: Term) {
        self.data.write().await.terms.insert(term.id, term);
    }

    pub async fn academic_year_count(&self) -> usize {
        self.data.read().await.academic_years.len()
    }

    pub async fn term_count(&self) -> usize {
        self.data.read().await.terms.len()
    }

    pub async fn timetable_count(&self) -> usize {
        self.data.read().await.timetables.len()
    }

    /// All stored slots ordered by id.
    pub async fn slots(&self) -> Vec<TimetableSlot> {
        self.data.read().await.slots.values().cloned().collect()
    }
}

#[async_trait]
impl AcademicRepository for LocalRepository {
    async fn active_academic_year(&self) -> SchoolResult<Option<AcademicYear>> {
        let data = self.data.read().await;
        data.ensure_available()?;
        Ok(data.academic_years.values().find(|year| year.active).cloned())
    }

    async fn create_academic_year(&self, year: NewAcademicYear) -> SchoolResult<AcademicYear> {
        let mut data = self.data.write().await;
        data.ensure_available()?;

        if year.active && data.academic_years.values().any(|existing| existing.active) {
            return Err(unique_violation(schema::ACTIVE_YEAR_INDEX));
        }

        let created = AcademicYear {
            id: next_id(&data.academic_years),
            name: year.name,
            start_date: year.start_date,
            end_date: year.end_date,
            active: year.active,
            created_at: Utc::now(),
        };
        data.academic_years.insert(created.id, created.clone());
        Ok(created)
    }

    async fn active_term(&self, academic_year_id: i64) -> SchoolResult<Option<Term>> {
        let data = self.data.read().await;
        data.ensure_available()?;
        Ok(data
            .terms
            .values()
            .find(|term| term.academic_year_id == academic_year_id && term.active)
            .cloned())
    }

    async fn create_term(&self, term: NewTerm) -> SchoolResult<Term> {
        let mut data = self.data.write().await;
        data.ensure_available()?;

        if !data.academic_years.contains_key(&term.academic_year_id) {
            return Err(foreign_key_violation("academic_years", term.academic_year_id));
        }
        let has_active = data
            .terms
            .values()
            .any(|existing| existing.academic_year_id == term.academic_year_id && existing.active);
        if term.active && has_active {
            return Err(unique_violation(schema::ACTIVE_TERM_INDEX));
        }

        let created = Term {
            id: next_id(&data.terms),
            academic_year_id: term.academic_year_id,
            name: term.name,
            start_date: term.start_date,
            end_date: term.end_date,
            active: term.active,
            created_at: Utc::now(),
        };
        data.terms.insert(created.id, created.clone());
        Ok(created)
    }
}

#[async_trait]
impl TimetableRepository for LocalRepository {
    async fn get_or_create_timetable(
        &self,
        class_id: i64,
        term_id: i64,
    ) -> SchoolResult<Timetable> {
        let mut data = self.data.write().await;
        data.ensure_available()?;

        if let Some(existing) = data
            .timetables
            .values()
            .find(|t| t.class_id == class_id && t.term_id == term_id)
        {
            return Ok(existing.clone());
        }
        if !data.classes.contains_key(&class_id) {
            return Err(foreign_key_violation("classes", class_id));
        }
        if !data.terms.contains_key(&term_id) {
            return Err(foreign_key_violation("terms", term_id));
        }

        let created = Timetable {
            id: next_id(&data.timetables),
            class_id,
            term_id,
            created_at: Utc::now(),
        };
        data.timetables.insert(created.id, created.clone());
        Ok(created)
    }

    async fn slots_for_timetable(&self, timetable_id: i64) -> SchoolResult<Vec<SlotDetail>> {
        let data = self.data.read().await;
        data.ensure_available()?;

        let mut details = data
            .slots
            .values()
            .filter(|slot| slot.timetable_id == timetable_id)
            .map(|slot| data.detail(slot))
            .collect::<SchoolResult<Vec<_>>>()?;
        details.sort_by_key(|detail| (detail.day_of_week, detail.period));
        Ok(details)
    }

    async fn find_conflicts(&self, query: ConflictQuery) -> SchoolResult<Vec<SlotConflict>> {
        let data = self.data.read().await;
        data.ensure_available()?;

        let mut conflicts = Vec::new();
        for slot in data.slots.values() {
            if let Some(conflict) = query.conflict_with(data.detail(slot)?) {
                conflicts.push(conflict);
            }
        }
        Ok(conflicts)
    }

    async fn create_slot(&self, slot: NewSlot) -> SchoolResult<TimetableSlot> {
        let mut data = self.data.write().await;
        data.ensure_available()?;
        data.check_slot(&slot)?;

        let created = TimetableSlot {
            id: next_id(&data.slots),
            timetable_id: slot.timetable_id,
            term_id: slot.term_id,
            day_of_week: slot.day_of_week,
            period: slot.period,
            subject_id: slot.subject_id,
            teacher_id: slot.teacher_id,
            room_id: slot.room_id,
            created_at: Utc::now(),
        };
        data.slots.insert(created.id, created.clone());
        Ok(created)
    }
}

#[async_trait]
impl SubjectRepository for LocalRepository {
    async fn list_subjects(&self) -> SchoolResult<Vec<Subject>> {
        let data = self.data.read().await;
        data.ensure_available()?;
        Ok(data.subjects.values().rev().cloned().collect())
    }

    async fn subject_by_id(&self, id: i64) -> SchoolResult<Option<Subject>> {
        let data = self.data.read().await;
        data.ensure_available()?;
        Ok(data.subjects.get(&id).cloned())
    }

    async fn subject_by_code(&self, code: &str) -> SchoolResult<Option<Subject>> {
        let data = self.data.read().await;
        data.ensure_available()?;
        Ok(data.subjects.values().find(|s| s.code == code).cloned())
    }

    async fn create_subject(&self, subject: NewSubject) -> SchoolResult<Subject> {
        let mut data = self.data.write().await;
        data.ensure_available()?;

        if data.subjects.values().any(|s| s.code == subject.code) {
            return Err(unique_violation(schema::SUBJECT_CODE_CONSTRAINT));
        }

        let created = Subject {
            id: next_id(&data.subjects),
            name: subject.name,
            code: subject.code,
            department: subject.department,
            created_at: Utc::now(),
        };
        data.subjects.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_subject(&self, id: i64, changes: NewSubject) -> SchoolResult<Subject> {
        let mut data = self.data.write().await;
        data.ensure_available()?;

        if data
            .subjects
            .values()
            .any(|s| s.id != id && s.code == changes.code)
        {
            return Err(unique_violation(schema::SUBJECT_CODE_CONSTRAINT));
        }

        let subject = data
            .subjects
            .get_mut(&id)
            .ok_or_else(|| SchoolError::NotFound("Subject not found".to_string()))?;
        subject.name = changes.name;
        subject.code = changes.code;
        subject.department = changes.department;
        Ok(subject.clone())
    }

    async fn delete_subject(&self, id: i64) -> SchoolResult<()> {
        let mut data = self.data.write().await;
        data.ensure_available()?;

        if data.slots.values().any(|slot| slot.subject_id == id) {
            return Err(SchoolError::Database(eyre!(
                "delete violates foreign key constraint: subject {id} is referenced by timetable_slots"
            )));
        }
        data.subjects
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| SchoolError::NotFound("Subject not found".to_string()))
    }
}

#[async_trait]
impl RosterRepository for LocalRepository {
    async fn list_classes(&self) -> SchoolResult<Vec<SchoolClass>> {
        let data = self.data.read().await;
        data.ensure_available()?;
        Ok(data.classes.values().rev().cloned().collect())
    }

    async fn create_class(
        &self,
        name: String,
        level: Option<String>,
    ) -> SchoolResult<SchoolClass> {
        let mut data = self.data.write().await;
        data.ensure_available()?;

        let created = SchoolClass {
            id: next_id(&data.classes),
            name,
            level,
            created_at: Utc::now(),
        };
        data.classes.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_staff(&self) -> SchoolResult<Vec<StaffMember>> {
        let data = self.data.read().await;
        data.ensure_available()?;
        Ok(data.staff.values().rev().cloned().collect())
    }

    async fn create_staff(&self, full_name: String) -> SchoolResult<StaffMember> {
        let mut data = self.data.write().await;
        data.ensure_available()?;

        let created = StaffMember {
            id: next_id(&data.staff),
            full_name,
            created_at: Utc::now(),
        };
        data.staff.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_rooms(&self) -> SchoolResult<Vec<Room>> {
        let data = self.data.read().await;
        data.ensure_available()?;
        Ok(data.rooms.values().rev().cloned().collect())
    }

    async fn create_room(&self, name: String) -> SchoolResult<Room> {
        let mut data = self.data.write().await;
        data.ensure_available()?;

        let created = Room {
            id: next_id(&data.rooms),
            name,
            created_at: Utc::now(),
        };
        data.rooms.insert(created.id, created.clone());
        Ok(created)
    }
}
