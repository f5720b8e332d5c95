use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{Issues, Validate};

pub const FIRST_DAY_OF_WEEK: i32 = 1;
pub const LAST_DAY_OF_WEEK: i32 = 7;
pub const FIRST_PERIOD: i32 = 1;

/// The weekly grid of one class in one term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    pub id: i64,
    pub class_id: i64,
    pub term_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A single lesson as stored.
///
/// `term_id` always equals the term of the owning timetable; it is carried on the slot so
/// the store can enforce per-term uniqueness of teachers and rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableSlot {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    pub id: i64,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffSummary {
    pub id: i64,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: i64,
    pub name: String,
}

/// A slot populated with the class it belongs to and its subject, teacher and room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDetail {
    pub id: i64,
    pub timetable_id: i64,
    pub class_id: i64,
    pub term_id: i64,
    pub day_of_week: i32,
    pub period: i32,
    pub subject: SubjectSummary,
    pub teacher: Option<StaffSummary>,
    pub room: Option<RoomSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableView {
    pub id: i64,
    pub class_id: i64,
    pub term_id: i64,
    pub slots: Vec<SlotDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    Class,
    Teacher,
    Room,
}

/// An existing slot that blocks a proposed one, with every reason it collides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotConflict {
    #[serde(flatten)]
    pub slot: SlotDetail,
    pub reasons: Vec<ConflictKind>,
}

/// Body of `POST /timetable/slots`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlotRequest {
    pub term_id: Option<i64>,
    pub class_id: i64,
    pub day_of_week: i32,
    pub period: i32,
    pub subject_id: i64,
    pub teacher_id: Option<i64>,
    pub room_id: Option<i64>,
}

impl CreateSlotRequest {
    pub fn conflict_query(&self, term_id: i64) -> ConflictQuery {
        ConflictQuery {
            term_id,
            day_of_week: self.day_of_week,
            period: self.period,
            class_id: self.class_id,
            teacher_id: self.teacher_id,
            room_id: self.room_id,
        }
    }

    pub fn new_slot(&self, timetable: &Timetable) -> NewSlot {
        NewSlot {
            timetable_id: timetable.id,
            term_id: timetable.term_id,
            day_of_week: self.day_of_week,
            period: self.period,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            room_id: self.room_id,
        }
    }
}

impl Validate for CreateSlotRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut issues = Issues::new();
        issues
            .optional_positive_id("termId", self.term_id)
            .positive_id("classId", self.class_id)
            .check(
                (FIRST_DAY_OF_WEEK..=LAST_DAY_OF_WEEK).contains(&self.day_of_week),
                "dayOfWeek",
                "must be between 1 and 7",
            )
            .check(self.period >= FIRST_PERIOD, "period", "must be at least 1")
            .positive_id("subjectId", self.subject_id)
            .optional_positive_id("teacherId", self.teacher_id)
            .optional_positive_id("roomId", self.room_id);
        issues.finish()
    }
}

/// The (term, day, period) cell a proposed slot occupies and the resources it claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictQuery {
    pub term_id: i64,
    pub day_of_week: i32,
    pub period: i32,
    pub class_id: i64,
    pub teacher_id: Option<i64>,
    pub room_id: Option<i64>,
}

impl ConflictQuery {
    /// Why `slot` collides with this proposal.
    ///
    /// Empty when the slot sits in another cell or shares none of class, teacher and room.
    /// An absent teacher or room on the proposal never matches.
    pub fn reasons(&self, slot: &SlotDetail) -> Vec<ConflictKind> {
        if slot.term_id != self.term_id
            || slot.day_of_week != self.day_of_week
            || slot.period != self.period
        {
            return Vec::new();
        }

        let mut reasons = Vec::new();
        if slot.class_id == self.class_id {
            reasons.push(ConflictKind::Class);
        }
        if self.teacher_id.is_some() && slot.teacher.as_ref().map(|t| t.id) == self.teacher_id {
            reasons.push(ConflictKind::Teacher);
        }
        if self.room_id.is_some() && slot.room.as_ref().map(|r| r.id) == self.room_id {
            reasons.push(ConflictKind::Room);
        }
        reasons
    }

    /// Wraps `slot` as a conflict if it collides with this proposal.
    pub fn conflict_with(&self, slot: SlotDetail) -> Option<SlotConflict> {
        let reasons = self.reasons(&slot);
        if reasons.is_empty() {
            None
        } else {
            Some(SlotConflict { slot, reasons })
        }
    }
}

/// A slot ready to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSlot {
    pub timetable_id: i64,
    pub term_id: i64,
    pub day_of_week: i32,
    pub period: i32,
    pub subject_id: i64,
    pub teacher_id: Option<i64>,
    pub room_id: Option<i64>,
}
