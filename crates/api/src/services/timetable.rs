//! # Timetable Service
//!
//! Slot assignment runs in four steps:
//!
//! 1. Resolve the term (the active one unless the request names a term)
//! 2. Get or create the timetable of the class in that term
//! 3. Look for every existing slot in the same (term, day, period) sharing the class, the
//!    teacher or the room; any match rejects the request with the full list
//! 4. Write the slot
//!
//! Steps 3 and 4 are not atomic. The store's unique constraints reject a slot that a
//! concurrent request booked in between; the detector then runs again so the caller
//! still receives the conflicting slots.

use chrono::NaiveDate;
use schooltime_core::{
    errors::{SchoolError, SchoolResult},
    models::timetable::{
        ConflictQuery, CreateSlotRequest, NewSlot, SlotConflict, Timetable, TimetableSlot,
        TimetableView,
    },
};
use schooltime_db::repository::SchoolRepository;
use tracing::{info, warn};

use crate::services::term::resolve_active_term;

async fn term_or_active(
    repo: &dyn SchoolRepository,
    term_id: Option<i64>,
    today: NaiveDate,
) -> SchoolResult<i64> {
    match term_id {
        Some(term_id) => Ok(term_id),
        None => Ok(resolve_active_term(repo, today).await?.term_id),
    }
}

pub async fn get_or_create_timetable(
    repo: &dyn SchoolRepository,
    class_id: i64,
    term_id: i64,
) -> SchoolResult<Timetable> {
    repo.get_or_create_timetable(class_id, term_id).await
}

pub async fn find_conflicts(
    repo: &dyn SchoolRepository,
    query: ConflictQuery,
) -> SchoolResult<Vec<SlotConflict>> {
    repo.find_conflicts(query).await
}

/// Writes `slot` without checking for conflicts.
pub async fn create_slot(repo: &dyn SchoolRepository, slot: NewSlot) -> SchoolResult<TimetableSlot> {
    repo.create_slot(slot).await
}

/// The timetable of `class_id` with all of its slots, created if absent.
pub async fn load_timetable(
    repo: &dyn SchoolRepository,
    class_id: i64,
    term_id: Option<i64>,
    today: NaiveDate,
) -> SchoolResult<TimetableView> {
    let term_id = term_or_active(repo, term_id, today).await?;
    let timetable = get_or_create_timetable(repo, class_id, term_id).await?;
    let slots = repo.slots_for_timetable(timetable.id).await?;

    Ok(TimetableView {
        id: timetable.id,
        class_id: timetable.class_id,
        term_id: timetable.term_id,
        slots,
    })
}

/// Places a lesson in a class timetable unless it double-books the class, teacher or room.
///
/// # Errors
///
/// * `SchoolError::SlotConflict` - one or more slots already occupy the cell; all are listed
/// * `SchoolError::Database` - storage failure
pub async fn assign_slot(
    repo: &dyn SchoolRepository,
    request: &CreateSlotRequest,
    today: NaiveDate,
) -> SchoolResult<TimetableSlot> {
    let term_id = term_or_active(repo, request.term_id, today).await?;
    let timetable = get_or_create_timetable(repo, request.class_id, term_id).await?;
    let query = request.conflict_query(term_id);

    let conflicts = find_conflicts(repo, query).await?;
    if !conflicts.is_empty() {
        warn!(
            "Rejected slot for class {} on day {} period {}: {} conflict(s)",
            request.class_id,
            request.day_of_week,
            request.period,
            conflicts.len()
        );
        return Err(SchoolError::SlotConflict(conflicts));
    }

    match create_slot(repo, request.new_slot(&timetable)).await {
        Ok(slot) => {
            info!(
                "Created slot {} in timetable {} (day {}, period {})",
                slot.id, slot.timetable_id, slot.day_of_week, slot.period
            );
            Ok(slot)
        }
        Err(SchoolError::Conflict(reason)) => {
            // Another request booked the cell after our check.
            let conflicts = find_conflicts(repo, query).await?;
            warn!(
                "Slot for class {} lost a race ({}): {} conflict(s)",
                request.class_id,
                reason,
                conflicts.len()
            );
            if conflicts.is_empty() {
                Err(SchoolError::Conflict(reason))
            } else {
                Err(SchoolError::SlotConflict(conflicts))
            }
        }
        Err(err) => Err(err),
    }
}
