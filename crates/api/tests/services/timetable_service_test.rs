use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use chrono::Utc;
use pretty_assertions::assert_eq;
use schooltime_api::services::timetable::{
    assign_slot, find_conflicts, get_or_create_timetable, load_timetable,
};
use schooltime_core::{
    errors::SchoolError,
    models::timetable::{
        ConflictKind, CreateSlotRequest, SlotConflict, SlotDetail, SubjectSummary, Timetable,
    },
};
use schooltime_db::{mock::repositories::MockRepository, unique_violation};

use crate::test_utils::{repository_with_term, today};

fn request(term_id: i64, class_id: i64, day: i32, period: i32) -> CreateSlotRequest {
    CreateSlotRequest {
        term_id: Some(term_id),
        class_id,
        day_of_week: day,
        period,
        subject_id: 10,
        teacher_id: None,
        room_id: None,
    }
}

fn timetable(id: i64, class_id: i64, term_id: i64) -> Timetable {
    Timetable {
        id,
        class_id,
        term_id,
        created_at: Utc::now(),
    }
}

fn conflict(id: i64) -> SlotConflict {
    SlotConflict {
        slot: SlotDetail {
            id,
            timetable_id: 1,
            class_id: 6,
            term_id: 1,
            day_of_week: 1,
            period: 1,
            subject: SubjectSummary {
                id: 10,
                name: "Mathematics".into(),
                code: "MATH".into(),
            },
            teacher: None,
            room: None,
        },
        reasons: vec![ConflictKind::Class],
    }
}

#[test_log::test(tokio::test)]
async fn test_timetable_is_idempotent_under_concurrency() {
    let (repo, term_id) = repository_with_term().await;

    let handles = (0..8)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { get_or_create_timetable(&repo, 5, term_id).await })
        })
        .collect::<Vec<_>>();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }

    ids.dedup();
    assert_eq!(ids.len(), 1);
    assert_eq!(repo.timetable_count().await, 1);
}

#[test_log::test(tokio::test)]
async fn test_every_colliding_slot_is_reported() {
    let (repo, term_id) = repository_with_term().await;
    let same_class = assign_slot(
        &repo,
        &CreateSlotRequest {
            teacher_id: Some(99),
            ..request(term_id, 6, 3, 1)
        },
        today(),
    )
    .await
    .unwrap();
    let same_room = assign_slot(
        &repo,
        &CreateSlotRequest {
            room_id: Some(3),
            ..request(term_id, 7, 3, 1)
        },
        today(),
    )
    .await
    .unwrap();

    let proposal = CreateSlotRequest {
        teacher_id: Some(99),
        room_id: Some(3),
        ..request(term_id, 6, 3, 1)
    };
    let result = assign_slot(&repo, &proposal, today()).await;

    let conflicts = match result {
        Err(SchoolError::SlotConflict(conflicts)) => conflicts,
        other => panic!("expected a slot conflict, got {other:?}"),
    };
    let found = conflicts
        .iter()
        .map(|conflict| (conflict.slot.id, conflict.reasons.clone()))
        .collect::<Vec<_>>();
    assert_eq!(
        found,
        vec![
            (same_class.id, vec![ConflictKind::Class, ConflictKind::Teacher]),
            (same_room.id, vec![ConflictKind::Room]),
        ]
    );
    assert_eq!(repo.slots().await.len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_other_term_does_not_conflict() {
    let (repo, term_id) = repository_with_term().await;
    assign_slot(&repo, &request(term_id, 5, 1, 1), today())
        .await
        .unwrap();

    let conflicts = find_conflicts(
        &repo,
        request(term_id, 5, 1, 1).conflict_query(term_id + 100),
    )
    .await
    .unwrap();

    assert!(conflicts.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_concurrent_assignments_to_one_cell_create_one_slot() {
    let (repo, term_id) = repository_with_term().await;

    let handles = (5..=8)
        .map(|class_id| {
            let repo = repo.clone();
            let request = CreateSlotRequest {
                teacher_id: Some(99),
                ..request(term_id, class_id, 5, 4)
            };
            tokio::spawn(async move { assign_slot(&repo, &request, today()).await })
        })
        .collect::<Vec<_>>();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(SchoolError::SlotConflict(conflicts)) => assert_eq!(conflicts.len(), 1),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(repo.slots().await.len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_load_timetable_details_slots() {
    let (repo, term_id) = repository_with_term().await;
    assign_slot(
        &repo,
        &CreateSlotRequest {
            teacher_id: Some(99),
            room_id: Some(3),
            ..request(term_id, 5, 2, 2)
        },
        today(),
    )
    .await
    .unwrap();

    let view = load_timetable(&repo, 5, None, today()).await.unwrap();

    assert_eq!(view.class_id, 5);
    assert_eq!(view.term_id, term_id);
    assert_eq!(view.slots.len(), 1);
    let slot = &view.slots[0];
    assert_eq!(slot.subject.code, "MATH");
    assert_eq!(slot.teacher.as_ref().map(|t| t.full_name.as_str()), Some("Grace Hopper"));
    assert_eq!(slot.room.as_ref().map(|r| r.name.as_str()), Some("Lab 3"));
}

#[test_log::test(tokio::test)]
async fn test_storage_fault_during_detection_never_writes() {
    let mut repo = MockRepository::new();
    repo.expect_get_or_create_timetable()
        .times(1)
        .returning(|class_id, term_id| Ok(timetable(1, class_id, term_id)));
    repo.expect_find_conflicts()
        .times(1)
        .returning(|_| Err(SchoolError::Database(eyre::eyre!("connection reset"))));
    repo.expect_create_slot().never();

    let result = assign_slot(&repo, &request(1, 5, 1, 1), today()).await;

    assert!(matches!(result, Err(SchoolError::Database(_))));
}

#[test_log::test(tokio::test)]
async fn test_lost_race_reports_the_winner() {
    let mut repo = MockRepository::new();
    let checks = Arc::new(AtomicUsize::new(0));
    let counter = checks.clone();

    repo.expect_get_or_create_timetable()
        .returning(|class_id, term_id| Ok(timetable(1, class_id, term_id)));
    repo.expect_find_conflicts().times(2).returning(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(Vec::new())
        } else {
            Ok(vec![conflict(12)])
        }
    });
    repo.expect_create_slot()
        .times(1)
        .returning(|_| Err(unique_violation("timetable_slots_class_period_key")));

    let result = assign_slot(&repo, &request(1, 6, 1, 1), today()).await;

    match result {
        Err(SchoolError::SlotConflict(conflicts)) => assert_eq!(conflicts, vec![conflict(12)]),
        other => panic!("expected a slot conflict, got {other:?}"),
    }
    assert_eq!(checks.load(Ordering::SeqCst), 2);
}

#[test_log::test(tokio::test)]
async fn test_unexplained_store_conflict_is_propagated() {
    let mut repo = MockRepository::new();
    repo.expect_get_or_create_timetable()
        .returning(|class_id, term_id| Ok(timetable(1, class_id, term_id)));
    repo.expect_find_conflicts()
        .times(2)
        .returning(|_| Ok(Vec::new()));
    repo.expect_create_slot()
        .returning(|_| Err(unique_violation("timetable_slots_class_period_key")));

    let result = assign_slot(&repo, &request(1, 6, 1, 1), today()).await;

    assert!(matches!(result, Err(SchoolError::Conflict(_))));
}
