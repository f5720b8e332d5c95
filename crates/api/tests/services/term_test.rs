use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use chrono::{NaiveDate, Utc};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use schooltime_api::services::term::resolve_active_term;
use schooltime_core::{
    errors::SchoolError,
    models::academic::{AcademicYear, DEFAULT_TERM_NAME, NewTerm, Term},
};
use schooltime_db::{
    mock::{local::LocalRepository, repositories::MockRepository},
    repository::AcademicRepository,
    unique_violation,
};

use crate::test_utils::today;

fn year(id: i64) -> AcademicYear {
    AcademicYear {
        id,
        name: "2026".into(),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        active: true,
        created_at: Utc::now(),
    }
}

fn term(id: i64, academic_year_id: i64) -> Term {
    Term {
        id,
        academic_year_id,
        name: DEFAULT_TERM_NAME.into(),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        active: true,
        created_at: Utc::now(),
    }
}

#[test_log::test(tokio::test)]
async fn test_first_call_creates_calendar_year_and_term() {
    let repo = LocalRepository::new();

    let active = resolve_active_term(&repo, today()).await.unwrap();

    let year = repo.active_academic_year().await.unwrap().unwrap();
    let term = repo.active_term(year.id).await.unwrap().unwrap();
    assert_eq!(active.academic_year_id, year.id);
    assert_eq!(active.term_id, term.id);
    assert_eq!(year.name, "2026");
    assert_eq!(year.start_date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    assert_eq!(year.end_date, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    assert_eq!(term.name, DEFAULT_TERM_NAME);
    assert_eq!((term.start_date, term.end_date), (year.start_date, year.end_date));
}

#[test_log::test(tokio::test)]
async fn test_repeated_calls_reuse_active_rows() {
    let repo = LocalRepository::new();

    let first = resolve_active_term(&repo, today()).await.unwrap();
    let second = resolve_active_term(&repo, today()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(repo.academic_year_count().await, 1);
    assert_eq!(repo.term_count().await, 1);
}

#[test_log::test(tokio::test)]
async fn test_year_without_active_term_gets_one() {
    let repo = LocalRepository::new();
    let first = resolve_active_term(&repo, today()).await.unwrap();
    repo.insert_term(Term {
        active: false,
        ..term(first.term_id, first.academic_year_id)
    })
    .await;

    let resolved = resolve_active_term(&repo, today()).await.unwrap();

    assert_eq!(resolved.academic_year_id, first.academic_year_id);
    assert_ne!(resolved.term_id, first.term_id);
}

#[test_log::test(tokio::test)]
async fn test_concurrent_first_calls_agree() {
    let repo = LocalRepository::new();

    let calls = (0..8).map(|_| {
        let repo = repo.clone();
        tokio::spawn(async move { resolve_active_term(&repo, today()).await })
    });
    let results = join_all_ok(calls).await;

    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(repo.academic_year_count().await, 1);
    assert_eq!(repo.term_count().await, 1);
}

async fn join_all_ok<T>(
    handles: impl Iterator<Item = tokio::task::JoinHandle<Result<T, SchoolError>>>,
) -> Vec<T> {
    let mut results = Vec::new();
    for handle in handles.collect::<Vec<_>>() {
        results.push(handle.await.unwrap().unwrap());
    }
    results
}

#[test_log::test(tokio::test)]
async fn test_losing_year_insert_reads_the_winner() {
    let mut repo = MockRepository::new();
    let reads = Arc::new(AtomicUsize::new(0));
    let counter = reads.clone();

    repo.expect_active_academic_year().times(2).returning(move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(None)
        } else {
            Ok(Some(year(7)))
        }
    });
    repo.expect_create_academic_year()
        .times(1)
        .returning(|_| Err(unique_violation("academic_years_single_active")));
    repo.expect_active_term()
        .with(eq(7))
        .times(1)
        .returning(|_| Ok(Some(term(3, 7))));
    repo.expect_create_term().never();

    let active = resolve_active_term(&repo, today()).await.unwrap();

    assert_eq!(active.academic_year_id, 7);
    assert_eq!(active.term_id, 3);
    assert_eq!(reads.load(Ordering::SeqCst), 2);
}

#[test_log::test(tokio::test)]
async fn test_losing_term_insert_reads_the_winner() {
    let mut repo = MockRepository::new();
    let reads = Arc::new(AtomicUsize::new(0));
    let counter = reads.clone();

    repo.expect_active_academic_year()
        .returning(|| Ok(Some(year(7))));
    repo.expect_active_term().times(2).returning(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(None)
        } else {
            Ok(Some(term(4, 7)))
        }
    });
    repo.expect_create_term()
        .withf(|new_term: &NewTerm| new_term.academic_year_id == 7 && new_term.active)
        .times(1)
        .returning(|_| Err(unique_violation("terms_single_active_per_year")));

    let active = resolve_active_term(&repo, today()).await.unwrap();

    assert_eq!(active.term_id, 4);
}

#[test_log::test(tokio::test)]
async fn test_storage_fault_is_propagated() {
    let mut repo = MockRepository::new();
    repo.expect_active_academic_year()
        .returning(|| Err(SchoolError::Database(eyre::eyre!("connection refused"))));
    repo.expect_create_academic_year().never();

    let result = resolve_active_term(&repo, today()).await;

    assert!(matches!(result, Err(SchoolError::Database(_))));
}
