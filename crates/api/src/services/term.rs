//! # Term Resolver
//!
//! Finds the active academic year and its active term, creating a calendar year and a
//! "Term 1" spanning it when none exist. Nothing is cached; the store is queried on every
//! call.
//!
//! The store admits a single active year and a single active term per year. When a
//! concurrent request creates the active row first, our insert is rejected as a conflict
//! and the winner is read back instead.

use chrono::NaiveDate;
use eyre::eyre;
use schooltime_core::{
    errors::{SchoolError, SchoolResult},
    models::academic::{AcademicYear, ActiveTerm, NewAcademicYear, NewTerm, Term},
};
use schooltime_db::repository::SchoolRepository;
use tracing::info;

pub async fn resolve_active_term(
    repo: &dyn SchoolRepository,
    today: NaiveDate,
) -> SchoolResult<ActiveTerm> {
    let year = active_or_create_year(repo, today).await?;
    let term = active_or_create_term(repo, &year).await?;

    Ok(ActiveTerm {
        academic_year_id: year.id,
        term_id: term.id,
    })
}

async fn active_or_create_year(
    repo: &dyn SchoolRepository,
    today: NaiveDate,
) -> SchoolResult<AcademicYear> {
    if let Some(year) = repo.active_academic_year().await? {
        return Ok(year);
    }

    match repo
        .create_academic_year(NewAcademicYear::calendar_year(today))
        .await
    {
        Ok(year) => {
            info!("Created academic year {} ({})", year.name, year.id);
            Ok(year)
        }
        Err(SchoolError::Conflict(_)) => repo.active_academic_year().await?.ok_or_else(|| {
            SchoolError::Database(eyre!("active academic year vanished after a conflicting insert"))
        }),
        Err(err) => Err(err),
    }
}

async fn active_or_create_term(
    repo: &dyn SchoolRepository,
    year: &AcademicYear,
) -> SchoolResult<Term> {
    if let Some(term) = repo.active_term(year.id).await? {
        return Ok(term);
    }

    match repo.create_term(NewTerm::spanning(year)).await {
        Ok(term) => {
            info!("Created term {} ({}) for academic year {}", term.name, term.id, year.id);
            Ok(term)
        }
        Err(SchoolError::Conflict(_)) => repo.active_term(year.id).await?.ok_or_else(|| {
            SchoolError::Database(eyre!("active term vanished after a conflicting insert"))
        }),
        Err(err) => Err(err),
    }
}
