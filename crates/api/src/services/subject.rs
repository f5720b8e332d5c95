use schooltime_core::{
    errors::{SchoolError, SchoolResult},
    models::subject::{CreateSubjectRequest, NewSubject, Subject, UpdateSubjectRequest},
};
use schooltime_db::repository::SchoolRepository;

fn not_found() -> SchoolError {
    SchoolError::NotFound("Subject not found".to_string())
}

fn code_taken() -> SchoolError {
    SchoolError::Conflict("Subject code already exists".to_string())
}

pub async fn list_subjects(repo: &dyn SchoolRepository) -> SchoolResult<Vec<Subject>> {
    repo.list_subjects().await
}

pub async fn create_subject(
    repo: &dyn SchoolRepository,
    request: CreateSubjectRequest,
) -> SchoolResult<Subject> {
    if repo.subject_by_code(&request.code).await?.is_some() {
        return Err(code_taken());
    }

    repo.create_subject(NewSubject::from(request))
        .await
        .map_err(|err| match err {
            SchoolError::Conflict(_) => code_taken(),
            other => other,
        })
}

pub async fn update_subject(
    repo: &dyn SchoolRepository,
    id: i64,
    request: UpdateSubjectRequest,
) -> SchoolResult<Subject> {
    let subject = repo.subject_by_id(id).await?.ok_or_else(not_found)?;

    if let Some(code) = request.code.as_deref().filter(|code| *code != subject.code) {
        if repo.subject_by_code(code).await?.is_some() {
            return Err(code_taken());
        }
    }

    repo.update_subject(id, NewSubject::merged(&subject, request))
        .await
        .map_err(|err| match err {
            SchoolError::Conflict(_) => code_taken(),
            other => other,
        })
}

pub async fn delete_subject(repo: &dyn SchoolRepository, id: i64) -> SchoolResult<()> {
    repo.subject_by_id(id).await?.ok_or_else(not_found)?;
    repo.delete_subject(id).await
}
