use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use schooltime_core::models::{
    DataResponse,
    subject::{CreateSubjectRequest, Subject, UpdateSubjectRequest},
};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, validation::ValidatedJson},
    services,
};

#[axum::debug_handler]
pub async fn list_subjects(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<DataResponse<Vec<Subject>>>, AppError> {
    let subjects = services::subject::list_subjects(state.repo.as_ref()).await?;
    Ok(Json(DataResponse::new(subjects)))
}

#[axum::debug_handler]
pub async fn create_subject(
    State(state): State<Arc<ApiState>>,
    ValidatedJson(payload): ValidatedJson<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<DataResponse<Subject>>), AppError> {
    let subject = services::subject::create_subject(state.repo.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(subject))))
}

#[axum::debug_handler]
pub async fn update_subject(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateSubjectRequest>,
) -> Result<Json<DataResponse<Subject>>, AppError> {
    let subject = services::subject::update_subject(state.repo.as_ref(), id, payload).await?;
    Ok(Json(DataResponse::new(subject)))
}

#[axum::debug_handler]
pub async fn delete_subject(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    services::subject::delete_subject(state.repo.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
