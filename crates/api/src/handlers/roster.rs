use axum::{Json, extract::State, http::StatusCode};
use schooltime_core::models::{
    DataResponse,
    roster::{
        CreateClassRequest, CreateRoomRequest, CreateStaffRequest, Room, SchoolClass,
        StaffMember,
    },
};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, validation::ValidatedJson},
    services,
};

#[axum::debug_handler]
pub async fn list_classes(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<DataResponse<Vec<SchoolClass>>>, AppError> {
    let classes = services::roster::list_classes(state.repo.as_ref()).await?;
    Ok(Json(DataResponse::new(classes)))
}

#[axum::debug_handler]
pub async fn create_class(
    State(state): State<Arc<ApiState>>,
    ValidatedJson(payload): ValidatedJson<CreateClassRequest>,
) -> Result<(StatusCode, Json<DataResponse<SchoolClass>>), AppError> {
    let class = services::roster::create_class(state.repo.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(class))))
}

#[axum::debug_handler]
pub async fn list_staff(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<DataResponse<Vec<StaffMember>>>, AppError> {
    let staff = services::roster::list_staff(state.repo.as_ref()).await?;
    Ok(Json(DataResponse::new(staff)))
}

#[axum::debug_handler]
pub async fn create_staff(
    State(state): State<Arc<ApiState>>,
    ValidatedJson(payload): ValidatedJson<CreateStaffRequest>,
) -> Result<(StatusCode, Json<DataResponse<StaffMember>>), AppError> {
    let member = services::roster::create_staff(state.repo.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(member))))
}

#[axum::debug_handler]
pub async fn list_rooms(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<DataResponse<Vec<Room>>>, AppError> {
    let rooms = services::roster::list_rooms(state.repo.as_ref()).await?;
    Ok(Json(DataResponse::new(rooms)))
}

#[axum::debug_handler]
pub async fn create_room(
    State(state): State<Arc<ApiState>>,
    ValidatedJson(payload): ValidatedJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<DataResponse<Room>>), AppError> {
    let room = services::roster::create_room(state.repo.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(room))))
}
