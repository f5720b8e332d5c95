//! Classes, staff and rooms. Timetables and slots can only refer to rows created here.

use schooltime_core::{
    errors::SchoolResult,
    models::roster::{
        CreateClassRequest, CreateRoomRequest, CreateStaffRequest, Room, SchoolClass,
        StaffMember,
    },
};
use schooltime_db::repository::SchoolRepository;
use tracing::info;

pub async fn list_classes(repo: &dyn SchoolRepository) -> SchoolResult<Vec<SchoolClass>> {
    repo.list_classes().await
}

pub async fn create_class(
    repo: &dyn SchoolRepository,
    request: CreateClassRequest,
) -> SchoolResult<SchoolClass> {
    let class = repo
        .create_class(request.name.trim().to_string(), request.level)
        .await?;
    info!("Created class {} ({})", class.name, class.id);
    Ok(class)
}

pub async fn list_staff(repo: &dyn SchoolRepository) -> SchoolResult<Vec<StaffMember>> {
    repo.list_staff().await
}

pub async fn create_staff(
    repo: &dyn SchoolRepository,
    request: CreateStaffRequest,
) -> SchoolResult<StaffMember> {
    repo.create_staff(request.full_name.trim().to_string()).await
}

pub async fn list_rooms(repo: &dyn SchoolRepository) -> SchoolResult<Vec<Room>> {
    repo.list_rooms().await
}

pub async fn create_room(
    repo: &dyn SchoolRepository,
    request: CreateRoomRequest,
) -> SchoolResult<Room> {
    repo.create_room(request.name.trim().to_string()).await
}
