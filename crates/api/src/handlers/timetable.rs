use axum::{
    Extension, Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use chrono::Utc;
use schooltime_core::{
    errors::{SchoolError, SchoolResult},
    models::{
        DataResponse,
        auth::AuthUser,
        timetable::{CreateSlotRequest, TimetableSlot, TimetableView},
    },
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, validation::ValidatedJson},
    services,
};

/// Query string of `GET /api/v1/timetable`, kept raw so each parameter is checked on its own.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableQuery {
    pub class_id: Option<String>,
    pub term_id: Option<String>,
}

fn positive_id(value: Option<&str>) -> Option<i64> {
    value
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
}

impl TimetableQuery {
    pub fn class_id(&self) -> SchoolResult<i64> {
        positive_id(self.class_id.as_deref())
            .ok_or_else(|| SchoolError::Validation("classId is required".to_string()))
    }

    /// `None` when absent; an unparsable or non-positive value is an error.
    pub fn term_id(&self) -> SchoolResult<Option<i64>> {
        match self.term_id.as_deref() {
            None => Ok(None),
            raw => positive_id(raw).map(Some).ok_or_else(|| {
                SchoolError::Validation("termId must be a positive integer".to_string())
            }),
        }
    }
}

#[axum::debug_handler]
pub async fn get_timetable(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<TimetableQuery>, QueryRejection>,
) -> Result<Json<DataResponse<TimetableView>>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        debug!("Rejected timetable query: {}", rejection.body_text());
        SchoolError::InvalidRequest(vec![rejection.body_text()])
    })?;
    let class_id = query.class_id()?;
    let term_id = query.term_id()?;

    let timetable = services::timetable::load_timetable(
        state.repo.as_ref(),
        class_id,
        term_id,
        Utc::now().date_naive(),
    )
    .await?;

    Ok(Json(DataResponse::new(timetable)))
}

#[axum::debug_handler]
pub async fn add_slot(
    State(state): State<Arc<ApiState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateSlotRequest>,
) -> Result<(StatusCode, Json<DataResponse<TimetableSlot>>), AppError> {
    debug!("User {} assigning slot for class {}", user.id, payload.class_id);

    let slot =
        services::timetable::assign_slot(state.repo.as_ref(), &payload, Utc::now().date_naive())
            .await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(slot))))
}
