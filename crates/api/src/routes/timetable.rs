use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers, middleware::auth::require_academic_staff};

pub fn routes(state: &Arc<ApiState>) -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/v1/timetable", get(handlers::timetable::get_timetable))
        .route("/api/v1/timetable/slots", post(handlers::timetable::add_slot))
        .route_layer(from_fn_with_state(state.clone(), require_academic_staff))
}
