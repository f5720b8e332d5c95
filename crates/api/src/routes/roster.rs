use axum::{Router, middleware::from_fn_with_state, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers, middleware::auth::require_academic_staff};

pub fn routes(state: &Arc<ApiState>) -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/v1/classes",
            get(handlers::roster::list_classes).post(handlers::roster::create_class),
        )
        .route(
            "/api/v1/staff",
            get(handlers::roster::list_staff).post(handlers::roster::create_staff),
        )
        .route(
            "/api/v1/rooms",
            get(handlers::roster::list_rooms).post(handlers::roster::create_room),
        )
        .route_layer(from_fn_with_state(state.clone(), require_academic_staff))
}
