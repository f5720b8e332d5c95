use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers, middleware::auth::require_academic_staff};

pub fn routes(state: &Arc<ApiState>) -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/v1/subjects",
            get(handlers::subject::list_subjects).post(handlers::subject::create_subject),
        )
        .route(
            "/api/v1/subjects/:id",
            put(handlers::subject::update_subject).delete(handlers::subject::delete_subject),
        )
        .route_layer(from_fn_with_state(state.clone(), require_academic_staff))
}
