//! # SchoolTime API
//!
//! The web server of the SchoolTime timetabling service. It exposes class timetables and
//! conflict-checked slot assignment to academic staff, plus the subjects, classes, staff and
//! rooms slots refer to.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Extract and answer HTTP requests
//! - **Services**: Term resolution, conflict detection and slot assignment
//! - **Middleware**: Authentication, validation and error mapping
//! - **Config**: Environment configuration
//!
//! Services are written against [`SchoolRepository`], so the same router runs over
//! PostgreSQL in production and over the in-memory store in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication, validation and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Business logic shared by the handlers
pub mod services;

use std::{sync::Arc, time::Duration, time::Instant};

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode, header},
    response::IntoResponse,
};
use eyre::{Result, WrapErr};
use schooltime_db::{DbPool, postgres::PgRepository, repository::SchoolRepository};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Store behind every service call
    pub repo: Arc<dyn SchoolRepository>,
    /// Secret access tokens are verified with
    pub jwt_secret: String,
    /// When the server started, for the health report
    pub started_at: Instant,
}

impl ApiState {
    pub fn new(repo: Arc<dyn SchoolRepository>, jwt_secret: impl Into<String>) -> Self {
        Self {
            repo,
            jwt_secret: jwt_secret.into(),
            started_at: Instant::now(),
        }
    }
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}

/// Builds the application router without transport layers.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use schooltime_api::{ApiState, router};
/// use schooltime_db::mock::local::LocalRepository;
///
/// let state = Arc::new(ApiState::new(Arc::new(LocalRepository::new()), "secret"));
/// let app = router(state);
/// # let _ = app;
/// ```
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::timetable::routes(&state))
        .merge(routes::subject::routes(&state))
        .merge(routes::roster::routes(&state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {origin}"))
        })
        .collect::<Result<Vec<HeaderValue>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true))
}

/// Starts the API server with the provided configuration and database connection
///
/// Installs the log subscriber, wires the PostgreSQL store into the router and serves
/// until the listener fails.
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let repo: Arc<dyn SchoolRepository> = Arc::new(PgRepository::new(db_pool));
    let state = Arc::new(ApiState::new(repo, config.jwt_secret.clone()));

    let app = router(state);

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
            .into_inner(),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
