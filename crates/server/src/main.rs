// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use reviewd_api::{
    ActivePeriodsResponse, ApiError, CreatePeriodRequest, DeletePeriodResponse,
    ListPeriodsResponse, PeriodResponse, ReplaceGradeRangesRequest, UpdateBasicInfoRequest,
    UpdateDateRequest, UpdatePermissionRequest, UpdateScheduleRequest,
};
use reviewd_persistence::Persistence;

/// reviewd server - HTTP server for the evaluation period backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for evaluation periods.
    persistence: Arc<Mutex<Persistence>>,
}

/// JSON body returned for every error response.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: bool,
    message: String,
}

/// An HTTP error with a status code and message.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InvalidState { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Resolves the acting user from the `X-Actor` header, defaulting to
/// `system`.
fn actor_from_headers(headers: &HeaderMap) -> String {
    headers
        .get("x-actor")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map_or_else(|| String::from("system"), ToString::to_string)
}

async fn handle_health() -> &'static str {
    "ok"
}

async fn handle_create_period(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreatePeriodRequest>,
) -> Result<(StatusCode, Json<PeriodResponse>), HttpError> {
    let actor = actor_from_headers(&headers);
    let mut persistence = state.persistence.lock().await;
    let response = reviewd_api::create_period(&mut persistence, &request, &actor)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Query parameters for the paged list endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
struct ListQuery {
    /// 1-based page number.
    page: Option<u32>,
    /// Page size.
    limit: Option<u32>,
}

async fn handle_list_periods(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListPeriodsResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::list_periods(
        &mut persistence,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(reviewd_api::DEFAULT_PAGE_SIZE),
    )?))
}

async fn handle_get_active_periods(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<ActivePeriodsResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::get_active_periods(&mut persistence)?))
}

async fn handle_get_period(
    AxumState(state): AxumState<AppState>,
    Path(period_id): Path<i64>,
) -> Result<Json<PeriodResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::get_period(&mut persistence, period_id)?))
}

async fn handle_update_basic_info(
    AxumState(state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdateBasicInfoRequest>,
) -> Result<Json<PeriodResponse>, HttpError> {
    let actor = actor_from_headers(&headers);
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::update_basic_info(
        &mut persistence,
        period_id,
        &request,
        &actor,
    )?))
}

async fn handle_update_schedule(
    AxumState(state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdateScheduleRequest>,
) -> Result<Json<PeriodResponse>, HttpError> {
    let actor = actor_from_headers(&headers);
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::update_schedule(
        &mut persistence,
        period_id,
        &request,
        &actor,
    )?))
}

async fn handle_update_start_date(
    AxumState(state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdateDateRequest>,
) -> Result<Json<PeriodResponse>, HttpError> {
    let actor = actor_from_headers(&headers);
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::update_start_date(
        &mut persistence,
        period_id,
        &request,
        &actor,
    )?))
}

async fn handle_update_evaluation_setup_deadline(
    AxumState(state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdateDateRequest>,
) -> Result<Json<PeriodResponse>, HttpError> {
    let actor = actor_from_headers(&headers);
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::update_evaluation_setup_deadline(
        &mut persistence,
        period_id,
        &request,
        &actor,
    )?))
}

async fn handle_update_performance_deadline(
    AxumState(state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdateDateRequest>,
) -> Result<Json<PeriodResponse>, HttpError> {
    let actor = actor_from_headers(&headers);
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::update_performance_deadline(
        &mut persistence,
        period_id,
        &request,
        &actor,
    )?))
}

async fn handle_update_self_evaluation_deadline(
    AxumState(state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdateDateRequest>,
) -> Result<Json<PeriodResponse>, HttpError> {
    let actor = actor_from_headers(&headers);
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::update_self_evaluation_deadline(
        &mut persistence,
        period_id,
        &request,
        &actor,
    )?))
}

async fn handle_update_peer_evaluation_deadline(
    AxumState(state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdateDateRequest>,
) -> Result<Json<PeriodResponse>, HttpError> {
    let actor = actor_from_headers(&headers);
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::update_peer_evaluation_deadline(
        &mut persistence,
        period_id,
        &request,
        &actor,
    )?))
}

async fn handle_start_period(
    AxumState(state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<PeriodResponse>, HttpError> {
    let actor = actor_from_headers(&headers);
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::start_period(
        &mut persistence,
        period_id,
        &actor,
    )?))
}

async fn handle_complete_period(
    AxumState(state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<PeriodResponse>, HttpError> {
    let actor = actor_from_headers(&headers);
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::complete_period(
        &mut persistence,
        period_id,
        &actor,
    )?))
}

async fn handle_change_phase(
    AxumState(state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<PeriodResponse>, HttpError> {
    let actor = actor_from_headers(&headers);
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::change_phase(
        &mut persistence,
        period_id,
        &actor,
    )?))
}

async fn handle_replace_grade_ranges(
    AxumState(state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<ReplaceGradeRangesRequest>,
) -> Result<Json<PeriodResponse>, HttpError> {
    let actor = actor_from_headers(&headers);
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::replace_grade_ranges(
        &mut persistence,
        period_id,
        &request,
        &actor,
    )?))
}

async fn handle_update_permission(
    AxumState(state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdatePermissionRequest>,
) -> Result<Json<PeriodResponse>, HttpError> {
    let actor = actor_from_headers(&headers);
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::update_permission(
        &mut persistence,
        period_id,
        &request,
        &actor,
    )?))
}

async fn handle_delete_period(
    AxumState(state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<DeletePeriodResponse>, HttpError> {
    let actor = actor_from_headers(&headers);
    let mut persistence = state.persistence.lock().await;
    Ok(Json(reviewd_api::delete_period(
        &mut persistence,
        period_id,
        &actor,
    )?))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/evaluation_periods", post(handle_create_period))
        .route("/evaluation_periods", get(handle_list_periods))
        .route("/evaluation_periods/active", get(handle_get_active_periods))
        .route("/evaluation_periods/{period_id}", get(handle_get_period))
        .route(
            "/evaluation_periods/{period_id}",
            patch(handle_update_basic_info),
        )
        .route(
            "/evaluation_periods/{period_id}",
            delete(handle_delete_period),
        )
        .route(
            "/evaluation_periods/{period_id}/schedule",
            patch(handle_update_schedule),
        )
        .route(
            "/evaluation_periods/{period_id}/schedule/start_date",
            put(handle_update_start_date),
        )
        .route(
            "/evaluation_periods/{period_id}/schedule/evaluation_setup_deadline",
            put(handle_update_evaluation_setup_deadline),
        )
        .route(
            "/evaluation_periods/{period_id}/schedule/performance_deadline",
            put(handle_update_performance_deadline),
        )
        .route(
            "/evaluation_periods/{period_id}/schedule/self_evaluation_deadline",
            put(handle_update_self_evaluation_deadline),
        )
        .route(
            "/evaluation_periods/{period_id}/schedule/peer_evaluation_deadline",
            put(handle_update_peer_evaluation_deadline),
        )
        .route(
            "/evaluation_periods/{period_id}/start",
            post(handle_start_period),
        )
        .route(
            "/evaluation_periods/{period_id}/complete",
            post(handle_complete_period),
        )
        .route(
            "/evaluation_periods/{period_id}/phase",
            post(handle_change_phase),
        )
        .route(
            "/evaluation_periods/{period_id}/grade_ranges",
            put(handle_replace_grade_ranges),
        )
        .route(
            "/evaluation_periods/{period_id}/permissions",
            put(handle_update_permission),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing reviewd server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
