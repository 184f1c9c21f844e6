//! # API REST
//!
//! REST API implementation for the triage engine.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `triage-core` for analysis.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AnalyzeReq, AnalyzeRes, ConditionRes, ErrorRes, HealthRes, HealthService,
    NormalizedSymptomRes, RecommendationRes, RedFlagRes, SearchSymptomsParams, Severity,
    SymptomListRes,
};
use triage_core::{SymptomRequest, TriageError, TriageService};

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    triage_service: TriageService,
}

impl AppState {
    pub fn new(triage_service: TriageService) -> Self {
        Self { triage_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, analyze, list_symptoms, search_symptoms),
    components(schemas(
        HealthRes,
        ErrorRes,
        Severity,
        AnalyzeReq,
        AnalyzeRes,
        NormalizedSymptomRes,
        ConditionRes,
        RecommendationRes,
        RedFlagRes,
        SymptomListRes,
    ))
)]
pub struct ApiDoc;

type ApiError = (StatusCode, Json<ErrorRes>);

/// Builds the REST router, including Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/symptoms", get(list_symptoms))
        .route("/symptoms/search", get(search_symptoms))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves the REST API until the server stops.
///
/// # Errors
/// Returns an error if the address cannot be bound or the HTTP server fails while running.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- Triage REST API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeReq,
    responses(
        (status = 200, description = "Triage analysis", body = AnalyzeRes),
        (status = 400, description = "Invalid request, e.g. no symptoms", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Analyse a set of symptoms
///
/// Returns urgency, confidence, ranked condition candidates, a care recommendation and any
/// red-flag warnings. Unrecognised symptoms are not errors; they lower confidence instead.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the symptom list is empty, or
/// - a symptom is blank or too long, or there are too many symptoms.
#[axum::debug_handler]
async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeReq>,
) -> Result<Json<AnalyzeRes>, ApiError> {
    let request = SymptomRequest::from(req);
    match state.triage_service.analyze(&request) {
        Ok(result) => Ok(Json(result.into())),
        Err(e @ (TriageError::NoSymptoms | TriageError::InvalidInput(_))) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorRes {
                error: e.to_string(),
            }),
        )),
        Err(e) => {
            tracing::error!("Analyze error: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorRes {
                    error: "Internal error".into(),
                }),
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/symptoms",
    responses(
        (status = 200, description = "All recognised symptom keys", body = SymptomListRes)
    )
)]
/// List every symptom key the knowledge base recognises
#[axum::debug_handler]
async fn list_symptoms(State(state): State<AppState>) -> Json<SymptomListRes> {
    Json(SymptomListRes {
        symptoms: state.triage_service.list_symptoms(),
    })
}

#[utoipa::path(
    get,
    path = "/symptoms/search",
    params(SearchSymptomsParams),
    responses(
        (status = 200, description = "Matching symptom keys, prefix matches first", body = SymptomListRes)
    )
)]
/// Search recognised symptom keys by partial text
#[axum::debug_handler]
async fn search_symptoms(
    State(state): State<AppState>,
    Query(params): Query<SearchSymptomsParams>,
) -> Json<SymptomListRes> {
    Json(SymptomListRes {
        symptoms: state.triage_service.search_symptoms(&params.q),
    })
}
