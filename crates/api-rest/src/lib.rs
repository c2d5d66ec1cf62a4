//! # API REST
//!
//! REST API for the HL7 bridge.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Conversion and generation live in `bridge-core`; handlers only translate between HTTP and
//! those calls. There is no persistence: callers pass the persisted Patient id back in with
//! `?patient_id=` when they want the Coverage beneficiary rebound.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use bridge_core::{
    convert_message, AdtGenerator, AdtRegistration, BridgeError, CoreConfig, InsuranceInfo,
};
use hl7_v2::MessageInfo;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Application state shared across REST handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    generator: Arc<AdtGenerator>,
}

impl AppState {
    pub fn new(config: CoreConfig) -> Self {
        Self::with_generator(AdtGenerator::new(config))
    }

    pub fn with_generator(generator: AdtGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, convert_hl7, inspect_hl7, generate_hl7),
    components(schemas(
        HealthRes,
        ErrorRes,
        ConversionRes,
        InspectRes,
        AdtRegistration,
        InsuranceInfo,
        Hl7MessageRes,
    ))
)]
pub struct ApiDoc;

/// Build the router with every endpoint, the OpenAPI document and a permissive CORS layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/hl7/convert", post(convert_hl7))
        .route("/hl7/inspect", post(inspect_hl7))
        .route("/patient/hl7", post(generate_hl7))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// Request/response bodies
// ============================================================================

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

#[derive(Clone, Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConvertParams {
    /// Persisted Patient id to use as the Coverage beneficiary.
    pub patient_id: Option<String>,
}

/// FHIR resources produced from one message. Absent resources are omitted.
///
/// Schema only; the body is rendered by `Conversion::to_json`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ConversionRes {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub patient: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub coverage: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct InspectRes {
    pub segment_count: usize,
    pub segments: Vec<String>,
}

impl From<MessageInfo> for InspectRes {
    fn from(info: MessageInfo) -> Self {
        Self {
            segment_count: info.segment_count,
            segments: info.segments,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Hl7MessageRes {
    pub hl7_message: String,
}

type ApiError = (StatusCode, Json<ErrorRes>);

fn api_error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorRes {
            detail: detail.into(),
        }),
    )
}

/// Client input problems are 400s; anything else is an internal error.
fn map_bridge_error(err: BridgeError) -> ApiError {
    match err {
        BridgeError::Parse(_) | BridgeError::Validation(_) => {
            api_error(StatusCode::BAD_REQUEST, err.to_string())
        }
        other => {
            tracing::error!("bridge error: {:?}", other);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "HL7 bridge is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/hl7/convert",
    params(ConvertParams),
    request_body(content = String, description = "Raw HL7 v2 message", content_type = "text/plain"),
    responses(
        (status = 200, description = "FHIR resources", body = ConversionRes),
        (status = 400, description = "Unparseable message or no PID segment", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Convert an inbound ADT message to FHIR Patient and Coverage resources.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the body is empty or has a malformed header, or
/// - the message has no `PID` segment.
#[axum::debug_handler]
async fn convert_hl7(
    State(_state): State<AppState>,
    Query(params): Query<ConvertParams>,
    body: String,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut conversion = convert_message(&body).map_err(map_bridge_error)?;

    if conversion.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "No patient data found in HL7 message",
        ));
    }

    if let Some(patient_id) = params.patient_id.as_deref().filter(|id| !id.is_empty()) {
        conversion.resolve_patient_id(patient_id);
    }

    tracing::info!(
        identifier = conversion
            .patient
            .as_ref()
            .and_then(|p| p.primary_identifier())
            .unwrap_or_default(),
        "converted HL7 message"
    );

    conversion.to_json().map(Json).map_err(map_bridge_error)
}

#[utoipa::path(
    post,
    path = "/hl7/inspect",
    request_body(content = String, description = "Raw HL7 v2 message", content_type = "text/plain"),
    responses(
        (status = 200, description = "Segment summary", body = InspectRes),
        (status = 400, description = "Unparseable message", body = ErrorRes)
    )
)]
/// List the segment codes of a message, for troubleshooting.
#[axum::debug_handler]
async fn inspect_hl7(
    State(_state): State<AppState>,
    body: String,
) -> Result<Json<InspectRes>, ApiError> {
    MessageInfo::inspect(&body)
        .map(|info| Json(info.into()))
        .map_err(|e| map_bridge_error(e.into()))
}

#[utoipa::path(
    post,
    path = "/patient/hl7",
    request_body = AdtRegistration,
    responses(
        (status = 200, description = "Generated ADT^A04 message", body = Hl7MessageRes),
        (status = 400, description = "Invalid registration data", body = ErrorRes)
    )
)]
/// Generate an ADT^A04 registration message from structured patient data.
///
/// # Errors
/// Returns `400 Bad Request` if `dob` is not `MM/DD/YYYY`.
#[axum::debug_handler]
async fn generate_hl7(
    State(state): State<AppState>,
    Json(registration): Json<AdtRegistration>,
) -> Result<Json<Hl7MessageRes>, ApiError> {
    let hl7_message = state
        .generator
        .generate(&registration)
        .map_err(map_bridge_error)?;
    Ok(Json(Hl7MessageRes { hl7_message }))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
