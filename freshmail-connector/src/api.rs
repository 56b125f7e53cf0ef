//! Host contract HTTP API.
//!
//! Exposes the four plugin entry points:
//! - `POST /api/getConfig`: credential inputs
//! - `POST /api/getSchema`: full field catalog
//! - `POST /api/getData`: rows for a date range and field list
//! - `GET /api/getAuthType`: always `NONE`

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use mailstats::contract::{
    GetAuthTypeResponse, GetConfigRequest, GetConfigResponse, GetDataRequest, GetDataResponse,
    GetSchemaRequest, GetSchemaResponse,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, warn};

use crate::error::ConnectorError;
use crate::freshmail::FreshMailConnector;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// ---------------------------------------------------------------------------
// HTTP handlers
// ---------------------------------------------------------------------------

async fn get_config(
    State(connector): State<Arc<FreshMailConnector>>,
    Json(req): Json<GetConfigRequest>,
) -> Json<GetConfigResponse> {
    Json(connector.get_config(&req))
}

async fn get_schema(
    State(connector): State<Arc<FreshMailConnector>>,
    Json(req): Json<GetSchemaRequest>,
) -> Json<GetSchemaResponse> {
    Json(connector.get_schema(&req))
}

async fn get_data(
    State(connector): State<Arc<FreshMailConnector>>,
    Json(req): Json<GetDataRequest>,
) -> Result<Json<GetDataResponse>, AppError> {
    let response = connector.get_data(&req).await?;
    Ok(Json(response))
}

async fn get_auth_type(
    State(connector): State<Arc<FreshMailConnector>>,
) -> Json<GetAuthTypeResponse> {
    Json(connector.get_auth_type())
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

enum AppError {
    BadRequest(String),
    BadGateway(String),
}

impl From<ConnectorError> for AppError {
    fn from(e: ConnectorError) -> Self {
        match e {
            ConnectorError::InvalidDate(_) => AppError::BadRequest(e.to_string()),
            ConnectorError::PageLimitExceeded(_) => AppError::BadGateway(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::BadRequest(msg) => {
                warn!(error = %msg, "Rejected data request");
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::BadGateway(msg) => {
                error!(error = %msg, "Provider misbehaved");
                (StatusCode::BAD_GATEWAY, msg)
            }
        };
        (status, Json(ErrorResponse { error: msg })).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn create_router(connector: Arc<FreshMailConnector>) -> Router {
    Router::new()
        .route("/api/getConfig", post(get_config))
        .route("/api/getSchema", post(get_schema))
        .route("/api/getData", post(get_data))
        .route("/api/getAuthType", get(get_auth_type))
        .with_state(connector)
}
