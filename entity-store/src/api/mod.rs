//! HTTP API layer exposing path-level access to entity documents.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bytes::Bytes;
use entity_store_core::{DocPath, DocumentService, EntityId, InvalidId, ServiceError};
use serde::Serialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;

const NOT_FOUND_MESSAGE: &str = "Sorry can't find that!";
const BAD_REQUEST_MESSAGE: &str = "Invalid request";
const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub documents: DocumentService,
}

#[derive(Serialize)]
struct HealthResponse {
    success: bool,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// Handler error rendered as a fixed JSON message; internal details only go to the log.
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl From<InvalidId> for ApiError {
    fn from(err: InvalidId) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ServiceError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
            ServiceError::MalformedInput(reason) => {
                tracing::debug!(%reason, "rejected request");
                (StatusCode::BAD_REQUEST, BAD_REQUEST_MESSAGE)
            }
            ServiceError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        };
        (status, Json(MessageResponse { message })).into_response()
    }
}

pub fn router(documents: DocumentService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/{id}", get(get_root).put(put_root).delete(delete_root))
        .route("/{id}/", get(get_root).put(put_root).delete(delete_root))
        .route(
            "/{id}/{*path}",
            get(get_value).put(put_value).delete(delete_value),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { documents })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { success: true })
}

async fn get_root(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    read(&state, id, DocPath::root()).await
}

async fn get_value(
    State(state): State<AppState>,
    Path((id, path)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    read(&state, id, DocPath::parse(&path)).await
}

async fn put_root(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    write(&state, id, DocPath::root(), body).await
}

async fn put_value(
    State(state): State<AppState>,
    Path((id, path)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    write(&state, id, DocPath::parse(&path), body).await
}

async fn delete_root(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    remove(&state, id, DocPath::root()).await
}

async fn delete_value(
    State(state): State<AppState>,
    Path((id, path)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    remove(&state, id, DocPath::parse(&path)).await
}

async fn read(state: &AppState, id: String, path: DocPath) -> Result<Json<Value>, ApiError> {
    let id = EntityId::parse(id)?;
    let value = state.documents.read(&id, &path).await?;
    Ok(Json(value))
}

async fn write(
    state: &AppState,
    id: String,
    path: DocPath,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let id = EntityId::parse(id)?;
    // parsed by hand so a missing or wrong Content-Type is not an error
    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        ServiceError::MalformedInput(format!("request body is not valid JSON: {e}"))
    })?;
    let document = state.documents.write(&id, &path, value).await?;
    Ok(Json(document))
}

async fn remove(state: &AppState, id: String, path: DocPath) -> Result<Json<Value>, ApiError> {
    let id = EntityId::parse(id)?;
    let document = state.documents.remove(&id, &path).await?;
    Ok(Json(document))
}
