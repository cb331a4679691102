use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use anyhow::{Context, Result};
use lucidia_memory::{AuditEntry, ContradictionPair, MemoryError, NoteStore, SearchHit};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct ApiServer {
    bind_address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub notes: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuditResponse {
    pub audit: Vec<AuditEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContradictionsResponse {
    pub contradictions: Vec<ContradictionPair>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler failure, rendered as a JSON error body.
#[derive(Debug)]
pub enum ApiError {
    Memory(MemoryError),
    Internal(String),
}

impl From<MemoryError> for ApiError {
    fn from(e: MemoryError) -> Self {
        ApiError::Memory(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Memory(e) => {
                let status = match &e {
                    MemoryError::NotFound(_) => StatusCode::NOT_FOUND,
                    MemoryError::InvalidName(_) => StatusCode::BAD_REQUEST,
                    MemoryError::StorageUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                    MemoryError::Unreadable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            error!("API error: {}", message);
        }
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl ApiServer {
    pub fn new(bind_address: String) -> Self {
        Self { bind_address }
    }

    pub async fn start(&self, store: Arc<NoteStore>) -> Result<()> {
        let app = router(store);

        let listener = TcpListener::bind(&self.bind_address)
            .await
            .with_context(|| format!("Failed to bind to {}", self.bind_address))?;

        info!("API server listening on {}", self.bind_address);

        axum::serve(listener, app)
            .with_graceful_shutdown(crate::wait_for_shutdown())
            .await
            .with_context(|| "API server error")?;

        Ok(())
    }
}

pub fn router(store: Arc<NoteStore>) -> Router {
    Router::new()
        .route("/", get(handle_status))
        .route("/search/{query}", get(handle_search))
        .route("/audit", get(handle_audit))
        .route("/contradictions", get(handle_contradictions))
        .route("/notes/{name}", get(handle_note))
        .with_state(store)
}

/// Run a store call off the async executor; every pass is a blocking scan.
async fn with_store<T, F>(store: Arc<NoteStore>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&NoteStore) -> lucidia_memory::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))?
        .map_err(ApiError::from)
}

async fn handle_status(
    State(store): State<Arc<NoteStore>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let notes = with_store(store, |s| s.count()).await?;
    Ok(Json(StatusResponse {
        status: "online".to_string(),
        notes,
    }))
}

async fn handle_search(
    State(store): State<Arc<NoteStore>>,
    Path(query): Path<String>,
) -> Result<Json<SearchResponse>, ApiError> {
    debug!("Search request: {:?}", query);
    let results = with_store(store, move |s| s.search(&query)).await?;
    Ok(Json(SearchResponse { results }))
}

async fn handle_audit(
    State(store): State<Arc<NoteStore>>,
) -> Result<Json<AuditResponse>, ApiError> {
    let audit = with_store(store, |s| s.verify_all()).await?;
    Ok(Json(AuditResponse { audit }))
}

async fn handle_contradictions(
    State(store): State<Arc<NoteStore>>,
) -> Result<Json<ContradictionsResponse>, ApiError> {
    let contradictions = with_store(store, |s| s.detect()).await?;
    Ok(Json(ContradictionsResponse { contradictions }))
}

async fn handle_note(
    State(store): State<Arc<NoteStore>>,
    Path(name): Path<String>,
) -> Result<Json<NoteResponse>, ApiError> {
    let note = with_store(store, move |s| s.get(&name)).await?;
    Ok(Json(NoteResponse {
        name: note.name,
        content: note.content,
    }))
}
