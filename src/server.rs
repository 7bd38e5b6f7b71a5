//! Embedded HTTP server for deck uploads and study sessions.
//!
//! Routes:
//! - `POST /upload` takes a multipart form with a `yaml_file` field and
//!   returns the token and deck listing for the stored upload
//! - `GET /api/decks?token=` lists the decks of an upload
//! - `GET /api/deck?token=&deck_id=` returns one deck with all its cards

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::config::ServerConfig;
use crate::flashcards::{
    import_yaml, Deck, DeckPayload, DeckStore, DeckSummary, ImportError, SessionRecord,
    StoreError,
};

/// Multipart field carrying the deck file
const UPLOAD_FIELD: &str = "yaml_file";

/// Server state shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DeckStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<DeckStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file part in the request.")]
    NoFilePart,

    #[error("No selected file.")]
    NoSelectedFile,

    #[error("Only {allowed} files are accepted.")]
    UnsupportedExtension { allowed: String },

    #[error("File too large. Limit is {limit}.")]
    TooLarge { limit: String },

    #[error("Malformed upload: {0}")]
    Multipart(String),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Store(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn from_multipart(err: MultipartError, config: &ServerConfig) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::TooLarge {
                limit: config.upload_limit_display(),
            }
        } else {
            Self::Multipart(err.body_text())
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

/// Query parameters for deck lookups. Missing values behave like unknown ones.
#[derive(Debug, Deserialize)]
pub struct DeckQuery {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub deck_id: String,
}

/// Token plus deck listing, returned after upload and by `/api/decks`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DecksResponse {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub decks: Vec<DeckSummary>,
}

impl From<SessionRecord> for DecksResponse {
    fn from(record: SessionRecord) -> Self {
        Self {
            decks: record.decks.iter().map(DeckSummary::from).collect(),
            token: record.token,
            created_at: record.created_at,
        }
    }
}

/// Pull the deck file out of the multipart body
async fn read_upload(
    multipart: &mut Multipart,
    config: &ServerConfig,
) -> Result<(String, Bytes), ApiError> {
    let to_api = |e: MultipartError| ApiError::from_multipart(e, config);

    while let Some(field) = multipart.next_field().await.map_err(to_api)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(to_api)?;
        return Ok((filename, bytes));
    }

    Err(ApiError::NoFilePart)
}

/// Read, check and validate an uploaded deck file
async fn accept_upload(state: &AppState, multipart: &mut Multipart) -> Result<Vec<Deck>, ApiError> {
    let (filename, bytes) = read_upload(multipart, &state.config).await?;

    if filename.is_empty() {
        return Err(ApiError::NoSelectedFile);
    }
    if !state.config.allows_file(&filename) {
        return Err(ApiError::UnsupportedExtension {
            allowed: state.config.allowed_extensions_display(),
        });
    }

    let decks = import_yaml(&bytes)?;
    log::info!("Accepted upload {:?} with {} deck(s)", filename, decks.len());
    Ok(decks)
}

/// Handle a deck file upload.
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DecksResponse>, ApiError> {
    let decks = accept_upload(&state, &mut multipart)
        .await
        .inspect_err(|e| log::warn!("Rejected upload: {}", e))?;

    let record = state.store.create_session(decks);
    Ok(Json(DecksResponse::from(record)))
}

/// List the decks stored under a token.
async fn list_decks(
    State(state): State<AppState>,
    Query(query): Query<DeckQuery>,
) -> Result<Json<DecksResponse>, ApiError> {
    let record = state
        .store
        .get_session(&query.token)
        .inspect_err(|e| log::debug!("Deck listing miss: {}", e))?;

    Ok(Json(DecksResponse::from(record)))
}

/// Return a full deck for a study session.
async fn get_deck(
    State(state): State<AppState>,
    Query(query): Query<DeckQuery>,
) -> Result<Json<DeckPayload>, ApiError> {
    let deck = state
        .store
        .get_deck(&query.token, &query.deck_id)
        .inspect_err(|e| match e {
            StoreError::DeckNotFound(id) => log::debug!("Deck lookup miss: no deck {:?}", id),
            StoreError::TokenNotFound => log::debug!("Deck lookup miss: {}", e),
        })?;

    Ok(Json(DeckPayload::from(deck)))
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let limit = state.config.max_upload_bytes;

    Router::new()
        .route("/upload", post(upload))
        .route("/api/decks", get(list_decks))
        .route("/api/deck", get(get_deck))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

/// Deck server handle for managing the server lifecycle.
pub struct DeckServer {
    /// Address the server is listening on.
    pub addr: SocketAddr,
    /// Shutdown signal sender.
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl DeckServer {
    /// Get the base URL for this server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the server gracefully and wait for in-flight requests.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                log::warn!("Deck server task ended abnormally: {}", e);
            }
        }
    }
}

/// Start the deck server.
///
/// Returns a DeckServer handle that can be used to get the address and stop the server.
pub async fn start_server(
    config: ServerConfig,
    store: Arc<DeckStore>,
) -> Result<DeckServer, Box<dyn std::error::Error + Send + Sync>> {
    let listener = TcpListener::bind(config.bind).await?;
    let addr = listener.local_addr()?;

    let app = router(AppState::new(store, config));

    log::info!("Deck server started on http://{}", addr);

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                log::info!("Deck server shutting down");
            })
            .await;
        if let Err(e) = result {
            log::error!("Deck server error: {}", e);
        }
    });

    Ok(DeckServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}
