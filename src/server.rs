//! HTTP + WebSocket surface for the wizard.
//!
//! REST endpoints drive the questionnaire, uploads and generation;
//! `/ws/progress` streams run snapshots to browser clients. All state
//! lives in the shared `Wizard` behind a lock; handlers take snapshots
//! and never hold the lock across awaits on the socket.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast};
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::WizardConfig;
use crate::error::{Error, WizardError};
use crate::generation::ProgressEvent;
use crate::questionnaire::{FieldKey, NextOutcome, SectionId};
use crate::upload::{Candidate, RejectedUpload, UploadedDocument};
use crate::wizard::{
    StatusSummary, Wizard, WizardStage, spawn_generating_hold, spawn_generation_driver,
};

/// Upper bound on a whole multipart upload body. Individual files are
/// still capped at 10MB by validation; this only bounds the transport.
const MAX_UPLOAD_BODY: usize = 64 * 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub wizard: Arc<RwLock<Wizard>>,
    pub progress: broadcast::Sender<ProgressEvent>,
    pub config: WizardConfig,
}

impl AppState {
    pub fn new(config: WizardConfig) -> Self {
        let (progress, _rx) = broadcast::channel(config.broadcast_capacity);
        Self {
            wizard: Arc::new(RwLock::new(Wizard::new(config.clone()))),
            progress,
            config,
        }
    }
}

/// Build the Axum router for the wizard.
pub fn wizard_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/wizard/status", get(get_status))
        .route("/api/questionnaire", get(get_questionnaire))
        .route("/api/questionnaire/field", post(set_field))
        .route("/api/questionnaire/next", post(questionnaire_next))
        .route("/api/questionnaire/previous", post(questionnaire_previous))
        .route("/api/documents", get(list_documents).post(upload_documents))
        .route("/api/documents/{id}", delete(remove_document))
        .route("/api/generation/start", post(start_generation))
        .route("/api/generation/regenerate", post(regenerate))
        .route("/api/report", get(download_report))
        .route("/ws/progress", get(ws_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Questionnaire(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Wizard(WizardError::FormIncomplete | WizardError::NoDocuments) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Error::Wizard(_) => StatusCode::CONFLICT,
            Error::Upload(_) => StatusCode::BAD_REQUEST,
            Error::Generation(_) => StatusCode::CONFLICT,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

// ── Health / status ─────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "cir-assist"
    }))
}

async fn get_status(State(state): State<AppState>) -> Json<StatusSummary> {
    Json(state.wizard.read().await.status())
}

// ── Questionnaire ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct FieldView {
    key: FieldKey,
    label: &'static str,
    input_kind: crate::questionnaire::InputKind,
    value: String,
    filled: bool,
}

#[derive(Debug, Serialize)]
struct QuestionnaireView {
    section: SectionId,
    title: &'static str,
    section_index: usize,
    section_count: usize,
    section_valid: bool,
    fields: Vec<FieldView>,
}

/// GET /api/questionnaire
///
/// The active section with its fields and current draft values.
async fn get_questionnaire(State(state): State<AppState>) -> Json<QuestionnaireView> {
    let wizard = state.wizard.read().await;
    let questionnaire = wizard.questionnaire();
    let section = questionnaire.section();
    let fields = section
        .fields()
        .iter()
        .map(|key| FieldView {
            key: *key,
            label: key.label(),
            input_kind: key.input_kind(),
            value: questionnaire.form().get(*key).to_string(),
            filled: questionnaire.form().is_filled(*key),
        })
        .collect();
    Json(QuestionnaireView {
        section,
        title: section.title(),
        section_index: section.index(),
        section_count: SectionId::ALL.len(),
        section_valid: questionnaire.section_valid(),
        fields,
    })
}

#[derive(Debug, Deserialize)]
struct SetFieldRequest {
    field: FieldKey,
    value: String,
}

#[derive(Debug, Serialize)]
struct SetFieldResponse {
    section_valid: bool,
}

async fn set_field(
    State(state): State<AppState>,
    Json(req): Json<SetFieldRequest>,
) -> Result<Json<SetFieldResponse>, Error> {
    let mut wizard = state.wizard.write().await;
    wizard.set_field(req.field, req.value)?;
    Ok(Json(SetFieldResponse {
        section_valid: wizard.questionnaire().section_valid(),
    }))
}

#[derive(Debug, Serialize)]
struct NextResponse {
    completed: bool,
    section: SectionId,
    stage: WizardStage,
}

async fn questionnaire_next(
    State(state): State<AppState>,
) -> Result<Json<NextResponse>, Error> {
    let mut wizard = state.wizard.write().await;
    let outcome = wizard.questionnaire_next()?;
    Ok(Json(NextResponse {
        completed: matches!(outcome, NextOutcome::Completed(_)),
        section: wizard.questionnaire().section(),
        stage: wizard.stage(),
    }))
}

async fn questionnaire_previous(
    State(state): State<AppState>,
) -> Result<Json<NextResponse>, Error> {
    let mut wizard = state.wizard.write().await;
    let section = wizard.questionnaire_previous()?;
    Ok(Json(NextResponse {
        completed: false,
        section,
        stage: wizard.stage(),
    }))
}

// ── Documents ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct DocumentsResponse {
    documents: Vec<UploadedDocument>,
}

#[derive(Debug, Serialize)]
struct UploadResponse {
    added: Vec<UploadedDocument>,
    rejected: Vec<RejectedUpload>,
    /// Aggregated rejection text in the original `name: reason` format.
    error_summary: Option<String>,
    documents: Vec<UploadedDocument>,
}

async fn list_documents(State(state): State<AppState>) -> Json<DocumentsResponse> {
    Json(DocumentsResponse {
        documents: state.wizard.read().await.documents().snapshot(),
    })
}

/// POST /api/documents
///
/// Multipart batch upload. Parts without a filename are ignored, which
/// lets clients mix in ordinary form fields.
async fn upload_documents(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, Error> {
    let mut candidates = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| crate::error::UploadError::MalformedPayload(e.to_string()))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| crate::error::UploadError::MalformedPayload(e.to_string()))?;
        candidates.push(Candidate::new(filename, content_type, bytes.to_vec()));
    }

    let mut wizard = state.wizard.write().await;
    let report = wizard.add_documents(candidates)?;
    if let Some(summary) = report.error_summary() {
        warn!(%summary, "Upload batch had rejections");
    }
    Ok(Json(UploadResponse {
        error_summary: report.error_summary(),
        added: report.added,
        rejected: report.rejected,
        documents: wizard.documents().snapshot(),
    }))
}

#[derive(Debug, Serialize)]
struct RemoveResponse {
    removed: bool,
    documents: Vec<UploadedDocument>,
}

async fn remove_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RemoveResponse>, Error> {
    let mut wizard = state.wizard.write().await;
    let removed = wizard.remove_document(id)?;
    Ok(Json(RemoveResponse {
        removed,
        documents: wizard.documents().snapshot(),
    }))
}

// ── Generation ──────────────────────────────────────────────────────

async fn start_generation(
    State(state): State<AppState>,
) -> Result<Json<StatusSummary>, Error> {
    let status = {
        let mut wizard = state.wizard.write().await;
        wizard.start_generation()?;
        wizard.status()
    };

    spawn_generation_driver(
        Arc::clone(&state.wizard),
        state.progress.clone(),
        state.config.clone(),
    );
    spawn_generating_hold(Arc::clone(&state.wizard), state.config.clone());

    info!("Generation started");
    Ok(Json(status))
}

async fn regenerate(State(state): State<AppState>) -> Result<Json<StatusSummary>, Error> {
    let status = {
        let mut wizard = state.wizard.write().await;
        wizard.regenerate()?;
        wizard.status()
    };

    // Regeneration restarts the ticker only; the orchestrator hold is
    // not re-raised, matching the original behavior.
    spawn_generation_driver(
        Arc::clone(&state.wizard),
        state.progress.clone(),
        state.config.clone(),
    );

    Ok(Json(status))
}

async fn download_report(State(state): State<AppState>) -> Result<Response, Error> {
    let artifact = {
        let wizard = state.wizard.read().await;
        wizard.report(chrono::Local::now().date_naive())?
    };

    // Non-ASCII company names fall back to a bare attachment disposition.
    let disposition = header::HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        artifact.filename
    ))
    .unwrap_or_else(|_| header::HeaderValue::from_static("attachment"));

    info!(filename = %artifact.filename, "Report downloaded");
    Ok((
        [
            (header::CONTENT_TYPE, header::HeaderValue::from_static(artifact.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.content,
    )
        .into_response())
}

// ── WebSocket ───────────────────────────────────────────────────────

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    info!("Progress WebSocket client connecting");
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    // Send the current run snapshot on connect.
    let snapshot = state.wizard.read().await.run().snapshot();
    if let Ok(json) = serde_json::to_string(&snapshot) {
        if socket.send(Message::Text(json.into())).await.is_err() {
            warn!("Failed to send initial snapshot, client disconnected");
            return;
        }
    }

    let mut rx = state.progress.subscribe();

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        if let Ok(json) = serde_json::to_string(&event) {
                            if socket.send(Message::Text(json.into())).await.is_err() {
                                debug!("Client disconnected during send");
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(missed = n, "WS client lagged behind progress broadcast");
                        let snapshot = state.wizard.read().await.run().snapshot();
                        if let Ok(json) = serde_json::to_string(&snapshot) {
                            if socket.send(Message::Text(json.into())).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Progress broadcast channel closed");
                        break;
                    }
                }
            }

            result = socket.recv() => {
                match result {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("Progress WebSocket client disconnected");
                        break;
                    }
                    Some(Ok(_)) => {} // Clients have nothing to say; ignore.
                    Some(Err(e)) => {
                        debug!(error = %e, "Progress WebSocket error");
                        break;
                    }
                }
            }
        }
    }
}
