use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::certificate::{CertificateRecord, TemplateKind};
use crate::error::{ExportError, RenderError};
use crate::export::{self, ExportArtifact, ExportFormat};
use crate::render::{CertificateView, PlacedText, Surface};
use crate::state::AppState;

/// How long a download waits for a view's first paint to be published.
const PAINT_WAIT: Duration = Duration::from_secs(2);

fn default_scale() -> f32 {
    1.0
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub template: TemplateKind,
    #[serde(default)]
    pub record: CertificateRecord,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse<'a> {
    pub id: Uuid,
    pub template: TemplateKind,
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub texts: &'a [PlacedText],
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub filename: Option<String>,
}

pub(crate) fn status_json(code: StatusCode, status: &str, message: impl ToString) -> Response {
    (
        code,
        Json(serde_json::json!({
            "status": status,
            "message": message.to_string(),
        })),
    )
        .into_response()
}

fn view_json(id: Uuid, surface: &Surface) -> Response {
    Json(ViewResponse {
        id,
        template: surface.kind(),
        width: surface.width(),
        height: surface.height(),
        scale: surface.scale(),
        texts: surface.texts(),
    })
    .into_response()
}

fn not_found() -> Response {
    status_json(
        StatusCode::NOT_FOUND,
        "not_found",
        "No such certificate view.",
    )
}

pub(crate) fn render_failure(e: RenderError) -> Response {
    match e {
        RenderError::InvalidScale(_) => status_json(StatusCode::BAD_REQUEST, "invalid", e),
        RenderError::Surface { .. } => {
            tracing::error!("Render failed: {}", e);
            status_json(StatusCode::INTERNAL_SERVER_ERROR, "error", e)
        }
    }
}

/// Repaints `view` off the async runtime.
async fn paint(
    view: Arc<CertificateView>,
    request: RenderRequest,
) -> Result<Arc<Surface>, Response> {
    let RenderRequest {
        template,
        record,
        scale,
    } = request;
    match tokio::task::spawn_blocking(move || view.repaint(template, &record, scale)).await {
        Ok(Ok(surface)) => {
            tracing::info!("Painted {} certificate", template);
            Ok(surface)
        }
        Ok(Err(e)) => Err(render_failure(e)),
        Err(e) => {
            tracing::error!("Render task failed: {}", e);
            Err(
                status_json(StatusCode::INTERNAL_SERVER_ERROR, "error", "Render failed."),
            )
        }
    }
}

pub async fn list_templates() -> impl IntoResponse {
    let templates: Vec<_> = TemplateKind::ALL
        .iter()
        .map(|kind| {
            serde_json::json!({
                "id": kind.as_str(),
                "label": kind.label(),
                "style": if kind.is_declarative() { "declarative" } else { "procedural" },
            })
        })
        .collect();
    Json(templates)
}

pub async fn font_report(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.fonts.report().to_vec())
}

pub async fn create_certificate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RenderRequest>,
) -> Response {
    let (id, view) = state.views.open().await;
    match paint(view, request).await {
        Ok(surface) => view_json(id, &surface),
        Err(response) => {
            state.views.discard(&id).await;
            response
        }
    }
}

pub async fn repaint_certificate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<RenderRequest>,
) -> Response {
    let Some(view) = state.views.get(&id).await else {
        return not_found();
    };
    match paint(view, request).await {
        Ok(surface) => view_json(id, &surface),
        Err(response) => response,
    }
}

pub async fn get_certificate(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> Response {
    let Some(view) = state.views.get(&id).await else {
        return not_found();
    };
    match view.surface() {
        Some(surface) => view_json(id, &surface),
        None => status_json(StatusCode::CONFLICT, "disabled", ExportError::NotRendered),
    }
}

pub async fn delete_certificate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Response {
    if state.views.discard(&id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found()
    }
}

pub async fn preview_certificate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Response {
    let Some(view) = state.views.get(&id).await else {
        return not_found();
    };
    let Some(surface) = view.surface() else {
        return status_json(StatusCode::CONFLICT, "disabled", ExportError::NotRendered);
    };
    png_inline(surface).await
}

pub(crate) async fn png_inline(surface: Arc<Surface>) -> Response {
    match tokio::task::spawn_blocking(move || export::raster::preview_png(&surface)).await {
        Ok(Ok(bytes)) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Ok(Err(e)) => {
            tracing::error!("Preview failed: {}", e);
            status_json(StatusCode::INTERNAL_SERVER_ERROR, "not_completed", e)
        }
        Err(e) => {
            tracing::error!("Preview task failed: {}", e);
            status_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                "not_completed",
                "Preview failed.",
            )
        }
    }
}

fn attachment(artifact: ExportArtifact) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.filename),
            ),
        ],
        artifact.bytes,
    )
        .into_response()
}

pub async fn download_certificate(
    State(state): State<Arc<AppState>>,
    Path((id, format)): Path<(Uuid, String)>,
    Query(query): Query<DownloadQuery>,
) -> Response {
    let Some(format) = ExportFormat::parse(&format) else {
        return status_json(StatusCode::NOT_FOUND, "not_found", "Unknown export format.");
    };
    let Some(view) = state.views.get(&id).await else {
        return not_found();
    };

    if tokio::time::timeout(PAINT_WAIT, view.painted())
        .await
        .ok()
        .flatten()
        .is_none()
    {
        return status_json(StatusCode::CONFLICT, "disabled", ExportError::NotRendered);
    }

    let (surface, claim) = match view.begin_export() {
        Ok(claim) => claim,
        Err(e @ ExportError::NotRendered) => {
            return status_json(StatusCode::CONFLICT, "disabled", e)
        }
        Err(e @ ExportError::Busy) => return status_json(StatusCode::CONFLICT, "busy", e),
        Err(e) => return status_json(StatusCode::INTERNAL_SERVER_ERROR, "not_completed", e),
    };

    let basename =
        export::download_basename(query.filename.as_deref(), &surface.record().recipient_name);
    let result = tokio::task::spawn_blocking(move || {
        let _claim = claim;
        export::export(&surface, format, &basename)
    })
    .await;

    match result {
        Ok(Ok(artifact)) => {
            tracing::info!(
                "Exported {} ({} bytes)",
                artifact.filename,
                artifact.bytes.len()
            );
            attachment(artifact)
        }
        Ok(Err(e)) => {
            tracing::error!("Export failed: {}", e);
            status_json(StatusCode::INTERNAL_SERVER_ERROR, "not_completed", e)
        }
        Err(e) => {
            tracing::error!("Export task failed: {}", e);
            status_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                "not_completed",
                "Export failed.",
            )
        }
    }
}
