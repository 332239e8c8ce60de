use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;

use super::api::{png_inline, render_failure, status_json};
use crate::certificate::{CertificateRecord, TemplateKind};
use crate::render::render_certificate;
use crate::state::AppState;

pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let templates: Vec<_> = TemplateKind::ALL
        .iter()
        .map(|kind| serde_json::json!({ "id": kind.as_str(), "label": kind.label() }))
        .collect();

    let mut ctx = Context::new();
    ctx.insert("templates", &templates);
    ctx.insert("fonts", state.fonts.report());
    render_template(&state, "index.html", ctx)
}

#[derive(Debug, Deserialize)]
pub struct ScaleQuery {
    pub scale: Option<f32>,
}

/// One-shot render straight from query parameters, without opening a view.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Path(template): Path<String>,
    Query(record): Query<CertificateRecord>,
    Query(scale): Query<ScaleQuery>,
) -> Response {
    let kind: TemplateKind = match template.parse() {
        Ok(kind) => kind,
        Err(e) => return status_json(StatusCode::NOT_FOUND, "not_found", e),
    };
    let scale = scale.scale.unwrap_or(1.0);
    let fonts = state.fonts.clone();
    let rendered = tokio::task::spawn_blocking(move || {
        render_certificate(kind, &record.resolve(), &fonts, scale)
    })
    .await;

    match rendered {
        Ok(Ok(surface)) => png_inline(Arc::new(surface)).await,
        Ok(Err(e)) => render_failure(e),
        Err(e) => {
            tracing::error!("Preview task failed: {}", e);
            status_json(StatusCode::INTERNAL_SERVER_ERROR, "error", "Render failed.")
        }
    }
}

fn render_template(state: &AppState, name: &str, ctx: Context) -> Html<String> {
    let rendered = state.tera.render(name, &ctx).unwrap_or_else(|e| {
        tracing::error!("Template {} failed: {}", name, e);
        format!("Template error: {}", name)
    });
    Html(rendered)
}
