mod api;
mod pages;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/preview/:template", get(pages::preview))
        .route("/api/templates", get(api::list_templates))
        .route("/api/fonts", get(api::font_report))
        .route("/api/certificates", post(api::create_certificate))
        .route(
            "/api/certificates/:id",
            get(api::get_certificate)
                .put(api::repaint_certificate)
                .delete(api::delete_certificate),
        )
        .route(
            "/api/certificates/:id/preview.png",
            get(api::preview_certificate),
        )
        .route(
            "/api/certificates/:id/download/:format",
            get(api::download_certificate),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontCache;
    use reqwest::StatusCode;
    use serde_json::{json, Value};
    use std::path::Path;

    async fn serve() -> String {
        let tera = crate::templates::load_templates(Path::new("/nonexistent/templates")).unwrap();
        let state = Arc::new(AppState::new(Arc::new(FontCache::empty()), tera));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn create(client: &reqwest::Client, base: &str, body: Value) -> Value {
        let res = client
            .post(format!("{}/api/certificates", base))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        res.json().await.unwrap()
    }

    #[tokio::test]
    async fn index_lists_every_template() {
        let base = serve().await;
        let html = reqwest::get(format!("{}/", base)).await.unwrap().text().await.unwrap();
        assert!(html.contains("ux_design_foundations"));
        assert!(html.contains("product_designer_1"));
        assert!(html.contains("academic"));
        assert!(html.contains("modern"));
    }

    #[tokio::test]
    async fn render_then_export_png_and_pdf() {
        let base = serve().await;
        let client = reqwest::Client::new();
        let view = create(
            &client,
            &base,
            json!({
                "template": "ux_design_foundations",
                "record": { "recipientName": "Ada Lovelace", "courseName": "UX Design Foundations" }
            }),
        )
        .await;
        assert_eq!(view["width"], 800);
        assert_eq!(view["height"], 600);
        assert_eq!(view["template"], "ux_design_foundations");
        let id = view["id"].as_str().unwrap().to_string();

        let png = client
            .get(format!("{}/api/certificates/{}/download/png", base, id))
            .send()
            .await
            .unwrap();
        assert_eq!(png.status(), StatusCode::OK);
        assert_eq!(png.headers()["content-type"], "image/png");
        assert_eq!(
            png.headers()["content-disposition"],
            "attachment; filename=\"certificate-Ada-Lovelace.png\""
        );
        let bytes = png.bytes().await.unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(u32::from_be_bytes(bytes[16..20].try_into().unwrap()), 2400);
        assert_eq!(u32::from_be_bytes(bytes[20..24].try_into().unwrap()), 1800);

        let pdf = client
            .get(format!(
                "{}/api/certificates/{}/download/pdf?filename=ada",
                base, id
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(pdf.status(), StatusCode::OK);
        assert_eq!(
            pdf.headers()["content-disposition"],
            "attachment; filename=\"ada.pdf\""
        );
        assert!(pdf.bytes().await.unwrap().starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn repaint_switches_template_in_place() {
        let base = serve().await;
        let client = reqwest::Client::new();
        let view = create(&client, &base, json!({ "template": "academic" })).await;
        let id = view["id"].as_str().unwrap();

        let res = client
            .put(format!("{}/api/certificates/{}", base, id))
            .json(&json!({ "template": "modern", "scale": 0.5 }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let repainted: Value = res.json().await.unwrap();
        assert_eq!(repainted["id"], id);
        assert_eq!(repainted["template"], "modern");
        assert_eq!(repainted["width"], 400);

        let current: Value = client
            .get(format!("{}/api/certificates/{}", base, id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(current["template"], "modern");
    }

    #[tokio::test]
    async fn bad_requests_are_rejected() {
        let base = serve().await;
        let client = reqwest::Client::new();

        let unknown = client
            .post(format!("{}/api/certificates", base))
            .json(&json!({ "template": "watercolor" }))
            .send()
            .await
            .unwrap();
        assert_eq!(unknown.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let scale = client
            .post(format!("{}/api/certificates", base))
            .json(&json!({ "template": "modern", "scale": 12.0 }))
            .send()
            .await
            .unwrap();
        assert_eq!(scale.status(), StatusCode::BAD_REQUEST);

        let missing = client
            .get(format!(
                "{}/api/certificates/{}/download/png",
                base,
                uuid::Uuid::new_v4()
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleted_views_are_gone() {
        let base = serve().await;
        let client = reqwest::Client::new();
        let view = create(&client, &base, json!({ "template": "modern" })).await;
        let url = format!("{}/api/certificates/{}", base, view["id"].as_str().unwrap());

        let res = client.delete(&url).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let res = client.get(&url).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bundle_download_is_a_zip() {
        let base = serve().await;
        let client = reqwest::Client::new();
        let view = create(&client, &base, json!({ "template": "product_designer_1" })).await;
        let res = client
            .get(format!(
                "{}/api/certificates/{}/download/all",
                base,
                view["id"].as_str().unwrap()
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["content-type"], "application/zip");
        assert!(res.bytes().await.unwrap().starts_with(b"PK"));
    }

    #[tokio::test]
    async fn stateless_preview_renders_png() {
        let base = serve().await;
        let res = reqwest::get(format!(
            "{}/preview/academic?recipientName=Grace%20Hopper&scale=0.5",
            base
        ))
        .await
        .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["content-type"], "image/png");

        let res = reqwest::get(format!("{}/preview/nope", base)).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
