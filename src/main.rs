mod certificate;
mod config;
mod error;
mod export;
mod fonts;
mod render;
mod routes;
mod state;
mod templates;
mod views;

use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "certgen=info,tower_http=info".into()),
        )
        .init();

    let config = config::Config::from_env()?;
    let config = Arc::new(config);

    // Fonts are settled before the first request so every render measures
    // against the same faces.
    let client = reqwest::Client::builder()
        .user_agent(concat!("certgen/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let fonts = fonts::provision(&config.fonts, &config.font_settings, &client).await;
    for report in fonts.report() {
        tracing::info!(
            "Font {:?} ({}): {:?}",
            report.role,
            report.requested,
            report.status
        );
    }
    let fonts = Arc::new(fonts);

    let tera = templates::load_templates(&config.templates_dir)?;
    let state = Arc::new(state::AppState::new(fonts, tera));
    state.views.spawn_sweeper(config.session_ttl);

    let app = routes::router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Certificate service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
