pub mod handlers;
mod types;

pub use types::*;

use crate::{
    Result,
    analysis::HttpAnalysisClient,
    config::Config,
    gallery::{Gallery, HttpAssetFetcher},
    submission::SubmissionController,
    view::ViewModel,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

pub fn router(state: AppState, gallery_dir: &str, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/state", get(handlers::view_state))
        .route("/upload", post(handlers::upload))
        .route("/select", post(handlers::select_gallery_image))
        .nest_service("/gallery", ServeDir::new(gallery_dir))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let service = HttpAnalysisClient::new(&config.service)?;
    info!(
        "Analysis service at {} / {}",
        service.analyze_url(),
        service.narrative_url()
    );

    let gallery = Arc::new(Gallery::load(&config.gallery, &config.server).await?);
    let fetcher = HttpAssetFetcher::new(
        gallery.clone(),
        Duration::from_secs(config.service.timeout_secs),
    )?;

    let controller = SubmissionController::new(
        Arc::new(service),
        Arc::new(fetcher),
        Arc::new(Mutex::new(ViewModel::default())),
    );

    let app_state = AppState {
        controller: Arc::new(controller),
        gallery,
    };

    let app = router(
        app_state,
        &config.gallery.dir,
        config.server.max_upload_bytes,
    );

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
