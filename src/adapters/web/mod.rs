//! HTTP adapter.
//!
//! A small axum surface over the scan pipeline: an HTML form at `/`, a
//! form-encoded `POST /analyze` answering in JSON, and downloads of the
//! written trade logs under `/trades/{filename}`.

mod error;
mod handlers;

pub use error::WebError;
pub use handlers::*;

use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::domain::error::BreakscanError;
use crate::ports::data_port::DataPort;

pub struct AppState {
    pub data_port: Arc<dyn DataPort + Send + Sync>,
    pub report: CsvReportAdapter,
    pub output_dir: PathBuf,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/analyze", post(handlers::analyze))
        .route("/trades/{filename}", get(handlers::download))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), BreakscanError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "web server listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
