//! HTTP server exposing the processing trigger.
//!
//! # API Endpoints
//!
//! | Method | Path           | Description                               |
//! |--------|----------------|-------------------------------------------|
//! | GET    | `/health`      | Health check                              |
//! | POST   | `/api/process` | Convert every source CSV, return a report |
//! | GET    | `/api/logs`    | SSE stream for real-time progress         |
//!
//! The process endpoint is synchronous: it answers only after every
//! discovered file has been converted and uploaded, or after the first
//! failure.

use axum::{
    extract::State,
    http::{header, Method},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, LOG_BROADCASTER};
use super::types::{error_response, ProcessResponse};
use crate::batch::run_batch;
use crate::config::AppConfig;
use crate::error::ServerError;
use crate::storage::BlobStore;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        log_error(message.as_str());
        (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(error_response(&message)),
        )
            .into_response()
    }
}

/// Start the HTTP server
pub async fn start_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let port = config.port;

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/process", post(process_batch))
        .route("/api/logs", get(sse_logs))
        .with_state(Arc::new(config))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 sheetsplit server running on http://localhost:{}", port);
    println!("   POST /api/process - Convert CSVs to workbooks");
    println!("   GET  /api/logs    - SSE progress stream");
    println!("   GET  /health      - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "sheetsplit",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "process": "POST /api/process",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time progress streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Processing trigger: run the full batch, synchronously.
async fn process_batch(
    State(config): State<Arc<AppConfig>>,
) -> Result<Json<ProcessResponse>, ServerError> {
    println!("\n{}", "=".repeat(70));
    println!(
        "📄 NEW BATCH: bucket '{}', '{}' -> '{}'",
        config.bucket, config.input_prefix, config.output_prefix
    );
    println!("{}\n", "=".repeat(70));

    let store = BlobStore::connect(config.bucket.as_str()).await?;
    let summary = run_batch(&store, &config.batch_options()).await?;

    println!("\n{}", "=".repeat(70));
    println!("📊 SUMMARY");
    println!("{}", "=".repeat(70));
    println!("   Files converted: {}", summary.files.len());
    println!("   Data rows:       {}", summary.total_data_rows());
    println!("{}\n", "=".repeat(70));

    Ok(Json(ProcessResponse::from_summary(summary, &config)))
}
