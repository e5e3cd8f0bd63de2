//! Serve command - HTTP extraction service.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clap::Args;
use console::style;
use serde_json::json;
use tracing::{error, info, warn};

use focus_core::models::{FocusConfig, MessageRequest, MessageResponse};
use focus_core::{is_message_error, FocusError, MessageHandler};

use super::{build_handler, load_config};

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Bind address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<MessageHandler>,
}

impl AppState {
    pub fn new(handler: MessageHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

/// Build the service router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/model", post(extract))
        .with_state(state)
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    let handler = tokio::task::spawn_blocking(move || build_handler(&config)).await??;
    let app = create_router(AppState::new(handler));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    println!("{} Serving on http://{}", style("✓").green(), addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Log level for `serve` when no `-v` flag is given.
pub fn configured_level(config_path: Option<&str>) -> tracing::Level {
    let level = load_config(config_path)
        .map(|config| config.server.log_level)
        .unwrap_or_else(|_| FocusConfig::default().server.log_level);
    level.parse().unwrap_or(tracing::Level::INFO)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "healthy": 200 }))
}

async fn extract(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let handler = Arc::clone(&state.handler);
    let MessageRequest { req_id, text } = request;

    // Model clients block; keep them off the async workers.
    let result = tokio::task::spawn_blocking(move || handler.process(&text))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    info!(
        "req_id={:?} template={} card={:?} azs={:?}",
        req_id, result.template_name, result.fields.card, result.fields.station
    );

    Ok(Json(MessageResponse::from_result(req_id, result)))
}

/// Error answer of the service.
#[derive(Debug)]
pub enum ApiError {
    /// The message cannot be processed.
    Message(String),
    /// A model server failed.
    Model(String),
    Internal(String),
}

impl From<FocusError> for ApiError {
    fn from(err: FocusError) -> Self {
        if is_message_error(&err) {
            ApiError::Message(err.to_string())
        } else if let FocusError::Inference(e) = err {
            ApiError::Model(e.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Message(message) => {
                warn!("Rejected message: {}", message);
                (StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            ApiError::Model(message) => {
                error!("Model failure: {}", message);
                (StatusCode::BAD_GATEWAY, message)
            }
            ApiError::Internal(message) => {
                error!("Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
