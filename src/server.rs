//! HTTP surface for brain-dump analysis.
//!
//! ## Endpoints
//!
//! - `GET /api/ping`: liveness check, constant body
//! - `POST /api/brain-dump`: `{"text": "..."}` in, [`AnalysisResult`] out
//!
//! The analysis endpoint always answers 200. Provider and parse failures
//! are absorbed by the service; an unreadable request body is treated as an
//! empty brain dump.

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Json;
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::analysis::AnalysisResult;
use crate::config::ServerConfig;
use crate::error::{AirtimeError, Result};
use crate::service::BrainDumpService;

/// Body returned by `GET /api/ping`.
pub const PING_RESPONSE: &str = "Backend is alive 🚀";

/// Request body for `POST /api/brain-dump`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrainDumpRequest {
    /// The user's free-form text.
    #[serde(default)]
    pub text: String,
}

/// Shared state for axum handlers.
#[derive(Clone)]
struct AppState {
    service: BrainDumpService,
}

/// Build the router with CORS open to any origin.
pub fn router(service: BrainDumpService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/ping", get(handle_ping))
        .route("/api/brain-dump", post(handle_brain_dump))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}

// ---------------------------------------------------------------------------
// AnalysisServer
// ---------------------------------------------------------------------------

/// The running HTTP server.
pub struct AnalysisServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl AnalysisServer {
    /// Start serving.
    ///
    /// Binds to `{config.host}:{config.port}` (use port `0` for auto-assign)
    /// and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start(service: BrainDumpService, config: &ServerConfig) -> Result<Self> {
        let app = router(service);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| AirtimeError::Server(format!("bind to {bind_addr} failed: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| AirtimeError::Server(format!("failed to get local addr: {e}")))?;

        info!("brain-dump API listening on http://{addr}/api");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("HTTP server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for AnalysisServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `GET /api/ping`
async fn handle_ping() -> &'static str {
    PING_RESPONSE
}

/// `POST /api/brain-dump`
async fn handle_brain_dump(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BrainDumpRequest>, JsonRejection>,
) -> Json<AnalysisResult> {
    let text = match payload {
        Ok(Json(request)) => request.text,
        Err(rejection) => {
            warn!(error = %rejection, "unreadable brain-dump body, analyzing empty text");
            String::new()
        }
    };
    Json(state.service.analyze(&text).await)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn request_missing_text_defaults_empty() {
        let req: BrainDumpRequest = serde_json::from_str("{}").unwrap();
        assert!(req.text.is_empty());
    }

    #[test]
    fn request_ignores_extra_fields() {
        let req: BrainDumpRequest =
            serde_json::from_str(r#"{"text": "laundry", "mood": "tired"}"#).unwrap();
        assert_eq!(req.text, "laundry");
    }

    #[test]
    fn ping_constant() {
        assert_eq!(PING_RESPONSE, "Backend is alive 🚀");
    }
}
