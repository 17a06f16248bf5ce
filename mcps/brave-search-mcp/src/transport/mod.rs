//! Session/transport layer
//!
//! Terminates client connections on two surfaces served by one listener:
//!
//! - `GET /sse` + `POST /messages/` - a persistent SSE session with a
//!   companion write channel (see `sse`)
//! - `/mcp` - a stateless request/response endpoint (see `streamable`)
//!
//! Both surfaces read the client credential from the `x-auth-token` header
//! and establish the exchange-scoped credential context before any message
//! is handled. Protocol methods themselves are transport-agnostic and live
//! in `handle_message`.

pub mod sse;
pub mod streamable;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderMap;
use axum::routing::{any, get, post};
use axum::Router;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use mcp_common::{
    InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolsListResult,
    JSONRPC_VERSION,
};

use crate::server::SearchServer;

/// Header carrying the per-connection credential.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Name reported in the initialize handshake.
const SERVER_NAME: &str = "brave-search-mcp-server";

/// Shared state for all transport handlers.
#[derive(Clone)]
pub struct AppState {
    pub server: Arc<SearchServer>,
    pub sessions: sse::SessionMap,
    /// Stateless endpoint framing: plain JSON bodies instead of SSE chunks.
    pub json_response: bool,
}

impl AppState {
    pub fn new(server: Arc<SearchServer>, json_response: bool) -> Self {
        Self {
            server,
            sessions: sse::SessionMap::default(),
            json_response,
        }
    }
}

/// Create the router with both transport surfaces.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // SSE transport
        .route("/sse", get(sse::sse_handler))
        .route("/messages/", post(sse::message_handler))
        // StreamableHTTP transport
        .route("/mcp", any(streamable::mcp_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind the listener and serve both transports until shutdown.
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server starting on port {} with dual transports:", port);
    tracing::info!("  - SSE endpoint: http://localhost:{}/sse", port);
    tracing::info!("  - StreamableHTTP endpoint: http://localhost:{}/mcp", port);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Extract the client credential from request headers.
///
/// Absence is not an error here; an empty token defers to the server-wide
/// default at resolution time.
pub(crate) fn auth_token(headers: &HeaderMap) -> String {
    headers
        .get(AUTH_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Handle one protocol message. Returns `None` for notifications.
pub(crate) async fn handle_message(
    server: &SearchServer,
    request: JsonRpcRequest,
) -> Option<JsonRpcResponse> {
    let id = match request.id {
        Some(id) => id,
        None => {
            tracing::debug!(method = %request.method, "notification received");
            return None;
        }
    };

    if request.jsonrpc != JSONRPC_VERSION {
        return Some(JsonRpcResponse::error(
            id,
            JsonRpcError::with_data(
                JsonRpcError::INVALID_REQUEST,
                "Invalid JSON-RPC version",
                json!({"expected": JSONRPC_VERSION, "got": request.jsonrpc}),
            ),
        ));
    }

    let response = match request.method.as_str() {
        "initialize" => success_or_internal(
            id,
            &InitializeResult::new(SERVER_NAME, env!("CARGO_PKG_VERSION")),
        ),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => success_or_internal(
            id,
            &ToolsListResult {
                tools: server.list_tools().to_vec(),
            },
        ),
        "tools/call" => {
            let params = request.params.unwrap_or_else(|| json!({}));
            let name = match params.get("name").and_then(|n| n.as_str()) {
                Some(name) => name,
                None => {
                    return Some(JsonRpcResponse::error(
                        id,
                        JsonRpcError::new(
                            JsonRpcError::INVALID_PARAMS,
                            "Missing 'name' parameter",
                        ),
                    ));
                }
            };
            let arguments = params
                .get("arguments")
                .cloned()
                .unwrap_or_else(|| json!({}));

            tracing::info!(tool = name, "dispatching tool call");
            let result = server.call_tool(name, arguments).await;
            success_or_internal(id, &result)
        }
        method => JsonRpcResponse::error(
            id,
            JsonRpcError::new(
                JsonRpcError::METHOD_NOT_FOUND,
                format!("Method not found: {method}"),
            ),
        ),
    };

    Some(response)
}

fn success_or_internal<T: serde::Serialize>(id: serde_json::Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            JsonRpcError::new(JsonRpcError::INTERNAL_ERROR, e.to_string()),
        ),
    }
}
