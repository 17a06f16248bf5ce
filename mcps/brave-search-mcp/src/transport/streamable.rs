//! Stateless transport: one exchange per request
//!
//! Every `POST /mcp` independently extracts the credential, scopes it around
//! handling exactly one protocol message, and tears the scope down before the
//! response is written. Nothing is retained between calls - there is no
//! session id and no event replay store.
//!
//! Response framing follows the server's `--json-response` flag: a plain JSON
//! body, or the same message framed as a single-shot SSE chunk.

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use mcp_common::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

use super::{auth_token, handle_message, AppState};
use crate::auth;

/// `/mcp`: the stateless request/response endpoint.
pub async fn mcp_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: String,
) -> Response {
    if method != Method::POST {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "POST")],
            "Method not allowed",
        )
            .into_response();
    }

    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "could not parse streamable http message");
            let error = JsonRpcResponse::error(
                Value::Null,
                JsonRpcError::new(JsonRpcError::PARSE_ERROR, format!("Parse error: {e}")),
            );
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    // Credential scope covers exactly this one exchange.
    let token = auth_token(&headers);
    let server = state.server.clone();
    let response =
        auth::with_token(token, async move { handle_message(&server, request).await }).await;

    match response {
        // Notifications are accepted without a body.
        None => StatusCode::ACCEPTED.into_response(),
        Some(response) if state.json_response => Json(response).into_response(),
        Some(response) => sse_framed(response),
    }
}

/// Frame one response the way the streaming transport would, then end the
/// stream.
fn sse_framed(response: JsonRpcResponse) -> Response {
    let payload = match serde_json::to_string(&response) {
        Ok(payload) => payload,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    let body = format!("event: message\ndata: {payload}\n\n");
    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        body,
    )
        .into_response()
}
