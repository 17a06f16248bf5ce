//! Streaming transport: SSE sessions with a companion write channel
//!
//! `GET /sse` opens a session: the first event names the write endpoint
//! (`/messages/?session_id=...`), every later event carries one JSON-RPC
//! message from server to client. `POST /messages/` feeds client messages
//! into the session's inbound queue.
//!
//! Each session runs a single consumer loop spawned inside the credential
//! scope read from the connect headers, so messages are answered strictly in
//! arrival order and the credential is released on every exit path. A guard
//! on the response stream unregisters the session whenever the connection
//! drops, which closes the inbound queue and ends the loop.

use std::collections::HashMap;
use std::convert::Infallible;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use futures_util::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use uuid::Uuid;

use mcp_common::JsonRpcRequest;

use super::{auth_token, handle_message, AppState};
use crate::auth;
use crate::server::SearchServer;

/// Open streaming sessions, keyed by the id handed out on connect.
pub type SessionMap = Arc<Mutex<HashMap<Uuid, mpsc::Sender<JsonRpcRequest>>>>;

const CHANNEL_CAPACITY: usize = 32;

/// Query parameters of the write channel.
#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session_id: String,
}

/// `GET /sse`: open a streaming session.
pub async fn sse_handler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let token = auth_token(&headers);
    let session_id = Uuid::new_v4();

    let (inbound_tx, inbound_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (outbound_tx, outbound_rx) = mpsc::channel(CHANNEL_CAPACITY);

    state
        .sessions
        .lock()
        .expect("session map lock poisoned")
        .insert(session_id, inbound_tx);
    tracing::info!(%session_id, "sse session opened");

    // The loop owns the credential scope for the whole session.
    let server = state.server.clone();
    tokio::spawn(auth::with_token(
        token,
        session_loop(server, inbound_rx, outbound_tx, session_id),
    ));

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("/messages/?session_id={}", session_id.simple()));
    let events = stream::iter([Ok::<_, Infallible>(endpoint)]).chain(
        ReceiverStream::new(outbound_rx)
            .map(|payload: String| Ok(Event::default().event("message").data(payload))),
    );

    let guarded = SessionStream {
        events,
        _guard: SessionGuard {
            session_id,
            sessions: state.sessions.clone(),
        },
    };

    Sse::new(guarded).keep_alive(KeepAlive::default())
}

/// `POST /messages/?session_id=...`: deliver one client message to a session.
pub async fn message_handler(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
    body: String,
) -> impl IntoResponse {
    let Ok(session_id) = Uuid::parse_str(&query.session_id) else {
        return (StatusCode::BAD_REQUEST, "Invalid session id");
    };

    let inbound = state
        .sessions
        .lock()
        .expect("session map lock poisoned")
        .get(&session_id)
        .cloned();
    let Some(inbound) = inbound else {
        tracing::warn!(%session_id, "message for unknown session");
        return (StatusCode::NOT_FOUND, "Could not find session");
    };

    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(%session_id, error = %e, "could not parse message");
            return (StatusCode::BAD_REQUEST, "Could not parse message");
        }
    };

    if inbound.send(request).await.is_err() {
        return (StatusCode::NOT_FOUND, "Session closed");
    }

    (StatusCode::ACCEPTED, "Accepted")
}

/// Per-session message loop: single consumer, replies in arrival order.
async fn session_loop(
    server: Arc<SearchServer>,
    mut inbound: mpsc::Receiver<JsonRpcRequest>,
    outbound: mpsc::Sender<String>,
    session_id: Uuid,
) {
    while let Some(request) = inbound.recv().await {
        let method = request.method.clone();
        let Some(response) = handle_message(&server, request).await else {
            continue;
        };

        let payload = match serde_json::to_string(&response) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(%session_id, method = %method, error = %e, "failed to serialize response");
                continue;
            }
        };

        if outbound.send(payload).await.is_err() {
            // Peer disconnected while a reply was in flight. The work above
            // already ran to completion; only the delivery is dropped.
            tracing::debug!(%session_id, method = %method, "dropping reply for closed session");
            break;
        }
    }

    tracing::info!(%session_id, "sse session closed");
}

/// Unregisters a session when its SSE response body is dropped, on normal
/// close and on abort alike. Closing the inbound sender ends the loop.
struct SessionGuard {
    session_id: Uuid,
    sessions: SessionMap,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.sessions
            .lock()
            .expect("session map lock poisoned")
            .remove(&self.session_id);
        tracing::debug!(session_id = %self.session_id, "sse connection dropped");
    }
}

/// An event stream that carries the session guard alongside it.
struct SessionStream<S> {
    events: S,
    _guard: SessionGuard,
}

impl<S> Stream for SessionStream<S>
where
    S: Stream + Unpin,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().events).poll_next(cx)
    }
}
