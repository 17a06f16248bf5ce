//! Exchange-scoped credential context
//!
//! Each logical exchange (one SSE session, or one stateless request) runs
//! inside a task-local scope holding the `x-auth-token` value it arrived
//! with. Concurrent exchanges never observe each other's token, and the
//! scope unwinds on every exit path - success, error, or cancellation - so
//! a token can never leak into an unrelated exchange.
//!
//! An empty token (header absent) defers to the server-wide default resolved
//! from configuration at startup.

use std::future::Future;

use crate::error::SearchError;

tokio::task_local! {
    /// Auth token attached to the current exchange. Empty means "not
    /// provided"; resolution then falls back to the configured default.
    static EXCHANGE_TOKEN: String;
}

/// Run `fut` with `token` established as the current exchange's credential.
///
/// The credential is visible to everything `fut` awaits on the same task and
/// is released when `fut` completes or is dropped.
pub async fn with_token<F>(token: String, fut: F) -> F::Output
where
    F: Future,
{
    EXCHANGE_TOKEN.scope(token, fut).await
}

/// Resolve the credential for the current exchange.
///
/// Precedence: non-empty exchange token, then the non-empty `default`
/// configured at startup. Outside any exchange scope (or with an empty
/// token) only the default applies.
pub fn resolve(default: Option<&str>) -> Result<String, SearchError> {
    let exchange = EXCHANGE_TOKEN.try_with(|t| t.clone()).ok();
    match exchange {
        Some(token) if !token.is_empty() => Ok(token),
        _ => default
            .filter(|d| !d.is_empty())
            .map(str::to_owned)
            .ok_or(SearchError::AuthenticationMissing),
    }
}
