//! Error types for search tool dispatch
//!
//! Every variant here is absorbed at the dispatch boundary and returned to the
//! client as an error-kind tool result; none of them tear down a session.

use thiserror::Error;

/// Failures that can occur while handling a single tool invocation.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No credential in the current exchange and no server-wide default.
    #[error("authentication token not found in request context or environment")]
    AuthenticationMissing,

    /// The outbound call to the Brave API failed at the transport level, or
    /// the response body was not JSON.
    #[error("could not complete {operation} for query \"{query}\": {reason}")]
    Upstream {
        operation: &'static str,
        query: String,
        reason: String,
    },

    /// The invocation named a tool that is not in the catalog.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// A required argument was absent from the invocation.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// The argument map could not be decoded into the tool's parameters.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}
