//! Brave Search MCP Library
//!
//! Exposes the Brave Search API (web, image, news, video) as MCP tools over
//! two HTTP transports: a persistent SSE channel and a stateless streamable
//! HTTP endpoint.
//!
//! # Configuration
//! Set `BRAVE_API_KEY` for the server-wide default credential, or pass a
//! per-connection `x-auth-token` header. See `config` for the full layering.

pub mod auth;
pub mod backends;
pub mod config;
pub mod error;
pub mod server;
pub mod transport;
pub mod types;

// Re-export main server type
pub use server::SearchServer;

// Re-export parameter types for direct API usage
pub use types::{ImageSearchParams, NewsSearchParams, VideoSearchParams, WebSearchParams};
