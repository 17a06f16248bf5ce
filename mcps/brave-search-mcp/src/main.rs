//! Brave Search MCP Server
//!
//! Exposes the Brave Search API (web, image, news, video) as MCP tools over
//! two HTTP transports served by one process: a persistent SSE channel and a
//! stateless streamable HTTP endpoint.
//!
//! # Configuration
//! Set `BRAVE_API_KEY` for the server-wide default credential; clients may
//! override it per connection with an `x-auth-token` header.

use std::sync::Arc;

use clap::Parser;

use brave_search_mcp::backends::brave::BraveBackend;
use brave_search_mcp::backends::SearchBackend;
use brave_search_mcp::config::Config;
use brave_search_mcp::server::SearchServer;
use brave_search_mcp::transport::{self, AppState};

/// Brave Search MCP server
#[derive(Parser)]
#[command(name = "brave-search-mcp", version, about)]
struct Args {
    /// Port to listen on for HTTP
    #[arg(long, env = "BRAVE_SEARCH_MCP_SERVER_PORT", default_value_t = 5000)]
    port: u16,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Enable JSON responses for StreamableHTTP instead of SSE streams
    #[arg(long)]
    json_response: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    mcp_common::init_tracing("brave_search_mcp", &args.log_level)?;

    tracing::info!("Starting Brave Search MCP Server");

    let config = Config::load()?;
    if config.brave.api_key.is_none() {
        tracing::warn!("no BRAVE_API_KEY configured; clients must send x-auth-token");
    }

    let backend: Arc<dyn SearchBackend> = Arc::new(BraveBackend::new(config.brave));
    let server = Arc::new(SearchServer::new(backend));
    let state = AppState::new(server, args.json_response);

    transport::serve(state, args.port).await
}
