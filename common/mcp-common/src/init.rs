//! Server initialization utilities
//!
//! Provides standardized tracing setup for MCP servers.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging for MCP servers
///
/// Sets up logging to stderr with:
/// - Formatted output without ANSI colors (for clean logs)
/// - Environment-based filtering via RUST_LOG, layered over the default
///   directive `<crate_name>=<level>`
///
/// Set `LOG_FORMAT=json` for structured JSON output (useful for production/log
/// aggregation). Default is human-readable text output.
///
/// # Arguments
///
/// * `crate_name` - The name of the MCP server crate (e.g., "brave_search_mcp")
/// * `level` - Default log level for the crate (e.g., "info", "debug")
///
/// # Example
///
/// ```rust,ignore
/// mcp_common::init_tracing("my_mcp", "info")?;
/// ```
pub fn init_tracing(crate_name: &str, level: &str) -> anyhow::Result<()> {
    let directive = format!("{}={}", crate_name, level.to_ascii_lowercase());
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    }

    Ok(())
}
