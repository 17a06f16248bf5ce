//! MCP Common - Shared utilities for MCP servers
//!
//! This crate provides common functionality used across MCP servers:
//!
//! - **Protocol**: JSON-RPC 2.0 framing and MCP model types
//! - **Initialization**: standardized tracing setup
//! - **Results**: Helper functions for creating `CallToolResult` responses
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{init_tracing, json_success, CallToolResult};
//!
//! // In main.rs
//! init_tracing("my_mcp", "info")?;
//!
//! // In tool implementations
//! fn my_tool(&self) -> CallToolResult {
//!     let data = get_some_data();
//!     json_success(&data)
//! }
//! ```

pub mod init;
pub mod protocol;
pub mod result;

// Re-export commonly used items at crate root
pub use init::init_tracing;
pub use protocol::{
    CallToolResult, Content, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ServerCapabilities, ServerInfo, Tool, ToolsCapability, ToolsListResult, JSONRPC_VERSION,
    PROTOCOL_VERSION,
};
pub use result::{error_text, json_success, text_success};
