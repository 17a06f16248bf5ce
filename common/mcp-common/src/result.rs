//! Result helpers for MCP tool responses
//!
//! Provides convenient functions for creating `CallToolResult` responses,
//! reducing boilerplate in tool implementations.

use serde::Serialize;

use crate::protocol::{CallToolResult, Content};

/// Create a successful JSON response from any serializable data
///
/// Serialization failures degrade into an error-kind result rather than
/// propagating; tool dispatch must stay total.
///
/// # Example
///
/// ```rust,ignore
/// use mcp_common::json_success;
///
/// fn my_tool(&self) -> CallToolResult {
///     let data = get_some_data();
///     json_success(&data)
/// }
/// ```
pub fn json_success<T: Serialize>(data: &T) -> CallToolResult {
    match serde_json::to_string_pretty(data) {
        Ok(json) => CallToolResult::success(vec![Content::text(json)]),
        Err(e) => error_text(format!("Error: failed to serialize result: {}", e)),
    }
}

/// Create a successful plain text response
///
/// For tools that return simple text rather than structured data.
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Create an error-kind response carrying a textual message
pub fn error_text(text: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(text.into())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_json_success() {
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        let result = json_success(&data);
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
        let Content::Text { text } = &result.content[0];
        assert!(text.contains("\"value\": 42"));
    }

    #[test]
    fn test_text_success() {
        let result = text_success("hello world");
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
    }

    #[test]
    fn test_error_text() {
        let result = error_text("Error: something failed");
        assert!(result.is_error.unwrap_or(false));
        let Content::Text { text } = &result.content[0];
        assert_eq!(text, "Error: something failed");
    }
}
