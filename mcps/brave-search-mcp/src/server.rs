//! Tool catalog and dispatch for the Brave search tools
//!
//! `SearchServer` owns the immutable tool catalog and routes invocations to
//! the backend. Dispatch is total: unknown tools, missing arguments, and
//! backend failures all come back as error-kind tool results, never as faults
//! the transport layer has to unwind.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use mcp_common::{error_text, json_success, CallToolResult, Tool};

use crate::backends::SearchBackend;
use crate::error::SearchError;
use crate::types::{ImageSearchParams, NewsSearchParams, VideoSearchParams, WebSearchParams};

/// The search tool server: static catalog plus dispatch table.
pub struct SearchServer {
    backend: Arc<dyn SearchBackend>,
    tools: Vec<Tool>,
}

impl SearchServer {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        let tools = vec![
            tool_descriptor::<WebSearchParams>(
                "tool_web_search",
                "Perform a web search query with many optional filters and personalization \
                 headers. Supports freshness filtering, safesearch, spellcheck, text \
                 decorations, custom re-ranking (Goggles), and user location headers to \
                 personalize results.",
            ),
            tool_descriptor::<ImageSearchParams>(
                "tool_image_search",
                "Perform an image search. Supports filters like safesearch, language, \
                 spellcheck, and country-based localization. Returns a list of images \
                 matching the query.",
            ),
            tool_descriptor::<NewsSearchParams>(
                "tool_news_search",
                "Perform a news search. Returns fresh, localized news results with support \
                 for safesearch, language filters, pagination, freshness filters, \
                 spellcheck, and Goggles for custom re-ranking.",
            ),
            tool_descriptor::<VideoSearchParams>(
                "tool_video_search",
                "Perform a video search and get video results matching a query. Supports \
                 safesearch filtering, language and country localization, pagination, \
                 spellcheck, and freshness filters.",
            ),
        ];

        Self { backend, tools }
    }

    /// The discovery catalog. Built once at construction, shared read-only.
    pub fn list_tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Invoke a tool by name. Never fails out of this boundary.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> CallToolResult {
        match self.dispatch(name, arguments).await {
            Ok(value) => json_success(&value),
            Err(e) => {
                tracing::error!(tool = name, error = %e, "tool call failed");
                error_text(format!("Error: {e}"))
            }
        }
    }

    async fn dispatch(&self, name: &str, arguments: Value) -> Result<Value, SearchError> {
        match name {
            "tool_web_search" => self.backend.web_search(&decode_params(arguments)?).await,
            "tool_image_search" => self.backend.image_search(&decode_params(arguments)?).await,
            "tool_news_search" => self.backend.news_search(&decode_params(arguments)?).await,
            "tool_video_search" => self.backend.video_search(&decode_params(arguments)?).await,
            _ => Err(SearchError::UnknownTool(name.to_string())),
        }
    }
}

/// Decode an argument map into a tool's parameter struct.
///
/// Only `query` is required; unknown arguments are dropped by serde rather
/// than forwarded upstream.
fn decode_params<T: DeserializeOwned>(arguments: Value) -> Result<T, SearchError> {
    match arguments.get("query") {
        Some(query) if !query.is_null() => {}
        _ => return Err(SearchError::MissingArgument("query")),
    }
    serde_json::from_value(arguments).map_err(|e| SearchError::InvalidArguments(e.to_string()))
}

fn tool_descriptor<T: JsonSchema>(name: &str, description: &str) -> Tool {
    let mut input_schema =
        serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| json!({"type": "object"}));
    if let Some(obj) = input_schema.as_object_mut() {
        // Schema metadata is noise in a tool catalog.
        obj.remove("$schema");
        obj.remove("title");
    }

    Tool {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mcp_common::Content;
    use std::sync::Mutex;

    /// Records the parameters each operation was invoked with.
    #[derive(Default)]
    struct RecordingBackend {
        web: Mutex<Option<WebSearchParams>>,
        image: Mutex<Option<ImageSearchParams>>,
        news: Mutex<Option<NewsSearchParams>>,
        video: Mutex<Option<VideoSearchParams>>,
    }

    #[async_trait]
    impl SearchBackend for RecordingBackend {
        fn name(&self) -> &str {
            "recording"
        }

        async fn web_search(&self, params: &WebSearchParams) -> Result<Value, SearchError> {
            *self.web.lock().unwrap() = Some(params.clone());
            Ok(json!({"web": {"results": []}}))
        }

        async fn image_search(&self, params: &ImageSearchParams) -> Result<Value, SearchError> {
            *self.image.lock().unwrap() = Some(params.clone());
            Ok(json!({"results": []}))
        }

        async fn news_search(&self, params: &NewsSearchParams) -> Result<Value, SearchError> {
            *self.news.lock().unwrap() = Some(params.clone());
            Ok(json!({"results": []}))
        }

        async fn video_search(&self, params: &VideoSearchParams) -> Result<Value, SearchError> {
            *self.video.lock().unwrap() = Some(params.clone());
            Ok(json!({"results": []}))
        }
    }

    /// Fails every operation at the transport level.
    struct FailingBackend;

    #[async_trait]
    impl SearchBackend for FailingBackend {
        fn name(&self) -> &str {
            "failing"
        }

        async fn web_search(&self, params: &WebSearchParams) -> Result<Value, SearchError> {
            Err(SearchError::Upstream {
                operation: "web search",
                query: params.query.clone(),
                reason: "connection refused".to_string(),
            })
        }

        async fn image_search(&self, _params: &ImageSearchParams) -> Result<Value, SearchError> {
            unreachable!("not exercised")
        }

        async fn news_search(&self, _params: &NewsSearchParams) -> Result<Value, SearchError> {
            unreachable!("not exercised")
        }

        async fn video_search(&self, _params: &VideoSearchParams) -> Result<Value, SearchError> {
            unreachable!("not exercised")
        }
    }

    fn result_text(result: &CallToolResult) -> &str {
        let Content::Text { text } = &result.content[0];
        text
    }

    #[test]
    fn test_catalog_names_and_required_fields() {
        let server = SearchServer::new(Arc::new(RecordingBackend::default()));
        let names: Vec<&str> = server.list_tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "tool_web_search",
                "tool_image_search",
                "tool_news_search",
                "tool_video_search"
            ]
        );

        for tool in server.list_tools() {
            assert_eq!(tool.input_schema["type"], "object");
            assert_eq!(tool.input_schema["required"], json!(["query"]));
        }
    }

    #[test]
    fn test_catalog_is_stable_across_calls() {
        let server = SearchServer::new(Arc::new(RecordingBackend::default()));
        let first = serde_json::to_value(server.list_tools()).unwrap();
        let second = serde_json::to_value(server.list_tools()).unwrap();
        assert_eq!(first, second);

        // A second server instance advertises the identical catalog.
        let other = SearchServer::new(Arc::new(RecordingBackend::default()));
        assert_eq!(first, serde_json::to_value(other.list_tools()).unwrap());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error_result() {
        let server = SearchServer::new(Arc::new(RecordingBackend::default()));
        let result = server.call_tool("nonexistent_tool", json!({})).await;
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("unknown tool: nonexistent_tool"));
    }

    #[tokio::test]
    async fn test_missing_query_is_an_error_result() {
        let server = SearchServer::new(Arc::new(RecordingBackend::default()));
        let result = server.call_tool("tool_web_search", json!({})).await;
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("missing required argument: query"));
    }

    #[tokio::test]
    async fn test_arguments_are_decoded_and_unknown_ones_dropped() {
        let backend = Arc::new(RecordingBackend::default());
        let server = SearchServer::new(backend.clone());

        let result = server
            .call_tool(
                "tool_image_search",
                json!({"query": "cats", "count": 3, "bogus_argument": true}),
            )
            .await;
        assert_eq!(result.is_error, Some(false));

        let recorded = backend.image.lock().unwrap().clone().unwrap();
        assert_eq!(recorded.query, "cats");
        assert_eq!(recorded.count, Some(3));
        assert!(recorded.safesearch.is_none());
    }

    #[tokio::test]
    async fn test_wrongly_typed_arguments_are_an_error_result() {
        let server = SearchServer::new(Arc::new(RecordingBackend::default()));
        let result = server
            .call_tool("tool_news_search", json!({"query": "spacex", "count": "lots"}))
            .await;
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("invalid arguments"));
    }

    #[tokio::test]
    async fn test_success_wraps_backend_json() {
        let server = SearchServer::new(Arc::new(RecordingBackend::default()));
        let result = server
            .call_tool("tool_web_search", json!({"query": "rust"}))
            .await;
        assert_eq!(result.is_error, Some(false));

        let body: Value = serde_json::from_str(result_text(&result)).unwrap();
        assert_eq!(body, json!({"web": {"results": []}}));
    }

    #[tokio::test]
    async fn test_backend_failure_is_an_error_result_repeatably() {
        let server = SearchServer::new(Arc::new(FailingBackend));
        for _ in 0..2 {
            let result = server
                .call_tool("tool_web_search", json!({"query": "rust"}))
                .await;
            assert_eq!(result.is_error, Some(true));
            let text = result_text(&result);
            assert!(text.contains("web search"));
            assert!(text.contains("rust"));
        }
    }
}
