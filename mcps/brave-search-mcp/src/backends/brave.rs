//! Brave Search API backend
//!
//! One outbound GET per tool invocation against the fixed Brave endpoints.
//! Optional parameters are only sent when the caller supplied them; the web
//! search operation additionally forwards the `x-loc-*` personalization
//! headers. Response bodies pass through unmodified, including error payloads
//! the API reports inside its JSON.
//!
//! See: https://api-dashboard.search.brave.com/app/documentation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::SearchBackend;
use crate::auth;
use crate::config::BraveConfig;
use crate::error::SearchError;
use crate::types::{ImageSearchParams, NewsSearchParams, VideoSearchParams, WebSearchParams};

/// Result count used when the caller omits `count` (web, image, news).
const DEFAULT_COUNT: u32 = 5;
/// Video search serves larger pages by default.
const DEFAULT_VIDEO_COUNT: u32 = 20;
/// Video search does not filter unless asked to.
const DEFAULT_VIDEO_SAFESEARCH: &str = "off";

/// Brave Search API backend
pub struct BraveBackend {
    client: Client,
    config: BraveConfig,
}

impl BraveBackend {
    pub fn new(config: BraveConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Issue one GET against `endpoint` and parse the body as JSON.
    ///
    /// The HTTP status is deliberately not inspected: Brave reports semantic
    /// errors (bad key, quota) inside JSON bodies that belong to the caller.
    async fn get_json(
        &self,
        operation: &'static str,
        endpoint: &str,
        query: &str,
        params: &[(&'static str, String)],
        extra_headers: &[(&'static str, String)],
    ) -> Result<Value, SearchError> {
        let token = auth::resolve(self.config.api_key.as_deref())?;
        let url = format!("{}/{}", self.config.base_url, endpoint);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("Accept-Encoding", "gzip")
            .header("x-subscription-token", token)
            .query(params);
        for (name, value) in extra_headers {
            request = request.header(*name, value.as_str());
        }

        tracing::info!(operation, query, "sending brave search request");

        let response = request.send().await.map_err(|e| {
            tracing::error!(operation, query, error = %e, "brave search request failed");
            SearchError::Upstream {
                operation,
                query: query.to_string(),
                reason: e.to_string(),
            }
        })?;

        response.json().await.map_err(|e| {
            tracing::error!(operation, query, error = %e, "brave search returned non-JSON body");
            SearchError::Upstream {
                operation,
                query: query.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl SearchBackend for BraveBackend {
    fn name(&self) -> &str {
        "brave"
    }

    async fn web_search(&self, params: &WebSearchParams) -> Result<Value, SearchError> {
        self.get_json(
            "web search",
            "web/search",
            &params.query,
            &web_query_params(params),
            &web_location_headers(params),
        )
        .await
    }

    async fn image_search(&self, params: &ImageSearchParams) -> Result<Value, SearchError> {
        self.get_json(
            "image search",
            "images/search",
            &params.query,
            &image_query_params(params),
            &[],
        )
        .await
    }

    async fn news_search(&self, params: &NewsSearchParams) -> Result<Value, SearchError> {
        self.get_json(
            "news search",
            "news/search",
            &params.query,
            &news_query_params(params),
            &[],
        )
        .await
    }

    async fn video_search(&self, params: &VideoSearchParams) -> Result<Value, SearchError> {
        self.get_json(
            "video search",
            "videos/search",
            &params.query,
            &video_query_params(params),
            &[],
        )
        .await
    }
}

fn push_opt<T: ToString>(
    params: &mut Vec<(&'static str, String)>,
    name: &'static str,
    value: Option<&T>,
) {
    if let Some(value) = value {
        params.push((name, value.to_string()));
    }
}

fn web_query_params(p: &WebSearchParams) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", p.query.clone()),
        ("count", p.count.unwrap_or(DEFAULT_COUNT).to_string()),
    ];
    push_opt(&mut params, "country", p.country.as_ref());
    push_opt(&mut params, "search_lang", p.search_lang.as_ref());
    push_opt(&mut params, "ui_lang", p.ui_lang.as_ref());
    push_opt(&mut params, "offset", p.offset.as_ref());
    push_opt(&mut params, "safesearch", p.safesearch.as_ref());
    push_opt(&mut params, "spellcheck", p.spellcheck.as_ref());
    push_opt(&mut params, "freshness", p.freshness.as_ref());
    push_opt(&mut params, "text_decorations", p.text_decorations.as_ref());
    push_opt(&mut params, "result_filter", p.result_filter.as_ref());
    push_opt(&mut params, "units", p.units.as_ref());
    push_opt(&mut params, "goggles", p.goggles.as_ref());
    push_opt(&mut params, "extra_snippets", p.extra_snippets.as_ref());
    push_opt(&mut params, "summary", p.summary.as_ref());
    push_opt(
        &mut params,
        "enable_rich_callback",
        p.enable_rich_callback.as_ref(),
    );
    params
}

/// Personalization headers, forwarded only for web search and only when set.
fn web_location_headers(p: &WebSearchParams) -> Vec<(&'static str, String)> {
    let mut headers = Vec::new();
    push_opt(&mut headers, "x-loc-lat", p.x_loc_lat.as_ref());
    push_opt(&mut headers, "x-loc-long", p.x_loc_long.as_ref());
    push_opt(&mut headers, "x-loc-timezone", p.x_loc_timezone.as_ref());
    push_opt(&mut headers, "x-loc-city", p.x_loc_city.as_ref());
    push_opt(&mut headers, "x-loc-state", p.x_loc_state.as_ref());
    push_opt(&mut headers, "x-loc-state-name", p.x_loc_state_name.as_ref());
    push_opt(&mut headers, "x-loc-country", p.x_loc_country.as_ref());
    push_opt(
        &mut headers,
        "x-loc-postal-code",
        p.x_loc_postal_code.as_ref(),
    );
    headers
}

fn image_query_params(p: &ImageSearchParams) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", p.query.clone()),
        ("count", p.count.unwrap_or(DEFAULT_COUNT).to_string()),
    ];
    push_opt(&mut params, "search_lang", p.search_lang.as_ref());
    push_opt(&mut params, "country", p.country.as_ref());
    push_opt(&mut params, "safesearch", p.safesearch.as_ref());
    push_opt(&mut params, "spellcheck", p.spellcheck.as_ref());
    params
}

fn news_query_params(p: &NewsSearchParams) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", p.query.clone()),
        ("count", p.count.unwrap_or(DEFAULT_COUNT).to_string()),
    ];
    push_opt(&mut params, "search_lang", p.search_lang.as_ref());
    push_opt(&mut params, "ui_lang", p.ui_lang.as_ref());
    push_opt(&mut params, "country", p.country.as_ref());
    push_opt(&mut params, "safesearch", p.safesearch.as_ref());
    push_opt(&mut params, "offset", p.offset.as_ref());
    push_opt(&mut params, "spellcheck", p.spellcheck.as_ref());
    push_opt(&mut params, "freshness", p.freshness.as_ref());
    push_opt(&mut params, "extra_snippets", p.extra_snippets.as_ref());
    push_opt(&mut params, "goggles", p.goggles.as_ref());
    params
}

fn video_query_params(p: &VideoSearchParams) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", p.query.clone()),
        ("count", p.count.unwrap_or(DEFAULT_VIDEO_COUNT).to_string()),
        (
            "safesearch",
            p.safesearch
                .clone()
                .unwrap_or_else(|| DEFAULT_VIDEO_SAFESEARCH.to_string()),
        ),
    ];
    push_opt(&mut params, "search_lang", p.search_lang.as_ref());
    push_opt(&mut params, "ui_lang", p.ui_lang.as_ref());
    push_opt(&mut params, "country", p.country.as_ref());
    push_opt(&mut params, "offset", p.offset.as_ref());
    push_opt(&mut params, "spellcheck", p.spellcheck.as_ref());
    push_opt(&mut params, "freshness", p.freshness.as_ref());
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth;
    use serde_json::json;

    fn web_params(query: &str) -> WebSearchParams {
        serde_json::from_value(json!({ "query": query })).unwrap()
    }

    fn image_params(query: &str) -> ImageSearchParams {
        serde_json::from_value(json!({ "query": query })).unwrap()
    }

    fn video_params(query: &str) -> VideoSearchParams {
        serde_json::from_value(json!({ "query": query })).unwrap()
    }

    fn backend(base_url: &str, api_key: Option<&str>) -> BraveBackend {
        BraveBackend::new(BraveConfig {
            base_url: base_url.to_string(),
            api_key: api_key.map(str::to_owned),
            ..BraveConfig::default()
        })
    }

    #[test]
    fn test_image_params_omit_absent_options() {
        let mut params = image_params("cats");
        params.count = Some(3);

        // Exactly q and count, nothing else.
        assert_eq!(
            image_query_params(&params),
            vec![("q", "cats".to_string()), ("count", "3".to_string())]
        );
    }

    #[test]
    fn test_web_params_default_count() {
        let params = web_params("rust");
        assert_eq!(
            web_query_params(&params),
            vec![("q", "rust".to_string()), ("count", "5".to_string())]
        );
    }

    #[test]
    fn test_web_params_include_present_options() {
        let mut params = web_params("rust");
        params.count = Some(10);
        params.freshness = Some("pw".to_string());
        params.units = Some("metric".to_string());

        let built = web_query_params(&params);
        assert_eq!(built[0], ("q", "rust".to_string()));
        assert_eq!(built[1], ("count", "10".to_string()));
        assert!(built.contains(&("freshness", "pw".to_string())));
        assert!(built.contains(&("units", "metric".to_string())));
        assert!(!built.iter().any(|(name, _)| *name == "country"));
    }

    #[test]
    fn test_video_params_have_count_and_safesearch_defaults() {
        let params = video_params("launch");
        assert_eq!(
            video_query_params(&params),
            vec![
                ("q", "launch".to_string()),
                ("count", "20".to_string()),
                ("safesearch", "off".to_string()),
            ]
        );
    }

    #[test]
    fn test_location_headers_only_when_present() {
        let params = web_params("coffee");
        assert!(web_location_headers(&params).is_empty());

        let mut params = web_params("coffee");
        params.x_loc_lat = Some(37.7749);
        params.x_loc_city = Some("San Francisco".to_string());

        assert_eq!(
            web_location_headers(&params),
            vec![
                ("x-loc-lat", "37.7749".to_string()),
                ("x-loc-city", "San Francisco".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_web_search_passes_body_through() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({"web": {"results": [{"title": "Rust"}]}});
        let mock = server
            .mock("GET", "/web/search")
            .match_header("x-subscription-token", "config-key")
            .match_header("accept", "application/json")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("q".into(), "rust".into()),
                mockito::Matcher::UrlEncoded("count".into(), "5".into()),
            ]))
            .with_body(body.to_string())
            .create_async()
            .await;

        let backend = backend(&server.url(), Some("config-key"));
        let result = backend.web_search(&web_params("rust")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result, body);
    }

    #[tokio::test]
    async fn test_exchange_token_overrides_config_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/images/search")
            .match_header("x-subscription-token", "exchange-key")
            .match_query(mockito::Matcher::Any)
            .with_body("{}")
            .create_async()
            .await;

        let backend = backend(&server.url(), Some("config-key"));
        auth::with_token("exchange-key".to_string(), async {
            backend.image_search(&image_params("cats")).await.unwrap();
        })
        .await;

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upstream_error_body_passes_through() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({"type": "ErrorResponse", "error": {"code": "SUBSCRIPTION_TOKEN_INVALID"}});
        server
            .mock("GET", "/news/search")
            .match_query(mockito::Matcher::Any)
            .with_status(401)
            .with_body(body.to_string())
            .create_async()
            .await;

        let backend = backend(&server.url(), Some("bad-key"));
        let params: NewsSearchParams = serde_json::from_value(json!({"query": "spacex"})).unwrap();
        let result = backend.news_search(&params).await.unwrap();

        // Semantic errors from the provider are the caller's to interpret.
        assert_eq!(result, body);
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/web/search")
            .match_query(mockito::Matcher::Any)
            .with_body("<html>gateway timeout</html>")
            .create_async()
            .await;

        let backend = backend(&server.url(), Some("key"));
        let err = backend.web_search(&web_params("rust")).await.unwrap_err();
        match err {
            SearchError::Upstream {
                operation, query, ..
            } => {
                assert_eq!(operation, "web search");
                assert_eq!(query, "rust");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_an_upstream_error_repeatably() {
        // Nothing listens here; both calls must fail the same structured way.
        let backend = backend("http://127.0.0.1:9", Some("key"));
        for _ in 0..2 {
            let err = backend.video_search(&video_params("launch")).await.unwrap_err();
            assert!(matches!(err, SearchError::Upstream { operation, .. } if operation == "video search"));
        }
    }

    #[tokio::test]
    async fn test_missing_credential_skips_network_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/web/search")
            .match_query(mockito::Matcher::Any)
            .with_body("{}")
            .expect(0)
            .create_async()
            .await;

        let backend = backend(&server.url(), None);
        let err = backend.web_search(&web_params("rust")).await.unwrap_err();

        assert!(matches!(err, SearchError::AuthenticationMissing));
        mock.assert_async().await;
    }
}
