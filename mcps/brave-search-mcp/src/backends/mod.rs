//! Search backend implementations
//!
//! This module provides a trait-based abstraction over the upstream search
//! API. The Brave Search API is the only shipped backend; tests substitute
//! recording fakes through the same seam.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::SearchError;
use crate::types::{ImageSearchParams, NewsSearchParams, VideoSearchParams, WebSearchParams};

pub mod brave;

/// Trait for search backends
///
/// Each operation issues exactly one upstream call and returns the provider's
/// JSON body unmodified. Implementations resolve the exchange credential
/// themselves and must not make a network call when resolution fails.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &str;

    /// Perform a web search
    async fn web_search(&self, params: &WebSearchParams) -> Result<Value, SearchError>;

    /// Perform an image search
    async fn image_search(&self, params: &ImageSearchParams) -> Result<Value, SearchError>;

    /// Perform a news search
    async fn news_search(&self, params: &NewsSearchParams) -> Result<Value, SearchError>;

    /// Perform a video search
    async fn video_search(&self, params: &VideoSearchParams) -> Result<Value, SearchError>;
}
