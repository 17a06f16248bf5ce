//! Parameter types for the search tools
//!
//! One struct per tool; the derived JSON schema doubles as the tool's
//! `inputSchema` in the discovery catalog. `query` is the only required
//! field everywhere. Unknown arguments sent by a client are dropped during
//! decoding rather than forwarded upstream.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the web search tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    /// The search query
    #[schemars(
        description = "The search query to run. Max 400 characters and 50 words. Supports standard search operators."
    )]
    pub query: String,
    /// Number of results to return
    #[schemars(description = "Number of web results to return (max 20, default 5).")]
    pub count: Option<u32>,
    #[schemars(
        description = "2-letter country code to localize results (e.g., 'US', 'GB', 'IN')."
    )]
    pub country: Option<String>,
    #[schemars(description = "Language code for search results (e.g., 'en', 'fr').")]
    pub search_lang: Option<String>,
    #[schemars(description = "UI language in format like 'en-US', 'fr-FR'.")]
    pub ui_lang: Option<String>,
    #[schemars(
        description = "Zero-based offset for pagination (max 9). Use with count to get next pages."
    )]
    pub offset: Option<u32>,
    #[schemars(
        description = "Adult content filter: 'off', 'moderate', or 'strict'."
    )]
    pub safesearch: Option<String>,
    #[schemars(description = "Whether to spellcheck the query ('true' or 'false').")]
    pub spellcheck: Option<String>,
    #[schemars(
        description = "Filter by discovery time: 'pd' (last 24h), 'pw' (last 7 days), 'pm' (last 31 days), 'py' (last year), or a custom range 'YYYY-MM-DDtoYYYY-MM-DD'."
    )]
    pub freshness: Option<String>,
    #[schemars(
        description = "Whether to include highlighting markers in snippets ('true' or 'false')."
    )]
    pub text_decorations: Option<String>,
    #[schemars(
        description = "Comma-separated result sections to include: discussions, faq, infobox, news, query, summarizer, videos, web, locations."
    )]
    pub result_filter: Option<String>,
    #[schemars(
        description = "Measurement units system: 'metric' or 'imperial'. Derived from country if not set."
    )]
    pub units: Option<String>,
    #[schemars(description = "Goggles ID or URL for custom result re-ranking.")]
    pub goggles: Option<String>,
    #[schemars(
        description = "Whether to return extra alternative snippets per result ('true' or 'false')."
    )]
    pub extra_snippets: Option<String>,
    #[schemars(
        description = "Whether to include automatic summaries in web search results ('true' or 'false')."
    )]
    pub summary: Option<String>,
    #[schemars(description = "Undocumented advanced parameter. Rarely used.")]
    pub enable_rich_callback: Option<String>,
    #[schemars(description = "User latitude (e.g., 37.7749). Helps personalize results.")]
    pub x_loc_lat: Option<f64>,
    #[schemars(description = "User longitude (e.g., -122.4194). Helps personalize results.")]
    pub x_loc_long: Option<f64>,
    #[schemars(description = "Timezone string like 'America/Los_Angeles'.")]
    pub x_loc_timezone: Option<String>,
    #[schemars(description = "City name (e.g., 'San Francisco').")]
    pub x_loc_city: Option<String>,
    #[schemars(description = "State code (e.g., 'CA').")]
    pub x_loc_state: Option<String>,
    #[schemars(description = "State full name (e.g., 'California').")]
    pub x_loc_state_name: Option<String>,
    #[schemars(description = "Country code (e.g., 'US').")]
    pub x_loc_country: Option<String>,
    #[schemars(description = "Postal code (e.g., '94103').")]
    pub x_loc_postal_code: Option<String>,
}

/// Parameters for the image search tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImageSearchParams {
    #[schemars(
        description = "The search term to find images for. Max 400 characters and 50 words. Cannot be empty."
    )]
    pub query: String,
    #[schemars(description = "Number of images to return (default 5, max 200).")]
    pub count: Option<u32>,
    #[schemars(description = "Language code (like 'en', 'fr') to prefer in results.")]
    pub search_lang: Option<String>,
    #[schemars(
        description = "2-letter country code to localize results (e.g., 'US', 'GB', 'IN')."
    )]
    pub country: Option<String>,
    #[schemars(description = "Adult content filter for images: 'off' or 'strict'.")]
    pub safesearch: Option<String>,
    #[schemars(
        description = "Whether to auto-correct misspellings in the query ('true' or 'false'). A corrected query appears in the response's 'altered' field."
    )]
    pub spellcheck: Option<String>,
}

/// Parameters for the news search tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NewsSearchParams {
    #[schemars(
        description = "Search term to find news articles for. Cannot be empty; max 400 characters and 50 words."
    )]
    pub query: String,
    #[schemars(
        description = "Number of news results to return (default 5, max 50). Use with offset for pagination."
    )]
    pub count: Option<u32>,
    #[schemars(description = "Language code (e.g., 'en', 'fr') to prefer in news content.")]
    pub search_lang: Option<String>,
    #[schemars(
        description = "User interface language in <language>-<country> format (e.g., 'en-US')."
    )]
    pub ui_lang: Option<String>,
    #[schemars(
        description = "2-letter country code (e.g., 'US', 'GB', 'IN') to localize results."
    )]
    pub country: Option<String>,
    #[schemars(
        description = "Adult content filter in news: 'off', 'moderate', or 'strict'."
    )]
    pub safesearch: Option<String>,
    #[schemars(
        description = "Zero-based offset for pagination (max 9). Use with count to get next pages."
    )]
    pub offset: Option<u32>,
    #[schemars(
        description = "Whether to auto-correct spelling in the query ('true' or 'false')."
    )]
    pub spellcheck: Option<String>,
    #[schemars(
        description = "Limit results to recent news: 'pd' (last 24h), 'pw' (last 7 days), 'pm' (last 31 days), 'py' (last year), or 'YYYY-MM-DDtoYYYY-MM-DD'."
    )]
    pub freshness: Option<String>,
    #[schemars(
        description = "Include up to 5 extra alternative excerpts (requires specific API plans)."
    )]
    pub extra_snippets: Option<String>,
    #[schemars(description = "Goggles ID, URL, or definition to custom re-rank news results.")]
    pub goggles: Option<String>,
}

/// Parameters for the video search tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoSearchParams {
    #[schemars(
        description = "Search term for videos. Cannot be empty. Max 400 characters and 50 words."
    )]
    pub query: String,
    #[schemars(
        description = "Number of video results to return (default 20, max 50). Use with offset for pagination."
    )]
    pub count: Option<u32>,
    #[schemars(
        description = "Adult content filter: 'off' (default), 'moderate', or 'strict'."
    )]
    pub safesearch: Option<String>,
    #[schemars(description = "Language code (e.g., 'en', 'fr') to prefer in video content.")]
    pub search_lang: Option<String>,
    #[schemars(
        description = "User interface language in <language>-<country> format (e.g., 'en-US')."
    )]
    pub ui_lang: Option<String>,
    #[schemars(
        description = "2-letter country code (e.g., 'US', 'GB', 'IN') to localize results."
    )]
    pub country: Option<String>,
    #[schemars(
        description = "Zero-based offset for pagination (max 9). Use with count to fetch next pages."
    )]
    pub offset: Option<u32>,
    #[schemars(
        description = "Whether to enable spellcheck on the query ('true' or 'false')."
    )]
    pub spellcheck: Option<String>,
    #[schemars(
        description = "Filter by video discovery date: 'pd', 'pw', 'pm', 'py', or 'YYYY-MM-DDtoYYYY-MM-DD'."
    )]
    pub freshness: Option<String>,
}
