//! Backend wire models and listing request planning
//!
//! The backend wraps every response in a common envelope and paginates with
//! an explicit `totalPage` count, which is authoritative for rebuilding the
//! pagination window. `hasMore` is decoded but not used by the engine.

use serde::{Deserialize, Serialize};

use crate::filter::FilterCriteria;
use crate::page;

/// Page size shared by the plain and the filtered listing query, so the page
/// count stays consistent when filters are toggled.
pub const FIXED_PAGE_SIZE: u32 = 20;

/// Plain listing endpoint.
pub const SUMMARY_PATH: &str = "/posts/summary";

/// Filtered listing endpoint.
pub const FILTERED_PATH: &str = "/posts/summary/filtered";

/// Common response envelope used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i32,
    pub message: String,
    pub status: String,
    pub data: T,
}

/// Paged listing payload inside the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListData {
    pub items: Vec<PostSummary>,
    pub page: u32,
    pub total: u64,
    pub total_page: u32,
    pub has_more: bool,
}

/// Read-only projection of a post used for list rendering. Owned by the
/// backend; the engine only consumes it, so backend-defined fields such as
/// the rank tier stay untyped strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: String,
    pub post_rank: String,
    pub post_type: String,
    pub thumbnail_url: String,
    pub real_estate_type: String,
    pub title: String,
    pub status: String,
    pub created_at: String,
    pub price: i64,
    pub direction: String,
    pub square: f64,
    #[serde(default)]
    pub street_width: Option<f64>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub floors: Option<u32>,
    pub dining_room: bool,
    pub kitchen: bool,
    pub rooftop: bool,
    pub car_park: bool,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
}

/// Full post detail, as returned by `GET /posts/{id}`. A superset of
/// [`PostSummary`] with the body content and structural fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub post_rank: String,
    pub post_type: String,
    pub thumbnail_url: String,
    pub real_estate_type: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub status: String,
    pub created_at: String,
    pub price: i64,
    pub direction: String,
    pub square: f64,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub street_width: Option<f64>,
    #[serde(default)]
    pub legal: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub floors: Option<u32>,
    #[serde(default)]
    pub year_built: Option<String>,
    pub dining_room: bool,
    pub kitchen: bool,
    pub rooftop: bool,
    pub car_park: bool,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
}

/// One page of listing results. Created fresh on every fetch and replaced
/// wholesale, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    pub items: Vec<PostSummary>,
    pub total_pages: u32,
}

impl ListingPage {
    /// Build a listing page from the backend payload. `totalPage` is floored
    /// at 1 so an empty result set still renders a single-page window.
    pub fn from_data(data: PostListData) -> Self {
        Self {
            items: data.items,
            total_pages: data.total_page.max(1),
        }
    }
}

/// Format a backend creation timestamp (RFC 3339) as a short date for list
/// rendering. Unparseable input is shown as-is.
pub fn format_created_at(created_at: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(created_at)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

/// A planned listing request: endpoint path plus the full query string, with
/// unset filter dimensions omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRequest {
    pub path: &'static str,
    pub params: Vec<(String, String)>,
}

/// Select the endpoint and build the query parameters for a listing fetch.
///
/// Active criteria route to the filtered endpoint; absent or empty criteria
/// route to the plain one. The page parameter is the 0-based API index for
/// the given 1-based UI page.
pub fn plan_request(ui_page: u32, criteria: Option<&FilterCriteria>) -> ListingRequest {
    let mut params = vec![
        ("page".to_string(), page::to_api_page(ui_page).to_string()),
        ("size".to_string(), FIXED_PAGE_SIZE.to_string()),
    ];

    match criteria {
        Some(criteria) if criteria.is_active() => {
            params.extend(criteria.query_params());
            ListingRequest {
                path: FILTERED_PATH,
                params,
            }
        }
        _ => ListingRequest {
            path: SUMMARY_PATH,
            params,
        },
    }
}
