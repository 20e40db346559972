//! HTTP client for the storefront catalog service (REST).
//!
//! Endpoints used:
//! - GET /categories
//! - GET /catalog-items?categoryId=&text=&priceMin=&priceMax=&sort=&page=&pageSize=
//!
//! Non-success statuses are decoded before body parsing; when the service
//! attaches a structured `{code, message}` body it is carried through
//! verbatim so the engine's classifier can interpret it.

use crate::errors::{CatalogError, CatalogResult};
use crate::types::{CatalogItem, CategoryEntry, ItemPage, ItemQuery};
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Runtime configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API base, e.g. "https://shop.example.com/api/v1".
    pub base_api: String,
    pub timeout_secs: u64,
}

impl CatalogConfig {
    /// Build from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            base_api: env("CATALOG_API_BASE", "http://127.0.0.1:8080/api/v1"),
            timeout_secs: parse("CATALOG_TIMEOUT_SECS", 15),
        }
    }
}

/// Thin client over a shared `reqwest` instance.
#[derive(Debug, Clone)]
pub struct CatalogHttpClient {
    http: Client,
    base_api: String,
}

impl CatalogHttpClient {
    /// Constructs a client around an existing `reqwest::Client`.
    pub fn new(http: Client, base_api: String) -> Self {
        Self { http, base_api }
    }

    /// Builds a client with its own `reqwest` instance from config.
    pub fn from_config(cfg: &CatalogConfig) -> CatalogResult<Self> {
        let http = Client::builder()
            .user_agent("shopfeed/0.1")
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self::new(http, cfg.base_api.clone()))
    }

    /// Fetches the raw category list. Display ordering is the engine's job.
    pub async fn list_categories(&self) -> CatalogResult<Vec<CategoryEntry>> {
        let url = format!("{}/categories", self.base_api);
        let resp = self.http.get(url).send().await?;
        let resp = check_status(resp).await?;
        let body: CategoriesResponse = decode_json(resp).await?;
        Ok(body.categories.into_iter().map(CategoryDto::into_entry).collect())
    }

    /// Fetches one page of catalog items for canonical wire parameters.
    pub async fn search_items(&self, query: &ItemQuery) -> CatalogResult<ItemPage> {
        let url = format!("{}/catalog-items", self.base_api);
        let resp = self
            .http
            .get(url)
            .query(&query.query_pairs())
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let body: ItemsResponse = decode_json(resp).await?;
        Ok(ItemPage {
            items: body.items.into_iter().map(ItemDto::into_item).collect(),
            page: body.pagination.page,
            page_size: body.pagination.page_size,
            total_items: body.pagination.total,
            total_pages: body.pagination.total_pages,
        })
    }
}

/// Turns a non-success response into the error taxonomy, honoring a
/// structured error body when one is present.
async fn check_status(resp: Response) -> CatalogResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let retry_after_secs = resp
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok());
    let body: Option<ServiceErrorBody> = resp.json().await.ok();
    Err(error_for(status, retry_after_secs, body))
}

fn error_for(
    status: StatusCode,
    retry_after_secs: Option<u64>,
    body: Option<ServiceErrorBody>,
) -> CatalogError {
    match status.as_u16() {
        401 => CatalogError::Unauthorized,
        403 => CatalogError::Forbidden,
        404 => CatalogError::NotFound,
        429 => CatalogError::RateLimited { retry_after_secs },
        code @ 500..=599 => CatalogError::Server(code),
        code => match body {
            Some(b) => CatalogError::Service {
                code: b.code,
                message: b.message,
            },
            None => CatalogError::HttpStatus(code),
        },
    }
}

async fn decode_json<T: DeserializeOwned>(resp: Response) -> CatalogResult<T> {
    resp.json::<T>().await.map_err(|e| {
        if e.is_timeout() {
            CatalogError::Timeout
        } else {
            CatalogError::InvalidResponse(e.to_string())
        }
    })
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k).unwrap_or_else(|_| dflt.to_string())
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}

/// --- Catalog service response shapes (subset of fields we actually use) ---

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    categories: Vec<CategoryDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryDto {
    id: String,
    name: String,
    #[serde(default)]
    sort_order: i32,
    #[serde(default)]
    is_principal: bool,
}

impl CategoryDto {
    fn into_entry(self) -> CategoryEntry {
        CategoryEntry {
            id: self.id,
            name: self.name,
            sort_order: self.sort_order,
            is_principal: self.is_principal,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ItemsResponse {
    items: Vec<ItemDto>,
    pagination: PaginationDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemDto {
    id: String,
    name: String,
    #[serde(default)]
    price_cents: i64,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    category_id: Option<String>,
    #[serde(default)]
    popularity: Option<f32>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl ItemDto {
    fn into_item(self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            name: self.name,
            price_cents: self.price_cents,
            image_url: self.image_url,
            category_id: self.category_id,
            popularity: self.popularity,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaginationDto {
    page: u32,
    page_size: u32,
    total: u64,
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    code: String,
    message: String,
}
