//! Typed client for the storefront catalog REST service.
//!
//! This crate owns the integration boundary with the remote catalog:
//! - `types` – the normalized data model (items, categories, pages, wire
//!   params); DTO shapes stay private to the transport layer.
//! - `errors` – the transport error taxonomy (status mapping, timeout,
//!   network, structured service errors).
//! - `client` – the HTTP implementation over a shared `reqwest::Client`.
//! - `fake` – a scriptable in-memory backend for tests and offline runs.
//! - `backend` – enum-dispatch over the two, so callers use plain
//!   `async fn` without `async-trait` or boxed futures.

pub mod backend;
pub mod client;
pub mod errors;
pub mod fake;
pub mod types;

pub use backend::CatalogBackend;
pub use client::{CatalogConfig, CatalogHttpClient};
pub use errors::{CatalogError, CatalogResult};
pub use fake::{FakeCatalog, FakeFailure};
pub use types::{ALL_CATEGORY_ID, CatalogItem, CategoryEntry, ItemPage, ItemQuery};
