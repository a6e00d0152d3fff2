//! # Document Store Access
//!
//! Blocking MediaWiki and Wikidata API clients. These are the bot's only
//! network boundary: the engine itself sees them through the
//! [`DefinitionSource`](crate::classify::DefinitionSource),
//! [`ArticleStore`](crate::bot::ArticleStore) and
//! [`CategorySource`](crate::bot::CategorySource) traits.

pub mod client;
pub mod responses;
pub mod wikidata;

pub use client::WikiClient;
pub use wikidata::{CommonsCategoryLookup, WikidataClient};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("API error {code}: {info}")]
    Api { code: String, info: String },
    #[error("Login failed: {0}")]
    Login(String),
    #[error("Response is missing {0}")]
    Missing(&'static str),
    #[error("Failed to get non-redirect article after {0} tries.")]
    NoArticle(usize),
}
