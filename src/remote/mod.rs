pub mod http;
pub mod seed;

use crate::domain::contact::{Contact, ContactPatch};
use crate::errors::AppError;
use async_trait::async_trait;
use url::Url;

pub use http::HttpRemote;
pub use seed::{RandomApiSeed, SEED_FIELDS};

/// The remote contact service. Implementations report transport and status
/// failures as `Err`; the coordinator is the layer that absorbs them.
#[async_trait]
pub trait RemoteContacts: Send + Sync {
    /// Creates the contact and returns the id the service assigned.
    async fn create(&self, contact: &Contact) -> Result<String, AppError>;

    async fn update(&self, id: &str, patch: &ContactPatch) -> Result<(), AppError>;

    async fn delete(&self, id: &str) -> Result<(), AppError>;

    /// Drops the whole remote collection.
    async fn clear(&self) -> Result<(), AppError>;

    async fn count(&self) -> Result<u64, AppError>;
}

/// Source of sample contacts used only to seed an empty cache.
#[async_trait]
pub trait SeedProvider: Send + Sync {
    /// Returns up to `count` contacts restricted to `fields`. Failures yield an
    /// empty batch.
    async fn fetch(&self, count: usize, fields: &[&str]) -> Vec<Contact>;
}

pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

pub fn parse_base_url(url: &str) -> Result<String, AppError> {
    let parsed = Url::parse(url)?;
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
