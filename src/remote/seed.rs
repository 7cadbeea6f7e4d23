use super::*;

use crate::domain::contact::{age_from_value, text_from_value};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

pub const DEFAULT_SEED_API_URL: &str =
    "https://randomapi.com/api/dede7f913fa2b4f23683cd0f3ff82cd1";

pub const SEED_FIELDS: [&str; 7] = [
    "full_name",
    "full_address",
    "phone",
    "cell",
    "date",
    "age",
    "image",
];

/// A record as the seed API returns it, before it is shaped into a `Contact`.
#[derive(Debug, Deserialize, Default)]
pub struct RawSeedRecord {
    #[serde(default)]
    pub full_name: Option<Value>,
    #[serde(default)]
    pub full_address: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub cell: Option<Value>,
    #[serde(default, alias = "date")]
    pub registration_date: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub image: Option<Value>,
}

#[derive(Deserialize)]
struct SeedResponse {
    #[serde(default)]
    results: Vec<RawSeedRecord>,
}

impl From<RawSeedRecord> for Contact {
    fn from(raw: RawSeedRecord) -> Self {
        Contact {
            id: None,
            full_name: text_from_value(raw.full_name),
            full_address: text_from_value(raw.full_address),
            phone: text_from_value(raw.phone),
            cell: text_from_value(raw.cell),
            registration_date: text_from_value(raw.registration_date),
            age: age_from_value(raw.age),
            email: String::new(),
            image: Some(text_from_value(raw.image)).filter(|url| !url.is_empty()),
        }
    }
}

/// Seed provider backed by a randomapi.com style endpoint:
/// `GET {url}?results={count}&inc={fields}` answering `{"results": [...]}`.
pub struct RandomApiSeed {
    pub url: String,
    client: Client,
}

impl RandomApiSeed {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            url: parse_base_url(url)?,
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    async fn try_fetch(&self, count: usize, fields: &[&str]) -> Result<Vec<Contact>, AppError> {
        let res = self
            .client
            .get(&self.url)
            .query(&[("results", count.to_string()), ("inc", fields.join(","))])
            .send()
            .await?
            .error_for_status()?;

        let body: SeedResponse = serde_json::from_str(&res.text().await?)?;
        Ok(body.results.into_iter().map(Contact::from).collect())
    }
}

#[async_trait]
impl SeedProvider for RandomApiSeed {
    async fn fetch(&self, count: usize, fields: &[&str]) -> Vec<Contact> {
        match self.try_fetch(count, fields).await {
            Ok(contacts) => {
                debug!(received = contacts.len(), "seed batch fetched");
                contacts
            }
            Err(e) => {
                error!(error = %e, "error fetching seed contacts");
                Vec::new()
            }
        }
    }
}
