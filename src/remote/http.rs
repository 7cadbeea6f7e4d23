use super::*;

use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_CONTACTS_API_URL: &str = "http://localhost:3000/contacts/contacts";

/// REST client for the contact service.
///
/// Endpoints hang off `base_url`: `POST /add`, `PUT /update/{id}`,
/// `DELETE /delete/{id}`, `DELETE /clear` and `GET /count`.
pub struct HttpRemote {
    pub base_url: String,
    client: Client,
}

#[derive(Deserialize)]
struct CreateResponse {
    #[serde(rename = "_id", alias = "id", default)]
    id: Option<String>,
}

#[derive(Deserialize)]
struct CountResponse {
    #[serde(default)]
    count: u64,
}

impl HttpRemote {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn expect_success(res: Response) -> Result<Response, AppError> {
        // Convert non-success status into a `reqwest::Error`
        Ok(res.error_for_status()?)
    }
}

#[async_trait]
impl RemoteContacts for HttpRemote {
    async fn create(&self, contact: &Contact) -> Result<String, AppError> {
        // The service assigns ids, never send one
        let mut body = contact.clone();
        body.id = None;

        let res = self
            .client
            .post(self.endpoint("add"))
            .json(&body)
            .send()
            .await?;
        let res = Self::expect_success(res)?;

        let created: CreateResponse = serde_json::from_str(&res.text().await?)?;
        match created.id {
            Some(id) if !id.is_empty() => {
                debug!(%id, "remote create acknowledged");
                Ok(id)
            }
            _ => Err(AppError::Remote(
                "create response carried no id".to_string(),
            )),
        }
    }

    async fn update(&self, id: &str, patch: &ContactPatch) -> Result<(), AppError> {
        let res = self
            .client
            .put(self.endpoint(&format!("update/{}", id)))
            .json(patch)
            .send()
            .await?;
        Self::expect_success(res)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let res = self
            .client
            .delete(self.endpoint(&format!("delete/{}", id)))
            .send()
            .await?;
        Self::expect_success(res)?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        let res = self.client.delete(self.endpoint("clear")).send().await?;
        Self::expect_success(res)?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, AppError> {
        let res = self.client.get(self.endpoint("count")).send().await?;
        let res = Self::expect_success(res)?;
        let count: CountResponse = serde_json::from_str(&res.text().await?)?;
        Ok(count.count)
    }
}
