//! Client for the campus dining menu API.
//!
//! The dining service exposes the list of entrees being served for a given
//! date (or date-time), dining commons, and meal period. `DiningApiClient`
//! performs the HTTP fetch; `MenuProvider` is the seam the server consumes,
//! so tests can substitute a canned menu without touching the network.
//!
//! The date-time path segment is passed through verbatim. The upstream
//! service is the only party that validates its format.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

pub mod models;

use models::{Entree, API_KEY_HEADER};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("menu request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("menu service returned {0}")]
    Status(reqwest::StatusCode),

    #[error("cannot decode menu response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of the entrees served for one commons/meal/day.
#[async_trait]
pub trait MenuProvider: Send + Sync {
    async fn entrees(
        &self,
        date_time: &str,
        dining_commons_code: &str,
        meal_code: &str,
    ) -> Result<Vec<Entree>, ProviderError>;
}

pub struct DiningApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DiningApiClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn menu_url(&self, date_time: &str, dining_commons_code: &str, meal_code: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url, date_time, dining_commons_code, meal_code
        )
    }
}

#[async_trait]
impl MenuProvider for DiningApiClient {
    async fn entrees(
        &self,
        date_time: &str,
        dining_commons_code: &str,
        meal_code: &str,
    ) -> Result<Vec<Entree>, ProviderError> {
        let url = self.menu_url(date_time, dining_commons_code, meal_code);

        let res = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(ProviderError::Status(res.status()));
        }

        let body = res.text().await?;
        let entrees: Vec<Entree> = serde_json::from_str(&body)?;

        Ok(entrees)
    }
}
