//! HTTP adapter for the line items backend.
//!
//! Endpoints, relative to the configured base url:
//! - `GET /records/{parentId}/line-items`: JSON array of rows
//! - `DELETE /line-items/{lineItemId}`
//! - `GET /users/{viewerId}/profile`: `{"profileName": "..."}`
//!
//! Row fetches are cached per parent record. [`CachePolicy::Bypass`] skips the cache, asks
//! intermediaries not to serve a stale copy and replaces the cached entry.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::CACHE_CONTROL;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    CachePolicy, DeleteError, FetchError, LineItemDeleter, LineItemId, LineItemRow,
    ParentRecordId, RowDataSource, ViewerId, ViewerProfile, ViewerProfileSource,
};

#[derive(Debug)]
pub struct HttpLineItemApi {
    client: Client,
    base_url: String,
    cache: Mutex<HashMap<ParentRecordId, Vec<LineItemRow>>>,
}

impl HttpLineItemApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<ParentRecordId, Vec<LineItemRow>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cached_rows(&self, parent: ParentRecordId) -> Option<Vec<LineItemRow>> {
        self.cache().get(&parent).cloned()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        policy: CachePolicy,
    ) -> Result<T, FetchError> {
        let mut request = self.client.get(url);
        if policy == CachePolicy::Bypass {
            request = request.header(CACHE_CONTROL, "no-cache");
        }

        let response = request
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            warn!("GET {url} returned {status}");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        serde_json::from_slice(&body).map_err(|err| FetchError::Decode(err.to_string()))
    }
}

#[async_trait]
impl RowDataSource for HttpLineItemApi {
    async fn fetch(
        &self,
        parent: ParentRecordId,
        policy: CachePolicy,
    ) -> Result<Vec<LineItemRow>, FetchError> {
        if policy == CachePolicy::Cached
            && let Some(rows) = self.cached_rows(parent)
        {
            debug!("Serving line items of {parent} from cache");
            return Ok(rows);
        }

        let url = self.url(&format!("/records/{parent}/line-items"));
        let rows: Vec<LineItemRow> = self.get_json(&url, policy).await?;
        self.cache().insert(parent, rows.clone());
        Ok(rows)
    }
}

#[async_trait]
impl LineItemDeleter for HttpLineItemApi {
    async fn delete(&self, line_item: LineItemId) -> Result<(), DeleteError> {
        let url = self.url(&format!("/line-items/{line_item}"));
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|err| DeleteError::Transport(err.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(DeleteError::NotFound(line_item)),
            status => {
                warn!("DELETE {url} returned {status}");
                Err(DeleteError::Status(status.as_u16()))
            }
        }
    }
}

#[async_trait]
impl ViewerProfileSource for HttpLineItemApi {
    async fn fetch(&self, viewer: ViewerId) -> Result<ViewerProfile, FetchError> {
        let url = self.url(&format!("/users/{viewer}/profile"));
        self.get_json(&url, CachePolicy::Cached).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let api = HttpLineItemApi::new("http://localhost:8080/api/");
        assert_eq!(api.base_url(), "http://localhost:8080/api");
        assert_eq!(
            api.url("/line-items/00k1"),
            "http://localhost:8080/api/line-items/00k1"
        );
    }
}
