//! Hosted backend client.
//!
//! Tables are reached through PostgREST under `/rest/v1` and files through the
//! storage API under `/storage/v1`. Every request is a single attempt.

use reqwest::{Client, RequestBuilder, Response, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;
use url::Url;

mod errors;
mod query;

pub use errors::{BackendError, BackendErrorKind};
pub use query::Query;

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub url: Url,

    /// Public API key sent with every request.
    pub anon_key: String,

    /// Session token of the signed-in user, if any.
    pub access_token: Option<String>,
}

impl BackendConfig {
    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }

    fn base(&self) -> &str {
        self.url.as_str().trim_end_matches('/')
    }
}

/// HTTP client for the backend's table and storage APIs.
#[derive(Debug, Clone)]
pub struct BackendClient {
    config: BackendConfig,
    http: Client,
}

impl BackendClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// URL of a table endpoint.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.base())
    }

    /// URL an object is uploaded to.
    pub fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{path}", self.config.base())
    }

    /// URL an object in a public bucket is served from.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.config.base())
    }

    /// Fetch the rows of `table` matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, a non-2xx response or an undecodable body.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, BackendError> {
        debug!(table, "select");

        let request = self.http.get(self.table_url(table)).query(query.pairs());

        Ok(self.send(request).await?.json().await?)
    }

    /// Fetch exactly one row; no match is a `PGRST116` error.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, a non-2xx response or an undecodable body.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<T, BackendError> {
        debug!(table, "select one");

        let request = self
            .http
            .get(self.table_url(table))
            .query(query.pairs())
            .header("Accept", "application/vnd.pgrst.object+json");

        Ok(self.send(request).await?.json().await?)
    }

    /// Insert `rows` (one object or an array) and return what was stored.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, a non-2xx response or an undecodable body.
    pub async fn insert<B, T>(&self, table: &str, rows: &B) -> Result<Vec<T>, BackendError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(table, "insert");

        let request = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(rows);

        Ok(self.send(request).await?.json().await?)
    }

    /// Patch the rows matching `query` and return them.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, a non-2xx response or an undecodable body.
    pub async fn update<B, T>(
        &self,
        table: &str,
        query: &Query,
        changes: &B,
    ) -> Result<Vec<T>, BackendError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(table, "update");

        let request = self
            .http
            .patch(self.table_url(table))
            .query(query.pairs())
            .header("Prefer", "return=representation")
            .json(changes);

        Ok(self.send(request).await?.json().await?)
    }

    /// Delete the rows matching `query`, returning how many went.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, a non-2xx response or an undecodable body.
    pub async fn delete(&self, table: &str, query: &Query) -> Result<usize, BackendError> {
        debug!(table, "delete");

        let request = self
            .http
            .delete(self.table_url(table))
            .query(query.pairs())
            .header("Prefer", "return=representation");

        let removed: Vec<serde_json::Value> = self.send(request).await?.json().await?;

        Ok(removed.len())
    }

    /// Upload a new object; an existing path is not overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a non-2xx response.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError> {
        debug!(bucket, path, size = bytes.len(), "upload");

        let request = self
            .http
            .post(self.object_url(bucket, path))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes);

        self.send(request).await?;

        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(self.config.bearer())
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        Err(BackendError::from_response(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn client(url: &str) -> TestResult<BackendClient> {
        Ok(BackendClient::new(BackendConfig {
            url: Url::parse(url)?,
            anon_key: "anon".to_string(),
            access_token: None,
        }))
    }

    #[test]
    fn urls_are_built_from_the_base() -> TestResult {
        let backend = client("https://project.example.co/")?;

        assert_eq!(
            backend.table_url("products"),
            "https://project.example.co/rest/v1/products"
        );
        assert_eq!(
            backend.object_url("product-images", "store/file.png"),
            "https://project.example.co/storage/v1/object/product-images/store/file.png"
        );
        assert_eq!(
            backend.public_url("product-images", "store/file.png"),
            "https://project.example.co/storage/v1/object/public/product-images/store/file.png"
        );

        Ok(())
    }

    #[test]
    fn bearer_prefers_the_session_token() -> TestResult {
        let mut config = BackendConfig {
            url: Url::parse("https://project.example.co")?,
            anon_key: "anon".to_string(),
            access_token: None,
        };

        assert_eq!(config.bearer(), "anon");

        config.access_token = Some("session".to_string());

        assert_eq!(config.bearer(), "session");

        Ok(())
    }
}
