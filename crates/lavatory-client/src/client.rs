//! Artifactory REST client.

use crate::aql::{parse_results, render_query};
use crate::credentials::Credentials;
use crate::error::ClientError;
use crate::storage::parse_storage_info;
use lavatory_domain::{
    ArtifactItem, Criteria, RepositoryClient, RepositoryDescriptor, RepositoryError, SearchWindow,
};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct PropertiesResponse {
    #[serde(default)]
    properties: HashMap<String, Vec<String>>,
}

/// Blocking HTTP client for one Artifactory server
///
/// Every request carries basic authentication built from the
/// [`Credentials`] given at construction.
pub struct ArtifactoryClient {
    credentials: Credentials,
    http: Client,
}

impl ArtifactoryClient {
    /// Create a client with the default timeout
    pub fn new(credentials: Credentials) -> Result<Self, ClientError> {
        Self::with_timeout(credentials, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(credentials: Credentials, timeout: Duration) -> Result<Self, ClientError> {
        reqwest::Url::parse(credentials.base_url())
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", credentials.base_url(), e)))?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { credentials, http })
    }

    /// Credentials this client authenticates with
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn api(&self, path: &str) -> String {
        format!("{}/{}", self.credentials.api_url(), path)
    }

    fn artifact_url(&self, item: &ArtifactItem) -> String {
        format!("{}/{}/{}", self.credentials.base_url(), item.repo, item.full_path())
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request
            .basic_auth(self.credentials.username(), Some(self.credentials.password()))
            .send()?;
        Ok(response.error_for_status()?)
    }

    /// Fetch `api/storageinfo`
    pub fn fetch_storage_info(&self) -> Result<Vec<RepositoryDescriptor>, ClientError> {
        let body = self.send(self.http.get(self.api("storageinfo")))?.text()?;
        parse_storage_info(&body)
    }

    /// Run an AQL search
    pub fn run_search(
        &self,
        criteria: &Criteria,
        window: &SearchWindow,
    ) -> Result<Vec<ArtifactItem>, ClientError> {
        let query = render_query(criteria, window);
        tracing::debug!("AQL: {}", query);

        let request = self
            .http
            .post(self.api("search/aql"))
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(query);
        let body = self.send(request)?.text()?;
        parse_results(&body)
    }

    /// Delete one artifact or folder
    pub fn delete_item(&self, item: &ArtifactItem) -> Result<(), ClientError> {
        self.send(self.http.delete(self.artifact_url(item)))?;
        Ok(())
    }

    /// Fetch properties of one item; values with several entries are joined with `,`
    pub fn fetch_properties(&self, item: &ArtifactItem) -> Result<HashMap<String, String>, ClientError> {
        let url = format!("{}/{}/{}", self.api("storage"), item.repo, item.full_path());
        let response = self
            .http
            .get(url)
            .query(&[("properties", "")])
            .basic_auth(self.credentials.username(), Some(self.credentials.password()))
            .send()?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(HashMap::new());
        }

        let body = response.error_for_status()?.text()?;
        let parsed: PropertiesResponse = serde_json::from_str(&body)?;
        Ok(parsed
            .properties
            .into_iter()
            .map(|(key, values)| (key, values.join(",")))
            .collect())
    }
}

impl RepositoryClient for ArtifactoryClient {
    fn storage_summary(&self) -> Result<Vec<RepositoryDescriptor>, RepositoryError> {
        Ok(self.fetch_storage_info()?)
    }

    fn search(
        &self,
        criteria: &Criteria,
        window: &SearchWindow,
    ) -> Result<Vec<ArtifactItem>, RepositoryError> {
        Ok(self.run_search(criteria, window)?)
    }

    fn delete(&self, item: &ArtifactItem) -> Result<(), RepositoryError> {
        Ok(self.delete_item(item)?)
    }

    fn properties(&self, item: &ArtifactItem) -> Result<HashMap<String, String>, RepositoryError> {
        Ok(self.fetch_properties(item)?)
    }
}
