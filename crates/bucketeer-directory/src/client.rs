//! Directory API client
//!
//! Fetches the user list over HTTP.
//!
//! # Features
//!
//! - Configurable endpoint and result limit
//! - Retry with exponential backoff on transport errors and 5xx replies
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use bucketeer_directory::DirectoryClient;
//!
//! # async fn run() -> Result<(), bucketeer_directory::DirectoryError> {
//! let client = DirectoryClient::new("https://dummyjson.com")?;
//! let users = client.fetch_users().await?;
//! println!("{} users", users.len());
//! # Ok(())
//! # }
//! ```

use crate::config::{DEFAULT_LIMIT, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::{group_by_department, Departments, DirectoryConfig, DirectoryError, User};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

/// Anything that can produce the full user list
pub trait UserSource: Send + Sync {
    /// Load every user
    fn load_users(&self) -> impl Future<Output = Result<Vec<User>, DirectoryError>> + Send;

    /// Load every user, grouped by department
    fn load_departments(
        &self,
    ) -> impl Future<Output = Result<Departments, DirectoryError>> + Send {
        async move { Ok(group_by_department(self.load_users().await?)) }
    }
}

/// Response body of `GET /users`
#[derive(Deserialize)]
struct UsersResponse {
    users: Vec<User>,
}

/// HTTP client for the user directory
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    endpoint: String,
    limit: u32,
    client: reqwest::Client,
    max_retries: u32,
    backoff: Duration,
}

impl DirectoryClient {
    /// Create a client for `endpoint` with default settings
    pub fn new(endpoint: impl Into<String>) -> Result<Self, DirectoryError> {
        Self::build(
            endpoint.into(),
            DEFAULT_LIMIT,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            DEFAULT_MAX_RETRIES,
        )
    }

    /// Create a client from validated settings
    pub fn from_config(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        config.validate()?;
        Self::build(
            config.endpoint.clone(),
            config.limit,
            config.timeout(),
            config.max_retries,
        )
    }

    fn build(
        endpoint: String,
        limit: u32,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryError::Communication(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            limit,
            client,
            max_retries: max_retries.max(1),
            backoff: Duration::from_secs(1),
        })
    }

    /// Set how many users to request
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the first backoff delay; later ones double
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// URL of the user list
    pub fn users_url(&self) -> String {
        format!("{}/users", self.endpoint)
    }

    /// Fetch the user list
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::Status`] for a 4xx reply (not retried)
    /// - [`DirectoryError::InvalidResponse`] if the body is not a user list
    /// - [`DirectoryError::Communication`] once every attempt has failed
    pub async fn fetch_users(&self) -> Result<Vec<User>, DirectoryError> {
        let url = self.users_url();

        // Retry logic with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .get(&url)
                .query(&[("limit", self.limit)])
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response.json::<UsersResponse>().await.map_err(|e| {
                            DirectoryError::InvalidResponse(format!(
                                "Failed to parse users: {}",
                                e
                            ))
                        })?;
                        tracing::debug!("Fetched {} users from {}", body.users.len(), url);
                        return Ok(body.users);
                    } else if status.is_client_error() {
                        let body = response.text().await.unwrap_or_default();
                        return Err(DirectoryError::Status {
                            status: status.as_u16(),
                            body,
                        });
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(DirectoryError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(DirectoryError::Communication(format!(
                        "Request failed: {}",
                        e
                    )));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = self.backoff * 2u32.pow(attempts - 1);
                tracing::warn!(
                    "Fetching users failed (attempt {}/{}), retrying in {:?}",
                    attempts,
                    self.max_retries,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
        }

        let error = last_error
            .unwrap_or_else(|| DirectoryError::Communication("Max retries exceeded".to_string()));
        tracing::error!("Fetching users from {} failed: {}", url, error);
        Err(error)
    }
}

impl UserSource for DirectoryClient {
    async fn load_users(&self) -> Result<Vec<User>, DirectoryError> {
        self.fetch_users().await
    }
}

/// In-memory user list
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    users: Vec<User>,
}

impl StaticSource {
    /// Serve a fixed list
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Parse a `{"users": [...]}` document
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let body: UsersResponse = serde_json::from_str(json)?;
        Ok(Self::new(body.users))
    }
}

impl UserSource for StaticSource {
    async fn load_users(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self.users.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DirectoryClient::new("https://dummyjson.com/").unwrap();
        assert_eq!(client.users_url(), "https://dummyjson.com/users");
        assert_eq!(client.limit, DEFAULT_LIMIT);
        assert_eq!(client.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_builder_settings() {
        let client = DirectoryClient::new("http://localhost:1")
            .unwrap()
            .with_limit(5)
            .with_max_retries(0)
            .with_backoff(Duration::from_millis(10));

        assert_eq!(client.limit, 5);
        assert_eq!(client.max_retries, 1);
        assert_eq!(client.backoff, Duration::from_millis(10));
    }

    #[test]
    fn test_from_config_validates() {
        let config = DirectoryConfig {
            limit: 0,
            ..Default::default()
        };
        assert!(matches!(
            DirectoryClient::from_config(&config),
            Err(DirectoryError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let client = DirectoryClient::new("http://127.0.0.1:9")
            .unwrap()
            .with_max_retries(2)
            .with_backoff(Duration::from_millis(1));

        let result = client.fetch_users().await;
        assert!(matches!(result, Err(DirectoryError::Communication(_))));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::from_json(
            r#"{"users": [{
                "id": 1, "firstName": "A", "lastName": "B", "email": "a@b.c",
                "company": { "department": "Legal", "name": "Co", "title": "Clerk" }
            }], "total": 1}"#,
        )
        .unwrap();

        let departments = source.load_departments().await.unwrap();
        assert_eq!(departments["Legal"].len(), 1);
    }

    #[test]
    fn test_static_source_rejects_bad_json() {
        assert!(matches!(
            StaticSource::from_json("[]"),
            Err(DirectoryError::Json(_))
        ));
    }
}
