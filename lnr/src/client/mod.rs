//! Client construction and request execution.

mod auth;
mod http;
mod transport;

pub use auth::ApiKey;
pub use http::{HttpConfig, HttpTransport, DEFAULT_ENDPOINT};
pub use transport::Transport;

#[cfg(test)]
pub(crate) use transport::mock;

use crate::api::{
    CommentApi, CycleApi, DocumentApi, IssueApi, LabelApi, ProjectApi, TeamApi, UserApi,
};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating LinearClient.
pub struct LinearClientBuilder {
    api_key: Option<ApiKey>,
    http_config: HttpConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl std::fmt::Debug for LinearClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearClientBuilder")
            .field("api_key", &self.api_key)
            .field("http_config", &self.http_config)
            .field("transport", &self.transport.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Default for LinearClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            api_key: None,
            http_config: HttpConfig::default(),
            transport: None,
        }
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(ApiKey::new(key));
        self
    }

    /// Set the GraphQL endpoint.
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.http_config.endpoint = url.into();
        self
    }

    /// Set custom user agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.http_config.custom_user_agent = Some(ua.into());
        self
    }

    /// Set connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.connect_timeout = timeout;
        self
    }

    /// Set read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.read_timeout = timeout;
        self
    }

    /// Use a custom transport instead of HTTP.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build LinearClient.
    pub fn build(self) -> Result<LinearClient> {
        let transport: Arc<dyn Transport> = match (self.transport, &self.api_key) {
            (Some(transport), _) => transport,
            (None, Some(key)) if key.is_valid() => {
                Arc::new(HttpTransport::new(&self.http_config, key.clone())?)
            }
            (None, Some(_)) => {
                return Err(Error::InvalidArgument("malformed API key".into()));
            }
            (None, None) => return Err(Error::AuthRequired),
        };

        Ok(LinearClient {
            inner: Arc::new(LinearClientInner {
                transport,
                config: self.http_config,
            }),
        })
    }
}

/// Internal client state.
pub(crate) struct LinearClientInner {
    transport: Arc<dyn Transport>,
    config: HttpConfig,
}

impl LinearClientInner {
    /// Execute a GraphQL operation and deserialize its `data`.
    pub async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let data = self.transport.execute(query, variables).await?;
        serde_json::from_value(data).map_err(Error::Json)
    }

    /// Execute a query, mapping a not found error to `None`.
    pub async fn query_opt<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<Option<T>> {
        match self.query(query, variables).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Linear client. Cheap to clone.
#[derive(Clone)]
pub struct LinearClient {
    pub(crate) inner: Arc<LinearClientInner>,
}

impl LinearClient {
    /// Create a new client builder.
    pub fn builder() -> LinearClientBuilder {
        LinearClientBuilder::new()
    }

    /// Get the issue API.
    pub fn issues(&self) -> IssueApi {
        IssueApi::new(self.inner.clone())
    }

    /// Get the comment API.
    pub fn comments(&self) -> CommentApi {
        CommentApi::new(self.inner.clone())
    }

    /// Get the team API.
    pub fn teams(&self) -> TeamApi {
        TeamApi::new(self.inner.clone())
    }

    /// Get the project API.
    pub fn projects(&self) -> ProjectApi {
        ProjectApi::new(self.inner.clone())
    }

    /// Get the cycle API.
    pub fn cycles(&self) -> CycleApi {
        CycleApi::new(self.inner.clone())
    }

    /// Get the label API.
    pub fn labels(&self) -> LabelApi {
        LabelApi::new(self.inner.clone())
    }

    /// Get the document API.
    pub fn documents(&self) -> DocumentApi {
        DocumentApi::new(self.inner.clone())
    }

    /// Get the user API.
    pub fn users(&self) -> UserApi {
        UserApi::new(self.inner.clone())
    }
}

impl std::fmt::Debug for LinearClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearClient")
            .field("endpoint", &self.inner.config.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_key() {
        let err = LinearClient::builder().build().unwrap_err();
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_build_rejects_malformed_key() {
        let err = LinearClient::builder().api_key("lin api").build().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_build_with_key() {
        let client = LinearClient::builder()
            .api_key("lin_api_test")
            .endpoint("https://example.com/graphql")
            .build()
            .unwrap();
        assert!(format!("{:?}", client).contains("example.com"));
    }

    #[tokio::test]
    async fn test_query_opt_maps_not_found() {
        let transport = Arc::new(
            mock::MockTransport::new().fail(Error::not_found("Entity not found: Issue")),
        );
        let client = LinearClient::builder().transport(transport).build().unwrap();
        let result: Option<Value> = client
            .inner
            .query_opt("query Issue { }", Value::Null)
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
