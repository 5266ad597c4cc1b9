//! HTTP client configuration and request execution.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

use super::auth::ApiKey;
use super::transport::Transport;
use crate::error::{Error, Result};

/// Default Linear GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.linear.app/graphql";

/// Default user agent.
pub const DEFAULT_USER_AGENT: &str = concat!("lnr/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// GraphQL endpoint.
    pub endpoint: String,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Read timeout.
    pub read_timeout: Duration,
    /// Custom user agent.
    pub custom_user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(30),
            custom_user_agent: None,
        }
    }
}

impl HttpConfig {
    /// Get the user agent to send.
    pub fn user_agent(&self) -> &str {
        self.custom_user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Parse the configured endpoint.
    pub fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.endpoint).map_err(Error::Url)
    }
}

/// Build a reqwest client with the given configuration.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .read_timeout(config.read_timeout)
        .user_agent(config.user_agent())
        .gzip(true)
        .build()
        .map_err(Error::Network)
}

/// GraphQL over HTTP.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    api_key: ApiKey,
}

impl HttpTransport {
    /// Create a transport from a configuration and API key.
    pub fn new(config: &HttpConfig, api_key: ApiKey) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.endpoint_url()?,
            api_key,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        log::debug!("graphql {}", operation_name(query));

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(header::AUTHORIZATION, self.api_key.expose())
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(Error::Network)?;

        let status = response.status();
        let text = response.text().await.map_err(Error::Network)?;

        parse_response(status, &text)
    }
}

#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQLError>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
    #[serde(default)]
    extensions: Option<GraphQLErrorExtensions>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorExtensions {
    code: Option<String>,
}

/// Map an HTTP status and body to the GraphQL `data` object.
fn parse_response(status: StatusCode, text: &str) -> Result<Value> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN if !has_errors(text) => {
            return Err(Error::Unauthorized(
                status.canonical_reason().unwrap_or("unauthorized").to_owned(),
            ));
        }
        StatusCode::TOO_MANY_REQUESTS => return Err(Error::RateLimited),
        _ => {}
    }

    let body: GraphQLResponse = match serde_json::from_str(text) {
        Ok(body) => body,
        Err(_) if !status.is_success() => {
            return Err(Error::Http {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_owned(),
            });
        }
        Err(e) => return Err(Error::Json(e)),
    };

    if let Some(first) = body.errors.first() {
        log::warn!("graphql error: {}", first.message);
        let code = first.extensions.as_ref().and_then(|e| e.code.as_deref());
        return Err(Error::from_graphql(code, &first.message));
    }

    body.data.ok_or_else(|| Error::missing("data"))
}

fn has_errors(text: &str) -> bool {
    serde_json::from_str::<GraphQLResponse>(text)
        .map(|r| !r.errors.is_empty())
        .unwrap_or(false)
}

/// First word after `query`/`mutation`, for logging.
fn operation_name(query: &str) -> &str {
    query
        .split_whitespace()
        .nth(1)
        .map(|name| name.split('(').next().unwrap_or(name))
        .unwrap_or("anonymous")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let config = HttpConfig::default();
        let url = config.endpoint_url().unwrap();
        assert_eq!(url.host_str(), Some("api.linear.app"));
        assert_eq!(url.path(), "/graphql");
    }

    #[test]
    fn test_parse_response_data() {
        let data = parse_response(StatusCode::OK, r#"{"data":{"viewer":{"id":"u1"}}}"#).unwrap();
        assert_eq!(data["viewer"]["id"], "u1");
    }

    #[test]
    fn test_parse_response_errors() {
        let body = r#"{"errors":[{"message":"Authentication required, not authenticated","extensions":{"code":"AUTHENTICATION_ERROR"}}]}"#;
        let err = parse_response(StatusCode::BAD_REQUEST, body).unwrap_err();
        assert!(err.is_auth_error());

        let err = parse_response(StatusCode::TOO_MANY_REQUESTS, "").unwrap_err();
        assert!(err.is_rate_limited());

        let err = parse_response(StatusCode::UNAUTHORIZED, "").unwrap_err();
        assert!(err.is_auth_error());

        let err = parse_response(StatusCode::BAD_GATEWAY, "<html>").unwrap_err();
        assert!(matches!(err, Error::Http { status: 502, .. }));
    }

    #[test]
    fn test_operation_name() {
        assert_eq!(operation_name("query Issues($filter: IssueFilter) { }"), "Issues");
        assert_eq!(operation_name("mutation IssueCreate { }"), "IssueCreate");
        assert_eq!(operation_name("{ viewer { id } }"), "viewer");
    }
}
