//! Remote username availability lookup

use std::sync::Arc;

use async_trait::async_trait;
use formdom::ControlHandle;
use log::debug;
use reqwest::Client;
use reqwest::StatusCode;

use super::{AsyncCheck, ValueGuard};
use crate::config::CheckConfig;
use crate::error::{CheckError, ConfigError};

/// Status string the service uses for a free name.
pub const AVAILABLE: &str = "available";

/// What the service said about a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// The name is free.
    Available,
    /// The name is not free. Holds the reported status, or `None` if the
    /// response did not mention the candidate.
    Unavailable(Option<String>),
    /// The service answered with a non-200 status.
    Unknown {
        /// HTTP status code.
        status: u16,
    },
}

/// Client for `GET {base_url}/check/{candidate}`.
///
/// Cheap to clone (uses `Arc` internally). Requests are never retried and
/// never cancelled.
#[derive(Clone)]
pub struct AvailabilityClient {
    inner: Arc<AvailabilityClientInner>,
}

struct AvailabilityClientInner {
    base_url: String,
    http_client: Client,
}

impl AvailabilityClient {
    /// Creates a client from a validated config.
    pub fn new(config: &CheckConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| ConfigError::Client(e.to_string()))?;
        Self::with_http_client(config, http_client)
    }

    /// Creates a client reusing an existing `reqwest::Client`. The config's
    /// timeout is not applied to it.
    pub fn with_http_client(config: &CheckConfig, http_client: Client) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(AvailabilityClientInner {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                http_client,
            }),
        })
    }

    /// Returns the base URL of the service.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The lookup URL for a candidate; the candidate is percent-encoded.
    pub fn check_url(&self, candidate: &str) -> String {
        format!("{}/check/{}", self.inner.base_url, urlencoding::encode(candidate))
    }

    /// Issue the lookup request.
    pub async fn fetch(&self, candidate: &str) -> Result<reqwest::Response, CheckError> {
        let url = self.check_url(candidate);
        debug!("availability lookup {url}");
        Ok(self.inner.http_client.get(&url).send().await?)
    }

    /// Interpret a lookup response for `candidate`.
    pub async fn interpret(
        candidate: &str,
        response: reqwest::Response,
    ) -> Result<Availability, CheckError> {
        let status = response.status();
        if status != StatusCode::OK {
            return Ok(Availability::Unknown {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let statuses: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| CheckError::parse_with_body(e.to_string(), body.clone()))?;

        Ok(match statuses.get(candidate) {
            Some(serde_json::Value::String(s)) if s == AVAILABLE => Availability::Available,
            Some(serde_json::Value::String(s)) => Availability::Unavailable(Some(s.clone())),
            Some(other) => Availability::Unavailable(Some(other.to_string())),
            None => Availability::Unavailable(None),
        })
    }

    /// Fetch and interpret in one go.
    pub async fn lookup(&self, candidate: &str) -> Result<Availability, CheckError> {
        let response = self.fetch(candidate).await?;
        Self::interpret(candidate, response).await
    }
}

impl std::fmt::Debug for AvailabilityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvailabilityClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

/// Messages reported by [`AvailabilityCheck`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityMessages {
    /// The name is taken.
    pub unavailable: String,
    /// The service could not answer.
    pub unreachable: String,
}

impl Default for AvailabilityMessages {
    fn default() -> Self {
        Self {
            unavailable: "This username is unavailable.".to_string(),
            unreachable: "Cannot currently check whether this username is available."
                .to_string(),
        }
    }
}

/// Uniqueness check for a username control.
///
/// The result is discarded if the control's value changes while the request
/// is in flight or while its body is being read.
#[derive(Debug, Clone)]
pub struct AvailabilityCheck {
    client: AvailabilityClient,
    messages: AvailabilityMessages,
}

impl AvailabilityCheck {
    pub fn new(client: AvailabilityClient) -> Self {
        Self {
            client,
            messages: AvailabilityMessages::default(),
        }
    }

    pub fn with_messages(mut self, messages: AvailabilityMessages) -> Self {
        self.messages = messages;
        self
    }
}

#[async_trait]
impl AsyncCheck for AvailabilityCheck {
    async fn check(&self, control: &ControlHandle) -> Result<Option<String>, CheckError> {
        let guard = ValueGuard::capture(control);
        let candidate = guard.value().to_string();

        let response = self.client.fetch(&candidate).await?;
        guard.ensure_current()?;

        let availability = AvailabilityClient::interpret(&candidate, response).await?;
        guard.ensure_current()?;

        debug!("{candidate}: {availability:?}");
        Ok(match availability {
            Availability::Available => None,
            Availability::Unavailable(_) => Some(self.messages.unavailable.clone()),
            Availability::Unknown { .. } => Some(self.messages.unreachable.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> AvailabilityClient {
        AvailabilityClient::new(&CheckConfig::new().with_base_url(server.uri())).unwrap()
    }

    #[test]
    fn test_check_url_encodes_candidate() {
        let client =
            AvailabilityClient::new(&CheckConfig::new().with_base_url("http://example.com/")).unwrap();
        assert_eq!(client.base_url(), "http://example.com");
        assert_eq!(client.check_url("alice"), "http://example.com/check/alice");
        assert_eq!(client.check_url("a b/c"), "http://example.com/check/a%20b%2Fc");
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = AvailabilityClient::new(&CheckConfig::new().with_base_url("not a url"));
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_lookup_available() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "alice": "available"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.lookup("alice").await.unwrap(), Availability::Available);
    }

    #[tokio::test]
    async fn test_lookup_taken() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "alice": "taken"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(
            client.lookup("alice").await.unwrap(),
            Availability::Unavailable(Some("taken".to_string()))
        );
    }

    #[tokio::test]
    async fn test_lookup_missing_key_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "bob": "available"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.lookup("alice").await.unwrap(), Availability::Unavailable(None));
    }

    #[tokio::test]
    async fn test_lookup_non_object_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.lookup("alice").await.unwrap(), Availability::Unavailable(None));
    }

    #[tokio::test]
    async fn test_lookup_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(
            client.lookup("alice").await.unwrap(),
            Availability::Unknown { status: 500 }
        );
    }

    #[tokio::test]
    async fn test_lookup_bad_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.lookup("alice").await.unwrap_err();
        assert!(matches!(err, CheckError::Parse { body: Some(ref b), .. } if b == "<html>"));
    }
}
