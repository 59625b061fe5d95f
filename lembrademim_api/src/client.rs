//! HTTP client for the Lembra de Mim backend.
//!
//! Every logical request walks the configured candidate endpoints in order
//! and stops at the first one that produces an HTTP response.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::{
    credentials::{CredentialStore, MemoryStore, TOKEN_KEY},
    endpoints::Endpoints,
    errors::{normalize_error_message, truncate_body},
    request::RequestDescriptor,
    Error,
};

/// What to do when the credential store cannot be read while building an
/// authenticated request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Log the failure and send the request without `Authorization`.
    #[default]
    FailOpen,
    /// Abort the call with [`Error::Credentials`].
    FailClosed,
}

impl std::str::FromStr for AuthPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail-open" | "open" => Ok(AuthPolicy::FailOpen),
            "fail-closed" | "closed" => Ok(AuthPolicy::FailClosed),
            other => Err(format!(
                "unknown auth policy '{}'. Valid values: fail-open, fail-closed",
                other
            )),
        }
    }
}

/// A 2xx response, before any JSON decoding.
#[derive(Clone, Debug)]
pub struct RawResponse {
    /// Base URL of the candidate that answered.
    pub endpoint: String,
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Decodes the body as `T`. An empty body is an error here.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if self.body.is_empty() {
            tracing::error!("Empty response from {} (HTTP {})", self.endpoint, self.status);
            return Err(Error::EmptyResponse {
                status: self.status,
            });
        }
        serde_json::from_str::<T>(&self.body).map_err(|e| {
            let snippet = truncate_body(&self.body);
            tracing::error!("Failed to parse response: {} | body: {}", e, snippet);
            Error::Decode {
                status: self.status,
                message: e.to_string(),
                body: snippet,
            }
        })
    }
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    endpoints: Endpoints,
    credentials: Option<Arc<dyn CredentialStore>>,
    auth_policy: AuthPolicy,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn credentials(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    pub fn auth_policy(mut self, policy: AuthPolicy) -> Self {
        self.auth_policy = policy;
        self
    }

    /// Per-request transport timeout. Unset leaves the transport default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let mut http = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::Client(e.to_string())
        })?;
        Ok(Client {
            endpoints: self.endpoints,
            http,
            credentials: self
                .credentials
                .unwrap_or_else(|| Arc::new(MemoryStore::new())),
            auth_policy: self.auth_policy,
        })
    }
}

/// HTTP client for the Lembra de Mim backend.
///
/// Candidates are tried strictly one after another. A candidate that cannot
/// be reached is skipped; the first candidate that answers decides the
/// outcome, including when it answers with an error status. A 404 from the
/// production server is therefore surfaced as-is instead of being masked by
/// a LAN fallback. Callers that rely on this must not expect a retry on a
/// later candidate.
#[derive(Clone)]
pub struct Client {
    pub(crate) endpoints: Endpoints,
    pub(crate) http: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
    auth_policy: AuthPolicy,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder {
            endpoints: Endpoints::default(),
            credentials: None,
            auth_policy: AuthPolicy::default(),
            timeout: None,
        }
    }

    /// Creates a client over the given candidates and credential store.
    pub fn new(endpoints: Endpoints, credentials: Arc<dyn CredentialStore>) -> Result<Self, Error> {
        Self::builder()
            .endpoints(endpoints)
            .credentials(credentials)
            .build()
    }

    /// Creates a client with a single custom base URL. Used for testing with wiremock.
    pub fn with_base_url(
        base_url: &str,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, Error> {
        Self::new(Endpoints::single(base_url)?, credentials)
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub fn auth_policy(&self) -> AuthPolicy {
        self.auth_policy
    }

    /// Sends `req` and decodes the JSON body as `T`.
    pub async fn request<T: DeserializeOwned>(&self, req: RequestDescriptor) -> Result<T, Error> {
        self.execute(&req).await?.decode()
    }

    /// Sends `req` for its side effect. Any 2xx counts as success, with or
    /// without a body.
    pub async fn request_unit(&self, req: RequestDescriptor) -> Result<(), Error> {
        self.execute(&req).await.map(|_| ())
    }

    /// Sends `req` and returns the 2xx response undecoded.
    pub async fn request_raw(&self, req: RequestDescriptor) -> Result<RawResponse, Error> {
        self.execute(&req).await
    }

    async fn execute(&self, req: &RequestDescriptor) -> Result<RawResponse, Error> {
        let mut last_error: Option<Error> = None;

        for base in self.endpoints.iter() {
            let url = Endpoints::join(base, &req.path);
            let headers = self.headers(req)?;
            tracing::debug!("{} {}", req.method, url);

            let mut builder = self.http.request(req.method.clone(), &url).headers(headers);
            if let Some(ref body) = req.body {
                builder = builder.json(body);
            }

            let resp = match builder.send().await {
                Ok(resp) => resp,
                Err(e) => {
                    tracing::warn!("Endpoint {} unreachable: {}", base, e);
                    last_error = Some(Error::Network {
                        endpoint: base.to_string(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let status = resp.status();
            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Failed to read response body from {}: {}", base, e);
                    last_error = Some(Error::Network {
                        endpoint: base.to_string(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            if !status.is_success() {
                let message = normalize_error_message(status.as_u16(), &body);
                tracing::error!(
                    "{} {} failed with status {}: {}",
                    req.method,
                    url,
                    status,
                    message
                );
                return Err(Error::HttpStatus {
                    status: status.as_u16(),
                    message,
                    body: truncate_body(&body),
                });
            }

            return Ok(RawResponse {
                endpoint: base.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        tracing::error!("All {} endpoints failed for {}", self.endpoints.len(), req.path);
        Err(Error::AllEndpointsFailed {
            last: last_error.map(Box::new),
        })
    }

    fn headers(&self, req: &RequestDescriptor) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &req.headers {
            let parsed = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            );
            match parsed {
                (Ok(name), Ok(value)) => {
                    if name != CONTENT_TYPE && name != AUTHORIZATION {
                        headers.insert(name, value);
                    }
                }
                _ => tracing::warn!("Skipping invalid header '{}'", name),
            }
        }

        if req.requires_auth {
            if let Some(token) = self.bearer_token()? {
                match HeaderValue::from_str(&format!("Bearer {}", token)) {
                    Ok(mut value) => {
                        value.set_sensitive(true);
                        headers.insert(AUTHORIZATION, value);
                    }
                    Err(_) => tracing::warn!("Stored token is not a valid header value"),
                }
            }
        }

        Ok(headers)
    }

    fn bearer_token(&self) -> Result<Option<String>, Error> {
        match self.credentials.get(TOKEN_KEY) {
            Ok(token) => Ok(token.filter(|t| !t.is_empty())),
            Err(e) => match self.auth_policy {
                AuthPolicy::FailOpen => {
                    tracing::warn!("Failed to read auth token, sending without it: {}", e);
                    Ok(None)
                }
                AuthPolicy::FailClosed => {
                    tracing::error!("Failed to read auth token: {}", e);
                    Err(Error::Credentials(e))
                }
            },
        }
    }
}
