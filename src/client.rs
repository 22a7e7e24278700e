use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, Response, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::env;
use std::time::{Duration, Instant};
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::service::AgentService;
use crate::types::{AgentRequest, AgentResponse, CreateSessionResponse, SessionId};

/// Base address used when neither the caller nor the environment names one.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/";
/// Environment variable consulted for the base address.
pub const API_URL_ENV: &str = "SINDHU_API_URL";
/// How long a single request may take before it is abandoned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the agent service HTTP API.
#[derive(Debug, Clone)]
pub struct AgentClient {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
}

impl AgentClient {
    /// Create a new agent client.
    ///
    /// The base URL can be provided directly or read from the SINDHU_API_URL
    /// environment variable; it defaults to a service on localhost.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => url,
            None => env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        };
        let base_url = parse_base_url(&base_url)?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .default_headers(default_headers())
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The base address every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolves a service-relative download path into an absolute URL.
    ///
    /// Absolute URLs pass through unchanged.
    pub fn resolve_download(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::url(format!("{} cannot be a base URL", self.base_url), None))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute(&self, method: Method, url: Url, body: Option<&AgentRequest>) -> Result<Response> {
        CLIENT_REQUESTS.click();
        tracing::debug!(%method, %url, "agent service request");
        let start = Instant::now();

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let result = request.send().await.map_err(|e| self.transport_error(e));
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                CLIENT_REQUEST_ERRORS.click();
                tracing::warn!(%method, %url, error = %err, "agent service unreachable");
                return Err(err);
            }
        };

        if !response.status().is_success() {
            CLIENT_REQUEST_ERRORS.click();
            let err = Self::process_error_response(response).await;
            tracing::warn!(%method, %url, error = %err, "agent service returned an error");
            return Err(err);
        }

        Ok(response)
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };
        let error_message = error_message(&error_body).unwrap_or(error_body);

        match status_code {
            400 => Error::bad_request(error_message),
            404 => Error::not_found(error_message),
            408 => Error::timeout(error_message, None),
            500 => Error::internal_server(error_message),
            502..=504 => Error::service_unavailable(error_message),
            _ => Error::api(status_code, error_message),
        }
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status_code = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        decode_body(status_code, &body).inspect_err(|err| {
            CLIENT_REQUEST_ERRORS.click();
            tracing::warn!(error = %err, "agent service sent an unusable body");
        })
    }

    /// Open a new session on the service.
    pub async fn create_session(&self) -> Result<SessionId> {
        let url = self.endpoint(&["create-new-session"])?;
        let response = self.execute(Method::POST, url, None).await?;
        let created: CreateSessionResponse = self.decode(response).await?;
        Ok(created.session_id)
    }

    /// Delete a session on the service.
    ///
    /// Any 2xx status counts as success; the body is not inspected.
    pub async fn delete_session(&self, session_id: &SessionId) -> Result<()> {
        let url = self.endpoint(&["delete-session", session_id.as_str()])?;
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Run one query against the agent.
    pub async fn run(&self, request: &AgentRequest) -> Result<AgentResponse> {
        let url = self.endpoint(&["agent", "run"])?;
        let response = self.execute(Method::POST, url, Some(request)).await?;
        let mut reply: AgentResponse = self.decode(response).await?;
        self.absolutize_download(&mut reply);
        Ok(reply)
    }

    /// Rewrites the reply's download path into an absolute URL.
    ///
    /// A path that cannot be resolved is passed through as sent; the reply
    /// text is never lost over a bad link.
    fn absolutize_download(&self, reply: &mut AgentResponse) {
        let Some(path) = reply.download_url.as_deref() else {
            return;
        };
        match self.resolve_download(path) {
            Ok(url) => reply.download_url = Some(url.to_string()),
            Err(err) => {
                tracing::warn!(path, error = %err, "unresolvable download link");
            }
        }
    }
}

#[async_trait::async_trait]
impl AgentService for AgentClient {
    async fn create_session(&self) -> Result<SessionId> {
        AgentClient::create_session(self).await
    }

    async fn delete_session(&self, session_id: &SessionId) -> Result<()> {
        AgentClient::delete_session(self, session_id).await
    }

    async fn run(&self, request: &AgentRequest) -> Result<AgentResponse> {
        AgentClient::run(self, request).await
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::validation(
            format!("unsupported scheme {:?} in {raw}", url.scheme()),
            Some("url".to_string()),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Pull a human-readable message out of an error body.
///
/// The service reports failures as `{"error": "..."}`; its framework reports
/// rejected requests as `{"detail": ...}`.
fn error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<serde_json::Value>,
        detail: Option<serde_json::Value>,
    }

    let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
    let value = parsed.error.or(parsed.detail)?;
    match value {
        serde_json::Value::String(message) => Some(message),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Decode a 2xx body, treating an in-band `{"error": ...}` as a failure.
fn decode_body<T: DeserializeOwned>(status_code: u16, body: &str) -> Result<T> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        Error::serialization(
            format!("Failed to parse response: {}", e),
            Some(Box::new(e)),
        )
    })?;
    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
        return Err(Error::api(status_code, message));
    }
    serde_json::from_value(value).map_err(|e| {
        Error::serialization(
            format!("Failed to parse response: {}", e),
            Some(Box::new(e)),
        )
    })
}
