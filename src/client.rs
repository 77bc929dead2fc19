use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, header};
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{
    TRANSPORT_REQUEST_DURATION, TRANSPORT_REQUEST_ERRORS, TRANSPORT_REQUESTS,
};
use crate::types::{HttpReply, QuestionRequest};

/// Endpoint used when no configuration says otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/api/chat";
/// Upper bound on how long a question may stay in flight.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivers one question to the chat endpoint.
///
/// Any response that reaches the caller, whatever its status, is an `Ok`.
/// `Err` is reserved for requests where no response arrived at all.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Posts the question and returns the raw reply.
    async fn post(&self, request: &QuestionRequest) -> Result<HttpReply>;
}

/// Transport that POSTs JSON over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
    endpoint: Url,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport for `endpoint` with the default timeout.
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_options(endpoint, None)
    }

    /// Create a transport with custom settings.
    pub fn with_options(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        match endpoint.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::validation(
                    format!("unsupported endpoint scheme {scheme:?}"),
                    Some("endpoint".to_string()),
                ));
            }
        }

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    /// The endpoint questions are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
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

    fn map_send_error(&self, e: reqwest::Error) -> Error {
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

    /// The status line arrived but the body did not.
    fn map_body_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            self.map_send_error(e)
        } else {
            Error::abort(format!("Response body cut off: {}", e))
        }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: &QuestionRequest) -> Result<HttpReply> {
        TRANSPORT_REQUESTS.click();
        let start = Instant::now();

        let result: Result<HttpReply> = async {
            let response = self
                .client
                .post(self.endpoint.clone())
                .headers(Self::default_headers())
                .json(request)
                .send()
                .await
                .map_err(|e| self.map_send_error(e))?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| self.map_body_error(e))?;
            Ok(HttpReply::new(status, body))
        }
        .await;

        TRANSPORT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if result.is_err() {
            TRANSPORT_REQUEST_ERRORS.click();
        }
        result
    }
}
