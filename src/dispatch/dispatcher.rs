use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use http::StatusCode;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info_span};

use crate::auth::token_manager::TokenManager;
use crate::config::settings::ApiConfig;
use crate::dispatch::request::{decode, CatalogRequest, CatalogResponse};
use crate::error::{Error, Result};
use crate::observability::logger::Logger;
use crate::observability::metrics::ClientMetrics;

/// Fixed `Accept-Language` sent with every catalog request. Not configurable.
pub const LANGUAGE: &str = "nb";

static TRANSPORT_MSG: &str = "transport";
static STATUS_MSG: &str = "status";

/// Authenticates, sends and classifies single catalog exchanges.
pub struct Dispatcher {
    base_url: String,
    client: Client,
    tokens: Arc<TokenManager>,
    debug: bool,
    logger: Logger,
    metrics: Arc<ClientMetrics>,
}

impl Dispatcher {
    pub fn new(config: &ApiConfig, tokens: Arc<TokenManager>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(LANGUAGE));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
            tokens,
            debug: config.debug,
            logger: Logger::noop(),
            metrics: Arc::new(ClientMetrics::new()),
        })
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ClientMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// Raw body of a 200 OK response.
    pub async fn execute(&self, request: &CatalogRequest) -> Result<Bytes> {
        self.send(request).await.map(|response| response.body)
    }

    /// `execute` followed by `decode`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: &CatalogRequest) -> Result<T> {
        let raw = self.execute(request).await?;
        decode(&raw)
    }

    pub async fn send(&self, request: &CatalogRequest) -> Result<CatalogResponse> {
        self.logger
            .scope(
                || {
                    info_span!(
                        "request",
                        component = "bmm",
                        method = request.method.as_str(),
                        path = %request.path
                    )
                },
                self.send_authenticated(request),
            )
            .await
    }

    async fn send_authenticated(&self, request: &CatalogRequest) -> Result<CatalogResponse> {
        // no request goes out without a token
        let token = self.tokens.get_access_token().await?;

        let method = request.method.as_str();
        let url = self.url(&request.path);
        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .bearer_auth(token);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        if self.debug {
            debug!(url = %url, body = ?request.body, "sending request");
        }

        self.metrics.api_requests.with_label_values(&[method]).inc();
        let start = Instant::now();

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => return Err(self.transport_failure(method, start, err)),
        };
        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => return Err(self.transport_failure(method, start, err)),
        };
        self.metrics
            .api_duration
            .with_label_values(&[method])
            .observe(start.elapsed().as_secs_f64());

        if self.debug {
            debug!(
                code = status.as_u16(),
                length = body.len(),
                response = %String::from_utf8_lossy(&body),
                "received response"
            );
        }

        if status != StatusCode::OK {
            error!(
                code = status.as_u16(),
                response = %String::from_utf8_lossy(&body),
                "request failed with status code"
            );
            self.metrics.api_failures.with_label_values(&[method, STATUS_MSG]).inc();
            return Err(Error::Api { status, body });
        }

        Ok(CatalogResponse { status, body })
    }

    fn transport_failure(&self, method: &str, start: Instant, err: reqwest::Error) -> Error {
        error!(error = %err, "request failed, response is nil");
        self.metrics
            .api_duration
            .with_label_values(&[method])
            .observe(start.elapsed().as_secs_f64());
        self.metrics.api_failures.with_label_values(&[method, TRANSPORT_MSG]).inc();
        Error::Transport(err)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
