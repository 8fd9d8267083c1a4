use std::sync::Arc;

use reqwest::Client;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, info_span};

use crate::auth::clock::{Clock, SystemClock};
use crate::auth::credential::{Credential, GrantResponse};
use crate::config::settings::AuthConfig;
use crate::error::{AuthError, Result};
use crate::observability::logger::Logger;
use crate::observability::metrics::{ClientMetrics, OUTCOME_DEBUG, OUTCOME_ERROR, OUTCOME_OK};

const GRANT_TYPE: &str = "client_credentials";

#[derive(Serialize)]
struct GrantRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    audience: &'a str,
    grant_type: &'static str,
}

/// Owns one client-credentials grant and renews it before it expires.
pub struct TokenManager {
    config: AuthConfig,
    client: Client,
    credential: RwLock<Option<Credential>>,
    // serializes grant calls
    refresh_lock: Mutex<()>,
    clock: Arc<dyn Clock>,
    logger: Logger,
    metrics: Arc<ClientMetrics>,
}

impl TokenManager {
    /// Builds a manager with no credential yet; the first
    /// `get_access_token` call performs the grant.
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            client: Client::new(),
            credential: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            clock: Arc::new(SystemClock),
            logger: Logger::noop(),
            metrics: Arc::new(ClientMetrics::new()),
        }
    }

    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ClientMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Performs the first grant right away.
    pub async fn connect(self) -> Result<Self> {
        self.refresh().await?;
        Ok(self)
    }

    /// Returns the access token, refreshing it first when it is absent or
    /// within the safety margin of its expiry.
    pub async fn get_access_token(&self) -> Result<String> {
        self.logger
            .scope(|| info_span!("token", component = "bmm_token"), self.current_or_refresh())
            .await
    }

    /// Unconditionally replaces the held credential with a fresh grant.
    /// On failure the previous credential is kept as it was.
    pub async fn refresh(&self) -> Result<()> {
        let refresh = async {
            let _guard = self.refresh_lock.lock().await;
            self.refresh_locked().await.map(|_| ())
        };
        self.logger
            .scope(|| info_span!("token", component = "bmm_token", action = "refresh"), refresh)
            .await
    }

    /// Snapshot of the current credential.
    pub async fn credential(&self) -> Option<Credential> {
        self.credential.read().await.clone()
    }

    async fn current_or_refresh(&self) -> Result<String> {
        if let Some(token) = self.valid_token().await {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;
        // another caller may have finished a refresh while we waited
        if let Some(token) = self.valid_token().await {
            return Ok(token);
        }
        let credential = self.refresh_locked().await?;
        Ok(credential.access_token)
    }

    async fn valid_token(&self) -> Option<String> {
        let now = self.clock.now();
        self.credential
            .read()
            .await
            .as_ref()
            .filter(|credential| !credential.expired(now))
            .map(|credential| credential.access_token.clone())
    }

    // caller holds `refresh_lock`
    async fn refresh_locked(&self) -> Result<Credential> {
        if let Some(token) = &self.config.debug_token {
            debug!("Using DEBUG token. Expired token will not be automatically refreshed");
            let credential = Credential::debug(token.clone(), self.clock.now());
            *self.credential.write().await = Some(credential.clone());
            self.metrics.refreshed(OUTCOME_DEBUG);
            return Ok(credential);
        }

        let url = self.config.token_url();
        let request = GrantRequest {
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            audience: &self.config.audience,
            grant_type: GRANT_TYPE,
        };

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, url = %url, "Failed to refresh token");
                self.metrics.refreshed(OUTCOME_ERROR);
                return Err(AuthError::Request(err).into());
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                error!(error = %err, "Failed to read token response");
                self.metrics.refreshed(OUTCOME_ERROR);
                return Err(AuthError::Request(err).into());
            }
        };

        // any body without a usable token is reported verbatim below
        let grant: GrantResponse = serde_json::from_str(&body).unwrap_or_default();
        if grant.access_token.is_empty() {
            error!(status = status.as_u16(), response = %body, "Failed to get token");
            self.metrics.refreshed(OUTCOME_ERROR);
            return Err(AuthError::MissingToken { status, body }.into());
        }

        let credential = Credential::from_grant(grant, self.clock.now());
        info!(
            expires_in = credential.expires_in,
            token_type = %credential.token_type,
            "token refreshed"
        );
        *self.credential.write().await = Some(credential.clone());
        self.metrics.refreshed(OUTCOME_OK);
        Ok(credential)
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
