use serde::Deserialize;

/// ================================
/// Full client configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// ================================
/// Catalog service
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// log every request and response body at debug level
    #[serde(default)]
    pub debug: bool,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), debug: false }
    }
}

/// ================================
/// Client-credentials grant
/// ================================
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    pub token_base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub audience: String,
    /// static token installed instead of calling the token endpoint
    #[serde(default)]
    pub debug_token: Option<String>,
}

impl AuthConfig {
    pub fn new(
        token_base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            token_base_url: token_base_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            audience: audience.into(),
            debug_token: None,
        }
    }

    pub fn with_debug_token(mut self, token: impl Into<String>) -> Self {
        self.debug_token = Some(token.into());
        self
    }

    /// `{token_base_url}/oauth/token`
    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.token_base_url.trim_end_matches('/'))
    }
}

// secrets stay out of logs
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_base_url", &self.token_base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("audience", &self.audience)
            .field("debug_token", &self.debug_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // allowed: trace, debug, info, warn, error
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: LogFormat::Compact }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}

fn default_log_level() -> String {
    "info".to_string()
}
