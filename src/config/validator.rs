//! Configuration validation with aggregated errors.
//! - every issue is collected into one Vec<String>
//! - urls must be absolute http(s)
//! - grant parameters must be present unless a debug token is set
//! - logging level must be known

use tracing::{debug, error};
use url::Url;

use crate::config::settings::{ApiConfig, AuthConfig, ClientConfig, LoggingConfig};
use crate::error::{Error, Result};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Returns Ok(()) or `Error::Validation` listing all issues.
pub fn validate_client_config(cfg: &ClientConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    validate_api(&cfg.api, &mut errors);
    validate_auth(&cfg.auth, &mut errors);
    validate_logging(&cfg.logging, &mut errors);

    if errors.is_empty() {
        debug!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        Err(Error::validation(format!(
            "config is not valid, total errors: {}\n{}",
            errors.len(),
            errors.join("\n")
        )))
    }
}

pub fn validate_api(api: &ApiConfig, errors: &mut Vec<String>) {
    validate_url("api.base_url", &api.base_url, errors);
}

pub fn validate_auth(auth: &AuthConfig, errors: &mut Vec<String>) {
    // debug token replaces the grant entirely
    if auth.debug_token.as_deref().is_some_and(|t| !t.trim().is_empty()) {
        return;
    }
    if let Some(token) = &auth.debug_token {
        if token.trim().is_empty() {
            errors.push("auth.debug_token must not be blank when provided".to_string());
        }
    }
    validate_url("auth.token_base_url", &auth.token_base_url, errors);
    for (field, value) in [
        ("auth.client_id", &auth.client_id),
        ("auth.client_secret", &auth.client_secret),
        ("auth.audience", &auth.audience),
    ] {
        if value.trim().is_empty() {
            errors.push(format!("{} must not be empty", field));
        }
    }
}

fn validate_logging(logging: &LoggingConfig, errors: &mut Vec<String>) {
    if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        errors.push(format!(
            "logging.level '{}' must be one of {:?}",
            logging.level, LOG_LEVELS
        ));
    }
}

fn validate_url(field: &str, value: &str, errors: &mut Vec<String>) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            if url.query().is_some() {
                errors.push(format!("{} '{}' must not carry a query", field, value));
            }
        }
        Ok(url) => errors.push(format!(
            "{} '{}' has unsupported scheme '{}'",
            field,
            value,
            url.scheme()
        )),
        Err(e) => errors.push(format!("{} '{}' is not a valid url: {}", field, value, e)),
    }
}
