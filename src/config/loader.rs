use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::settings::ClientConfig;
use crate::config::validator;

/// Load, expand and validate config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
    let config = read_config(path)?;
    debug!("validating config ...");
    validator::validate_client_config(&config)?;
    Ok(config)
}

/// Load and expand without validating, for callers that patch the config first.
pub fn read_config<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;

    deserialize(&expand_env_vars(&content))
}

pub fn parse_config(content: &str) -> Result<ClientConfig> {
    let config = deserialize(content)?;
    debug!("validating config ...");
    validator::validate_client_config(&config)?;
    Ok(config)
}

fn deserialize(content: &str) -> Result<ClientConfig> {
    serde_yaml::from_str(content)
        .inspect_err(|e| error!("parse config error: {}", e))
        .context("invalid config format")
}

/// Replaces `${VAR}` and `${VAR:default}` with values from the environment.
pub fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]*))?\}").expect("static pattern");
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
