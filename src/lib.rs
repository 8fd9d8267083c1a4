//! # BMM Client Library
//!
//! Typed access to the BMM media catalog API. Every call is authenticated
//! with a machine-to-machine token that is fetched once and refreshed
//! transparently shortly before it expires.
//!
//! Modules:
//! - `auth` — credential, clock, token manager
//! - `dispatch` — authenticated request execution and response decoding
//! - `api` — typed catalog and game operations
//! - `models` — response and request shapes
//! - `config` — client configuration and YAML loader
//! - `observability` — injected logger handle and metrics

pub mod api;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod observability;
#[cfg(test)]
mod tests;
pub mod utils;


pub use crate::api::client::BmmClient;
pub use crate::auth::token_manager::TokenManager;
pub use crate::config::settings::{ApiConfig, AuthConfig, ClientConfig};
pub use crate::dispatch::dispatcher::Dispatcher;
pub use crate::dispatch::method::Method;
pub use crate::dispatch::request::{decode, CatalogRequest, CatalogResponse};
pub use crate::error::{AuthError, Error, Result};
pub use crate::models::id::Id;
pub use crate::observability::logger::Logger;
