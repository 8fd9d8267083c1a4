use bytes::Bytes;
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::dispatch::method::Method;
use crate::error::{Error, Result};

/// One outbound exchange: verb, path with an already-encoded query, optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl CatalogRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> Result<Self> {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| Error::validation(format!("request body is not serializable: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Successful exchange; the body is kept exactly as received.
#[derive(Debug, Clone)]
pub struct CatalogResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl CatalogResponse {
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        decode(&self.body)
    }
}

/// Structural decode of a raw body into `T`.
pub fn decode<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
    serde_json::from_slice(raw).map_err(Error::Decode)
}
