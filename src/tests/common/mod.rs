// shared helpers for the cfg(test) modules
pub use httpmock::Method::{DELETE, GET, POST, PUT};
pub use httpmock::{Mock, MockServer};
pub use serde_json::json;

use std::io;
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;

use crate::auth::clock::ManualClock;
use crate::auth::token_manager::TokenManager;
use crate::config::settings::{ApiConfig, AuthConfig};
use crate::observability::logger::Logger;

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const AUDIENCE: &str = "https://bmm-api.brunstad.org";

pub fn auth_config(server: &MockServer) -> AuthConfig {
    AuthConfig::new(server.base_url(), CLIENT_ID, CLIENT_SECRET, AUDIENCE)
}

pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig::new(server.base_url())
}

pub fn start_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap())
}

pub fn token_manager(server: &MockServer, clock: &ManualClock) -> TokenManager {
    TokenManager::new(auth_config(server)).with_clock(Arc::new(clock.clone()))
}

pub fn grant_body() -> serde_json::Value {
    json!({
        "client_id": CLIENT_ID,
        "client_secret": CLIENT_SECRET,
        "audience": AUDIENCE,
        "grant_type": "client_credentials",
    })
}

/// Token endpoint answering with `access_token` valid for `expires_in` seconds.
pub async fn grant_mock<'a>(server: &'a MockServer, access_token: &str, expires_in: i64) -> Mock<'a> {
    let response = json!({
        "access_token": access_token,
        "scope": "read:catalog write:game",
        "expires_in": expires_in,
        "token_type": "Bearer",
    });
    server
        .mock_async(|when, then| {
            when.method(POST).path("/oauth/token").json_body(grant_body());
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(response);
        })
        .await
}

/// Logger writing into a buffer the test can read back.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn logger(&self) -> Logger {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        Logger::new(Dispatch::new(subscriber))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
