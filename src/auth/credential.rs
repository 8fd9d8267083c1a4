use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Credentials are renewed this long before their computed expiry.
pub const SAFETY_MARGIN_SECONDS: i64 = 10;

/// Lifetime of a credential installed from a debug token.
pub const DEBUG_TOKEN_LIFETIME_SECONDS: i64 = 24 * 60 * 60;

/// One client-credentials grant, fetched atomically.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub scope: String,
    pub expires_in: i64, // seconds
    pub token_type: String,
    pub created_at: DateTime<Utc>,
}

impl Credential {
    pub fn from_grant(grant: GrantResponse, created_at: DateTime<Utc>) -> Self {
        Self {
            access_token: grant.access_token,
            scope: grant.scope,
            expires_in: grant.expires_in,
            token_type: grant.token_type,
            created_at,
        }
    }

    pub fn debug(token: String, created_at: DateTime<Utc>) -> Self {
        Self {
            access_token: token,
            scope: String::new(),
            expires_in: DEBUG_TOKEN_LIFETIME_SECONDS,
            token_type: "Bearer".to_string(),
            created_at,
        }
    }

    /// Granted lifetime. Negative values count as zero and values past the
    /// representable range saturate.
    pub fn lifetime(&self) -> Duration {
        Duration::try_seconds(self.expires_in.max(0)).unwrap_or(Duration::MAX)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at
            .checked_add_signed(self.lifetime())
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// True once less than the safety margin is left before expiry.
    pub fn expired(&self, now: DateTime<Utc>) -> bool {
        (now - self.created_at) + Duration::seconds(SAFETY_MARGIN_SECONDS) > self.lifetime()
    }
}

// the token itself never reaches logs
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"***")
            .field("scope", &self.scope)
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Body of the token endpoint response. Every field is optional on the wire;
/// an empty `access_token` is rejected by the manager.
#[derive(Debug, Default, Deserialize)]
pub struct GrantResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: String,
}
