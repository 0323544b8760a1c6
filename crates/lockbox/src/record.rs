use camino::Utf8PathBuf;
use chrono::{DateTime, TimeDelta, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// An access/refresh token pair as issued by the auth service.
///
/// The pair is only ever built whole from an issuance, and `expires_at` is
/// always derived from the issuance instant and `issued_expires_in`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TokenRecord {
    /// Bearer credential for API calls
    access_token: String,
    /// Credential exchanged for a new pair once the access token lapses
    refresh_token: String,
    /// Lifetime in seconds the auth service granted the access token
    issued_expires_in: u64,
    /// Instant from which the access token is no longer used
    expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Records a token pair issued at `issued_at`, valid for `expires_in` seconds.
    pub fn issue(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: u64,
        issued_at: DateTime<Utc>,
    ) -> TokenRecord {
        let expires_at = i64::try_from(expires_in)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        TokenRecord {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            issued_expires_in: expires_in,
            expires_at,
        }
    }

    /// Records a token pair issued right now.
    pub fn issue_now(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: u64,
    ) -> TokenRecord {
        TokenRecord::issue(access_token, refresh_token, expires_in, Utc::now())
    }

    /// Whether the access token is no longer usable at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the access token is no longer usable.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Descriptive information about the logged-in user, as returned by the
/// auth service. Never consulted for authorization decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// the user's id
    pub id: String,
    /// the user's email address
    pub email: String,
    /// the user's display name
    #[serde(default)]
    pub name: String,
    /// the user's role in their organization
    #[serde(default)]
    pub role: String,
}

/// Where the credential in use came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "location")]
pub enum CredentialOrigin {
    /// an override token supplied through the environment
    EnvVar,
    /// the encrypted credential file at this path
    CredentialFile(Utf8PathBuf),
}
