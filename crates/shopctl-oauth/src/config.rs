//! Where the auth service lives and how shopctl identifies itself to it

use url::Url;

/// Device authorization request (JSON)
pub const DEVICE_AUTHORIZATION_PATH: &str = "/api/v1/oauth/device/authorize";
/// Device code token poll (form-urlencoded)
pub const DEVICE_TOKEN_PATH: &str = "/api/v1/oauth/device/token";
/// Refresh token grant (form-urlencoded)
pub const TOKEN_PATH: &str = "/api/v1/oauth/token";
/// Token revocation (form-urlencoded)
pub const REVOKE_PATH: &str = "/api/v1/oauth/revoke";
/// Profile of the authenticated user (bearer)
pub const USER_PROFILE_PATH: &str = "/api/v1/users/me";

/// Endpoints that must work without an access token: they are how one is obtained.
pub const UNAUTHENTICATED_PATHS: [&str; 3] =
    [DEVICE_AUTHORIZATION_PATH, DEVICE_TOKEN_PATH, TOKEN_PATH];

/// Client id shopctl registers with when none is configured
pub const DEFAULT_CLIENT_ID: &str = "shopctl-cli";

/// Capabilities requested at login
pub const DEFAULT_SCOPES: [&str; 8] = [
    "products:read",
    "products:write",
    "orders:read",
    "orders:write",
    "inventory:read",
    "inventory:write",
    "shipping:read",
    "i18n:read",
];

/// Whether requests to `path` bypass authentication
pub fn is_unauthenticated_path(path: &str) -> bool {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    UNAUTHENTICATED_PATHS.contains(&path)
}

/// Client configuration for the auth service
#[derive(Debug, Clone)]
pub struct AuthServerConfig {
    /// base URL of the auth service
    pub base_url: Url,
    /// public client id, sent with every grant
    pub client_id: String,
    /// scopes requested during device authorization
    pub scopes: Vec<String>,
}

impl AuthServerConfig {
    /// Configuration for the auth service at `base_url` with shopctl's default identity
    pub fn new(base_url: Url) -> AuthServerConfig {
        AuthServerConfig {
            base_url,
            client_id: DEFAULT_CLIENT_ID.to_string(),
            scopes: DEFAULT_SCOPES.iter().map(|scope| scope.to_string()).collect(),
        }
    }

    /// Overrides the client id
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> AuthServerConfig {
        self.client_id = client_id.into();
        self
    }

    /// Absolute URL of `path` on the auth service
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Space-delimited scope list
    pub fn scope(&self) -> String {
        self.scopes.join(" ")
    }
}
