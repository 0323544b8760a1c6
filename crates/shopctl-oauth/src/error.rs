use http::StatusCode;
use shopctl_http::HttpServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OAuthError {
    #[error("Could not reach the auth service: {0}")]
    Http(#[from] HttpServiceError),

    #[error("Device authorization request failed: {0}")]
    AuthorizationRequest(String),

    #[error("The auth service sent a malformed response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("The auth service answered {endpoint} with {status} and no OAuth error: {body}")]
    UnexpectedResponse {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Authorization was denied")]
    AccessDenied,

    #[error("The device code expired before authorization completed")]
    AuthorizationExpired,

    #[error("OAuth server error: {error}{}", .error_description.as_deref().map(|d| format!(" - {d}")).unwrap_or_default())]
    Rejected {
        error: String,
        error_description: Option<String>,
    },
}

impl OAuthError {
    /// true when the failure happened before any response arrived
    pub const fn is_transport(&self) -> bool {
        matches!(self, OAuthError::Http(_))
    }

    /// The OAuth `error` code the server sent, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            OAuthError::AccessDenied => Some("access_denied"),
            OAuthError::AuthorizationExpired => Some("expired_token"),
            OAuthError::Rejected { error, .. } => Some(error.as_str()),
            _ => None,
        }
    }
}
