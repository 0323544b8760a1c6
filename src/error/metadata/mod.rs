mod code;
mod suggestion;

pub use code::ShopctlErrorCode;
pub use suggestion::ShopctlErrorSuggestion;

use lockbox::LockboxProblem;
use serde::Serialize;
use shopctl_http::HttpServiceError;
use shopctl_oauth::OAuthError;

use crate::auth::AuthError;
use crate::client::ApiClientError;

/// Extra information about specific errors: an optional error code and an
/// optional suggestion for how to fix things
#[derive(Default, Debug, Serialize)]
pub struct ShopctlErrorMetadata {
    pub code: Option<ShopctlErrorCode>,
    pub suggestion: Option<ShopctlErrorSuggestion>,
    #[serde(skip_serializing)]
    pub skip_printing_cause: bool,
}

type Described = (Option<ShopctlErrorCode>, Option<ShopctlErrorSuggestion>);

fn describe_http(error: &HttpServiceError) -> Described {
    if error.is_connect() || error.is_timeout() {
        (
            Some(ShopctlErrorCode::E005),
            Some(ShopctlErrorSuggestion::CheckServerConnection),
        )
    } else {
        (Some(ShopctlErrorCode::E005), None)
    }
}

fn describe_oauth(error: &OAuthError) -> Described {
    match error {
        OAuthError::Http(http) => describe_http(http),
        OAuthError::AccessDenied => (
            Some(ShopctlErrorCode::E002),
            Some(ShopctlErrorSuggestion::RunLogin),
        ),
        OAuthError::AuthorizationExpired => (
            Some(ShopctlErrorCode::E003),
            Some(ShopctlErrorSuggestion::LoginFaster),
        ),
        OAuthError::AuthorizationRequest(_)
        | OAuthError::MalformedResponse { .. }
        | OAuthError::UnexpectedResponse { .. }
        | OAuthError::Rejected { .. } => (
            Some(ShopctlErrorCode::E004),
            Some(ShopctlErrorSuggestion::SubmitIssue),
        ),
    }
}

fn describe_store(problem: &LockboxProblem) -> Described {
    match problem {
        LockboxProblem::DefaultConfigDirNotFound | LockboxProblem::InvalidOverrideConfigDir(_) => (
            Some(ShopctlErrorCode::E008),
            Some(ShopctlErrorSuggestion::SetConfigHome),
        ),
        problem if problem.is_corrupt() => (
            Some(ShopctlErrorCode::E007),
            Some(ShopctlErrorSuggestion::RunLogin),
        ),
        _ => (Some(ShopctlErrorCode::E006), None),
    }
}

fn describe_auth(error: &AuthError) -> Described {
    match error {
        AuthError::NotAuthenticated => (
            Some(ShopctlErrorCode::E001),
            Some(ShopctlErrorSuggestion::RunLogin),
        ),
        AuthError::AccessDenied => (
            Some(ShopctlErrorCode::E002),
            Some(ShopctlErrorSuggestion::RunLogin),
        ),
        AuthError::AuthorizationExpired => (
            Some(ShopctlErrorCode::E003),
            Some(ShopctlErrorSuggestion::LoginFaster),
        ),
        AuthError::Store(problem) => describe_store(problem),
        AuthError::OAuth(error) if error.is_transport() => {
            let (code, _) = describe_oauth(error);
            (code, Some(ShopctlErrorSuggestion::RunLoginOnceReachable))
        }
        AuthError::OAuth(error) => describe_oauth(error),
    }
}

/// Metadata is derived from an `anyhow::Error` by downcasting it to the
/// error types shopctl knows about
impl From<&anyhow::Error> for ShopctlErrorMetadata {
    fn from(error: &anyhow::Error) -> Self {
        let (code, suggestion) = if let Some(auth) = error.downcast_ref::<AuthError>() {
            describe_auth(auth)
        } else if let Some(api) = error.downcast_ref::<ApiClientError>() {
            match api {
                ApiClientError::Auth(auth) => describe_auth(auth),
                ApiClientError::Http { source, .. } => describe_http(source),
                ApiClientError::Status { .. } => (Some(ShopctlErrorCode::E009), None),
                ApiClientError::Decode { .. } => (
                    Some(ShopctlErrorCode::E009),
                    Some(ShopctlErrorSuggestion::SubmitIssue),
                ),
            }
        } else if let Some(oauth) = error.downcast_ref::<OAuthError>() {
            describe_oauth(oauth)
        } else if let Some(problem) = error.downcast_ref::<LockboxProblem>() {
            describe_store(problem)
        } else if let Some(http) = error.downcast_ref::<HttpServiceError>() {
            describe_http(http)
        } else {
            (None, None)
        };

        ShopctlErrorMetadata {
            code,
            suggestion,
            skip_printing_cause: code.is_some(),
        }
    }
}
