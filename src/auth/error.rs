use lockbox::LockboxProblem;
use shopctl_oauth::OAuthError;
use thiserror::Error;

/// Failures of the authentication layer as the CLI reports them
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("You are not logged in.")]
    NotAuthenticated,

    #[error("Authorization was denied.")]
    AccessDenied,

    #[error("The login code expired before it was approved.")]
    AuthorizationExpired,

    #[error(transparent)]
    Store(#[from] LockboxProblem),

    #[error(transparent)]
    OAuth(OAuthError),
}

impl From<OAuthError> for AuthError {
    fn from(error: OAuthError) -> Self {
        match error {
            OAuthError::AccessDenied => AuthError::AccessDenied,
            OAuthError::AuthorizationExpired => AuthError::AuthorizationExpired,
            error => AuthError::OAuth(error),
        }
    }
}
