//! Keeping shopctl logged in: the token lifecycle and the tower layer that
//! puts its tokens on outgoing requests.

mod error;
mod gateway;
mod lifecycle;

pub use error::AuthError;
pub use gateway::{Authenticate, AuthenticateLayer};
pub use lifecycle::{LogoutOutcome, TokenLifecycle};

use async_trait::async_trait;

/// Source of the bearer token for authenticated requests
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a usable access token, refreshing it first when needed.
    ///
    /// `Ok(None)` means there is no session; the request should go out
    /// without credentials.
    async fn ensure_valid_token(&self) -> Result<Option<String>, AuthError>;
}
