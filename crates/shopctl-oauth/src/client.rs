use bytes::Bytes;
use http::StatusCode;
use shopctl_http::{body::into_status_and_bytes, HttpRequest, HttpService};
use tower::{Service, ServiceExt};

use crate::{AuthServerConfig, OAuthError};

/// Talks to the auth service's OAuth endpoints.
///
/// Cloning is cheap; clones share the underlying [`HttpService`].
#[derive(Clone)]
pub struct AuthClient {
    service: HttpService,
    config: AuthServerConfig,
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AuthClient {
    /// `service` must not attach credentials of its own: every call made
    /// here either obtains a token or hands one over in the body.
    pub fn new(service: HttpService, config: AuthServerConfig) -> AuthClient {
        AuthClient { service, config }
    }

    pub fn config(&self) -> &AuthServerConfig {
        &self.config
    }

    pub(crate) async fn send(&self, request: HttpRequest) -> Result<(StatusCode, Bytes), OAuthError> {
        let mut service = self.service.clone();
        let response = service.ready().await?.call(request).await?;
        Ok(into_status_and_bytes(response).await)
    }
}
