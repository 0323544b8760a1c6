use std::{future::Future, pin::Pin, sync::Arc};

use http::{header::AUTHORIZATION, HeaderValue};
use shopctl_http::{service::replace_ready_service, HttpRequest, HttpResponse, HttpServiceError};
use shopctl_oauth::is_unauthenticated_path;
use tower::{Layer, Service};

use super::TokenProvider;

/// Puts the current access token on every request that needs one.
///
/// Requests to the token acquisition endpoints pass through untouched.
/// When the provider has no token the request goes out without credentials
/// and the server's `401` speaks for itself. A provider error fails the
/// request with [`HttpServiceError::Unexpected`] wrapping the
/// [`AuthError`](super::AuthError); recover it with
/// [`HttpServiceError::layer_error`].
#[derive(Clone)]
pub struct AuthenticateLayer {
    provider: Arc<dyn TokenProvider>,
}

impl AuthenticateLayer {
    pub fn new(provider: Arc<dyn TokenProvider>) -> AuthenticateLayer {
        AuthenticateLayer { provider }
    }
}

impl<S> Layer<S> for AuthenticateLayer {
    type Service = Authenticate<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Authenticate {
            provider: self.provider.clone(),
            inner,
        }
    }
}

#[derive(Clone)]
pub struct Authenticate<S> {
    provider: Arc<dyn TokenProvider>,
    inner: S,
}

impl<S> Service<HttpRequest> for Authenticate<S>
where
    S: Service<HttpRequest, Response = HttpResponse, Error = HttpServiceError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = HttpResponse;
    type Error = HttpServiceError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: HttpRequest) -> Self::Future {
        let mut inner = replace_ready_service::<_, HttpRequest>(&mut self.inner);
        let provider = self.provider.clone();
        Box::pin(async move {
            if is_unauthenticated_path(req.uri().path()) {
                tracing::trace!(path = req.uri().path(), "skipping authentication");
                return inner.call(req).await;
            }
            let token = provider
                .ensure_valid_token()
                .await
                .map_err(|err| HttpServiceError::Unexpected(Box::new(err)))?;
            match token {
                Some(token) => {
                    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                        .map_err(http::Error::from)?;
                    value.set_sensitive(true);
                    req.headers_mut().insert(AUTHORIZATION, value);
                }
                None => {
                    tracing::debug!(path = req.uri().path(), "no session, sending without credentials");
                }
            }
            inner.call(req).await
        })
    }
}
