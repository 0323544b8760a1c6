//! A [`Layer`] that stamps a fixed set of headers onto every request

use http::HeaderMap;
use tower::{Layer, Service};

/// Adds `headers` to each request that does not already carry them
#[derive(Clone, Debug)]
pub struct DefaultHeadersLayer {
    headers: HeaderMap,
}

impl DefaultHeadersLayer {
    /// Creates a new [`DefaultHeadersLayer`]
    pub fn new(headers: impl Into<HeaderMap>) -> DefaultHeadersLayer {
        DefaultHeadersLayer {
            headers: headers.into(),
        }
    }
}

impl<S> Layer<S> for DefaultHeadersLayer {
    type Service = DefaultHeaders<S>;
    fn layer(&self, inner: S) -> Self::Service {
        DefaultHeaders {
            headers: self.headers.clone(),
            inner,
        }
    }
}

/// [`Service`] produced by [`DefaultHeadersLayer`]
#[derive(Clone, Debug)]
pub struct DefaultHeaders<S> {
    headers: HeaderMap,
    inner: S,
}

impl<Req, S> Service<http::Request<Req>> for DefaultHeaders<S>
where
    S: Service<http::Request<Req>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: http::Request<Req>) -> Self::Future {
        for (name, value) in self.headers.iter() {
            if !req.headers().contains_key(name) {
                req.headers_mut().insert(name.clone(), value.clone());
            }
        }
        self.inner.call(req)
    }
}
