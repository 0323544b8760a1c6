#![warn(missing_docs)]

//! [`tower`] services for the HTTP calls shopctl makes to the auth service
//! and the commerce API.

use std::{str::Utf8Error, time::Duration};

/// Install ring as the default rustls crypto provider for every binary that
/// links shopctl-http.
#[ctor::ctor]
fn install_ring_crypto_provider() {
    // .ok() because the provider may already be installed
    rustls::crypto::ring::default_provider()
        .install_default()
        .ok();
}

use buildstructor::Builder;
use bytes::Bytes;
use derive_getters::Getters;
pub use http_body_util::Full;
use tower::{timeout::error::Elapsed, util::BoxCloneSyncService};

pub mod body;
pub mod default_headers;
mod error;
mod reqwest;
pub mod service;
#[cfg(any(test, feature = "test"))]
pub mod test;

pub use error::HttpServiceError;
pub use reqwest::ReqwestService;

/// Ease-of-use synonym for the request type this crate operates on
pub type HttpRequest = http::Request<Full<Bytes>>;
/// Ease-of-use synonym for the response type this crate operates on
pub type HttpResponse<T = Full<Bytes>> = http::Response<T>;
/// Ease-of-use synonym for the [`tower::Service`] type this crate provides.
///
/// The service is `Sync` so that clients holding one can be shared behind an
/// `Arc` and borrowed across `.await` points.
pub type HttpService = BoxCloneSyncService<HttpRequest, HttpResponse, HttpServiceError>;

/// Configuration object for constructing an [`HttpService`].
#[derive(Clone, Debug, Builder, Default, Getters)]
pub struct HttpServiceConfig {
    timeout: Option<Duration>,
}

impl From<Box<dyn std::error::Error + Send + Sync>> for HttpServiceError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        match err.downcast::<Elapsed>() {
            Ok(elapsed) => HttpServiceError::TimedOut(elapsed),
            Err(err) => match err.downcast::<::reqwest::Error>() {
                Ok(err) => HttpServiceError::from(*err),
                Err(err) => match err.downcast::<HttpServiceError>() {
                    Ok(err) => *err,
                    Err(err) => HttpServiceError::Unexpected(err),
                },
            },
        }
    }
}

impl From<Utf8Error> for HttpServiceError {
    fn from(value: Utf8Error) -> Self {
        HttpServiceError::Decode(Box::new(value))
    }
}
