use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use shopctl_http::{
    body::{empty_request, into_status_and_bytes, json_request},
    HttpService, HttpServiceError,
};
use thiserror::Error;
use tower::{Service, ServiceExt};
use url::Url;

use crate::auth::AuthError;

#[derive(Error, Debug)]
pub enum ApiClientError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Could not reach {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: HttpServiceError,
    },

    #[error("{method} {path} failed with {status}: {body}")]
    Status {
        method: Method,
        path: String,
        status: StatusCode,
        body: String,
    },

    #[error("Could not decode the response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A JSON client for the authenticated shopctl APIs.
///
/// The service handed in is expected to carry the authentication layer; a
/// `401` from the server is reported as [`AuthError::NotAuthenticated`].
#[derive(Clone)]
pub struct ApiClient {
    service: HttpService,
    base_url: Url,
}

/// A decoded response body. Bodies that aren't JSON are kept as text.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl ApiClient {
    pub fn new(service: HttpService, base_url: Url) -> ApiClient {
        ApiClient { service, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// GETs `path` and decodes a successful JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiClientError> {
        let response = self.send(Method::GET, path, None).await?;
        serde_json::from_value(response.body).map_err(|source| ApiClientError::Decode {
            path: path.to_string(),
            source,
        })
    }

    /// Sends `method path` with an optional JSON body.
    ///
    /// Non-2xx responses other than `401` become [`ApiClientError::Status`].
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        data: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, ApiClientError> {
        let url = self.url(path);
        let request = match data {
            Some(data) => json_request(method.clone(), &url, data),
            None => empty_request(method.clone(), &url),
        }
        .map_err(|source| Self::transport_error(&url, source))?;

        let mut service = self.service.clone();
        let response = service
            .ready()
            .await
            .map_err(|source| Self::transport_error(&url, source))?
            .call(request)
            .await
            .map_err(|source| Self::transport_error(&url, source))?;
        let (status, bytes) = into_status_and_bytes(response).await;
        tracing::debug!(%method, path, %status, "api response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::NotAuthenticated.into());
        }
        if !status.is_success() {
            return Err(ApiClientError::Status {
                method,
                path: path.to_string(),
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        Ok(ApiResponse { status, body })
    }

    // errors raised by the authentication layer come back wrapped in the transport error
    fn transport_error(url: &str, source: HttpServiceError) -> ApiClientError {
        match source {
            HttpServiceError::Unexpected(err) => match err.downcast::<AuthError>() {
                Ok(auth) => ApiClientError::Auth(*auth),
                Err(err) => ApiClientError::Http {
                    url: url.to_string(),
                    source: HttpServiceError::Unexpected(err),
                },
            },
            source => ApiClientError::Http {
                url: url.to_string(),
                source,
            },
        }
    }
}
