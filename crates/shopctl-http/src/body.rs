//! Helpers for building and reading the [`Full`] bodies carried by
//! [`HttpRequest`]s and [`HttpResponse`]s

use bytes::Bytes;
use http::{header, Method};
use http_body_util::{BodyExt, Full};
use serde::Serialize;
use url::form_urlencoded;

use crate::{HttpRequest, HttpResponse, HttpServiceError};

/// `Content-Type` of JSON bodies
pub const APPLICATION_JSON: &str = "application/json";
/// `Content-Type` of form-urlencoded bodies
pub const APPLICATION_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Reads a [`Full`] body to [`Bytes`]. Reading a [`Full`] body never fails.
pub async fn full_to_bytes(body: Full<Bytes>) -> Bytes {
    match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(never) => match never {},
    }
}

/// Splits a response into its status and body bytes
pub async fn into_status_and_bytes(resp: HttpResponse) -> (http::StatusCode, Bytes) {
    let (parts, body) = resp.into_parts();
    (parts.status, full_to_bytes(body).await)
}

/// Builds a request carrying `payload` serialized as JSON
pub fn json_request<T>(method: Method, uri: &str, payload: &T) -> Result<HttpRequest, HttpServiceError>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_vec(payload).map_err(|err| HttpServiceError::Decode(Box::new(err)))?;
    Ok(http::Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, APPLICATION_JSON)
        .header(header::ACCEPT, APPLICATION_JSON)
        .body(Full::new(Bytes::from(body)))?)
}

/// Builds a POST whose body is `pairs` encoded as `application/x-www-form-urlencoded`
pub fn form_request<'a, I>(uri: &str, pairs: I) -> Result<HttpRequest, HttpServiceError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let body = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    Ok(http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, APPLICATION_FORM_URLENCODED)
        .header(header::ACCEPT, APPLICATION_JSON)
        .body(Full::new(Bytes::from(body)))?)
}

/// Builds a body-less request
pub fn empty_request(method: Method, uri: &str) -> Result<HttpRequest, HttpServiceError> {
    Ok(http::Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ACCEPT, APPLICATION_JSON)
        .body(Full::default())?)
}
