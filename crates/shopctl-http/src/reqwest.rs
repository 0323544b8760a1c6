use std::{pin::Pin, time::Duration};

use buildstructor::buildstructor;
use futures::Future;
use http_body_util::{BodyExt, Full};
use reqwest::ClientBuilder;
use tower::{util::BoxCloneSyncService, Service, ServiceBuilder};

use crate::{
    body::full_to_bytes, service::replace_ready_service, HttpRequest, HttpResponse, HttpService,
    HttpServiceConfig, HttpServiceError,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A [`Service`] that wraps a [`reqwest`] client and uses [`http`] constructs for requests and responses
#[derive(Clone, Debug)]
pub struct ReqwestService {
    client: BoxCloneSyncService<reqwest::Request, reqwest::Response, HttpServiceError>,
}

#[buildstructor]
impl ReqwestService {
    /// Constructs a new [`ReqwestService`]
    #[builder]
    pub fn new(
        config: Option<HttpServiceConfig>,
        client: Option<reqwest::Client>,
    ) -> Result<ReqwestService, reqwest::Error> {
        let config = config.unwrap_or_default();
        let client = match client {
            Some(client) => client,
            None => ClientBuilder::new().build()?,
        };
        let client = ServiceBuilder::new()
            .map_err(HttpServiceError::from)
            .timeout(config.timeout().unwrap_or(DEFAULT_TIMEOUT))
            .service(client);
        Ok(ReqwestService {
            client: BoxCloneSyncService::new(client),
        })
    }
}

impl From<reqwest::Error> for HttpServiceError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_body() {
            HttpServiceError::Body(value.into())
        } else if value.is_connect() {
            HttpServiceError::Connect(value.into())
        } else if value.is_timeout() {
            HttpServiceError::TimedOut(value.into())
        } else if value.is_decode() {
            HttpServiceError::Decode(value.into())
        } else {
            HttpServiceError::Unexpected(value.into())
        }
    }
}

impl Service<HttpRequest> for ReqwestService {
    type Response = HttpResponse;
    type Error = HttpServiceError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.client.poll_ready(cx)
    }

    fn call(&mut self, req: HttpRequest) -> Self::Future {
        // https://docs.rs/tower/latest/tower/trait.Service.html#be-careful-when-cloning-inner-services
        let mut client = replace_ready_service::<_, reqwest::Request>(&mut self.client);
        let fut = async move {
            let (parts, body) = req.into_parts();
            let bytes = full_to_bytes(body).await;
            let req = reqwest::Request::try_from(http::Request::from_parts(parts, bytes))?;
            tracing::trace!(method = %req.method(), url = %req.url(), "sending request");
            let resp = http::Response::from(client.call(req).await?);
            let (parts, body) = resp.into_parts();
            let bytes = body
                .collect()
                .await
                .map_err(|err| HttpServiceError::Body(Box::new(err)))?
                .to_bytes();
            tracing::trace!(status = %parts.status, "received response");
            Ok(http::Response::from_parts(parts, Full::new(bytes)))
        };
        Box::pin(fut)
    }
}

impl From<ReqwestService> for HttpService {
    fn from(value: ReqwestService) -> Self {
        BoxCloneSyncService::new(value)
    }
}
