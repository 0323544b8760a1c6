//! Testing infrastructure for shopctl-http consumers: an in-process
//! [`HttpService`] that answers from a script and records what it was sent.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use bytes::Bytes;
use futures::future::BoxFuture;
use http::{HeaderMap, Method, StatusCode};
use http_body_util::Full;
use tower::{util::BoxCloneSyncService, Service};

use crate::body::full_to_bytes;
use crate::{HttpRequest, HttpResponse, HttpService, HttpServiceError};

/// A request as observed by a [`ScriptedService`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// request method
    pub method: Method,
    /// request path, without the query
    pub path: String,
    /// request headers
    pub headers: HeaderMap,
    /// request body
    pub body: Bytes,
    /// when the request arrived, on tokio's (possibly paused) clock
    pub at: tokio::time::Instant,
}

impl RecordedRequest {
    /// The body as UTF-8 text
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Value of the `Authorization` header, if any
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Respond { status: StatusCode, body: Bytes },
    ConnectionRefused,
}

#[derive(Debug, Default)]
struct Script {
    replies: HashMap<String, VecDeque<Reply>>,
    requests: Vec<RecordedRequest>,
}

/// Answers requests with scripted replies, keyed by path.
///
/// Replies for a path are consumed in order; the last one is repeated for
/// every further request. Unscripted paths answer `404`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedService {
    script: Arc<Mutex<Script>>,
}

impl ScriptedService {
    /// Creates an empty script
    pub fn new() -> ScriptedService {
        ScriptedService::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queues a JSON reply for `path`
    pub fn respond(&self, path: &str, status: u16, body: serde_json::Value) -> &Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.push(
            path,
            Reply::Respond {
                status,
                body: Bytes::from(body.to_string()),
            },
        )
    }

    /// Queues a raw-text reply for `path`
    pub fn respond_text(&self, path: &str, status: u16, body: &str) -> &Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.push(
            path,
            Reply::Respond {
                status,
                body: Bytes::from(body.to_string()),
            },
        )
    }

    /// Queues a transport failure for `path`
    pub fn refuse_connection(&self, path: &str) -> &Self {
        self.push(path, Reply::ConnectionRefused)
    }

    fn push(&self, path: &str, reply: Reply) -> &Self {
        self.script()
            .replies
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script().requests.clone()
    }

    /// Every request received so far for `path`
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|req| req.path == path)
            .collect()
    }

    /// Boxes this script as an [`HttpService`]
    pub fn into_service(self) -> HttpService {
        BoxCloneSyncService::new(self)
    }

    fn answer(&self, recorded: RecordedRequest) -> Result<HttpResponse, HttpServiceError> {
        let mut script = self.script();
        let reply = match script.replies.get_mut(&recorded.path) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        script.requests.push(recorded);
        match reply {
            Some(Reply::Respond { status, body }) => Ok(http::Response::builder()
                .status(status)
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Full::new(body))?),
            Some(Reply::ConnectionRefused) => Err(HttpServiceError::Connect(Box::new(
                std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
            ))),
            None => Ok(http::Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Full::default())?),
        }
    }
}

impl Service<HttpRequest> for ScriptedService {
    type Response = HttpResponse;
    type Error = HttpServiceError;
    type Future = BoxFuture<'static, Result<HttpResponse, HttpServiceError>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: HttpRequest) -> Self::Future {
        let this = self.clone();
        Box::pin(async move {
            let at = tokio::time::Instant::now();
            let (parts, body) = req.into_parts();
            let recorded = RecordedRequest {
                method: parts.method,
                path: parts.uri.path().to_string(),
                headers: parts.headers,
                body: full_to_bytes(body).await,
                at,
            };
            this.answer(recorded)
        })
    }
}
