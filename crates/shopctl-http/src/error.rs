type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can go wrong between handing a request to an
/// [`HttpService`](crate::HttpService) and receiving a response.
///
/// A response with a non-2xx status is not an error at this layer.
#[derive(thiserror::Error, Debug)]
pub enum HttpServiceError {
    /// The request could not be assembled.
    #[error("HTTP error: {:?}", .0)]
    Http(#[from] http::Error),
    /// The request or response exceeded the configured timeout.
    #[error("Request timed out: {:?}", .0)]
    TimedOut(BoxError),
    /// A body could not be decoded.
    #[error("Decode error: {:?}", .0)]
    Decode(BoxError),
    /// A body could not be read or written.
    #[error("Body error: {:?}", .0)]
    Body(BoxError),
    /// No connection could be made to the server.
    #[error("Connect error: {:?}", .0)]
    Connect(BoxError),
    /// Anything else, including errors raised by layers wrapping the transport.
    #[error("Unexpected HTTP error: {}", .0)]
    Unexpected(BoxError),
}

impl HttpServiceError {
    /// true when no connection could be established
    pub const fn is_connect(&self) -> bool {
        matches!(self, HttpServiceError::Connect(_))
    }

    /// true when the request timed out
    pub const fn is_timeout(&self) -> bool {
        matches!(self, HttpServiceError::TimedOut(_))
    }

    /// Returns the error raised by a wrapping layer, if it is of type `E`.
    pub fn layer_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            HttpServiceError::Unexpected(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }
}
