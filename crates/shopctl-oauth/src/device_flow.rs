use http::Method;
use shopctl_http::body::{form_request, json_request};
use tokio::time::{sleep, Duration, Instant};

use crate::{
    config::{DEVICE_AUTHORIZATION_PATH, DEVICE_TOKEN_PATH},
    types::*,
    AuthClient, OAuthError,
};

impl AuthClient {
    /// Starts a device authorization (RFC 8628 §3.1)
    pub async fn request_device_code(&self) -> Result<DeviceAuthorizationSession, OAuthError> {
        let payload = DeviceAuthorizationRequest {
            client_id: &self.config().client_id,
            scope: self.config().scope(),
        };
        let request = json_request(
            Method::POST,
            &self.config().endpoint(DEVICE_AUTHORIZATION_PATH),
            &payload,
        )?;
        let (status, body) = self.send(request).await?;

        if !status.is_success() {
            let reason = match serde_json::from_slice::<ErrorResponse>(&body) {
                Ok(ErrorResponse {
                    error,
                    error_description: Some(description),
                    ..
                }) => format!("{error}: {description}"),
                Ok(ErrorResponse { error, .. }) => error,
                Err(_) => format!("{status}: {}", String::from_utf8_lossy(&body)),
            };
            return Err(OAuthError::AuthorizationRequest(reason));
        }

        let response: DeviceAuthorizationResponse = serde_json::from_slice(&body)
            .map_err(|err| OAuthError::AuthorizationRequest(format!("malformed response: {err}")))?;
        tracing::debug!(
            expires_in = response.expires_in,
            interval = ?response.interval,
            "device authorization started"
        );
        Ok(response.into())
    }

    /// Makes a single device token request (RFC 8628 §3.4)
    pub async fn exchange_device_code(
        &self,
        session: &DeviceAuthorizationSession,
    ) -> Result<DeviceTokenResult, OAuthError> {
        let request = form_request(
            &self.config().endpoint(DEVICE_TOKEN_PATH),
            [
                ("grant_type", DEVICE_CODE_GRANT_TYPE),
                ("device_code", session.device_code()),
                ("client_id", self.config().client_id.as_str()),
            ],
        )?;
        let (status, body) = self.send(request).await?;
        GrantResponse::decode(DEVICE_TOKEN_PATH, status, &body).map(DeviceTokenResult::from)
    }

    /// Polls the token endpoint until the user approves, denies, or the
    /// device code expires.
    ///
    /// Each round polls first and then waits `interval` seconds. `slow_down`
    /// permanently adds 5 seconds to the interval of `session`. Polling stops
    /// once `expires_in` seconds have passed since the call began.
    pub async fn poll_for_token(
        &self,
        session: &mut DeviceAuthorizationSession,
    ) -> Result<TokenGrant, OAuthError> {
        let deadline = Instant::now() + Duration::from_secs(*session.expires_in());

        while Instant::now() < deadline {
            match self.exchange_device_code(session).await? {
                DeviceTokenResult::Success(grant) => return Ok(grant),
                DeviceTokenResult::Pending => {
                    tracing::trace!("authorization pending");
                }
                DeviceTokenResult::SlowDown => {
                    session.slow_down();
                    tracing::debug!(interval = session.interval(), "asked to slow down");
                }
                DeviceTokenResult::Denied => return Err(OAuthError::AccessDenied),
                DeviceTokenResult::Expired => return Err(OAuthError::AuthorizationExpired),
                DeviceTokenResult::OtherError { code, description } => {
                    return Err(OAuthError::Rejected {
                        error: code,
                        error_description: description,
                    })
                }
            }
            sleep(Duration::from_secs(*session.interval())).await;
        }

        Err(OAuthError::AuthorizationExpired)
    }
}
