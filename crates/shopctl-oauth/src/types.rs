use derive_getters::Getters;
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::OAuthError;

/// RFC 8628 §3.5: the interval is increased by 5 seconds on every `slow_down`
pub const SLOW_DOWN_STEP_SECS: u64 = 5;
/// RFC 8628 §3.2: clients poll every 5 seconds when the server does not say otherwise
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// The grant type of a device code token request
pub const DEVICE_CODE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";
/// The grant type of a refresh token request
pub const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Device Authorization Request (RFC 8628 §3.1), sent as JSON
#[derive(Debug, Serialize)]
pub struct DeviceAuthorizationRequest<'a> {
    pub client_id: &'a str,
    pub scope: String,
}

/// Device Authorization Response (RFC 8628 §3.2)
#[derive(Debug, Deserialize)]
pub struct DeviceAuthorizationResponse {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    pub verification_uri_complete: Option<String>,
    pub expires_in: u64,
    pub interval: Option<u64>,
}

/// One login attempt's device authorization. Lives only as long as the
/// polling loop; never persisted.
#[derive(Debug, Clone, Getters)]
pub struct DeviceAuthorizationSession {
    #[getter(skip)]
    device_code: String,
    user_code: String,
    verification_uri: String,
    verification_uri_complete: Option<String>,
    expires_in: u64,
    interval: u64,
}

impl DeviceAuthorizationSession {
    pub(crate) fn device_code(&self) -> &str {
        &self.device_code
    }

    pub(crate) fn slow_down(&mut self) {
        self.interval += SLOW_DOWN_STEP_SECS;
    }

    /// The URI to send the user to, preferring the one with the code embedded
    pub fn browser_uri(&self) -> &str {
        self.verification_uri_complete
            .as_deref()
            .unwrap_or(&self.verification_uri)
    }
}

impl From<DeviceAuthorizationResponse> for DeviceAuthorizationSession {
    fn from(response: DeviceAuthorizationResponse) -> Self {
        DeviceAuthorizationSession {
            device_code: response.device_code,
            user_code: response.user_code,
            verification_uri: response.verification_uri,
            verification_uri_complete: response.verification_uri_complete,
            expires_in: response.expires_in,
            interval: response.interval.unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

/// Successful token response (RFC 6749 §5.1). shopctl requires a refresh
/// token and a lifetime alongside every access token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Error response from the auth service (RFC 6749 §5.2)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
    pub error_uri: Option<String>,
}

/// A token endpoint response, decoded once at the I/O boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GrantResponse {
    Granted(TokenGrant),
    Error(ErrorResponse),
}

#[derive(Deserialize)]
struct AccessTokenField {
    access_token: Option<String>,
}

impl AccessTokenField {
    // `"access_token": null` does not make a body a grant
    fn present(body: &[u8]) -> bool {
        serde_json::from_slice::<AccessTokenField>(body)
            .is_ok_and(|field| field.access_token.is_some())
    }
}

impl GrantResponse {
    pub(crate) fn decode(
        endpoint: &'static str,
        status: StatusCode,
        body: &[u8],
    ) -> Result<GrantResponse, OAuthError> {
        if AccessTokenField::present(body) {
            return serde_json::from_slice(body)
                .map(GrantResponse::Granted)
                .map_err(|source| OAuthError::MalformedResponse { endpoint, source });
        }
        match serde_json::from_slice::<ErrorResponse>(body) {
            Ok(error) => Ok(GrantResponse::Error(error)),
            Err(source) if status.is_success() => {
                Err(OAuthError::MalformedResponse { endpoint, source })
            }
            Err(_) => Err(OAuthError::UnexpectedResponse {
                endpoint,
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            }),
        }
    }
}

/// The outcome of one device token poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceTokenResult {
    Success(TokenGrant),
    Pending,
    SlowDown,
    Denied,
    Expired,
    OtherError {
        code: String,
        description: Option<String>,
    },
}

impl From<GrantResponse> for DeviceTokenResult {
    fn from(response: GrantResponse) -> Self {
        match response {
            GrantResponse::Granted(grant) => DeviceTokenResult::Success(grant),
            GrantResponse::Error(error) => match error.error.as_str() {
                "authorization_pending" => DeviceTokenResult::Pending,
                "slow_down" => DeviceTokenResult::SlowDown,
                "access_denied" => DeviceTokenResult::Denied,
                "expired_token" => DeviceTokenResult::Expired,
                _ => DeviceTokenResult::OtherError {
                    code: error.error,
                    description: error.error_description,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;
    use serde_json::json;
    use speculoos::prelude::*;

    use super::*;
    use crate::config::DEVICE_TOKEN_PATH;

    fn decode(status: u16, body: serde_json::Value) -> Result<DeviceTokenResult, OAuthError> {
        GrantResponse::decode(
            DEVICE_TOKEN_PATH,
            StatusCode::from_u16(status).unwrap(),
            body.to_string().as_bytes(),
        )
        .map(DeviceTokenResult::from)
    }

    #[rstest]
    #[case("authorization_pending", DeviceTokenResult::Pending)]
    #[case("slow_down", DeviceTokenResult::SlowDown)]
    #[case("access_denied", DeviceTokenResult::Denied)]
    #[case("expired_token", DeviceTokenResult::Expired)]
    fn oauth_error_codes_map_to_poll_results(
        #[case] code: &str,
        #[case] expected: DeviceTokenResult,
    ) {
        assert_that!(decode(400, json!({ "error": code }))).is_ok_containing(&expected);
    }

    #[test]
    fn unknown_error_codes_are_kept() {
        assert_that!(decode(
            400,
            json!({ "error": "invalid_client", "error_description": "unknown client" })
        ))
        .is_ok_containing(&DeviceTokenResult::OtherError {
            code: "invalid_client".to_string(),
            description: Some("unknown client".to_string()),
        });
    }

    #[test]
    fn an_access_token_means_success() {
        let result = decode(
            200,
            json!({ "access_token": "at1", "refresh_token": "rt1", "expires_in": 3600, "token_type": "Bearer" }),
        );
        assert_that!(result).is_ok_containing(&DeviceTokenResult::Success(TokenGrant {
            access_token: "at1".to_string(),
            refresh_token: "rt1".to_string(),
            expires_in: 3600,
            token_type: Some("Bearer".to_string()),
            scope: None,
        }));
    }

    #[test]
    fn a_null_access_token_does_not_hide_the_error_code() {
        let result = decode(
            400,
            json!({ "access_token": null, "error": "authorization_pending" }),
        );
        assert_that!(result).is_ok_containing(&DeviceTokenResult::Pending);
    }

    #[test]
    fn a_token_without_a_refresh_token_is_malformed() {
        let result = decode(200, json!({ "access_token": "at1", "expires_in": 3600 }));
        assert_that!(result)
            .is_err()
            .matches(|e| matches!(e, OAuthError::MalformedResponse { .. }));
    }

    #[test]
    fn an_error_status_without_an_oauth_body_is_not_a_poll_result() {
        let result = GrantResponse::decode(
            DEVICE_TOKEN_PATH,
            StatusCode::BAD_GATEWAY,
            b"<html>bad gateway</html>",
        );
        assert_that!(result).is_err().matches(|e| {
            matches!(e, OAuthError::UnexpectedResponse { status, .. } if *status == StatusCode::BAD_GATEWAY)
        });
    }

    #[test]
    fn sessions_default_the_interval_and_grow_it_on_slow_down() {
        let mut session = DeviceAuthorizationSession::from(DeviceAuthorizationResponse {
            device_code: "dc1".to_string(),
            user_code: "ABCD-1234".to_string(),
            verification_uri: "https://example.com/device".to_string(),
            verification_uri_complete: None,
            expires_in: 600,
            interval: None,
        });
        assert_that!(*session.interval()).is_equal_to(DEFAULT_POLL_INTERVAL_SECS);
        assert_that!(session.browser_uri()).is_equal_to("https://example.com/device");

        session.slow_down();
        session.slow_down();
        assert_that!(*session.interval()).is_equal_to(DEFAULT_POLL_INTERVAL_SECS + 10);
    }
}
