use shopctl_http::body::form_request;

use crate::{
    config::{REVOKE_PATH, TOKEN_PATH},
    types::{GrantResponse, TokenGrant, REFRESH_TOKEN_GRANT_TYPE},
    AuthClient, ErrorResponse, OAuthError,
};

impl AuthClient {
    /// Trades a refresh token for a fresh token pair (RFC 6749 §6)
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, OAuthError> {
        let request = form_request(
            &self.config().endpoint(TOKEN_PATH),
            [
                ("grant_type", REFRESH_TOKEN_GRANT_TYPE),
                ("refresh_token", refresh_token),
                ("client_id", self.config().client_id.as_str()),
            ],
        )?;
        let (status, body) = self.send(request).await?;
        match GrantResponse::decode(TOKEN_PATH, status, &body)? {
            GrantResponse::Granted(grant) => Ok(grant),
            GrantResponse::Error(error) => Err(OAuthError::Rejected {
                error: error.error,
                error_description: error.error_description,
            }),
        }
    }

    /// Revokes `refresh_token` and, with it, the access tokens issued from it (RFC 7009)
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), OAuthError> {
        let request = form_request(
            &self.config().endpoint(REVOKE_PATH),
            [
                ("token", refresh_token),
                ("token_type_hint", "refresh_token"),
                ("client_id", self.config().client_id.as_str()),
            ],
        )?;
        let (status, body) = self.send(request).await?;
        if status.is_success() {
            return Ok(());
        }
        Err(match serde_json::from_slice::<ErrorResponse>(&body) {
            Ok(error) => OAuthError::Rejected {
                error: error.error,
                error_description: error.error_description,
            },
            Err(_) => OAuthError::UnexpectedResponse {
                endpoint: REVOKE_PATH,
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            },
        })
    }
}
