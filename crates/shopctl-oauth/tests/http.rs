use anyhow::Result;
use httpmock::{Method, MockServer};
use serde_json::json;
use shopctl_http::ReqwestService;
use shopctl_oauth::{
    config::{DEVICE_AUTHORIZATION_PATH, DEVICE_TOKEN_PATH, TOKEN_PATH},
    AuthClient, AuthServerConfig, OAuthError,
};
use speculoos::prelude::*;
use url::Url;

fn client(server: &MockServer) -> Result<AuthClient> {
    let service = ReqwestService::builder()
        .client(reqwest::Client::default())
        .build()?
        .into();
    Ok(AuthClient::new(
        service,
        AuthServerConfig::new(Url::parse(&server.base_url())?),
    ))
}

#[tokio::test]
async fn device_login_over_real_http() -> Result<()> {
    let server = MockServer::start();
    let authorize = server.mock(|when, then| {
        when.method(Method::POST)
            .path(DEVICE_AUTHORIZATION_PATH)
            .header("content-type", "application/json");
        then.status(200).json_body(json!({
            "device_code": "dc1",
            "user_code": "ABCD-EFGH",
            "verification_uri": "https://auth.test/device",
            "expires_in": 30,
            "interval": 1
        }));
    });
    let token = server.mock(|when, then| {
        when.method(Method::POST)
            .path(DEVICE_TOKEN_PATH)
            .header("content-type", "application/x-www-form-urlencoded");
        then.status(200).json_body(json!({
            "access_token": "at1",
            "refresh_token": "rt1",
            "expires_in": 3600,
            "token_type": "Bearer"
        }));
    });

    let client = client(&server)?;
    let mut session = client.request_device_code().await?;
    let grant = client.poll_for_token(&mut session).await?;

    authorize.assert();
    token.assert();
    assert_that!(grant.access_token.as_str()).is_equal_to("at1");
    Ok(())
}

#[tokio::test]
async fn refresh_rejection_over_real_http() -> Result<()> {
    let server = MockServer::start();
    let refresh = server.mock(|when, then| {
        when.method(Method::POST)
            .path(TOKEN_PATH)
            .header("content-type", "application/x-www-form-urlencoded");
        then.status(400).json_body(json!({
            "error": "invalid_grant",
            "error_description": "refresh token revoked"
        }));
    });

    let err = client(&server)?.refresh("rt1").await.unwrap_err();

    refresh.assert();
    assert_that!(err).matches(|e| matches!(e, OAuthError::Rejected { error, .. } if error == "invalid_grant"));
    Ok(())
}
