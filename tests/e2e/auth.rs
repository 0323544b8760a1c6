use chrono::{TimeDelta, Utc};
use httpmock::{Method, MockServer};
use lockbox::{TokenRecord, UserProfile};
use predicates::prelude::*;
use serde_json::json;
use shopctl::utils::env::ShopctlEnvKey;
use shopctl_oauth::config::{REVOKE_PATH, TOKEN_PATH};

use super::Home;

#[test]
fn status_without_a_session() {
    let home = Home::new();
    home.shopctl()
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not logged in"));
}

#[test]
fn token_prints_the_override_verbatim() {
    let home = Home::new();
    home.shopctl()
        .env(ShopctlEnvKey::Token.to_string(), "env-token")
        .args(["auth", "token"])
        .assert()
        .success()
        .stdout("env-token\n");
}

#[test]
fn token_without_a_session_exits_with_the_not_logged_in_status() {
    let home = Home::new();
    home.shopctl()
        .args(["auth", "token"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("error[E001]"))
        .stderr(predicate::str::contains("shopctl auth login"));
}

#[test]
fn a_rejected_refresh_clears_the_session() {
    let home = Home::new();
    let lockbox = home.config().lockbox();
    lockbox
        .save_tokens(&TokenRecord::issue(
            "at-old",
            "rt-old",
            60,
            Utc::now() - TimeDelta::hours(1),
        ))
        .unwrap();
    lockbox
        .save_user(&UserProfile {
            id: "u1".to_string(),
            email: "owner@shop.test".to_string(),
            name: String::new(),
            role: String::new(),
        })
        .unwrap();

    let server = MockServer::start();
    let refresh = server.mock(|when, then| {
        when.method(Method::POST).path(TOKEN_PATH);
        then.status(400).json_body(json!({ "error": "invalid_grant" }));
    });

    home.shopctl()
        .env(ShopctlEnvKey::AuthUrl.to_string(), server.base_url())
        .args(["auth", "token"])
        .assert()
        .code(3);

    refresh.assert();
    assert!(lockbox.load_tokens().unwrap().is_none());
    assert!(lockbox.load_user().unwrap().is_none());
}

#[test]
fn logout_revokes_and_clears() {
    let home = Home::new();
    let lockbox = home.config().lockbox();
    lockbox
        .save_tokens(&TokenRecord::issue_now("at1", "rt1", 3600))
        .unwrap();

    let server = MockServer::start();
    let revoke = server.mock(|when, then| {
        when.method(Method::POST)
            .path(REVOKE_PATH)
            .header("content-type", "application/x-www-form-urlencoded");
        then.status(200).json_body(json!({}));
    });

    home.shopctl()
        .env(ShopctlEnvKey::AuthUrl.to_string(), server.base_url())
        .args(["auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    revoke.assert();
    assert!(!home.config().credentials_path().exists());
}

#[test]
fn logout_still_clears_when_the_auth_service_is_down() {
    let home = Home::new();
    let lockbox = home.config().lockbox();
    lockbox
        .save_tokens(&TokenRecord::issue_now("at1", "rt1", 3600))
        .unwrap();

    home.shopctl()
        .args(["auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out locally"));

    assert!(!home.config().credentials_path().exists());
}
