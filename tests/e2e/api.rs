use httpmock::{Method, MockServer};
use lockbox::TokenRecord;
use serde_json::json;
use shopctl::utils::env::ShopctlEnvKey;

use super::Home;

#[test]
fn api_calls_carry_the_stored_token() {
    let home = Home::new();
    home.config()
        .lockbox()
        .save_tokens(&TokenRecord::issue_now("at1", "rt1", 3600))
        .unwrap();

    let server = MockServer::start();
    let products = server.mock(|when, then| {
        when.method(Method::GET)
            .path("/api/v1/products")
            .header("authorization", "Bearer at1");
        then.status(200).json_body(json!([{ "sku": "tee-01" }]));
    });

    let output = home
        .shopctl()
        .env(ShopctlEnvKey::ApiUrl.to_string(), server.base_url())
        .args(["api", "GET", "/api/v1/products", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    products.assert();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["data"]["status"], json!(200));
    assert_eq!(json["data"]["body"][0]["sku"], json!("tee-01"));
}

#[test]
fn api_posts_json_bodies() {
    let home = Home::new();
    let server = MockServer::start();
    let orders = server.mock(|when, then| {
        when.method(Method::POST)
            .path("/api/v1/orders")
            .header("authorization", "Bearer env-token")
            .header("content-type", "application/json")
            .json_body(json!({ "sku": "tee-01", "quantity": 2 }));
        then.status(201).json_body(json!({ "id": "o1" }));
    });

    home.shopctl()
        .env(ShopctlEnvKey::Token.to_string(), "env-token")
        .env(ShopctlEnvKey::ApiUrl.to_string(), server.base_url())
        .args([
            "api",
            "post",
            "/api/v1/orders",
            "--data",
            r#"{"sku":"tee-01","quantity":2}"#,
        ])
        .assert()
        .success();

    orders.assert();
}

#[test]
fn bad_json_is_rejected_before_sending() {
    let home = Home::new();
    home.shopctl()
        .env(ShopctlEnvKey::Token.to_string(), "env-token")
        .args(["api", "POST", "/api/v1/orders", "--data", "{nope"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("error[E010]"));
}
