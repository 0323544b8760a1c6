use predicates::prelude::*;

use super::Home;

#[test]
fn it_prints_the_credential_path() {
    let home = Home::new();
    home.shopctl()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("credentials.enc"))
        .stdout(predicate::str::contains(home.path.as_str()));
}

#[test]
fn it_prints_json_when_asked() {
    let home = Home::new();
    let output = home
        .shopctl()
        .args(["config", "path", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["data"]["success"], serde_json::json!(true));
    assert!(json["data"]["path"].as_str().unwrap().ends_with("credentials.enc"));
}
