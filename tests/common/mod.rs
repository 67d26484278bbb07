#![allow(dead_code)]

use iamport::{AccessToken, ClientConfig, Iamport};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};

pub const API_KEY: &str = "test_key";
pub const API_SECRET: &str = "test_secret";
pub const TOKEN: &str = "a1b2c3d4e5";

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn client_for(server: &ServerGuard) -> Iamport {
    let config = ClientConfig::new(API_KEY, API_SECRET).with_host(server.url());
    Iamport::new(config).unwrap()
}

/// Client whose token is already cached and valid
pub async fn authorized_client(server: &ServerGuard) -> Iamport {
    let client = client_for(server);
    client
        .set_access_token(AccessToken::new(TOKEN, now() + 1800))
        .await;
    client
}

pub fn envelope(response: Value) -> String {
    json!({ "code": 0, "message": null, "response": response }).to_string()
}

pub fn failure(code: i64, message: &str) -> String {
    json!({ "code": code, "message": message, "response": null }).to_string()
}

pub async fn mock_token(server: &mut ServerGuard, expected_calls: usize) -> Mock {
    let issued_at = now();
    server
        .mock("POST", "/users/getToken")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({
            "imp_key": API_KEY,
            "imp_secret": API_SECRET,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!({
            "access_token": TOKEN,
            "now": issued_at,
            "expired_at": issued_at + 1800,
        })))
        .expect(expected_calls)
        .create_async()
        .await
}

pub fn payment(status: &str, amount: i64) -> Value {
    json!({
        "imp_uid": "imp_448280090638",
        "merchant_uid": "order_1",
        "status": status,
        "amount": amount,
        "fail_reason": if status == "paid" { Value::Null } else { json!("card limit exceeded") },
    })
}
