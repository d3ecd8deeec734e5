//! Shared helpers for client integration tests.
//!
//! Every test talks to a `wiremock::MockServer`; the client is pointed at its
//! URI with a fixed API key.

#[allow(unused_imports)]
pub use rdr_core::api::client::RedashClient;
#[allow(unused_imports)]
pub use serde_json::{Map, Value, json};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";

pub fn client_for(server: &MockServer) -> RedashClient {
    RedashClient::new(TEST_API_KEY.to_string(), Some(server.uri()))
        .expect("client creation failed")
}

#[allow(dead_code)]
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("Expected JSON object, got {}", other),
    }
}
