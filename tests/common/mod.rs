//! Shared fixtures: a wiremock HRIS upstream and state wired to it.
#![allow(dead_code)]

use hris_gateway::config::Config;
use hris_gateway::AppState;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DOMAIN: &str = "d.example.com";
pub const ISSUE_PATH: &str = "/auth/generatetokenforuser";
pub const GRAPHQL_PATH: &str = "/graphql";
pub const SEARCH_PATH: &str = "/genaisearch/rfpsearch/";

pub fn config_for(server: &MockServer) -> Config {
    Config {
        base_api_url: server.uri(),
        client_id: Some("test-client".into()),
        client_secret: Some("test-secret".into()),
        default_domain: DOMAIN.into(),
        policy_search_api: format!("{}{}", server.uri(), SEARCH_PATH),
        ..Config::default()
    }
}

pub fn state_for(server: &MockServer) -> AppState {
    AppState::new(config_for(server)).expect("state should build")
}

pub fn token_body(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": token }))
}

/// Issuance endpoint answering `token` every time, expecting `calls` hits.
pub async fn mount_issuer(server: &MockServer, token: &str, calls: u64) {
    Mock::given(method("POST"))
        .and(path(ISSUE_PATH))
        .respond_with(token_body(token))
        .expect(calls)
        .mount(server)
        .await;
}
