//! End-to-end adapter behaviour: profile/team lookups through the GraphQL
//! client, including the single stale-token retry.

mod common;

use common::*;
use hris_gateway::errors::AppError;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{any, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn profile_payload() -> serde_json::Value {
    json!({ "data": { "getEmployeeDetails": { "Emp_Code": "E1", "Emp_Name": "A" } } })
}

/// Issuer that hands out `tok-1` first and `tok-2` afterwards.
async fn mount_rotating_issuer(server: &MockServer, total_calls: u64) {
    Mock::given(method("POST"))
        .and(path(ISSUE_PATH))
        .respond_with(token_body("tok-1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(ISSUE_PATH))
        .respond_with(token_body("tok-2"))
        .expect(total_calls - 1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_profile_success_returns_operation_field() {
    let server = MockServer::start().await;
    mount_issuer(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("authorization", "Bearer tok-1"))
        .and(header("contextempcode", "E1"))
        .and(body_partial_json(json!({ "variables": { "empCode": "E1" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let state = state_for(&server);
    let env = state.hris.execute_profile_query("E1", DOMAIN).await;

    assert!(env.status);
    assert_eq!(env.message, "Employee profile fetched successfully.");
    assert_eq!(env.data, Some(json!({ "Emp_Code": "E1", "Emp_Name": "A" })));
}

#[tokio::test]
async fn test_401_triggers_one_regeneration_and_retry_with_fresh_token() {
    let server = MockServer::start().await;
    mount_rotating_issuer(&server, 2).await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("authorization", "Bearer tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let state = state_for(&server);
    let data = assert_ok!(state.hris.fetch_profile("E1", DOMAIN).await);
    assert_eq!(data["Emp_Code"], "E1");
}

#[tokio::test]
async fn test_400_unauthenticated_body_is_treated_as_stale_token() {
    let server = MockServer::start().await;
    mount_rotating_issuer(&server, 2).await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{ "extensions": { "code": "UNAUTHENTICATED" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("authorization", "Bearer tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let state = state_for(&server);
    assert_ok!(state.hris.fetch_profile("E1", DOMAIN).await);
}

#[tokio::test]
async fn test_server_error_fails_without_regeneration() {
    let server = MockServer::start().await;
    mount_issuer(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let state = state_for(&server);
    let env = state.hris.execute_profile_query("E1", DOMAIN).await;

    assert!(!env.status);
    assert!(env.data.is_none());
    assert_eq!(
        env.message,
        "Error fetching employee profile: API call failed: 500 - boom"
    );
}

#[tokio::test]
async fn test_plain_400_is_not_retried() {
    let server = MockServer::start().await;
    mount_issuer(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad query"))
        .expect(1)
        .mount(&server)
        .await;

    let state = state_for(&server);
    let err = assert_err!(state.hris.fetch_profile("E1", DOMAIN).await);
    assert!(matches!(err, AppError::UpstreamUnavailable { status: 400, .. }));
}

#[tokio::test]
async fn test_second_rejection_fails_after_exactly_two_calls() {
    let server = MockServer::start().await;
    mount_issuer(&server, "tok", 2).await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("still expired"))
        .expect(2)
        .mount(&server)
        .await;

    let state = state_for(&server);
    let err = assert_err!(state.hris.fetch_profile("E1", DOMAIN).await);
    match err {
        AppError::RefreshRejected { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "still expired");
        }
        other => panic!("expected RefreshRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_null_operation_field_is_no_data() {
    let server = MockServer::start().await;
    mount_issuer(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "getEmployeeDetails": null } })),
        )
        .mount(&server)
        .await;

    let state = state_for(&server);
    let env = state.hris.execute_profile_query("E1", DOMAIN).await;

    assert!(!env.status);
    assert!(env.data.is_none());
    assert_eq!(
        env.message,
        "No employee data found for the provided employee code."
    );
}

#[tokio::test]
async fn test_empty_team_object_is_no_data() {
    let server = MockServer::start().await;
    mount_issuer(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "getTeamDetailsList": {} } })),
        )
        .mount(&server)
        .await;

    let state = state_for(&server);
    let env = state
        .hris
        .execute_team_query("M1", "2024-01-01", "2024-01-31", "", DOMAIN)
        .await;

    assert!(!env.status);
    assert_eq!(env.message, "No team data found for the provided criteria.");
}

#[tokio::test]
async fn test_team_query_sends_employee_input_with_default_status() {
    let server = MockServer::start().await;
    mount_issuer(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("contextempcode", "M1"))
        .and(body_partial_json(json!({
            "variables": {
                "employeeInput": {
                    "empCode": "M1",
                    "startDate": "2024-01-01",
                    "endDate": "2024-01-31",
                    "statusCode": "01"
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "getTeamDetailsList": [{ "Emp_Code": "E7" }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = state_for(&server);
    let env = state
        .hris
        .execute_team_query("M1", "2024-01-01", "2024-01-31", "  ", DOMAIN)
        .await;

    assert!(env.status);
    assert_eq!(env.data, Some(json!([{ "Emp_Code": "E7" }])));
}

#[tokio::test]
async fn test_malformed_success_body_is_failure() {
    let server = MockServer::start().await;
    mount_issuer(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let state = state_for(&server);
    let err = assert_err!(state.hris.fetch_profile("E1", DOMAIN).await);
    assert!(matches!(err, AppError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_token_failure_surfaces_in_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ISSUE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = state_for(&server);
    let env = state.hris.execute_profile_query("E1", DOMAIN).await;

    assert!(!env.status);
    assert_eq!(
        env.message,
        "Error fetching employee profile: token generation failed: 403 - denied"
    );
}

#[tokio::test]
async fn test_missing_arguments_make_no_network_calls() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = state_for(&server);

    let env = state.hris.execute_profile_query("   ", DOMAIN).await;
    assert!(!env.status);
    assert_eq!(env.message, "Employee code is required");

    let env = state.hris.execute_team_query("M1", "", "2024-01-31", "01", DOMAIN).await;
    assert!(!env.status);
    assert_eq!(
        env.message,
        "Employee code, start date, and end date are required"
    );

    let env = state.policy.execute_policy_search("", "C1").await;
    assert!(!env.status);
    assert_eq!(env.message, "Search query and company code are required");
}

#[tokio::test]
async fn test_policy_search_posts_query_and_passes_text_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(body_partial_json(json!({ "comp_code": "C1", "query": "leave policy" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("20 days annual leave"))
        .expect(1)
        .mount(&server)
        .await;

    let state = state_for(&server);
    let env = state.policy.execute_policy_search(" leave policy ", "C1").await;

    assert!(env.status);
    assert_eq!(env.message, "Policy search completed successfully.");
    assert_eq!(env.data, Some(json!("20 days annual leave")));
}

#[tokio::test]
async fn test_policy_search_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let state = state_for(&server);
    let env = state.policy.execute_policy_search("leave", "C1").await;

    assert!(!env.status);
    assert_eq!(env.message, "Error searching policies: API call failed: 503 - down");
}
