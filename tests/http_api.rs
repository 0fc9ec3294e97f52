//! Integration tests for the HTTP user API against a mock server.

use httpmock::Method;
use httpmock::prelude::*;
use serde_json::json;

use userdesk::api::{ApiError, HttpUserApi, ListParams, UserApi};
use userdesk::config::ApiConfig;
use userdesk::models::UserPatch;

fn client(server: &MockServer) -> HttpUserApi {
    HttpUserApi::new(&ApiConfig {
        base_url: server.base_url(),
        token: Some("tok-admin".to_string()),
        timeout_secs: Some(5),
    })
    .unwrap()
}

#[tokio::test]
async fn list_users_unwraps_envelope_and_forwards_params() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::GET)
            .path("/api/users")
            .query_param("role", "admin")
            .query_param("page", "2")
            .header("authorization", "Bearer tok-admin")
            .header_exists("x-request-id");
        then.status(200).json_body(json!({
            "users": [
                { "_id": "u1", "fullName": "John Doe", "isBlocked": false },
                { "_id": "u2", "fullName": "Alice Smith", "isBlocked": true }
            ]
        }));
    });

    let mut params = ListParams::new();
    params.insert("role".to_string(), "admin".to_string());
    params.insert("page".to_string(), "2".to_string());
    let users = client(&server).list_users(&params).await.unwrap();

    mock.assert();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].full_name.as_deref(), Some("John Doe"));
    assert!(users[1].is_blocked);
}

#[tokio::test]
async fn list_users_without_params_has_no_query() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::GET).path("/api/users");
        then.status(200).json_body(json!({ "users": [] }));
    });

    let users = client(&server).list_users(&ListParams::new()).await.unwrap();
    mock.assert();
    assert!(users.is_empty());
}

#[tokio::test]
async fn get_user_unwraps_envelope() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::GET).path("/api/users/u1");
        then.status(200).json_body(json!({
            "user": { "_id": "u1", "fullName": "John Doe", "city": "Pune", "pincode": "411001" }
        }));
    });

    let user = client(&server).get_user("u1").await.unwrap();
    mock.assert();
    assert_eq!(user.city.as_deref(), Some("Pune"));
    assert_eq!(user.postal_code.as_deref(), Some("411001"));
}

#[tokio::test]
async fn get_unknown_user_is_not_found() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(Method::GET).path("/api/users/ghost");
        then.status(404).json_body(json!({ "message": "User not found" }));
    });

    let err = client(&server).get_user("ghost").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::NotFound { id: "ghost".to_string(), message: Some("User not found".to_string()) }
    );
}

#[tokio::test]
async fn update_user_sends_partial_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::PATCH)
            .path("/api/users/u1")
            .json_body(json!({ "email": "jd@corp.example" }));
        then.status(200)
            .json_body(json!({ "_id": "u1", "fullName": "John Doe", "email": "jd@corp.example" }));
    });

    let patch = UserPatch { email: Some("jd@corp.example".to_string()), ..Default::default() };
    let user = client(&server).update_user("u1", &patch).await.unwrap();
    mock.assert();
    assert_eq!(user.email.as_deref(), Some("jd@corp.example"));
}

#[tokio::test]
async fn update_validation_error_carries_server_message() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(Method::PATCH).path("/api/users/u1");
        then.status(400).json_body(json!({ "message": "Invalid email address" }));
    });

    let patch = UserPatch { email: Some("nope".to_string()), ..Default::default() };
    let err = client(&server).update_user("u1", &patch).await.unwrap_err();
    assert_eq!(err, ApiError::Validation("Invalid email address".to_string()));
    assert_eq!(err.user_message(), "Invalid email address");
}

#[tokio::test]
async fn set_blocked_hits_block_subresource() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::PATCH)
            .path("/api/users/u1/block")
            .json_body(json!({ "isBlocked": true }));
        then.status(200).json_body(json!({ "success": true }));
    });

    client(&server).set_blocked("u1", true).await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn delete_user_ignores_acknowledgement_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::DELETE).path("/api/users/u2");
        then.status(204);
    });

    client(&server).delete_user("u2").await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn server_error_maps_to_http_error() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(Method::DELETE).path("/api/users/u2");
        then.status(503).body("upstream unavailable");
    });

    let err = client(&server).delete_user("u2").await.unwrap_err();
    assert_eq!(err, ApiError::Http { status: 503, message: None });
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(Method::GET).path("/api/users");
        then.status(200).body("not json");
    });

    let err = client(&server).list_users(&ListParams::new()).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got: {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let api = HttpUserApi::new(&ApiConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        token: None,
        timeout_secs: Some(2),
    })
    .unwrap();

    let err = api.get_user("u1").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got: {err:?}");
}
