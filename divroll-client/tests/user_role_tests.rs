mod common;

use common::{APP_ID, auth, client_for, client_with, master_client_for};
use divroll_client::{Brand, ClientError, QueryParams, Session};
use divroll_model::{Acl, PropertyMap, PropertyValue, Role, User};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Users ───────────────────────────────────────────────────────

#[tokio::test]
async fn create_user_sends_credentials_roles_and_acl() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/divroll/entities/users"))
        .and(header("X-Divroll-ACL-Write", r#"[{"entityId":"admin"}]"#))
        .and(body_partial_json(json!({"user": {
            "username": "ann",
            "password": "s3cret",
            "roles": [{"entityId": "r1"}],
            "aclWrite": [{"entityId": "admin"}]
        }})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"user": {
            "entityId": "u1",
            "username": "ann",
            "roles": {"entityId": "r1"}
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let mut user = User::new("ann", "s3cret");
    user.add_role("r1");
    user.acl = Some(Acl::new().with_public_read(true).grant_write("admin"));
    master_client_for(&server).create_user(&mut user).await.unwrap();

    assert_eq!(user.entity_id.as_deref(), Some("u1"));
    assert_eq!(user.roles, vec!["r1".to_string()]);
    assert_eq!(user.acl.as_ref().and_then(|a| a.public_read), Some(true));
}

#[tokio::test]
async fn custom_user_property_round_trips() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/divroll/entities/users"))
        .and(body_partial_json(json!({"user": {
            "username": "ann",
            "profile": {"city": "Lisbon", "visits": 3}
        }})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"user": {"entityId": "u1"}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/divroll/entities/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {
            "entityId": "u1",
            "username": "ann",
            "profile": {"city": "Lisbon", "visits": 3}
        }})))
        .mount(&server)
        .await;

    let client = master_client_for(&server);
    let mut profile = PropertyMap::new();
    profile.insert("city".into(), "Lisbon".into());
    profile.insert("visits".into(), 3.into());
    let mut user = User::new("ann", "pw");
    user.set_property("profile", profile).unwrap();
    client.create_user(&mut user).await.unwrap();

    let mut fresh = User::with_id(user.entity_id.clone().unwrap());
    client.retrieve_user(&mut fresh).await.unwrap();
    let profile = fresh.get_property("profile").unwrap();
    assert_eq!(profile.get("city").and_then(PropertyValue::as_str), Some("Lisbon"));
    assert_eq!(profile.get("visits").and_then(PropertyValue::as_i64), Some(3));
    assert_eq!(fresh.properties.len(), 1);
}

#[tokio::test]
async fn retrieve_user_keeps_local_password() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/divroll/entities/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {
            "entityId": "u1",
            "username": "ann",
            "dateCreated": "2024-05-01T10:00:00Z"
        }})))
        .mount(&server)
        .await;

    let mut user = User::with_id("u1");
    user.password = Some("s3cret".into());
    client_for(&server).retrieve_user(&mut user).await.unwrap();

    assert_eq!(user.username.as_deref(), Some("ann"));
    assert_eq!(user.password.as_deref(), Some("s3cret"));
    assert!(user.date_created.is_some());
}

#[tokio::test]
async fn update_and_delete_user() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/divroll/entities/users/u1"))
        .and(body_partial_json(json!({"user": {"username": "ann2"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {
            "entityId": "u1",
            "username": "ann2"
        }})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/divroll/entities/users/u1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = master_client_for(&server);
    let mut user = User::with_id("u1");
    user.username = Some("ann2".into());
    client.update_user(&mut user).await.unwrap();
    client.delete_user(&mut user).await.unwrap();
    assert_eq!(user.entity_id, None);
}

#[tokio::test]
async fn login_with_roll_brand_reads_web_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roll/entities/users/login"))
        .and(header("X-Roll-App-Id", APP_ID))
        .and(query_param("username", "ann"))
        .and(query_param("password", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {
            "entityId": "u1",
            "username": "ann",
            "webToken": "tok-1"
        }})))
        .mount(&server)
        .await;

    let client = client_with(&server, Brand::roll(), auth());
    let user = client.login("ann", "s3cret").await.unwrap();
    assert_eq!(user.auth_token.as_deref(), Some("tok-1"));
    assert!(client.auth().auth_token.is_none());
}

#[tokio::test]
async fn login_without_token_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/divroll/entities/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {"entityId": "u1"}})))
        .mount(&server)
        .await;

    let err = client_for(&server).login("ann", "pw").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn login_with_bad_credentials_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/divroll/entities/users/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server).login("ann", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
}

#[tokio::test]
async fn session_token_is_sent_by_derived_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/divroll/entities/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {
            "entityId": "u1",
            "authToken": "tok-9"
        }})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/divroll/entities/users/u1"))
        .and(header("X-Divroll-Auth-Token", "tok-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {"entityId": "u1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let session = Session::new();
    session.set(client.login("ann", "pw").await.unwrap()).await;
    assert!(session.is_logged_in().await);

    let user_client = client.with_auth(session.auth_context(client.auth()).await);
    let mut me = User::with_id("u1");
    user_client.retrieve_user(&mut me).await.unwrap();

    session.clear().await;
    assert_eq!(session.auth_context(client.auth()).await.auth_token, None);
}

#[tokio::test]
async fn query_users_decodes_brand_token_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/divroll/entities/users"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": {
            "results": [
                {"entityId": "u1", "username": "ann"},
                {"entityId": "u2", "username": "bob"}
            ],
            "count": 2
        }})))
        .mount(&server)
        .await;

    let users = master_client_for(&server)
        .query_users(&QueryParams::new().limit(5))
        .await
        .unwrap();
    let names: Vec<_> = users.iter().filter_map(|u| u.username.as_deref()).collect();
    assert_eq!(names, vec!["ann", "bob"]);
    assert_eq!(users.count, Some(2));
}

// ── Roles ───────────────────────────────────────────────────────

#[tokio::test]
async fn role_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/divroll/entities/roles"))
        .and(body_partial_json(json!({"role": {"name": "editors", "aclRead": [], "aclWrite": []}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"role": {
            "entityId": "r1",
            "name": "editors"
        }})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/divroll/entities/roles/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"role": {
            "entityId": "r1",
            "name": "editors",
            "publicRead": true
        }})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/divroll/entities/roles/r1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = master_client_for(&server);
    let mut role = Role::new("editors");
    client.create_role(&mut role).await.unwrap();
    assert_eq!(role.entity_id.as_deref(), Some("r1"));
    assert_eq!(role.acl, Some(Acl::master_key_only()));

    client.retrieve_role(&mut role).await.unwrap();
    assert_eq!(role.acl.as_ref().and_then(|a| a.public_read), Some(true));
    assert_eq!(role.acl.as_ref().and_then(|a| a.acl_read.clone()), None);

    client.delete_role(&mut role).await.unwrap();
    assert_eq!(role.entity_id, None);
}

#[tokio::test]
async fn query_roles_single_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/divroll/entities/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"roles": {
            "results": {"entityId": "r1", "name": "editors"}
        }})))
        .mount(&server)
        .await;

    let roles = client_for(&server)
        .query_roles(&QueryParams::new())
        .await
        .unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles.items[0].name.as_deref(), Some("editors"));
}
