#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use chronos_hr::{
    app,
    config::Config,
    consts::hr_const::{INVITATION_TABLE, ORGANIZATION_TABLE, PROFILE_TABLE},
    models::{
        invitation::Invitation,
        organization::Organization,
        profile::{Profile, Role},
    },
    state::AppState,
    utils::time::time_before_days,
};

pub const PASSWORD: &str = "Sup3rsecret";

pub async fn test_app() -> (AppState, Router) {
    let state = AppState::init(Config::in_memory())
        .await
        .expect("in-memory state");
    let router = app(state.clone());
    (state, router)
}

pub async fn request(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()));
    (status, value)
}

pub async fn sign_up_and_in(router: &Router, email: &str, name: &str) -> String {
    let (status, body) = request(
        router,
        Method::POST,
        "/auth/signup",
        None,
        Some(json!({ "email": email, "name": name, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = request(
        router,
        Method::POST,
        "/auth/signin",
        None,
        Some(json!({ "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["token"].as_str().expect("token").to_string()
}

/// Signs up `email`, creates an organization and returns the admin's token
/// plus the organization id as a `table:key` string.
pub async fn admin_with_org(
    state: &AppState,
    router: &Router,
    email: &str,
    org_name: &str,
) -> (String, String) {
    let token = sign_up_and_in(router, email, "Admin").await;
    let (status, body) = request(
        router,
        Method::POST,
        "/organizations",
        Some(&token),
        Some(json!({ "name": org_name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let org = organization_by_name(state, org_name).await;
    (token, org.id.to_string())
}

pub async fn issue_invitation(
    router: &Router,
    token: &str,
    org_id: &str,
    email: &str,
    role: &str,
) -> Value {
    let (status, body) = request(
        router,
        Method::POST,
        "/invitations",
        Some(token),
        Some(json!({ "organization_id": org_id, "email": email, "role": role })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

pub async fn profile_by_email(state: &AppState, email: &str) -> Profile {
    state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE email = $email;")
        .bind(("table", PROFILE_TABLE))
        .bind(("email", email.to_string()))
        .await
        .expect("query")
        .take::<Vec<Profile>>(0)
        .expect("take")
        .into_iter()
        .next()
        .expect("profile")
}

pub async fn organization_by_name(state: &AppState, name: &str) -> Organization {
    state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE name = $name;")
        .bind(("table", ORGANIZATION_TABLE))
        .bind(("name", name.to_string()))
        .await
        .expect("query")
        .take::<Vec<Organization>>(0)
        .expect("take")
        .into_iter()
        .next()
        .expect("organization")
}

pub async fn invitation_by_code(state: &AppState, code: &str) -> Invitation {
    state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE code = $code;")
        .bind(("table", INVITATION_TABLE))
        .bind(("code", code.to_string()))
        .await
        .expect("query")
        .take::<Vec<Invitation>>(0)
        .expect("take")
        .into_iter()
        .next()
        .expect("invitation")
}

pub async fn make_super_admin(state: &AppState, email: &str) {
    let _: Vec<Profile> = state
        .sdb
        .query("UPDATE type::table($table) SET role = $role, organization_id = NONE WHERE email = $email;")
        .bind(("table", PROFILE_TABLE))
        .bind(("role", Role::SuperAdmin))
        .bind(("email", email.to_string()))
        .await
        .expect("query")
        .take(0)
        .expect("take");
}

/// Rewrites an invitation's expiry into the past, standing in for an
/// advanced clock.
pub async fn force_expiry(state: &AppState, code: &str) {
    let _: Vec<Invitation> = state
        .sdb
        .query("UPDATE type::table($table) SET expires_at = $expires_at WHERE code = $code;")
        .bind(("table", INVITATION_TABLE))
        .bind(("expires_at", time_before_days(1)))
        .bind(("code", code.to_string()))
        .await
        .expect("query")
        .take(0)
        .expect("take");
}
