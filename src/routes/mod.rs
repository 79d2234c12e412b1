use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::{
    middleware::auth_jwt_middleware,
    routes::{
        auth::{sign_in, sign_up},
        invitations::{
            accept_invitation, decline_invitation, issue_invitation, list_invitations,
            read_invitation_by_code, reconcile_invitations, regenerate_invitation,
        },
        me::read_capabilities,
        organizations::{create_organization, read_organization, read_organization_members},
    },
    state::AppState,
};

pub mod auth;
pub mod invitations;
pub mod me;
pub mod organizations;

pub fn api_router(config: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth(config.clone()))
        .nest("/organizations", organizations(config.clone()))
        .nest("/invitations", invitations(config.clone()))
        .nest("/me", me(config.clone()))
        .with_state(config)
}

fn auth(config: AppState) -> Router<AppState> {
    Router::new()
        .route("/signin", post(sign_in))
        .route("/signup", post(sign_up))
        .with_state(config)
}

fn organizations(config: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_organization))
        .route("/{org_id}", get(read_organization))
        .route("/{org_id}/members", get(read_organization_members))
        .layer(from_fn_with_state(config.clone(), auth_jwt_middleware))
        .with_state(config)
}

fn invitations(config: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_invitations).post(issue_invitation))
        .route("/code/{code}", get(read_invitation_by_code))
        .route("/reconcile", get(reconcile_invitations))
        .route("/{invitation_id}/regenerate", post(regenerate_invitation))
        .route("/{invitation_id}/accept", post(accept_invitation))
        .route("/{invitation_id}/decline", post(decline_invitation))
        .layer(from_fn_with_state(config.clone(), auth_jwt_middleware))
        .with_state(config)
}

fn me(config: AppState) -> Router<AppState> {
    Router::new()
        .route("/capabilities", get(read_capabilities))
        .layer(from_fn_with_state(config.clone(), auth_jwt_middleware))
        .with_state(config)
}
