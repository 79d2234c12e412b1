use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::{Error, Result as RResult};
use crate::state::AppState;
use crate::utils::jwt::decode_jwt;

/// Record id of the authenticated actor, inserted as a request extension.
#[derive(Debug, Clone)]
pub struct ActorId(pub String);

pub async fn auth_jwt_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<impl IntoResponse, Response> {
    let actor = check_auth_headers(request.headers(), &state)
        .map_err(IntoResponse::into_response)?;

    request.extensions_mut().insert(actor);

    Ok(next.run(request).await)
}

fn check_auth_headers(headers: &HeaderMap, state: &AppState) -> RResult<ActorId> {
    let header_value = headers
        .get(AUTHORIZATION)
        .ok_or(Error::MissingToken)?
        .to_str()
        .map_err(|_| Error::InvalidToken)?;

    let mut parts = header_value.trim().splitn(2, ' ');

    let scheme = parts.next().ok_or(Error::MissingToken)?;
    let token = parts.next().ok_or(Error::MissingToken)?;

    if scheme != "Bearer" {
        tracing::warn!("Invalid auth scheme: {scheme}");
        return Err(Error::InvalidScheme);
    }

    decode_jwt(token, &state.config.jwt_secret).map(|data| ActorId(data.claims.id))
}
