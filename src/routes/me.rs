use axum::{Extension, Json, extract::State};

use crate::{
    errors::Result,
    middleware::ActorId,
    models::{
        navigator::{Capabilities, capabilities},
        profile::Profile,
    },
    state::AppState,
    utils::access::fetch_profile,
};

#[derive(Debug, Clone, serde::Serialize)]
pub struct MeResponse {
    pub profile: Profile,
    pub capabilities: Capabilities,
}

/// What the authenticated actor may see, recomputed from their profile on
/// every call.
pub async fn read_capabilities(
    State(state): State<AppState>,
    Extension(ActorId(actor_id)): Extension<ActorId>,
) -> Result<Json<MeResponse>> {
    let profile = fetch_profile(&state.sdb, &actor_id).await?;
    let capabilities = capabilities(profile.role, profile.organization_id.as_ref());

    Ok(Json(MeResponse {
        profile,
        capabilities,
    }))
}
