use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::{
    consts::hr_const::{ORGANIZATION_TABLE, PROFILE_TABLE},
    errors::{Error, Result},
    middleware::ActorId,
    models::{
        organization::{CreateOrganization, Organization},
        profile::{Profile, Role},
    },
    state::AppState,
    utils::{
        access::{fetch_profile, require_org_member},
        code::unique_code,
        record_id::record_id_from_str,
        time::time_now,
        validated_form::ValidatedJson,
    },
};

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
pub struct CreateOrganizationRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: String,
}

/// Self-service creation: the unaffiliated creator becomes the
/// organization's first admin in the same unit of work.
pub async fn create_organization(
    State(state): State<AppState>,
    Extension(ActorId(actor_id)): Extension<ActorId>,
    ValidatedJson(input): ValidatedJson<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<Organization>)> {
    let actor = fetch_profile(&state.sdb, &actor_id).await?;

    if actor.role == Role::SuperAdmin {
        return Err(Error::Validation(
            "a super admin cannot own an organization".to_string(),
        ));
    }
    if actor.organization_id.is_some() {
        return Err(Error::InvalidState(
            "actor already belongs to an organization",
        ));
    }

    let join_code = unique_code(&state.sdb, ORGANIZATION_TABLE, "join_code").await?;
    let organization_data = CreateOrganization {
        name: input.name,
        join_code,
        created_by: actor.id.clone(),
        created_at: time_now(),
    };
    let organization = state
        .sdb
        .create::<Option<Organization>>(ORGANIZATION_TABLE)
        .content(organization_data)
        .await?
        .ok_or(Error::Internal)?;

    let _: Vec<Profile> = state
        .sdb
        .query("UPDATE $profile SET organization_id = $organization_id, role = $role, updated_at = $updated_at;")
        .bind(("profile", actor.id))
        .bind(("organization_id", organization.id.clone()))
        .bind(("role", actor.role.max(Role::Admin)))
        .bind(("updated_at", time_now()))
        .await?
        .take(0)?;

    info!(organization = %organization.id, "organization created");

    Ok((StatusCode::CREATED, Json(organization)))
}

pub async fn read_organization(
    State(state): State<AppState>,
    Extension(ActorId(actor_id)): Extension<ActorId>,
    Path(org_id): Path<String>,
) -> Result<Json<Organization>> {
    let actor = fetch_profile(&state.sdb, &actor_id).await?;
    let org_id = record_id_from_str(&org_id)?;

    require_org_member(&actor, &org_id)?;

    state
        .sdb
        .select::<Option<Organization>>(org_id)
        .await?
        .ok_or(Error::NotFound)
        .map(Json)
}

pub async fn read_organization_members(
    State(state): State<AppState>,
    Extension(ActorId(actor_id)): Extension<ActorId>,
    Path(org_id): Path<String>,
) -> Result<Json<Vec<Profile>>> {
    let actor = fetch_profile(&state.sdb, &actor_id).await?;
    let org_id = record_id_from_str(&org_id)?;

    require_org_member(&actor, &org_id)?;

    let members: Vec<Profile> = state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE organization_id = $organization_id;")
        .bind(("table", PROFILE_TABLE))
        .bind(("organization_id", org_id))
        .await?
        .take(0)?;

    Ok(Json(members))
}
