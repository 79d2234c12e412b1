use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use surrealdb::{Surreal, engine::any::Any};
use tracing::info;

use crate::{
    consts::hr_const::{DEFAULT_INVITATION_EXPIRY_DAYS, INVITATION_TABLE, PROFILE_TABLE},
    errors::{Error, Result},
    middleware::ActorId,
    models::{
        invitation::{CreateInvitation, Invitation, InvitationStatus},
        organization::Organization,
        profile::{Profile, Role},
    },
    state::AppState,
    utils::{
        access::{fetch_profile, require_org_admin},
        code::unique_code,
        record_id::record_id_from_str,
        time::{time_after_days, time_now},
        validated_form::ValidatedJson,
    },
};

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
pub struct IssueInvitationRequest {
    pub organization_id: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    pub role: Role,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
    #[validate(range(min = 1, max = 365))]
    pub expiry_days: Option<i64>,
}

/// Admin creates an invite with role, email and an optional message. Delivery
/// itself belongs to the notification collaborator; here it is only queued.
pub async fn issue_invitation(
    State(state): State<AppState>,
    Extension(ActorId(actor_id)): Extension<ActorId>,
    ValidatedJson(input): ValidatedJson<IssueInvitationRequest>,
) -> Result<(StatusCode, Json<Invitation>)> {
    let actor = fetch_profile(&state.sdb, &actor_id).await?;
    let org_id = record_id_from_str(&input.organization_id)?;
    let _ = state
        .sdb
        .select::<Option<Organization>>(org_id.clone())
        .await?
        .ok_or(Error::NotFound)?;

    require_org_admin(&actor, &org_id)?;

    if input.role == Role::SuperAdmin {
        return Err(Error::Validation(
            "cannot invite a super admin into an organization".to_string(),
        ));
    }

    let already_member = !state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE email = $email AND organization_id = $organization_id;")
        .bind(("table", PROFILE_TABLE))
        .bind(("email", input.email.clone()))
        .bind(("organization_id", org_id.clone()))
        .await?
        .take::<Vec<Profile>>(0)?
        .is_empty();

    if already_member {
        return Err(Error::Validation(format!(
            "{} already belongs to this organization",
            input.email
        )));
    }

    let open_invites: Vec<Invitation> = state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE email = $email AND organization_id = $organization_id AND status = $status;")
        .bind(("table", INVITATION_TABLE))
        .bind(("email", input.email.clone()))
        .bind(("organization_id", org_id.clone()))
        .bind(("status", InvitationStatus::Pending))
        .await?
        .take(0)?;

    if open_invites.iter().any(|inv| !inv.is_expired()) {
        return Err(Error::Conflict(
            "a pending invitation already exists for this email",
        ));
    }

    let code = unique_code(&state.sdb, INVITATION_TABLE, "code").await?;
    let expiry_days = input.expiry_days.unwrap_or(DEFAULT_INVITATION_EXPIRY_DAYS);

    let invitation_data = CreateInvitation {
        organization_id: org_id,
        email: input.email.clone(),
        role: input.role,
        code,
        invited_by: actor.id,
        message: input.message,
        status: InvitationStatus::Pending,
        created_at: time_now(),
        expires_at: time_after_days(expiry_days),
        responded_at: None,
        accepted_by: None,
    };
    let invitation = state
        .sdb
        .create::<Option<Invitation>>(INVITATION_TABLE)
        .content(invitation_data)
        .await?
        .ok_or(Error::Internal)?;

    info!(email = %invitation.email, code = %invitation.code, "invitation queued for delivery");

    Ok((StatusCode::CREATED, Json(invitation)))
}

/// Same invitation id, fresh code and expiry. The overwritten code becomes
/// permanently unusable. A derived-expired invitation stays regenerable; the
/// new expiry restarts its clock.
pub async fn regenerate_invitation(
    State(state): State<AppState>,
    Extension(ActorId(actor_id)): Extension<ActorId>,
    Path(invitation_id): Path<String>,
) -> Result<Json<Invitation>> {
    let invitation_id = record_id_from_str(&invitation_id)?;
    let invitation: Invitation = state
        .sdb
        .select(invitation_id.clone())
        .await?
        .ok_or(Error::NotFound)?;
    let actor = fetch_profile(&state.sdb, &actor_id).await?;

    require_org_admin(&actor, &invitation.organization_id)?;

    if invitation.status != InvitationStatus::Pending {
        return Err(Error::InvalidState(
            "only a pending invitation can be regenerated",
        ));
    }

    let code = unique_code(&state.sdb, INVITATION_TABLE, "code").await?;
    let updated: Vec<Invitation> = state
        .sdb
        .query("UPDATE $invitation SET code = $code, expires_at = $expires_at WHERE status = $pending;")
        .bind(("invitation", invitation_id))
        .bind(("code", code))
        .bind(("expires_at", time_after_days(DEFAULT_INVITATION_EXPIRY_DAYS)))
        .bind(("pending", InvitationStatus::Pending))
        .await?
        .take(0)?;

    updated
        .into_iter()
        .next()
        .ok_or(Error::Conflict("invitation was resolved concurrently"))
        .map(Json)
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default, validator::Validate)]
pub struct AcceptInvitationRequest {
    /// Explicitly claiming the code stands in for an email match when the
    /// invitation was delivered to a different address.
    #[validate(length(min = 8, max = 8))]
    pub code: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct AcceptInvitationResponse {
    pub invitation: Invitation,
    pub profile: Profile,
}

pub async fn accept_invitation(
    State(state): State<AppState>,
    Extension(ActorId(actor_id)): Extension<ActorId>,
    Path(invitation_id): Path<String>,
    ValidatedJson(input): ValidatedJson<AcceptInvitationRequest>,
) -> Result<Json<AcceptInvitationResponse>> {
    let invitation_id = record_id_from_str(&invitation_id)?;
    let invitation: Invitation = state
        .sdb
        .select(invitation_id.clone())
        .await?
        .ok_or(Error::NotFound)?;
    let actor = fetch_profile(&state.sdb, &actor_id).await?;

    let claims_code = input.code.as_deref() == Some(invitation.code.as_str());
    if actor.email != invitation.email && !claims_code {
        return Err(Error::Unauthorized);
    }

    // A retry after the membership write failed mid-flight lands here: the
    // invitation is already ours, so only the membership step is re-run.
    if invitation.status == InvitationStatus::Accepted
        && invitation.accepted_by.as_ref() == Some(&actor.id)
        && actor.organization_id.is_none()
    {
        let profile = apply_membership(&state.sdb, &actor, &invitation).await?;
        return Ok(Json(AcceptInvitationResponse {
            invitation,
            profile,
        }));
    }

    invitation.ensure_actionable()?;

    if actor.role == Role::SuperAdmin {
        return Err(Error::Validation(
            "a super admin cannot join an organization".to_string(),
        ));
    }
    if actor.organization_id.is_some() {
        return Err(Error::InvalidState(
            "actor already belongs to an organization",
        ));
    }

    // Compare-and-set on status: of two concurrent responses only the first
    // transition wins, the loser sees an empty update result.
    let accepted: Vec<Invitation> = state
        .sdb
        .query("UPDATE $invitation SET status = $status, accepted_by = $accepted_by, responded_at = $responded_at WHERE status = $pending;")
        .bind(("invitation", invitation_id))
        .bind(("status", InvitationStatus::Accepted))
        .bind(("accepted_by", actor.id.clone()))
        .bind(("responded_at", time_now()))
        .bind(("pending", InvitationStatus::Pending))
        .await?
        .take(0)?;

    let Some(invitation) = accepted.into_iter().next() else {
        return Err(Error::Conflict("invitation was resolved concurrently"));
    };

    let profile = apply_membership(&state.sdb, &actor, &invitation).await?;

    info!(invitation = %invitation.id, profile = %profile.id, "invitation accepted");

    Ok(Json(AcceptInvitationResponse {
        invitation,
        profile,
    }))
}

/// Step two of the accept unit of work: bind the actor to the organization
/// and raise their role to the invited one if it is stronger.
async fn apply_membership(
    sdb: &Surreal<Any>,
    actor: &Profile,
    invitation: &Invitation,
) -> Result<Profile> {
    let role = actor.role.max(invitation.role);
    let updated: Vec<Profile> = sdb
        .query("UPDATE $profile SET organization_id = $organization_id, role = $role, updated_at = $updated_at;")
        .bind(("profile", actor.id.clone()))
        .bind(("organization_id", invitation.organization_id.clone()))
        .bind(("role", role))
        .bind(("updated_at", time_now()))
        .await?
        .take(0)?;

    updated.into_iter().next().ok_or(Error::Internal)
}

/// Email match is not required to decline: an actor may decline on behalf of
/// a mismatched delivery.
pub async fn decline_invitation(
    State(state): State<AppState>,
    Extension(ActorId(actor_id)): Extension<ActorId>,
    Path(invitation_id): Path<String>,
) -> Result<Json<Invitation>> {
    let invitation_id = record_id_from_str(&invitation_id)?;
    let invitation: Invitation = state
        .sdb
        .select(invitation_id.clone())
        .await?
        .ok_or(Error::NotFound)?;
    let _ = fetch_profile(&state.sdb, &actor_id).await?;

    invitation.ensure_actionable()?;

    let declined: Vec<Invitation> = state
        .sdb
        .query("UPDATE $invitation SET status = $status, responded_at = $responded_at WHERE status = $pending;")
        .bind(("invitation", invitation_id))
        .bind(("status", InvitationStatus::Declined))
        .bind(("responded_at", time_now()))
        .bind(("pending", InvitationStatus::Pending))
        .await?
        .take(0)?;

    declined
        .into_iter()
        .next()
        .ok_or(Error::Conflict("invitation was resolved concurrently"))
        .map(Json)
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ListInvitationsQuery {
    pub mine: Option<bool>,
    pub organization_id: Option<String>,
}

/// `?mine=true` lists live invitations addressed to the actor; an admin can
/// instead list the full audit trail of their organization. Reads never
/// mutate state, so polling is safe.
pub async fn list_invitations(
    State(state): State<AppState>,
    Extension(ActorId(actor_id)): Extension<ActorId>,
    Query(query): Query<ListInvitationsQuery>,
) -> Result<Json<Vec<Invitation>>> {
    let actor = fetch_profile(&state.sdb, &actor_id).await?;

    if let Some(organization_id) = query.organization_id {
        let org_id = record_id_from_str(&organization_id)?;
        require_org_admin(&actor, &org_id)?;
        let invitations: Vec<Invitation> = state
            .sdb
            .query("SELECT * FROM type::table($table) WHERE organization_id = $organization_id;")
            .bind(("table", INVITATION_TABLE))
            .bind(("organization_id", org_id))
            .await?
            .take(0)?;
        return Ok(Json(invitations));
    }

    if query.mine.unwrap_or(false) {
        let invitations: Vec<Invitation> = state
            .sdb
            .query("SELECT * FROM type::table($table) WHERE email = $email AND status = $status;")
            .bind(("table", INVITATION_TABLE))
            .bind(("email", actor.email.clone()))
            .bind(("status", InvitationStatus::Pending))
            .await?
            .take(0)?;
        let live = invitations
            .into_iter()
            .filter(|inv| !inv.is_expired())
            .collect();
        return Ok(Json(live));
    }

    Err(Error::Validation(
        "expected ?mine=true or ?organization_id=".to_string(),
    ))
}

pub async fn read_invitation_by_code(
    State(state): State<AppState>,
    Extension(ActorId(_)): Extension<ActorId>,
    Path(code): Path<String>,
) -> Result<Json<Invitation>> {
    let invitation = state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE code = $code;")
        .bind(("table", INVITATION_TABLE))
        .bind(("code", code))
        .await?
        .take::<Vec<Invitation>>(0)?
        .into_iter()
        .next()
        .ok_or(Error::NotFound)?;

    Ok(Json(invitation))
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ReconciliationEntry {
    pub invitation: Invitation,
    pub profile: Profile,
}

/// Accepted invitations whose acceptor never got their membership written:
/// the detectable leftover of a partial failure between the two accept steps.
pub async fn reconcile_invitations(
    State(state): State<AppState>,
    Extension(ActorId(actor_id)): Extension<ActorId>,
) -> Result<Json<Vec<ReconciliationEntry>>> {
    let actor = fetch_profile(&state.sdb, &actor_id).await?;
    if actor.role != Role::SuperAdmin {
        return Err(Error::Unauthorized);
    }

    let accepted: Vec<Invitation> = state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE status = $status;")
        .bind(("table", INVITATION_TABLE))
        .bind(("status", InvitationStatus::Accepted))
        .await?
        .take(0)?;

    let mut drifted = Vec::new();
    for invitation in accepted {
        let Some(accepted_by) = invitation.accepted_by.clone() else {
            continue;
        };
        let Some(profile) = state.sdb.select::<Option<Profile>>(accepted_by).await? else {
            continue;
        };
        if profile.organization_id.as_ref() != Some(&invitation.organization_id) {
            drifted.push(ReconciliationEntry {
                invitation,
                profile,
            });
        }
    }

    Ok(Json(drifted))
}
