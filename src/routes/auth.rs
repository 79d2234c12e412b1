use axum::{Json, extract::State, http::StatusCode};

use crate::{
    consts::hr_const::{CREDENTIAL_TABLE, PROFILE_TABLE},
    errors::{Error, Result},
    models::profile::{CreateCredential, CreateProfile, Credential, Profile, Role},
    state::AppState,
    utils::{
        jwt::{Claims, encode_jwt},
        pwd,
        time::time_now,
        validated_form::ValidatedJson,
        validator::validate_password,
    },
};

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
pub struct SignUpRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(custom(function = validate_password))]
    pub password: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SignUpResponse {
    msg: String,
}

/// New actors start unaffiliated: no organization, weakest role. Membership
/// arrives later through an invitation or by creating an organization.
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>)> {
    let existing: Vec<Profile> = state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE email = $email;")
        .bind(("table", PROFILE_TABLE))
        .bind(("email", input.email.clone()))
        .await?
        .take(0)?;

    if !existing.is_empty() {
        return Err(Error::EmailExist(input.email.clone()));
    }

    let password_hash = pwd::hash(input.password.as_bytes())?;
    let profile_data = CreateProfile {
        email: input.email.clone(),
        name: input.name,
        role: Role::Employee,
        organization_id: None,
        created_at: time_now(),
        updated_at: None,
    };
    let profile = state
        .sdb
        .create::<Option<Profile>>(PROFILE_TABLE)
        .content(profile_data)
        .await?
        .ok_or(Error::Internal)?;

    let credential_data = CreateCredential {
        profile_id: profile.id,
        password_hash,
    };
    let _ = state
        .sdb
        .create::<Option<Credential>>(CREDENTIAL_TABLE)
        .content(credential_data)
        .await?
        .ok_or(Error::Internal)?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            msg: format!("profile created for {}", input.email),
        }),
    ))
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, validator::Validate)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub profile: Profile,
}

pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SignInRequest>,
) -> Result<Json<SignInResponse>> {
    let profile = state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE email = $email;")
        .bind(("table", PROFILE_TABLE))
        .bind(("email", input.email.clone()))
        .await?
        .take::<Vec<Profile>>(0)?
        .into_iter()
        .next()
        .ok_or(Error::InvalidLoginDetails)?;

    let credential = state
        .sdb
        .query("SELECT * FROM type::table($table) WHERE profile_id = $profile_id;")
        .bind(("table", CREDENTIAL_TABLE))
        .bind(("profile_id", profile.id.clone()))
        .await?
        .take::<Vec<Credential>>(0)?
        .into_iter()
        .next()
        .ok_or(Error::InvalidLoginDetails)?;

    if !pwd::validate(input.password.as_bytes(), &credential.password_hash)? {
        return Err(Error::InvalidLoginDetails);
    }

    let claims = Claims::new(profile.id.to_string(), state.config.jwt_ttl_minutes);
    let token = encode_jwt(&claims, &state.config.jwt_secret)?;

    Ok(Json(SignInResponse { token, profile }))
}
