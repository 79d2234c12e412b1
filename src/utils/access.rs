use surrealdb::{RecordId, Surreal, engine::any::Any};

use crate::{
    errors::{Error, Result},
    models::profile::{Profile, Role},
    utils::record_id::record_id_from_str,
};

/// Resolves the authenticated actor's profile from the id carried in the
/// bearer token.
pub async fn fetch_profile(sdb: &Surreal<Any>, actor_id: &str) -> Result<Profile> {
    let id = record_id_from_str(actor_id)?;
    sdb.select(id).await?.ok_or(Error::NotFound)
}

/// Admin rights over an organization: a super admin everywhere, an admin only
/// inside their own organization.
pub fn require_org_admin(actor: &Profile, organization_id: &RecordId) -> Result<()> {
    if actor.role == Role::SuperAdmin {
        return Ok(());
    }
    if actor.role == Role::Admin && actor.organization_id.as_ref() == Some(organization_id) {
        return Ok(());
    }
    Err(Error::Unauthorized)
}

pub fn require_org_member(actor: &Profile, organization_id: &RecordId) -> Result<()> {
    if actor.role == Role::SuperAdmin {
        return Ok(());
    }
    if actor.organization_id.as_ref() == Some(organization_id) {
        return Ok(());
    }
    Err(Error::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::time_now;

    fn profile(role: Role, organization_id: Option<RecordId>) -> Profile {
        Profile {
            id: RecordId::from_table_key("profiles", "p1"),
            email: "p1@example.com".to_string(),
            name: "P One".to_string(),
            role,
            organization_id,
            created_at: time_now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_super_admin_is_exempt_from_membership() {
        let org = RecordId::from_table_key("organizations", "acme");
        let actor = profile(Role::SuperAdmin, None);
        assert!(require_org_admin(&actor, &org).is_ok());
        assert!(require_org_member(&actor, &org).is_ok());
    }

    #[test]
    fn test_admin_only_in_own_organization() {
        let org = RecordId::from_table_key("organizations", "acme");
        let other = RecordId::from_table_key("organizations", "globex");
        let actor = profile(Role::Admin, Some(org.clone()));
        assert!(require_org_admin(&actor, &org).is_ok());
        assert!(require_org_admin(&actor, &other).is_err());
    }

    #[test]
    fn test_member_cannot_administer() {
        let org = RecordId::from_table_key("organizations", "acme");
        let actor = profile(Role::OrganizationMember, Some(org.clone()));
        assert!(require_org_member(&actor, &org).is_ok());
        assert!(require_org_admin(&actor, &org).is_err());
    }
}
