use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Ordered weakest to strongest; `max` never downgrades an actor on accept.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    OrganizationMember,
    Manager,
    Admin,
    SuperAdmin,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Profile {
    pub id: RecordId,
    pub email: String, // ! unique & (len = 255)
    pub name: String,  // ! & (len = 255)
    pub role: Role,
    #[serde(default)]
    pub organization_id: Option<RecordId>, // ! None means unaffiliated

    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateProfile {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub organization_id: Option<RecordId>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Credential {
    pub id: RecordId,
    pub profile_id: RecordId,
    pub password_hash: String, // ! & (len = 255)
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateCredential {
    pub profile_id: RecordId,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::SuperAdmin > Role::Admin);
        assert!(Role::Admin > Role::Manager);
        assert!(Role::Manager > Role::OrganizationMember);
        assert!(Role::OrganizationMember > Role::Employee);
    }

    #[test]
    fn test_max_never_downgrades() {
        assert_eq!(Role::Admin.max(Role::OrganizationMember), Role::Admin);
        assert_eq!(Role::Employee.max(Role::OrganizationMember), Role::OrganizationMember);
    }

    #[test]
    fn test_role_serializes_snake_case() {
        let val = serde_json::to_string(&Role::OrganizationMember).unwrap();
        assert_eq!(val, "\"organization_member\"");
    }
}
