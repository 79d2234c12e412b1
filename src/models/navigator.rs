use serde::Serialize;
use surrealdb::RecordId;

use crate::models::profile::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    Dashboard,
    Analytics,
    UserManagement,
    Payroll,
    Organizations,
    Settings,
}

/// Allow-list of feature areas for one actor. Recomputed on every check,
/// never cached.
#[derive(Debug, Clone, Serialize)]
pub struct Capabilities {
    pub organization_required: bool,
    /// The "join or create an organization" gate: when set, no feature area
    /// is permitted.
    pub needs_organization: bool,
    pub features: Vec<Feature>,
}

/// Pure function of (role, membership). Super admins manage users but never
/// see payroll or organization areas; everyone else is the other way around
/// and is blocked entirely until they belong to an organization.
pub fn capabilities(role: Role, organization_id: Option<&RecordId>) -> Capabilities {
    if role == Role::SuperAdmin {
        return Capabilities {
            organization_required: false,
            needs_organization: false,
            features: vec![
                Feature::Dashboard,
                Feature::Analytics,
                Feature::UserManagement,
                Feature::Settings,
            ],
        };
    }

    if organization_id.is_none() {
        return Capabilities {
            organization_required: true,
            needs_organization: true,
            features: Vec::new(),
        };
    }

    Capabilities {
        organization_required: true,
        needs_organization: false,
        features: vec![
            Feature::Dashboard,
            Feature::Analytics,
            Feature::Payroll,
            Feature::Organizations,
            Feature::Settings,
        ],
    }
}
