use chrono::Utc;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::{
    errors::{Error, Result},
    models::profile::Role,
    utils::time::parse_rfc3339,
};

/// Stored status. `Expired` is never stored: it is derived from a `Pending`
/// row whose `expires_at` has passed, so no background sweeper is needed.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Invitation {
    pub id: RecordId,
    pub organization_id: RecordId,
    pub email: String, // ! & (len = 255)
    pub role: Role,
    pub code: String, // ! unique & (len = 8)
    pub invited_by: RecordId,
    #[serde(default)]
    pub message: Option<String>,

    pub status: InvitationStatus,
    pub created_at: String,
    pub expires_at: String,
    #[serde(default)]
    pub responded_at: Option<String>,
    #[serde(default)]
    pub accepted_by: Option<RecordId>,
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateInvitation {
    pub organization_id: RecordId,
    pub email: String,
    pub role: Role,
    pub code: String,
    pub invited_by: RecordId,
    pub message: Option<String>,
    pub status: InvitationStatus,
    pub created_at: String,
    pub expires_at: String,
    pub responded_at: Option<String>,
    pub accepted_by: Option<RecordId>,
}

impl Invitation {
    /// An unparseable expiry is treated as already expired.
    pub fn is_expired(&self) -> bool {
        match parse_rfc3339(&self.expires_at) {
            Some(expires_at) => Utc::now() > expires_at,
            None => true,
        }
    }

    /// Guard shared by accept and decline: exactly one outcome transition may
    /// ever be applied, and only before expiry.
    pub fn ensure_actionable(&self) -> Result<()> {
        if self.status != InvitationStatus::Pending {
            return Err(Error::InvalidState("invitation already resolved"));
        }
        if self.is_expired() {
            return Err(Error::InvalidState("invitation expired"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::{time_after_days, time_before_days, time_now};

    fn invitation(status: InvitationStatus, expires_at: String) -> Invitation {
        Invitation {
            id: RecordId::from_table_key("invitations", "i1"),
            organization_id: RecordId::from_table_key("organizations", "acme"),
            email: "alice@example.com".to_string(),
            role: Role::OrganizationMember,
            code: "a1b2c3d4".to_string(),
            invited_by: RecordId::from_table_key("profiles", "boss"),
            message: None,
            status,
            created_at: time_now(),
            expires_at,
            responded_at: None,
            accepted_by: None,
        }
    }

    #[test]
    fn test_live_pending_is_actionable() {
        let inv = invitation(InvitationStatus::Pending, time_after_days(7));
        assert!(!inv.is_expired());
        assert!(inv.ensure_actionable().is_ok());
    }

    #[test]
    fn test_expired_pending_is_not_actionable() {
        let inv = invitation(InvitationStatus::Pending, time_before_days(1));
        assert!(inv.is_expired());
        assert!(matches!(
            inv.ensure_actionable().unwrap_err(),
            Error::InvalidState("invitation expired")
        ));
    }

    #[test]
    fn test_resolved_is_not_actionable() {
        for status in [InvitationStatus::Accepted, InvitationStatus::Declined] {
            let inv = invitation(status, time_after_days(7));
            assert!(matches!(
                inv.ensure_actionable().unwrap_err(),
                Error::InvalidState("invitation already resolved")
            ));
        }
    }

    #[test]
    fn test_malformed_expiry_counts_as_expired() {
        let inv = invitation(InvitationStatus::Pending, "not-a-timestamp".to_string());
        assert!(inv.is_expired());
    }
}
