pub mod hr_const {
    pub const PROFILE_TABLE: &str = "profiles";
    pub const CREDENTIAL_TABLE: &str = "credentials";
    pub const ORGANIZATION_TABLE: &str = "organizations";
    pub const INVITATION_TABLE: &str = "invitations";

    pub const DEFAULT_INVITATION_EXPIRY_DAYS: i64 = 7;
}
