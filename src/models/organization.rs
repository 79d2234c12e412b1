use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Organization {
    pub id: RecordId,
    pub name: String,      // ! & (len = 255)
    pub join_code: String, // ! unique & (len = 8)
    pub created_by: RecordId,
    pub created_at: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateOrganization {
    pub name: String,
    pub join_code: String,
    pub created_by: RecordId,
    pub created_at: String,
}
