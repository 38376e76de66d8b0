use serde::{Deserialize, Serialize};

use super::UpdateSummary;

pub const USERS_COLLECTION: &str = "users";
pub const ADMIN_ROLE: &str = "admin";

/// The fields of a stored user the server actually reads. Profile fields are kept as-is in the store.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpsertUserResponse {
    pub result: UpdateSummary,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdminStatus {
    pub admin: bool,
}
