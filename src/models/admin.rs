//! Admin moderation requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::user::UserResponse;

/// Filters for the user list.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct PendingUsersQuery {
    /// pending, approved or rejected
    pub status: Option<String>,
    /// student, teacher or admin
    pub role: Option<String>,
}

/// Account counts across all users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusStats {
    pub total_pending: u64,
    pub total_approved: u64,
    pub total_rejected: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PendingUsersResponse {
    pub users: Vec<UserResponse>,
    pub stats: StatusStats,
}

/// Approve or reject an account, addressed by email or user id.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub email: Option<String>,
    #[serde(alias = "user_id")]
    pub user_id: Option<String>,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusResponse {
    pub success: bool,
    pub message: String,
    /// False when the account already had the requested status
    pub changed: bool,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeleteUserRequest {
    pub email: String,
}
