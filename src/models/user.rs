//! User accounts, roles and the account-status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Account role. Admins are never self-created through signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" => Some(Self::Student),
            "teacher" => Some(Self::Teacher),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Dashboard an approved user of this role lands on.
    pub fn dashboard(&self) -> Dashboard {
        match self {
            Self::Student => Dashboard::Student,
            Self::Teacher => Dashboard::Teacher,
            Self::Admin => Dashboard::Admin,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account approval status.
///
/// `pending` is entered at signup. An admin moves it to `approved` or
/// `rejected`; neither of those ever returns to `pending`, and the two
/// terminal states do not flip into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Pending,
    Approved,
    Rejected,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Decide what an admin request to move to `target` does.
    pub fn transition(self, target: AccountStatus) -> Result<StatusChange, TransitionError> {
        use AccountStatus::*;

        match (self, target) {
            (_, Pending) => Err(TransitionError::InvalidTarget),
            (from, to) if from == to => Ok(StatusChange::Unchanged),
            (Pending, to) => Ok(StatusChange::Changed { from: Pending, to }),
            (from, to) => Err(TransitionError::NotAllowed { from, to }),
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of an allowed status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// Target equals the current state
    Unchanged,
    Changed {
        from: AccountStatus,
        to: AccountStatus,
    },
}

impl StatusChange {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Status must be 'approved' or 'rejected'")]
    InvalidTarget,

    #[error("Cannot change account status from {from} to {to}")]
    NotAllowed {
        from: AccountStatus,
        to: AccountStatus,
    },
}

/// View the client should route to after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Dashboard {
    Pending,
    Student,
    Teacher,
    Admin,
}

/// User stored in database.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub status: AccountStatus,
    pub roll_no: Option<String>,
    pub department: Option<String>,
    pub year_semester: Option<String>,
    pub designation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_approved(&self) -> bool {
        self.status == AccountStatus::Approved
    }
}

/// User as returned to clients. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub account_status: AccountStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_no: Option<String>,
    pub department: Option<String>,
    pub year_semester: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.full_name,
            email: u.email,
            role: u.role,
            account_status: u.status,
            roll_no: u.roll_no,
            department: u.department,
            year_semester: u.year_semester,
            designation: u.designation,
            created_at: u.created_at,
        }
    }
}

/// Values for a new account, already validated and normalized.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub status: AccountStatus,
    pub roll_no: Option<String>,
    pub department: Option<String>,
    pub year_semester: Option<String>,
    pub designation: Option<String>,
}

/// Signup request. Every field is optional at the wire level so that a
/// missing field produces a validation message instead of a parse error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(alias = "name")]
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub year_semester: Option<String>,
    pub roll_no: Option<String>,
    pub designation: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
    pub dashboard: Dashboard,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckEmailRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckRollNoRequest {
    #[serde(alias = "roll_no")]
    pub roll_no: String,
}

/// Answer to an availability check.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResponse {
    pub exists: bool,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerateOtpRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateOtpResponse {
    pub success: bool,
    pub message: String,
    /// Only present in development
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Self-edit of profile fields. Role, status, email and roll number are
/// not editable here.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: String,
    #[serde(alias = "fullName")]
    pub name: Option<String>,
    pub department: Option<String>,
    pub year_semester: Option<String>,
    pub designation: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    pub user: UserResponse,
}
