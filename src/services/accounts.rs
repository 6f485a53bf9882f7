//! Account lifecycle: signup validation, login gating, approval and
//! deletion.

use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::config::AdminBootstrap;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    AccountStatus, Dashboard, LoginRequest, LoginResponse, NewUser, Role, SignupRequest,
    StatusChange, TransitionError, UpdateStatusRequest, User,
};

use super::storage::Storage;

/// Characters that satisfy the "special character" password rule.
const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

const MIN_PASSWORD_LEN: usize = 8;

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn normalize_roll_no(roll_no: &str) -> String {
    roll_no.trim().to_uppercase()
}

/// Syntactically valid address whose domain has at least one dot.
pub fn is_valid_email(email: &str) -> bool {
    email_address::EmailAddress::is_valid(email)
        && email
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.') && !domain.ends_with('.'))
}

pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidInput(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if !(upper && lower && digit && special) {
        return Err(AppError::InvalidInput(
            "Password must contain uppercase, lowercase, number, and special character"
                .to_string(),
        ));
    }

    Ok(())
}

/// Signup input after validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignup {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub department: String,
    pub year_semester: String,
    pub roll_no: Option<String>,
    pub designation: Option<String>,
}

fn required(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Check a signup request without touching the database.
pub fn validate_signup(req: &SignupRequest) -> AppResult<ValidSignup> {
    let (
        Some(full_name),
        Some(email),
        Some(password),
        Some(role),
        Some(department),
        Some(year_semester),
    ) = (
        required(&req.full_name),
        required(&req.email),
        // Passwords are taken verbatim, only presence is checked
        req.password.clone().filter(|p| !p.trim().is_empty()),
        required(&req.role),
        required(&req.department),
        required(&req.year_semester),
    )
    else {
        return Err(AppError::InvalidInput("All fields are required".to_string()));
    };

    let role = match Role::parse(&role) {
        Some(role @ (Role::Student | Role::Teacher)) => role,
        _ => {
            return Err(AppError::InvalidInput(
                "Role must be 'student' or 'teacher'".to_string(),
            ));
        }
    };

    let roll_no = required(&req.roll_no).map(|r| normalize_roll_no(&r));
    let designation = required(&req.designation);

    let (roll_no, designation) = match role {
        Role::Student => {
            if roll_no.is_none() {
                return Err(AppError::InvalidInput(
                    "Roll number is required for students".to_string(),
                ));
            }
            (roll_no, None)
        }
        _ => {
            if designation.is_none() {
                return Err(AppError::InvalidInput(
                    "Designation is required for teachers".to_string(),
                ));
            }
            (None, designation)
        }
    };

    let email = normalize_email(&email);
    if !is_valid_email(&email) {
        return Err(AppError::InvalidInput(
            "Please enter a valid email address".to_string(),
        ));
    }

    if let Some(ref roll_no) = roll_no
        && !roll_no.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(AppError::InvalidInput(
            "Roll number must be alphanumeric".to_string(),
        ));
    }

    validate_password(&password)?;

    Ok(ValidSignup {
        full_name,
        email,
        password,
        role,
        department,
        year_semester,
        roll_no,
        designation,
    })
}

/// Create a pending account.
pub async fn signup(pool: &DbPool, req: &SignupRequest) -> AppResult<User> {
    let form = validate_signup(req)?;

    if pool.find_user_by_email(&form.email).await?.is_some() {
        return Err(AppError::Duplicate("Email already registered".to_string()));
    }
    if let Some(ref roll_no) = form.roll_no
        && pool.find_user_by_roll_no(roll_no).await?.is_some()
    {
        return Err(AppError::Duplicate(
            "Roll number already registered".to_string(),
        ));
    }

    let user = pool
        .insert_user(NewUser {
            email: form.email,
            password_hash: hash_password(&form.password)?,
            full_name: form.full_name,
            role: form.role,
            status: AccountStatus::Pending,
            roll_no: form.roll_no,
            department: Some(form.department),
            year_semester: Some(form.year_semester),
            designation: form.designation,
        })
        .await?;

    info!(email = %user.email, role = %user.role, "Account created, awaiting approval");

    Ok(user)
}

/// Check credentials and decide where the client goes next.
pub async fn login(pool: &DbPool, req: &LoginRequest) -> AppResult<LoginResponse> {
    let (Some(email), Some(password)) = (required(&req.email), req.password.as_deref()) else {
        return Err(AppError::InvalidInput(
            "Email and password are required".to_string(),
        ));
    };
    let email = normalize_email(&email);

    let user = pool.find_user_by_email(&email).await?.ok_or_else(|| {
        AppError::Unauthorized("No account found with this email. Please sign up first.".to_string())
    })?;

    if !verify_password(password, &user.password_hash)? {
        info!(email = %email, "Login rejected: wrong password");
        return Err(AppError::Unauthorized("Incorrect password".to_string()));
    }

    let (message, dashboard) = match user.status {
        AccountStatus::Rejected => {
            info!(email = %email, "Login rejected: account rejected");
            return Err(AppError::Forbidden(
                "Your account has been rejected. Please contact the administrator.".to_string(),
            ));
        }
        AccountStatus::Pending => ("Account pending approval", Dashboard::Pending),
        AccountStatus::Approved => ("Login successful", user.role.dashboard()),
    };

    info!(email = %email, status = %user.status, "Login");

    Ok(LoginResponse {
        success: true,
        message: message.to_string(),
        user: user.into(),
        dashboard,
    })
}

/// Look up the account behind `email` and require it to be approved.
pub async fn require_approved(pool: &DbPool, email: &str) -> AppResult<User> {
    let user = pool
        .find_user_by_email(&normalize_email(email))
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    match user.status {
        AccountStatus::Approved => Ok(user),
        AccountStatus::Pending => Err(AppError::Forbidden(
            "Account is pending approval".to_string(),
        )),
        AccountStatus::Rejected => Err(AppError::Forbidden(
            "Account has been rejected".to_string(),
        )),
    }
}

/// Apply an admin approve/reject request.
pub async fn update_status(
    pool: &DbPool,
    req: &UpdateStatusRequest,
) -> AppResult<(User, StatusChange)> {
    let target = AccountStatus::parse(&req.status)
        .ok_or_else(|| AppError::InvalidInput(TransitionError::InvalidTarget.to_string()))?;

    let user = match (req.email.as_deref(), req.user_id.as_deref()) {
        (Some(email), _) if !email.trim().is_empty() => {
            pool.find_user_by_email(&normalize_email(email)).await?
        }
        (_, Some(id)) => {
            let id = Uuid::parse_str(id.trim())
                .map_err(|_| AppError::InvalidInput("Invalid user id".to_string()))?;
            pool.find_user_by_id(id).await?
        }
        _ => {
            return Err(AppError::InvalidInput(
                "Email or userId is required".to_string(),
            ));
        }
    }
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let decide = |status: AccountStatus| {
        status.transition(target).map_err(|e| match e {
            TransitionError::InvalidTarget => AppError::InvalidInput(e.to_string()),
            TransitionError::NotAllowed { .. } => AppError::Conflict(e.to_string()),
        })
    };

    let change = decide(user.status)?;
    let StatusChange::Changed { from, to } = change else {
        return Ok((user, change));
    };

    if let Some(updated) = pool.compare_and_set_status(user.id, from, to).await? {
        info!(email = %updated.email, %from, %to, "Account status changed");
        return Ok((updated, change));
    }

    // Another request moved the account first; judge against what it stored
    let current = pool
        .find_user_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    match decide(current.status)? {
        StatusChange::Unchanged => Ok((current, StatusChange::Unchanged)),
        StatusChange::Changed { from, to } => Err(AppError::Conflict(
            TransitionError::NotAllowed { from, to }.to_string(),
        )),
    }
}

/// Delete an account with everything it owns, then its stored files.
///
/// `protected_email` is the bootstrap admin, which cannot be deleted.
pub async fn delete_user(
    pool: &DbPool,
    storage: &Storage,
    email: &str,
    protected_email: Option<&str>,
) -> AppResult<User> {
    let email = normalize_email(email);

    if protected_email.is_some_and(|p| normalize_email(p) == email) {
        return Err(AppError::Conflict(
            "The bootstrap admin account cannot be deleted".to_string(),
        ));
    }

    let user = pool
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    pool.delete_user_cascade(&user).await?;
    info!(email = %email, "User deleted");

    match storage.purge_user(user.id).await {
        Ok(removed) => info!(email = %email, removed, "Purged stored files"),
        Err(e) => warn!(email = %email, error = %e, "Failed to purge stored files"),
    }

    Ok(user)
}

/// Make sure the configured admin account exists. An existing account is
/// left untouched. Returns the account and whether it was created.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<(User, bool)> {
    let email = normalize_email(&admin.email);
    if !is_valid_email(&email) {
        return Err(AppError::InvalidInput(format!(
            "Invalid admin email: {}",
            email
        )));
    }

    if let Some(existing) = pool.find_user_by_email(&email).await? {
        if existing.role != Role::Admin {
            warn!(email = %email, role = %existing.role, "Bootstrap admin email belongs to a non-admin account");
        }
        return Ok((existing, false));
    }

    let user = pool
        .insert_user(NewUser {
            email,
            password_hash: hash_password(&admin.password)?,
            full_name: "Administrator".to_string(),
            role: Role::Admin,
            status: AccountStatus::Approved,
            roll_no: None,
            department: None,
            year_semester: None,
            designation: None,
        })
        .await?;

    info!(email = %user.email, "Created admin account");

    Ok((user, true))
}
