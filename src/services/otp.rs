//! Email verification codes.
//!
//! Codes are six digits, stored only as SHA-256 digests and replaced on
//! every request. Delivery is out of scope: development responses echo the
//! code so the signup flow can be exercised end to end.

use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};

/// Domain suffixes accepted as academic.
const ACADEMIC_SUFFIXES: [&str; 3] = ["edu", "ac.in", "edu.in"];

const MAX_TTL_SECS: u64 = 86_400;

/// True when the email's domain is, or ends in a label of, an academic
/// suffix (`college.edu`, `iitb.ac.in`, `edu`).
pub fn is_academic_email(email: &str) -> bool {
    let Some((_, domain)) = email.trim().rsplit_once('@') else {
        return false;
    };
    let domain = domain.to_lowercase();

    ACADEMIC_SUFFIXES
        .iter()
        .any(|suffix| domain == *suffix || domain.ends_with(&format!(".{}", suffix)))
}

/// Random six digit code.
pub fn generate_code() -> String {
    let n: u32 = rand::random();
    (100_000 + n % 900_000).to_string()
}

pub fn hash_code(code: &str) -> String {
    hex::encode(Sha256::digest(code.trim().as_bytes()))
}

/// Issue a new code for `email`, replacing any outstanding one.
pub async fn issue(pool: &DbPool, email: &str, ttl_secs: u64) -> AppResult<String> {
    let code = generate_code();
    let ttl = Duration::seconds(ttl_secs.min(MAX_TTL_SECS) as i64);

    pool.replace_verification_code(email, &hash_code(&code), Utc::now() + ttl)
        .await?;

    info!(email = %email, "Issued email verification code");

    Ok(code)
}

/// Check `code` against the outstanding one for `email`.
///
/// An expired code is removed so the next attempt asks for a new one.
pub async fn verify(pool: &DbPool, email: &str, code: &str) -> AppResult<()> {
    let record = pool.get_verification_code(email).await?.ok_or_else(|| {
        AppError::InvalidInput("No OTP found for this email. Please request a new one.".to_string())
    })?;

    if record.expires_at <= Utc::now() {
        pool.delete_verification_code(email).await?;
        return Err(AppError::InvalidInput(
            "OTP has expired. Please request a new one.".to_string(),
        ));
    }

    if record.code_hash != hash_code(code) {
        return Err(AppError::InvalidInput(
            "Invalid OTP. Please try again.".to_string(),
        ));
    }

    pool.mark_verification_verified(email).await?;
    info!(email = %email, "Email verified");

    Ok(())
}
