//! Signup, login and email verification handlers.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::auth::BearerAuth;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    AvailabilityResponse, CheckEmailRequest, CheckRollNoRequest, GenerateOtpRequest,
    GenerateOtpResponse, LoginRequest, MessageResponse, SignupRequest, SignupResponse,
    VerifyOtpRequest,
};
use crate::services::{accounts, otp};

/// Create an account. New accounts wait for admin approval.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 409, description = "Email or roll number taken", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn signup(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let user = accounts::signup(&pool, &body).await?;

    Ok(HttpResponse::Created().json(SignupResponse {
        success: true,
        message: "Account created successfully. Awaiting admin approval.".to_string(),
        user: user.into(),
    }))
}

/// Check credentials. Pending accounts log in to a waiting view; rejected
/// accounts are refused.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = crate::models::LoginResponse),
        (status = 400, description = "Missing email or password", body = crate::error::ErrorResponse),
        (status = 401, description = "Unknown email or wrong password", body = crate::error::ErrorResponse),
        (status = 403, description = "Account rejected", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn login(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let response = accounts::login(&pool, &body).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/check-email",
    tag = "Auth",
    request_body = CheckEmailRequest,
    responses(
        (status = 200, description = "Availability", body = AvailabilityResponse),
    ),
    security(("bearer" = []))
)]
pub async fn check_email(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    body: web::Json<CheckEmailRequest>,
) -> AppResult<HttpResponse> {
    let email = accounts::normalize_email(&body.email);
    if email.is_empty() {
        return Err(AppError::InvalidInput("Email is required".to_string()));
    }

    let exists = pool.find_user_by_email(&email).await?.is_some();
    let message = if exists {
        "This email is already registered"
    } else {
        "Email is available"
    };

    Ok(HttpResponse::Ok().json(AvailabilityResponse {
        exists,
        message: message.to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/check-rollno",
    tag = "Auth",
    request_body = CheckRollNoRequest,
    responses(
        (status = 200, description = "Availability", body = AvailabilityResponse),
    ),
    security(("bearer" = []))
)]
pub async fn check_roll_no(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    body: web::Json<CheckRollNoRequest>,
) -> AppResult<HttpResponse> {
    let roll_no = accounts::normalize_roll_no(&body.roll_no);
    if roll_no.is_empty() {
        return Err(AppError::InvalidInput("Roll number is required".to_string()));
    }

    let exists = pool.find_user_by_roll_no(&roll_no).await?.is_some();
    let message = if exists {
        "This roll number is already registered"
    } else {
        "Roll number is available"
    };

    Ok(HttpResponse::Ok().json(AvailabilityResponse {
        exists,
        message: message.to_string(),
    }))
}

/// Issue an email verification code for an academic address.
///
/// Codes are not emailed. In development the code is logged and returned
/// in the response.
#[utoipa::path(
    post,
    path = "/api/v1/auth/generate-otp",
    tag = "Auth",
    request_body = GenerateOtpRequest,
    responses(
        (status = 200, description = "Code issued", body = GenerateOtpResponse),
        (status = 400, description = "Not an academic email", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn generate_otp(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    body: web::Json<GenerateOtpRequest>,
) -> AppResult<HttpResponse> {
    let email = accounts::normalize_email(&body.email);

    if !accounts::is_valid_email(&email) || !otp::is_academic_email(&email) {
        return Err(AppError::InvalidInput(
            "Please use a valid college/academic email address (e.g., @college.edu, @university.ac.in)"
                .to_string(),
        ));
    }

    let code = otp::issue(&pool, &email, config.otp_ttl_secs).await?;

    let echoed = if config.is_development() {
        info!(email = %email, otp = %code, "Verification code (development only)");
        Some(code)
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(GenerateOtpResponse {
        success: true,
        message: "OTP sent to your email".to_string(),
        otp: echoed,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/verify-otp",
    tag = "Auth",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Email verified", body = MessageResponse),
        (status = 400, description = "Missing, expired or wrong code", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn verify_otp(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    body: web::Json<VerifyOtpRequest>,
) -> AppResult<HttpResponse> {
    let email = accounts::normalize_email(&body.email);
    if email.is_empty() || body.otp.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Email and OTP are required".to_string(),
        ));
    }

    otp::verify(&pool, &email, &body.otp).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::ok("Email verified successfully!")))
}

/// Configure auth routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/auth/signup").route(web::post().to(signup)))
        .service(web::resource("/auth/login").route(web::post().to(login)))
        .service(web::resource("/auth/check-email").route(web::post().to(check_email)))
        .service(web::resource("/auth/check-rollno").route(web::post().to(check_roll_no)))
        .service(web::resource("/auth/generate-otp").route(web::post().to(generate_otp)))
        .service(web::resource("/auth/verify-otp").route(web::post().to(verify_otp)));
}
