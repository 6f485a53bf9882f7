//! Actix-web extractor for the static client token.
//!
//! # Security
//! - The token from the request is wrapped in `SecretString` immediately
//! - It is never logged or exposed in debug output
//! - Comparison against the configured token is constant-time

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use secrecy::{ExposeSecret, SecretString};
use std::future::{Ready, ready};

use super::ApiToken;
use crate::config::{API_KEY_HEADER, AUTHORIZATION_HEADER};
use crate::error::ErrorResponse;

/// Pull the token out of `Authorization: Bearer <token>`, falling back to
/// the `apikey` header.
fn extract_token(req: &HttpRequest) -> Option<SecretString> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            v.strip_prefix("Bearer ")
                .or_else(|| v.strip_prefix("bearer "))
        })
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let token = bearer.or_else(|| {
        req.headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    })?;

    Some(SecretString::from(token.to_string()))
}

/// Authentication error for extractors.
#[derive(Debug)]
pub struct AuthError {
    message: &'static str,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::UNAUTHORIZED).json(ErrorResponse {
            error: self.message.to_string(),
            code: "UNAUTHORIZED".to_string(),
        })
    }
}

/// Extractor that requires the static client token.
///
/// Add it as a handler argument to protect a route:
/// ```ignore
/// async fn protected_handler(_auth: BearerAuth) -> impl Responder { ... }
/// ```
#[derive(Debug)]
pub struct BearerAuth;

impl FromRequest for BearerAuth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(expected) = req.app_data::<web::Data<ApiToken>>() else {
            return ready(Err(AuthError {
                message: "Internal configuration error",
            }));
        };

        match extract_token(req) {
            Some(provided) if expected.verify(provided.expose_secret()) => ready(Ok(BearerAuth)),
            Some(_) => ready(Err(AuthError {
                message: "Invalid API token",
            })),
            None => ready(Err(AuthError {
                message: "Missing API token. Provide an Authorization: Bearer header.",
            })),
        }
    }
}
