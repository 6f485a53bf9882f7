//! Signup, login, availability checks, email codes and user records.

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_requests_without_token_are_rejected() {
    let (app, _) = create_test_app().await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/check-email")
            .set_json(json!({ "email": "a@college.edu" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/check-email")
            .insert_header(("Authorization", "Bearer wrong-token"))
            .set_json(json!({ "email": "a@college.edu" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_apikey_header_is_accepted() {
    let (app, _) = create_test_app().await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/check-email")
            .insert_header(("apikey", TEST_TOKEN))
            .set_json(json!({ "email": "a@college.edu" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], false);
}

#[actix_rt::test]
async fn test_health_needs_no_token() {
    let (app, _) = create_test_app().await;

    let (status, body) = send(&app, test::TestRequest::get().uri("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, test::TestRequest::get().uri("/api/v1/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");
}

#[actix_rt::test]
async fn test_signup_creates_pending_account() {
    let (app, _) = create_test_app().await;

    let body = signup_student(&app, "Asha Kumar", "Asha@College.edu", "21cs042").await;

    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "asha@college.edu");
    assert_eq!(body["user"]["name"], "Asha Kumar");
    assert_eq!(body["user"]["accountStatus"], "pending");
    assert_eq!(body["user"]["rollNo"], "21CS042");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[actix_rt::test]
async fn test_signup_rejects_duplicate_email_and_roll_number() {
    let (app, _) = create_test_app().await;
    signup_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;

    let (status, body) = post(
        &app,
        "/api/v1/auth/signup",
        student_signup("Asha Again", "ASHA@college.edu", "21CS099"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already registered");

    let (status, body) = post(
        &app,
        "/api/v1/auth/signup",
        student_signup("Ravi Shah", "ravi@college.edu", "21cs042"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Roll number already registered");
}

#[actix_rt::test]
async fn test_signup_validation_messages() {
    let (app, _) = create_test_app().await;

    let mut weak = student_signup("Asha Kumar", "asha@college.edu", "21CS042");
    weak["password"] = json!("weakpassword");
    let (status, body) = post(&app, "/api/v1/auth/signup", weak).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Password must contain uppercase, lowercase, number, and special character"
    );

    let (status, body) = post(
        &app,
        "/api/v1/auth/signup",
        json!({ "email": "asha@college.edu", "password": PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required");

    let teacher = json!({
        "fullName": "Dr. Rao",
        "email": "rao@college.edu",
        "password": PASSWORD,
        "role": "teacher",
        "department": "CSE",
        "yearSemester": "N/A",
    });
    let (status, body) = post(&app, "/api/v1/auth/signup", teacher).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Designation is required for teachers");
}

#[actix_rt::test]
async fn test_malformed_json_uses_error_shape() {
    let (app, _) = create_test_app().await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("Authorization", format!("Bearer {}", TEST_TOKEN)))
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_login_flow_by_status() {
    let (app, _) = create_test_app().await;
    signup_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;

    let (status, body) = post(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "nobody@college.edu", "password": PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["error"],
        "No account found with this email. Please sign up first."
    );

    let (status, body) = post(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "asha@college.edu", "password": "Wr0ng!pass" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Incorrect password");

    let (status, body) = post(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "asha@college.edu", "password": PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Account pending approval");
    assert_eq!(body["dashboard"], "pending");

    set_status(&app, "asha@college.edu", "approved").await;
    let (status, body) = post(
        &app,
        "/api/v1/auth/login",
        json!({ "email": " ASHA@college.edu ", "password": PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["dashboard"], "student");
}

#[actix_rt::test]
async fn test_rejected_account_cannot_log_in() {
    let (app, _) = create_test_app().await;
    signup_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;
    set_status(&app, "asha@college.edu", "rejected").await;

    let (status, body) = post(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "asha@college.edu", "password": PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "Your account has been rejected. Please contact the administrator."
    );
}

#[actix_rt::test]
async fn test_availability_checks() {
    let (app, _) = create_test_app().await;
    signup_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;

    let (_, body) = post(
        &app,
        "/api/v1/auth/check-email",
        json!({ "email": "Asha@College.edu" }),
    )
    .await;
    assert_eq!(body["exists"], true);

    let (_, body) = post(
        &app,
        "/api/v1/auth/check-rollno",
        json!({ "rollNo": "21cs042" }),
    )
    .await;
    assert_eq!(body["exists"], true);

    let (_, body) = post(
        &app,
        "/api/v1/auth/check-rollno",
        json!({ "rollNo": "21CS043" }),
    )
    .await;
    assert_eq!(body["exists"], false);
    assert_eq!(body["message"], "Roll number is available");
}

#[actix_rt::test]
async fn test_email_code_round() {
    let (app, ctx) = create_test_app().await;

    let (status, body) = post(
        &app,
        "/api/v1/auth/generate-otp",
        json!({ "email": "asha@gmail.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("academic"));

    let (status, body) = post(
        &app,
        "/api/v1/auth/verify-otp",
        json!({ "email": "asha@college.edu", "otp": "123456" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "No OTP found for this email. Please request a new one."
    );

    let (status, body) = post(
        &app,
        "/api/v1/auth/generate-otp",
        json!({ "email": "asha@college.edu" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let code = body["otp"].as_str().expect("development echoes the code").to_string();
    assert_eq!(code.len(), 6);

    let stored = ctx
        .pool
        .get_verification_code("asha@college.edu")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.code_hash, code, "codes are stored hashed");

    let wrong = if code == "999999" { "100000" } else { "999999" };
    let (status, body) = post(
        &app,
        "/api/v1/auth/verify-otp",
        json!({ "email": "asha@college.edu", "otp": wrong }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid OTP. Please try again.");

    let (status, body) = post(
        &app,
        "/api/v1/auth/verify-otp",
        json!({ "email": "asha@college.edu", "otp": code }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Email verified successfully!");
}

#[actix_rt::test]
async fn test_expired_code_is_removed() {
    let (app, ctx) = create_test_app().await;

    ctx.pool
        .replace_verification_code(
            "asha@college.edu",
            &campus_portfolio_lib::services::otp::hash_code("123456"),
            chrono::Utc::now() - chrono::Duration::seconds(1),
        )
        .await
        .unwrap();

    let (status, body) = post(
        &app,
        "/api/v1/auth/verify-otp",
        json!({ "email": "asha@college.edu", "otp": "123456" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "OTP has expired. Please request a new one.");
    assert!(
        ctx.pool
            .get_verification_code("asha@college.edu")
            .await
            .unwrap()
            .is_none()
    );
}

#[actix_rt::test]
async fn test_user_record_and_self_edit() {
    let (app, _) = create_test_app().await;
    signup_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;

    let (status, body) = get(&app, "/api/v1/user/asha@college.edu").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["department"], "CSE");

    let (status, body) = post(
        &app,
        "/api/v1/user",
        json!({
            "email": "asha@college.edu",
            "name": "Asha K.",
            "yearSemester": "4th Year",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Asha K.");
    assert_eq!(body["user"]["yearSemester"], "4th Year");
    assert_eq!(body["user"]["department"], "CSE");
    assert_eq!(body["user"]["accountStatus"], "pending");

    let (status, _) = get(&app, "/api/v1/user/nobody@college.edu").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
