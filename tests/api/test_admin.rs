//! Account moderation: listing, approval state machine and deletion.

use actix_web::http::StatusCode;
use serde_json::json;

use campus_portfolio_lib::config::AdminBootstrap;
use campus_portfolio_lib::models::AccountStatus;
use campus_portfolio_lib::services::accounts;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_pending_users_lists_newest_first_with_stats() {
    let (app, _) = create_test_app().await;
    signup_student(&app, "First", "first@college.edu", "R1").await;
    signup_student(&app, "Second", "second@college.edu", "R2").await;
    signup_student(&app, "Third", "third@college.edu", "R3").await;
    set_status(&app, "first@college.edu", "approved").await;
    set_status(&app, "second@college.edu", "rejected").await;

    let (status, body) = get(&app, "/api/v1/admin/pending-users").await;
    assert_eq!(status, StatusCode::OK);
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0]["email"], "third@college.edu");
    assert_eq!(body["stats"]["totalPending"], 1);
    assert_eq!(body["stats"]["totalApproved"], 1);
    assert_eq!(body["stats"]["totalRejected"], 1);

    let (_, body) = get(&app, "/api/v1/admin/pending-users?status=pending").await;
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "third@college.edu");
    assert_eq!(body["stats"]["totalApproved"], 1, "stats ignore filters");

    let (status, _) = get(&app, "/api/v1/admin/pending-users?status=archived").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_approve_is_idempotent_and_terminal() {
    let (app, _) = create_test_app().await;
    signup_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;

    let (status, body) = set_status(&app, "asha@college.edu", "approved").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], true);
    assert_eq!(body["message"], "User approved successfully");
    assert_eq!(body["user"]["accountStatus"], "approved");

    let (status, body) = set_status(&app, "asha@college.edu", "approved").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], false);
    assert_eq!(body["user"]["accountStatus"], "approved");

    let (status, body) = set_status(&app, "asha@college.edu", "rejected").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, _) = set_status(&app, "asha@college.edu", "pending").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_reject_is_idempotent_and_terminal() {
    let (app, _) = create_test_app().await;
    signup_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;

    let (status, _) = set_status(&app, "asha@college.edu", "rejected").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = set_status(&app, "asha@college.edu", "rejected").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], false);

    let (status, _) = set_status(&app, "asha@college.edu", "approved").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_status_write_only_applies_to_the_state_it_was_decided_on() {
    let (app, ctx) = create_test_app().await;
    signup_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;

    // Both decisions are taken while the account still reads pending
    let seen = ctx
        .pool
        .find_user_by_email("asha@college.edu")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(seen.status, AccountStatus::Pending);

    let approved = ctx
        .pool
        .compare_and_set_status(seen.id, AccountStatus::Pending, AccountStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.unwrap().status, AccountStatus::Approved);

    let rejected = ctx
        .pool
        .compare_and_set_status(seen.id, AccountStatus::Pending, AccountStatus::Rejected)
        .await
        .unwrap();
    assert!(rejected.is_none());

    let (_, body) = get(&app, "/api/v1/user/asha@college.edu").await;
    assert_eq!(body["user"]["accountStatus"], "approved");

    let (status, _) = set_status(&app, "asha@college.edu", "rejected").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_update_status_by_user_id_and_unknown_user() {
    let (app, _) = create_test_app().await;
    let body = signup_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;
    let id = body["user"]["id"].as_str().unwrap().to_string();

    let (status, body) = post(
        &app,
        "/api/v1/admin/update-status",
        json!({ "userId": id, "status": "approved" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "asha@college.edu");

    let (status, _) = set_status(&app, "ghost@college.edu", "approved").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_delete_user_removes_account_data_and_files() {
    let (app, ctx) = create_test_app().await;
    approved_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;

    post(
        &app,
        "/api/v1/projects/asha@college.edu",
        json!([{ "title": "Compiler" }]),
    )
    .await;
    post(
        &app,
        "/api/v1/portfolio/asha@college.edu",
        json!({ "bio": "hi" }),
    )
    .await;
    let asha = ctx
        .pool
        .find_user_by_email("asha@college.edu")
        .await
        .unwrap()
        .unwrap();
    campus_portfolio_lib::services::ObjectStore::put(
        &ctx.memory,
        &format!("projects/{}/1_a.pdf", asha.id),
        vec![1, 2, 3],
        None,
    )
    .await
    .unwrap();

    let (status, _) = delete(
        &app,
        "/api/v1/admin/delete-user",
        json!({ "email": "asha@college.edu" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert!(
        ctx.pool
            .find_user_by_email("asha@college.edu")
            .await
            .unwrap()
            .is_none()
    );
    assert!(ctx.memory.is_empty());

    // Email and roll number are free again
    approved_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;
    let (_, body) = get(&app, "/api/v1/projects/asha@college.edu").await;
    assert_eq!(body, json!([]));

    let (status, _) = delete(
        &app,
        "/api/v1/admin/delete-user",
        json!({ "email": "ghost@college.edu" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_bootstrap_admin_is_protected() {
    let (app, ctx) = create_test_app().await;
    let admin = AdminBootstrap {
        email: ADMIN_EMAIL.to_string(),
        password: "Adm1n!pass".to_string(),
    };

    let (user, created) = accounts::ensure_admin(&ctx.pool, &admin).await.unwrap();
    assert!(created);
    assert_eq!(user.role.as_str(), "admin");
    assert!(user.is_approved());

    let (_, created) = accounts::ensure_admin(&ctx.pool, &admin).await.unwrap();
    assert!(!created);

    let (status, body) = post(
        &app,
        "/api/v1/auth/login",
        json!({ "email": ADMIN_EMAIL, "password": "Adm1n!pass" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dashboard"], "admin");

    let (status, _) = delete(
        &app,
        "/api/v1/admin/delete-user",
        json!({ "email": ADMIN_EMAIL }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
