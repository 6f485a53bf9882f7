//! Portfolio and profile upserts and the public portfolio page.

use actix_web::http::StatusCode;
use futures_util::future::join;
use serde_json::json;

use campus_portfolio_lib::models::{PortfolioInput, ProfileInput};

use super::test_helpers::*;

#[actix_rt::test]
async fn test_portfolio_upsert_and_defaults() {
    let (app, _) = create_test_app().await;
    approved_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;

    let (status, body) = get(&app, "/api/v1/portfolio/asha@college.edu").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    let (status, body) = post(
        &app,
        "/api/v1/portfolio/asha@college.edu",
        json!({
            "aboutMe": "CS undergrad",
            "skills": ["Rust", "SQL"],
            "socialLinks": { "github": "https://github.com/asha" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = get(&app, "/api/v1/portfolio/asha@college.edu").await;
    assert_eq!(body["bio"], "CS undergrad");
    assert_eq!(body["skills"], json!(["Rust", "SQL"]));
    assert_eq!(body["socialLinks"]["github"], "https://github.com/asha");
    assert_eq!(body["themeColor"], "#000000");
    assert_eq!(body["isPublic"], true);

    post(
        &app,
        "/api/v1/portfolio/asha@college.edu",
        json!({ "bio": "Final year", "theme": "#1e40af" }),
    )
    .await;
    let (_, body) = get(&app, "/api/v1/portfolio/asha@college.edu").await;
    assert_eq!(body["bio"], "Final year");
    assert_eq!(body["themeColor"], "#1e40af");
    assert_eq!(body["skills"], json!([]), "the body is the whole record");
}

#[actix_rt::test]
async fn test_public_portfolio_visibility() {
    let (app, _) = create_test_app().await;
    approved_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;

    let (status, _) = get(&app, "/api/v1/portfolio/asha@college.edu/public").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    post(
        &app,
        "/api/v1/portfolio/asha@college.edu",
        json!({ "bio": "CS undergrad" }),
    )
    .await;
    post(
        &app,
        "/api/v1/projects/asha@college.edu",
        json!([{ "title": "Compiler" }]),
    )
    .await;

    let (status, body) = get(&app, "/api/v1/portfolio/asha@college.edu/public").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Asha Kumar");
    assert_eq!(body["yearSemester"], "3rd Year");
    assert_eq!(body["portfolio"]["bio"], "CS undergrad");
    assert_eq!(body["projects"][0]["title"], "Compiler");
    assert_eq!(body["certificates"], json!([]));

    post(
        &app,
        "/api/v1/portfolio/asha@college.edu",
        json!({ "bio": "CS undergrad", "isPublic": false }),
    )
    .await;
    let (status, _) = get(&app, "/api/v1/portfolio/asha@college.edu/public").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_profile_upsert_accepts_numbers_and_aliases() {
    let (app, _) = create_test_app().await;
    approved_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;

    let (status, _) = post(
        &app,
        "/api/v1/profile/asha@college.edu",
        json!({
            "profileImage": "/api/v1/files/avatars/asha_college_edu/1_me.png",
            "cgpa": 8.7,
            "phone": 9876543210_i64,
            "linkedin_url": "https://linkedin.com/in/asha"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/v1/profile/asha@college.edu").await;
    assert_eq!(
        body["avatarUrl"],
        "/api/v1/files/avatars/asha_college_edu/1_me.png"
    );
    assert_eq!(body["cgpa"], "8.7");
    assert_eq!(body["phone"], "9876543210");
    assert_eq!(body["linkedinUrl"], "https://linkedin.com/in/asha");
    assert_eq!(body["skills"], json!([]));
}

#[actix_rt::test]
async fn test_singletons_require_approved_account() {
    let (app, _) = create_test_app().await;
    signup_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;

    let (status, _) = post(
        &app,
        "/api/v1/profile/asha@college.edu",
        json!({ "bio": "hi" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = get(&app, "/api/v1/portfolio/asha@college.edu/public").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_simultaneous_first_saves_keep_one_record() {
    let (app, ctx) = create_test_app().await;
    approved_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;
    let user = ctx
        .pool
        .find_user_by_email("asha@college.edu")
        .await
        .unwrap()
        .unwrap();

    let first = PortfolioInput {
        bio: Some("first".into()),
        ..Default::default()
    };
    let second = PortfolioInput {
        bio: Some("second".into()),
        ..Default::default()
    };
    let (a, b) = join(
        ctx.pool.upsert_portfolio(user.id, first),
        ctx.pool.upsert_portfolio(user.id, second),
    )
    .await;
    a.unwrap();
    b.unwrap();

    let portfolio = ctx.pool.get_portfolio(user.id).await.unwrap().unwrap();
    assert!(matches!(portfolio.bio.as_deref(), Some("first" | "second")));

    let (a, b) = join(
        ctx.pool.upsert_profile(
            user.id,
            ProfileInput {
                course: Some("B.Tech".into()),
                ..Default::default()
            },
        ),
        ctx.pool.upsert_profile(
            user.id,
            ProfileInput {
                course: Some("M.Tech".into()),
                ..Default::default()
            },
        ),
    )
    .await;
    a.unwrap();
    b.unwrap();

    ctx.pool
        .upsert_profile(
            user.id,
            ProfileInput {
                college: Some("NIT".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let (status, body) = get(&app, "/api/v1/profile/asha@college.edu").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["college"], "NIT");
    assert!(body["course"].is_null(), "the last save replaces the record");
}
