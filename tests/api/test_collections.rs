//! Full-overwrite collection saves and approval gating.

use actix_web::http::StatusCode;
use serde_json::json;

use super::test_helpers::*;

const ASHA: &str = "asha@college.edu";

#[actix_rt::test]
async fn test_projects_round_trip_in_saved_order_with_aliases() {
    let (app, _) = create_test_app().await;
    approved_student(&app, "Asha Kumar", ASHA, "21CS042").await;

    let (status, body) = post(
        &app,
        "/api/v1/projects/asha@college.edu",
        json!([
            {
                "id": 1731000000000_i64,
                "title": "Compiler",
                "tags": ["Rust", " LLVM ", ""],
                "progress": 150,
                "size": 2048
            },
            {
                "name": "Weather App",
                "github_url": "https://github.com/asha/weather",
                "startDate": "2026-01-10"
            }
        ]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (status, body) = get(&app, "/api/v1/projects/asha@college.edu").await;
    assert_eq!(status, StatusCode::OK);
    let projects = body.as_array().unwrap();
    assert_eq!(projects.len(), 2);

    assert_eq!(projects[0]["id"], "1731000000000");
    assert_eq!(projects[0]["title"], "Compiler");
    assert_eq!(projects[0]["technologies"], json!(["Rust", "LLVM"]));
    assert_eq!(projects[0]["progress"], 100);
    assert_eq!(projects[0]["fileSize"], "2048");

    assert_eq!(projects[1]["title"], "Weather App");
    assert_eq!(projects[1]["githubUrl"], "https://github.com/asha/weather");
    assert_eq!(projects[1]["startDate"], "2026-01-10");
    assert!(projects[1]["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[actix_rt::test]
async fn test_records_carrying_display_and_storage_spellings() {
    let (app, _) = create_test_app().await;
    approved_student(&app, "Asha Kumar", ASHA, "21CS042").await;

    // Shapes the web client builds for an uploaded file and for a link
    let (status, body) = post(
        &app,
        "/api/v1/certificates/asha@college.edu",
        json!([
            {
                "id": "1731000000001",
                "name": "AWS Practitioner",
                "type": "Certificate",
                "date": "Nov 7, 2025",
                "size": "0.42 MB",
                "uploadType": "file",
                "url": "/api/v1/files/certificates/asha_college_edu/1_aws.pdf",
                "studentEmail": "certificates/asha_college_edu/1_aws.pdf",
                "title": "AWS Practitioner",
                "issuer": "Asha Kumar",
                "image_url": "/api/v1/files/certificates/asha_college_edu/1_aws.pdf",
                "issue_date": "2025-11-07"
            },
            {
                "id": "1731000000002",
                "name": "CCNA",
                "type": "Certificate",
                "issuer": "Cisco",
                "date": "Nov 8, 2025",
                "certificateLink": "https://verify.cisco.com/ccna",
                "uploadType": "link",
                "title": "CCNA",
                "credential_url": "https://verify.cisco.com/ccna",
                "issue_date": "2025-11-08"
            }
        ]),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["count"], 2);

    let (_, body) = get(&app, "/api/v1/certificates/asha@college.edu").await;
    assert_eq!(body[0]["title"], "AWS Practitioner");
    assert_eq!(body[0]["issueDate"], "2025-11-07");
    assert_eq!(
        body[0]["fileUrl"],
        "/api/v1/files/certificates/asha_college_edu/1_aws.pdf"
    );
    assert_eq!(body[1]["credentialUrl"], "https://verify.cisco.com/ccna");
    assert_eq!(body[1]["uploadType"], "link");

    let (status, body) = post(
        &app,
        "/api/v1/projects/asha@college.edu",
        json!([{ "name": "Compiler", "title": "Compiler" }]),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
}

#[actix_rt::test]
async fn test_save_replaces_and_empty_list_clears() {
    let (app, _) = create_test_app().await;
    approved_student(&app, "Asha Kumar", ASHA, "21CS042").await;

    post(
        &app,
        "/api/v1/certificates/asha@college.edu",
        json!([{ "title": "AWS" }, { "title": "GCP" }, { "title": "Azure" }]),
    )
    .await;
    post(
        &app,
        "/api/v1/certificates/asha@college.edu",
        json!([{ "name": "CKA", "organization": "CNCF", "certificateLink": "https://cncf.io/x" }]),
    )
    .await;

    let (_, body) = get(&app, "/api/v1/certificates/asha@college.edu").await;
    let certificates = body.as_array().unwrap();
    assert_eq!(certificates.len(), 1);
    assert_eq!(certificates[0]["title"], "CKA");
    assert_eq!(certificates[0]["issuer"], "CNCF");
    assert_eq!(certificates[0]["credentialUrl"], "https://cncf.io/x");

    let (status, body) = post(&app, "/api/v1/certificates/asha@college.edu", json!([])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);

    let (_, body) = get(&app, "/api/v1/certificates/asha@college.edu").await;
    assert_eq!(body, json!([]));
}

#[actix_rt::test]
async fn test_untitled_record_rejects_whole_save() {
    let (app, _) = create_test_app().await;
    approved_student(&app, "Asha Kumar", ASHA, "21CS042").await;

    post(&app, "/api/v1/notes/asha@college.edu", json!([{ "title": "DBMS" }])).await;

    let (status, body) = post(
        &app,
        "/api/v1/notes/asha@college.edu",
        json!([{ "title": "OS" }, { "title": "   " }]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("index 1"));

    let (_, body) = get(&app, "/api/v1/notes/asha@college.edu").await;
    assert_eq!(body.as_array().unwrap().len(), 1, "previous list kept");
    assert_eq!(body[0]["title"], "DBMS");
}

#[actix_rt::test]
async fn test_note_and_resume_defaults() {
    let (app, _) = create_test_app().await;
    approved_student(&app, "Asha Kumar", ASHA, "21CS042").await;

    post(
        &app,
        "/api/v1/notes/asha@college.edu",
        json!([{ "title": "DBMS", "category": "Databases" }]),
    )
    .await;
    post(
        &app,
        "/api/v1/resumes/asha@college.edu",
        json!([
            { "title": "CV 2026", "url": "/api/v1/files/resumes/a/1_cv.pdf", "is_primary": true },
            { "title": "Old CV" }
        ]),
    )
    .await;

    let (_, notes) = get(&app, "/api/v1/notes/asha@college.edu").await;
    assert_eq!(notes[0]["subject"], "Databases");
    assert_eq!(notes[0]["fileType"], "pdf");

    let (_, resumes) = get(&app, "/api/v1/resumes/asha@college.edu").await;
    assert_eq!(resumes[0]["isPrimary"], true);
    assert_eq!(resumes[0]["fileUrl"], "/api/v1/files/resumes/a/1_cv.pdf");
    assert_eq!(resumes[1]["isPrimary"], false);
    assert_eq!(resumes[1]["fileType"], "pdf");
}

#[actix_rt::test]
async fn test_collections_require_approved_account() {
    let (app, _) = create_test_app().await;
    signup_student(&app, "Asha Kumar", ASHA, "21CS042").await;

    let (status, body) = get(&app, "/api/v1/projects/asha@college.edu").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Account is pending approval");

    let (status, _) = post(
        &app,
        "/api/v1/projects/asha@college.edu",
        json!([{ "title": "Compiler" }]),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = get(&app, "/api/v1/user-data/asha@college.edu").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    set_status(&app, ASHA, "rejected").await;
    let (status, body) = get(&app, "/api/v1/resumes/asha@college.edu").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Account has been rejected");

    let (status, _) = get(&app, "/api/v1/projects/ghost@college.edu").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_collections_are_per_user() {
    let (app, _) = create_test_app().await;
    approved_student(&app, "Asha Kumar", ASHA, "21CS042").await;
    approved_student(&app, "Ravi Shah", "ravi@college.edu", "21CS043").await;

    post(&app, "/api/v1/projects/asha@college.edu", json!([{ "title": "A" }])).await;
    post(&app, "/api/v1/projects/ravi@college.edu", json!([{ "title": "R" }])).await;
    post(&app, "/api/v1/projects/asha@college.edu", json!([])).await;

    let (_, body) = get(&app, "/api/v1/projects/ravi@college.edu").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "R");
}

#[actix_rt::test]
async fn test_user_data_bundle() {
    let (app, _) = create_test_app().await;
    approved_student(&app, "Asha Kumar", ASHA, "21CS042").await;
    post(&app, "/api/v1/projects/asha@college.edu", json!([{ "title": "Compiler" }])).await;

    let (status, body) = get(&app, "/api/v1/user-data/asha@college.edu").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], ASHA);
    assert_eq!(body["projects"].as_array().unwrap().len(), 1);
    assert_eq!(body["certificates"], json!([]));
    assert_eq!(body["notes"], json!([]));
    assert_eq!(body["resumes"], json!([]));
    assert!(body["portfolio"].is_null());
    assert!(body["profile"].is_null());
}
