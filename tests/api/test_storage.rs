//! File upload, serving, URL resolution and deletion.

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use super::test_helpers::*;

const BOUNDARY: &str = "----portfolio-test-boundary";

fn multipart_body(kind: &str, email: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in [("type", kind), ("email", email)] {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/storage/upload")
        .insert_header(("Authorization", format!("Bearer {}", TEST_TOKEN)))
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

#[actix_rt::test]
async fn test_upload_serve_and_delete() {
    let (app, ctx) = create_test_app().await;
    approved_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;

    let (status, body) = send(
        &app,
        upload_request(multipart_body(
            "certificate",
            "asha@college.edu",
            "AWS cert.pdf",
            b"%PDF-1.4 test",
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let path = body["path"].as_str().unwrap().to_string();
    let asha = ctx
        .pool
        .find_user_by_email("asha@college.edu")
        .await
        .unwrap()
        .unwrap();
    assert!(path.starts_with(&format!("certificates/{}/", asha.id)));
    assert!(path.ends_with("_AWS_cert.pdf"));
    assert_eq!(body["url"], format!("/api/v1/files/{}", path));
    assert_eq!(ctx.memory.len(), 1);

    // Served without a token
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/files/{}", path))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    assert_eq!(test::read_body(resp).await.as_ref(), b"%PDF-1.4 test");

    let (status, body) = post(&app, "/api/v1/storage/url", json!({ "filePath": path })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], format!("/api/v1/files/{}", path));

    let (status, _) = delete(&app, "/api/v1/storage/delete", json!({ "filePath": path })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ctx.memory.is_empty());

    // Deleting again is not an error
    let (status, _) = delete(&app, "/api/v1/storage/delete", json!({ "filePath": path })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/files/{}", path)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_upload_too_large() {
    let (app, ctx) = create_test_app().await;
    approved_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;

    let data = vec![b'x'; MAX_UPLOAD + 1];
    let (status, body) = send(
        &app,
        upload_request(multipart_body("project", "asha@college.edu", "big.pdf", &data)),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
    assert!(ctx.memory.is_empty());
}

#[actix_rt::test]
async fn test_upload_rejects_bad_form() {
    let (app, _) = create_test_app().await;
    approved_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;
    signup_student(&app, "Pending Pat", "pat@college.edu", "21CS050").await;

    let (status, _) = send(
        &app,
        upload_request(multipart_body("diploma", "asha@college.edu", "a.pdf", b"x")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        upload_request(multipart_body("note", "pat@college.edu", "a.pdf", b"x")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_paths_outside_known_prefixes_are_refused() {
    let (app, _) = create_test_app().await;

    let (status, _) = delete(
        &app,
        "/api/v1/storage/delete",
        json!({ "filePath": "projects/../../etc/passwd" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/v1/storage/url", json!({ "path": "backups/db.sql" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/files/backups/db.sql"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_deleting_a_user_keeps_files_of_similar_emails() {
    let (app, ctx) = create_test_app().await;
    approved_student(&app, "Anil Bose", "a.b@x.edu", "21CS001").await;
    approved_student(&app, "Abhay Bhat", "a_b@x.edu", "21CS002").await;

    let (_, first) = send(
        &app,
        upload_request(multipart_body("resume", "a.b@x.edu", "cv.pdf", b"first")),
    )
    .await;
    let (_, second) = send(
        &app,
        upload_request(multipart_body("resume", "a_b@x.edu", "cv.pdf", b"second")),
    )
    .await;
    let first = first["path"].as_str().unwrap().to_string();
    let second = second["path"].as_str().unwrap().to_string();
    assert_ne!(first.rsplit_once('/').unwrap().0, second.rsplit_once('/').unwrap().0);

    let (status, _) = delete(
        &app,
        "/api/v1/admin/delete-user",
        json!({ "email": "a.b@x.edu" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ctx.memory.len(), 1);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/files/{}", second))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await.as_ref(), b"second");

    let (status, _) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/v1/files/{}", first)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
