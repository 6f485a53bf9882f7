//! Teacher views over approved students.

use actix_web::http::StatusCode;
use serde_json::json;

use campus_portfolio_lib::models::ProjectInput;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_students_list_with_counts_and_stats() {
    let (app, _) = create_test_app().await;
    approved_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;
    approved_student(&app, "Ravi Shah", "ravi@college.edu", "21EC007").await;
    signup_student(&app, "Pending Pat", "pat@college.edu", "21CS050").await;

    post(
        &app,
        "/api/v1/projects/asha@college.edu",
        json!([{ "title": "Compiler" }, { "title": "Kernel" }]),
    )
    .await;
    post(
        &app,
        "/api/v1/certificates/ravi@college.edu",
        json!([{ "title": "CCNA" }]),
    )
    .await;
    post(
        &app,
        "/api/v1/notes/ravi@college.edu",
        json!([{ "title": "Signals" }]),
    )
    .await;

    let (status, body) = get(&app, "/api/v1/teacher/students").await;
    assert_eq!(status, StatusCode::OK);

    let students = body["students"].as_array().unwrap();
    assert_eq!(students.len(), 2, "only approved students are listed");
    assert_eq!(students[0]["name"], "Asha Kumar");
    assert_eq!(students[0]["projectCount"], 2);
    assert_eq!(students[0]["certificateCount"], 0);
    assert_eq!(students[1]["rollNo"], "21EC007");
    assert_eq!(students[1]["certificateCount"], 1);

    assert_eq!(body["stats"]["totalStudents"], 2);
    assert_eq!(body["stats"]["totalProjects"], 2);
    assert_eq!(body["stats"]["totalCertificates"], 1);
    assert_eq!(body["stats"]["recentActivities"], 4);
}

#[actix_rt::test]
async fn test_students_filters_keep_global_stats() {
    let (app, _) = create_test_app().await;
    approved_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;
    approved_student(&app, "Ravi Shah", "ravi@college.edu", "21EC007").await;

    let (_, body) = get(&app, "/api/v1/teacher/students?search=ec007").await;
    let students = body["students"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["email"], "ravi@college.edu");
    assert_eq!(body["stats"]["totalStudents"], 2);

    let (_, body) = get(&app, "/api/v1/teacher/students?department=cse&yearSemester=3rd%20Year").await;
    assert_eq!(body["students"].as_array().unwrap().len(), 2);

    let (_, body) = get(&app, "/api/v1/teacher/students?department=MECH").await;
    assert_eq!(body["students"], json!([]));
}

#[actix_rt::test]
async fn test_student_files() {
    let (app, _) = create_test_app().await;
    approved_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;
    signup_student(&app, "Pending Pat", "pat@college.edu", "21CS050").await;

    post(
        &app,
        "/api/v1/resumes/asha@college.edu",
        json!([{ "title": "CV" }]),
    )
    .await;

    let (status, body) = get(&app, "/api/v1/teacher/student-files/asha@college.edu").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student"]["email"], "asha@college.edu");
    assert_eq!(body["resumes"][0]["title"], "CV");
    assert_eq!(body["projects"], json!([]));

    let (status, _) = get(&app, "/api/v1/teacher/student-files/pat@college.edu").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_stats_ignore_rows_of_other_accounts() {
    let (app, ctx) = create_test_app().await;
    approved_student(&app, "Asha Kumar", "asha@college.edu", "21CS042").await;
    signup_student(&app, "Ravi Shah", "ravi@college.edu", "21EC007").await;
    signup_student(&app, "Pending Pat", "pat@college.edu", "21CS050").await;
    set_status(&app, "ravi@college.edu", "rejected").await;

    post(
        &app,
        "/api/v1/projects/asha@college.edu",
        json!([{ "title": "Compiler" }]),
    )
    .await;

    // Rows left behind by accounts that are not approved students
    let projects: Vec<ProjectInput> =
        serde_json::from_value(json!([{ "title": "Draft" }, { "title": "Draft 2" }])).unwrap();
    for email in ["pat@college.edu", "ravi@college.edu"] {
        let user = ctx.pool.find_user_by_email(email).await.unwrap().unwrap();
        ctx.pool
            .replace_projects(user.id, projects.clone())
            .await
            .unwrap();
    }

    let (_, body) = get(&app, "/api/v1/teacher/students").await;
    assert_eq!(body["students"].as_array().unwrap().len(), 1);
    assert_eq!(body["students"][0]["projectCount"], 1);
    assert_eq!(body["stats"]["totalStudents"], 1);
    assert_eq!(body["stats"]["totalProjects"], 1);
    assert_eq!(body["stats"]["recentActivities"], 1);
}
