//! Teacher dashboard handlers: read-only views over approved students.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::BearerAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    AccountStatus, Role, StudentFilesResponse, StudentSummary, StudentsQuery, StudentsResponse,
    TeacherStats, User,
};
use crate::services::accounts;

/// Window for `recentActivities`.
const RECENT_DAYS: i64 = 7;

fn summarize(
    user: &User,
    projects: &HashMap<Uuid, u64>,
    certificates: &HashMap<Uuid, u64>,
) -> StudentSummary {
    StudentSummary {
        email: user.email.clone(),
        name: user.full_name.clone(),
        roll_no: user.roll_no.clone(),
        department: user.department.clone(),
        year_semester: user.year_semester.clone(),
        created_at: user.created_at,
        project_count: projects.get(&user.id).copied().unwrap_or(0),
        certificate_count: certificates.get(&user.id).copied().unwrap_or(0),
    }
}

fn same_text(value: Option<&str>, wanted: &str) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case(wanted.trim()))
}

/// Whether a student passes the list filters. Blank filters match all.
pub fn matches_query(student: &StudentSummary, query: &StudentsQuery) -> bool {
    let search = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());
    if let Some(needle) = search {
        let hit = student.name.to_lowercase().contains(&needle)
            || student.email.to_lowercase().contains(&needle)
            || student
                .roll_no
                .as_deref()
                .is_some_and(|r| r.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }

    if let Some(department) = query.department.as_deref().filter(|d| !d.trim().is_empty())
        && !same_text(student.department.as_deref(), department)
    {
        return false;
    }

    if let Some(year) = query.year_semester.as_deref().filter(|y| !y.trim().is_empty())
        && !same_text(student.year_semester.as_deref(), year)
    {
        return false;
    }

    true
}

/// Approved students with their project and certificate counts.
///
/// `stats` always covers every approved student; filters only narrow the
/// list.
#[utoipa::path(
    get,
    path = "/api/v1/teacher/students",
    tag = "Teacher",
    params(StudentsQuery),
    responses(
        (status = 200, description = "Students and aggregate stats", body = StudentsResponse),
    ),
    security(("bearer" = []))
)]
pub async fn list_students(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    query: web::Query<StudentsQuery>,
) -> AppResult<HttpResponse> {
    let students = pool.list_approved_students().await?;

    let project_counts = pool.count_projects_per_student().await?;
    let certificate_counts = pool.count_certificates_per_student().await?;

    let since = Utc::now() - Duration::days(RECENT_DAYS);
    let recent_activities = pool.count_student_projects_since(since).await?
        + pool.count_student_certificates_since(since).await?
        + pool.count_student_notes_since(since).await?
        + pool.count_student_resumes_since(since).await?;

    let stats = TeacherStats {
        total_students: students.len() as u64,
        total_projects: project_counts.values().sum(),
        total_certificates: certificate_counts.values().sum(),
        recent_activities,
    };

    let students = students
        .iter()
        .map(|s| summarize(s, &project_counts, &certificate_counts))
        .filter(|s| matches_query(s, &query))
        .collect();

    Ok(HttpResponse::Ok().json(StudentsResponse { students, stats }))
}

/// Every collection of one approved student.
#[utoipa::path(
    get,
    path = "/api/v1/teacher/student-files/{email}",
    tag = "Teacher",
    params(("email" = String, Path, description = "Student email")),
    responses(
        (status = 200, description = "Student collections", body = StudentFilesResponse),
        (status = 404, description = "No approved student with this email", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn student_files(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let student = pool
        .find_user_by_email(&accounts::normalize_email(&path))
        .await?
        .filter(|u| u.role == Role::Student && u.status == AccountStatus::Approved)
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
    let id = student.id;

    let projects = pool.list_projects(id).await?;
    let certificates = pool.list_certificates(id).await?;

    let counts = |n: usize| HashMap::from([(id, n as u64)]);
    let summary = summarize(&student, &counts(projects.len()), &counts(certificates.len()));

    Ok(HttpResponse::Ok().json(StudentFilesResponse {
        student: summary,
        projects,
        certificates,
        notes: pool.list_notes(id).await?,
        resumes: pool.list_resumes(id).await?,
    }))
}

/// Configure teacher routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/teacher/students").route(web::get().to(list_students)))
        .service(
            web::resource("/teacher/student-files/{email}").route(web::get().to(student_files)),
        );
}
