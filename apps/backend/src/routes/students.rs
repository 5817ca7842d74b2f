//! Student roster CRUD routes.
//!
//! Every mutation invalidates the admin stats snapshot after its
//! transaction has committed, so the next stats read recomputes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::entities::students;
use crate::error::AppError;
use crate::http::envelope;
use crate::repos::students::StudentPatch;
use crate::services::{stats, students as student_service};
use crate::state::app_state::AppState;

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;
const DEFAULT_SECTION: &str = "A";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub name: Option<String>,
    pub grade: Option<i32>,
    pub section: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub grade: Option<i32>,
    pub section: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub grade: i32,
    pub section: String,
}

impl From<&students::Model> for StudentResponse {
    fn from(s: &students::Model) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            grade: s.grade,
            section: s.section.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize)]
pub struct StudentListResponse {
    pub students: Vec<StudentResponse>,
    pub meta: PageMeta,
}

async fn list(
    query: web::Query<ListQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 100);

    let result = student_service::list(&state, page, limit).await?;
    let total_pages = result.total.div_ceil(limit);

    Ok(envelope::ok(
        StudentListResponse {
            students: result.students.iter().map(StudentResponse::from).collect(),
            meta: PageMeta {
                total: result.total,
                page,
                limit,
                total_pages,
            },
        },
        "Students fetched successfully",
    ))
}

async fn get(path: web::Path<i64>, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let student = student_service::get(&state, path.into_inner()).await?;
    Ok(envelope::ok(
        StudentResponse::from(&student),
        "Student fetched successfully",
    ))
}

async fn create(
    body: web::Json<CreateStudentRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let name = body
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::invalid("Name and grade are required"))?;
    let grade = body
        .grade
        .ok_or_else(|| AppError::invalid("Name and grade are required"))?;
    let section = body
        .section
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SECTION);

    let student =
        student_service::create(&state, name.to_string(), grade, section.to_string()).await?;
    stats::invalidate(state.cache()).await;

    Ok(envelope::created(
        StudentResponse::from(&student),
        "Student created successfully",
    ))
}

async fn update(
    path: web::Path<i64>,
    body: web::Json<UpdateStudentRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let patch = StudentPatch {
        name: body.name,
        grade: body.grade,
        section: body.section,
    };
    if patch.is_empty() {
        return Err(AppError::invalid("No fields to update"));
    }

    let student = student_service::update(&state, path.into_inner(), patch).await?;
    stats::invalidate(state.cache()).await;

    Ok(envelope::ok(
        StudentResponse::from(&student),
        "Student updated successfully",
    ))
}

async fn remove(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    student_service::remove(&state, path.into_inner()).await?;
    stats::invalidate(state.cache()).await;

    Ok(envelope::ok(
        serde_json::Value::Null,
        "Student deleted successfully",
    ))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/students")
            .route(web::get().to(list))
            .route(web::post().to(create)),
    )
    .service(
        web::resource("/api/students/{id}")
            .route(web::get().to(get))
            .route(web::patch().to(update))
            .route(web::delete().to(remove)),
    );
}
