use crate::AppState;
use crate::dtos::student::{
    AdvisorResponse, StudentDetailResponse, StudentQueryParams, StudentResponse,
};
use crate::error::ApiError;
use crate::utils::validation::{parse_id, validate_grade_bound, validate_page, validate_student_year};
use axum::Json;
use axum::extract::{Path, Query, State};
use database::services::student::{AdvisorLookup, StudentFilters, StudentService};

/// List students with optional filtering
#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentQueryParams),
    responses(
        (status = 200, description = "List of students", body = Vec<StudentResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "No students match the filters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn get_students(
    State(state): State<AppState>,
    Query(params): Query<StudentQueryParams>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let page = validate_page(params.limit, params.offset)?;
    validate_grade_bound(params.min_grade, "min_grade")?;
    validate_grade_bound(params.max_grade, "max_grade")?;
    let year = validate_student_year(params.year)?;

    let filters = StudentFilters {
        year,
        min_grade: params.min_grade,
        max_grade: params.max_grade,
        program_id: params.program_id,
        department_id: params.department_id,
        graduation_status: params.graduation_status,
        unregistered: params.unregistered.unwrap_or(false),
        limit: page.limit,
        offset: page.offset,
    };

    let rows = StudentService::list(&state.db, &filters).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound(
            "No students found matching the criteria".into(),
        ));
    }

    Ok(Json(rows.into_iter().map(StudentResponse::from).collect()))
}

/// Get detailed information about a specific student
#[utoipa::path(
    get,
    path = "/api/students/{student_id}",
    params(
        ("student_id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student found", body = StudentDetailResponse),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn get_student_by_id(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<StudentDetailResponse>, ApiError> {
    let student_id = parse_id(&student_id)?;

    let bundle = StudentService::find_detailed(&state.db, student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Student with ID {student_id} not found")))?;

    Ok(Json(StudentDetailResponse::from(bundle)))
}

/// Get the advisor assigned to a specific student
#[utoipa::path(
    get,
    path = "/api/students/{student_id}/advisor",
    params(
        ("student_id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Advisor found", body = AdvisorResponse),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "Student or advisor not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn get_student_advisor(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<AdvisorResponse>, ApiError> {
    let student_id = parse_id(&student_id)?;

    match StudentService::find_advisor(&state.db, student_id).await? {
        AdvisorLookup::StudentNotFound => Err(ApiError::NotFound(format!(
            "Student with ID {student_id} not found"
        ))),
        AdvisorLookup::NoAdvisor => Err(ApiError::NotFound(
            "No advisor assigned to this student".into(),
        )),
        AdvisorLookup::Found(bundle) => Ok(Json(AdvisorResponse::from(bundle))),
    }
}
