use crate::AppState;
use crate::dtos::course::{
    CourseDetailParams, CourseDetailResponse, CourseQueryParams, CourseResponse,
};
use crate::error::ApiError;
use crate::utils::validation::validate_page;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use database::services::course::{CourseFilters, CourseService};

/// List courses with optional filtering
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "List of courses", body = Vec<CourseResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "No courses match the filters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseQueryParams>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let page = validate_page(params.limit, params.offset)?;

    let filters = CourseFilters {
        department_id: params.department_id,
        level: params.level,
        min_credits: params.min_credits,
        max_credits: params.max_credits,
        lecturer_id: params.lecturer_id,
        student_id: params.student_id,
        limit: page.limit,
        offset: page.offset,
    };

    let rows = CourseService::list(&state.db, &filters).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound(
            "No courses found matching the criteria".into(),
        ));
    }

    Ok(Json(rows.into_iter().map(CourseResponse::from).collect()))
}

/// Get a course by its code, detailed by default
#[utoipa::path(
    get,
    path = "/api/courses/{course_code}",
    params(
        ("course_code" = String, Path, description = "Course code, case-insensitive"),
        CourseDetailParams
    ),
    responses(
        (status = 200, description = "Course found", body = CourseDetailResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_course_by_code(
    State(state): State<AppState>,
    Path(course_code): Path<String>,
    Query(params): Query<CourseDetailParams>,
) -> Result<Response, ApiError> {
    let bundle = CourseService::find_by_code(&state.db, &course_code)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Course with code {course_code} not found")))?;

    if params.detailed.unwrap_or(true) {
        return Ok(Json(CourseDetailResponse::from(bundle)).into_response());
    }

    let stats = CourseService::load_stats(&state.db, &[bundle.course.id])
        .await?
        .remove(&bundle.course.id)
        .unwrap_or_default();
    Ok(Json(CourseResponse::new(bundle.course, stats)).into_response())
}
