use crate::AppState;
use crate::dtos::lecturer::{
    LecturerDetailResponse, LecturerQueryParams, LecturerResponse, TopSupervisorResponse,
};
use crate::dtos::student::StudentResponse;
use crate::error::ApiError;
use crate::utils::validation::{parse_id, validate_page};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use database::services::lecturer::{LecturerFilters, LecturerService};
use database::services::student::StudentService;

/// List lecturers with optional filtering, or ranked research supervisors
/// when `top_supervisors=true`
#[utoipa::path(
    get,
    path = "/api/lecturers",
    params(LecturerQueryParams),
    responses(
        (status = 200, description = "List of lecturers", body = Vec<LecturerResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "No lecturers match the filters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Lecturers"
)]
pub async fn get_lecturers(
    State(state): State<AppState>,
    Query(params): Query<LecturerQueryParams>,
) -> Result<Response, ApiError> {
    let page = validate_page(params.limit, params.offset)?;

    if params.top_supervisors.unwrap_or(false) {
        let ranked = LecturerService::list_top_supervisors(&state.db, page.limit, page.offset)
            .await?;
        if ranked.is_empty() {
            return Err(ApiError::NotFound("No research supervisors found".into()));
        }
        let body: Vec<TopSupervisorResponse> =
            ranked.into_iter().map(TopSupervisorResponse::from).collect();
        return Ok(Json(body).into_response());
    }

    let filters = LecturerFilters {
        department_id: params.department_id,
        expertise_area: params.expertise_area,
        research_area: params.research_area,
        employment_type: params.employment_type,
        min_course_load: params.min_course_load,
        max_course_load: params.max_course_load,
        limit: page.limit,
        offset: page.offset,
    };

    let rows = LecturerService::list(&state.db, &filters).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound(
            "No lecturers found matching the criteria".into(),
        ));
    }

    let body: Vec<LecturerResponse> = rows.into_iter().map(LecturerResponse::from).collect();
    Ok(Json(body).into_response())
}

/// Get detailed information about a specific lecturer
#[utoipa::path(
    get,
    path = "/api/lecturers/{lecturer_id}",
    params(
        ("lecturer_id" = String, Path, description = "Lecturer ID")
    ),
    responses(
        (status = 200, description = "Lecturer found", body = LecturerDetailResponse),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "Lecturer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Lecturers"
)]
pub async fn get_lecturer_by_id(
    State(state): State<AppState>,
    Path(lecturer_id): Path<String>,
) -> Result<Json<LecturerDetailResponse>, ApiError> {
    let lecturer_id = parse_id(&lecturer_id)?;

    let bundle = LecturerService::find_detailed(&state.db, lecturer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Lecturer with ID {lecturer_id} not found")))?;

    Ok(Json(LecturerDetailResponse::from(bundle)))
}

/// List the students advised by a specific lecturer
#[utoipa::path(
    get,
    path = "/api/lecturers/{lecturer_id}/advisees",
    params(
        ("lecturer_id" = String, Path, description = "Lecturer ID")
    ),
    responses(
        (status = 200, description = "Advised students", body = Vec<StudentResponse>),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "Lecturer not found or has no advisees"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Lecturers"
)]
pub async fn get_lecturer_advisees(
    State(state): State<AppState>,
    Path(lecturer_id): Path<String>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let lecturer_id = parse_id(&lecturer_id)?;

    let rows = StudentService::list_advisees(&state.db, lecturer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Lecturer with ID {lecturer_id} not found")))?;

    if rows.is_empty() {
        return Err(ApiError::NotFound("This lecturer has no advisees".into()));
    }

    Ok(Json(rows.into_iter().map(StudentResponse::from).collect()))
}
