use crate::AppState;
use crate::dtos::department::{DepartmentDetailResponse, DepartmentResponse};
use crate::error::ApiError;
use crate::utils::validation::parse_id;
use axum::Json;
use axum::extract::{Path, State};
use database::services::department::DepartmentService;

/// List all departments with lecturer, course and program counts
#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "List of departments", body = Vec<DepartmentResponse>),
        (status = 404, description = "No departments exist"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Departments"
)]
pub async fn get_departments(
    State(state): State<AppState>,
) -> Result<Json<Vec<DepartmentResponse>>, ApiError> {
    let rows = DepartmentService::list(&state.db).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound("No departments found".into()));
    }

    Ok(Json(
        rows.into_iter().map(DepartmentResponse::from).collect(),
    ))
}

/// Get detailed information about a specific department
#[utoipa::path(
    get,
    path = "/api/departments/{department_id}",
    params(
        ("department_id" = String, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department found", body = DepartmentDetailResponse),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "Department not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Departments"
)]
pub async fn get_department_by_id(
    State(state): State<AppState>,
    Path(department_id): Path<String>,
) -> Result<Json<DepartmentDetailResponse>, ApiError> {
    let department_id = parse_id(&department_id)?;

    let bundle = DepartmentService::find_detailed(&state.db, department_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Department with ID {department_id} not found"))
        })?;

    Ok(Json(DepartmentDetailResponse::from(bundle)))
}
