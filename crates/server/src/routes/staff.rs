use crate::AppState;
use crate::dtos::staff::{StaffQueryParams, StaffResponse};
use crate::error::ApiError;
use crate::utils::validation::validate_page;
use axum::Json;
use axum::extract::{Query, State};
use database::services::staff::{StaffFilters, StaffService};

/// List non-academic staff with optional filtering
#[utoipa::path(
    get,
    path = "/api/staff",
    params(StaffQueryParams),
    responses(
        (status = 200, description = "List of staff members", body = Vec<StaffResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "No staff match the filters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Staff"
)]
pub async fn get_staff(
    State(state): State<AppState>,
    Query(params): Query<StaffQueryParams>,
) -> Result<Json<Vec<StaffResponse>>, ApiError> {
    let page = validate_page(params.limit, params.offset)?;

    let filters = StaffFilters {
        department_id: params.department_id,
        job_title: params.job_title,
        employment_type: params.employment_type,
        limit: page.limit,
        offset: page.offset,
    };

    let rows = StaffService::list(&state.db, &filters).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound(
            "No staff found matching the criteria".into(),
        ));
    }

    Ok(Json(rows.into_iter().map(StaffResponse::from).collect()))
}
