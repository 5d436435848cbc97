use crate::AppState;
use crate::dtos::enrollment::{EnrollmentQueryParams, EnrollmentResponse};
use crate::error::ApiError;
use crate::utils::validation::{parse_date, validate_page};
use axum::Json;
use axum::extract::{Query, State};
use database::entities::enrollments::EnrollmentStatus;
use database::services::enrollment::{EnrollmentFilters, EnrollmentService};

/// List enrollments with optional filtering
#[utoipa::path(
    get,
    path = "/api/enrollments",
    params(EnrollmentQueryParams),
    responses(
        (status = 200, description = "List of enrollments", body = Vec<EnrollmentResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "No enrollments match the filters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Enrollments"
)]
pub async fn get_enrollments(
    State(state): State<AppState>,
    Query(params): Query<EnrollmentQueryParams>,
) -> Result<Json<Vec<EnrollmentResponse>>, ApiError> {
    let page = validate_page(params.limit, params.offset)?;

    let status = match &params.status {
        Some(raw) => Some(EnrollmentStatus::parse(raw).ok_or_else(|| {
            ApiError::Validation(
                "status must be one of active, completed, failed, withdrawn".into(),
            )
        })?),
        None => None,
    };
    let from_date = params
        .from_date
        .as_deref()
        .map(|raw| parse_date(raw, "from_date"))
        .transpose()?;
    let to_date = params
        .to_date
        .as_deref()
        .map(|raw| parse_date(raw, "to_date"))
        .transpose()?;

    let filters = EnrollmentFilters {
        course_code: params.course_code,
        student_id: params.student_id,
        lecturer_id: params.lecturer_id,
        semester: params.semester,
        year: params.year,
        status,
        from_date,
        to_date,
        has_grade: params.has_grade,
        limit: page.limit,
        offset: page.offset,
    };

    let rows = EnrollmentService::list(&state.db, &filters).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound(
            "No enrollments found matching the criteria".into(),
        ));
    }

    Ok(Json(
        rows.into_iter().map(EnrollmentResponse::from).collect(),
    ))
}
