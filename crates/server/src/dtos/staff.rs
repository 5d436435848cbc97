use database::services::staff::StaffRow;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct StaffQueryParams {
    pub department_id: Option<i32>,
    pub job_title: Option<String>,
    pub employment_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StaffResponse {
    pub staff_id: i32,
    pub name: String,
    pub job_title: Option<String>,
    pub employment_type: String,
    pub department: Option<String>,
}

impl From<StaffRow> for StaffResponse {
    fn from(row: StaffRow) -> Self {
        StaffResponse {
            staff_id: row.staff.id,
            name: row.staff.name,
            job_title: row.staff.job_title,
            employment_type: row.staff.employment_type,
            department: row.department,
        }
    }
}
