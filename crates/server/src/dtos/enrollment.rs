use crate::dtos::course::CourseResponse;
use chrono::NaiveDate;
use database::services::enrollment::EnrollmentRow;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct EnrollmentQueryParams {
    pub course_code: Option<String>,
    pub student_id: Option<i32>,
    pub lecturer_id: Option<i32>,
    pub semester: Option<String>,
    pub year: Option<i32>,
    pub status: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub has_grade: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentStudent {
    pub student_id: i32,
    pub name: String,
    pub year: i32,
    pub program: Option<String>,
    pub advisor: Option<String>,
    pub enrollment_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentLecturer {
    pub lecturer_id: i32,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub academic_qualifications: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    pub enrollment_id: i32,
    pub student: EnrollmentStudent,
    pub course: CourseResponse,
    pub lecturer: EnrollmentLecturer,
    pub enrollment_date: NaiveDate,
    pub grade: Option<f64>,
    pub status: String,
}

impl From<EnrollmentRow> for EnrollmentResponse {
    fn from(row: EnrollmentRow) -> Self {
        EnrollmentResponse {
            enrollment_id: row.enrollment.id,
            student: EnrollmentStudent {
                student_id: row.student.id,
                name: row.student.name,
                year: row.student.year_of_study,
                program: row.student_program,
                advisor: row.student_advisor,
                enrollment_count: row.student_enrollment_count,
            },
            course: CourseResponse::new(row.course, row.course_stats),
            lecturer: EnrollmentLecturer {
                lecturer_id: row.lecturer.id,
                name: row.lecturer.name,
                email: row.lecturer.email,
                department: row.lecturer_department,
                academic_qualifications: row.lecturer.academic_qualifications,
            },
            enrollment_date: row.enrollment.enrollment_date,
            grade: row.enrollment.grade,
            status: row.enrollment.status.as_str().to_string(),
        }
    }
}
