use database::entities::courses;
use database::services::course::{
    CourseDetailBundle, CourseRow, CourseStats, EnrolledStudent, OfferingRow, TeachingLecturer,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseQueryParams {
    pub department_id: Option<i32>,
    pub level: Option<String>,
    pub min_credits: Option<i32>,
    pub max_credits: Option<i32>,
    pub lecturer_id: Option<i32>,
    pub student_id: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseDetailParams {
    /// Expand offerings and rosters; defaults to true
    pub detailed: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub course_id: i32,
    pub code: String,
    pub name: String,
    pub description: String,
    pub level: String,
    pub credits: i32,
    pub schedule: Option<String>,
    pub department_id: Option<i32>,
    pub student_count: u64,
    pub lecturer_count: u64,
}

impl CourseResponse {
    pub fn new(course: courses::Model, stats: CourseStats) -> Self {
        CourseResponse {
            course_id: course.id,
            code: course.code,
            name: course.name,
            description: course.description,
            level: course.level,
            credits: course.credits,
            schedule: course.schedule,
            department_id: course.department_id,
            student_count: stats.student_count,
            lecturer_count: stats.lecturer_count,
        }
    }
}

impl From<CourseRow> for CourseResponse {
    fn from(row: CourseRow) -> Self {
        CourseResponse::new(row.course, row.stats)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OfferingResponse {
    pub offering_id: i32,
    pub semester: Option<String>,
    pub year: Option<i32>,
    pub lecturer: Option<String>,
}

impl From<OfferingRow> for OfferingResponse {
    fn from(row: OfferingRow) -> Self {
        OfferingResponse {
            offering_id: row.offering.id,
            semester: row.offering.semester,
            year: row.offering.year,
            lecturer: row.lecturer_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentInCourse {
    pub student_id: i32,
    pub name: String,
    pub year: i32,
    pub status: String,
}

impl From<EnrolledStudent> for StudentInCourse {
    fn from(enrolled: EnrolledStudent) -> Self {
        StudentInCourse {
            student_id: enrolled.student.id,
            name: enrolled.student.name,
            year: enrolled.student.year_of_study,
            status: enrolled.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LecturerInCourse {
    pub lecturer_id: i32,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
}

impl From<TeachingLecturer> for LecturerInCourse {
    fn from(teaching: TeachingLecturer) -> Self {
        LecturerInCourse {
            lecturer_id: teaching.lecturer.id,
            name: teaching.lecturer.name,
            email: teaching.lecturer.email,
            department: teaching.department,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    pub course_id: i32,
    pub code: String,
    pub name: String,
    pub description: String,
    pub level: String,
    pub credits: i32,
    pub schedule: Option<String>,
    pub department_id: Option<i32>,
    pub offerings: Vec<OfferingResponse>,
    pub student_count: u64,
    pub students: Vec<StudentInCourse>,
    pub lecturer_count: u64,
    pub lecturers: Vec<LecturerInCourse>,
}

impl From<CourseDetailBundle> for CourseDetailResponse {
    fn from(bundle: CourseDetailBundle) -> Self {
        CourseDetailResponse {
            course_id: bundle.course.id,
            code: bundle.course.code,
            name: bundle.course.name,
            description: bundle.course.description,
            level: bundle.course.level,
            credits: bundle.course.credits,
            schedule: bundle.course.schedule,
            department_id: bundle.course.department_id,
            offerings: bundle
                .offerings
                .into_iter()
                .map(OfferingResponse::from)
                .collect(),
            student_count: bundle.students.len() as u64,
            students: bundle
                .students
                .into_iter()
                .map(StudentInCourse::from)
                .collect(),
            lecturer_count: bundle.lecturers.len() as u64,
            lecturers: bundle
                .lecturers
                .into_iter()
                .map(LecturerInCourse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_without_offerings_serializes_empty_rosters() {
        let detail = CourseDetailResponse::from(CourseDetailBundle {
            course: courses::Model {
                id: 1,
                code: "CS101".into(),
                name: "Introduction to Programming".into(),
                description: "Fundamentals of programming".into(),
                level: "Undergraduate".into(),
                credits: 15,
                schedule: None,
                department_id: Some(1),
            },
            offerings: vec![],
            students: vec![],
            lecturers: vec![],
        });

        assert_eq!(detail.student_count, 0);
        assert!(detail.students.is_empty());
        assert_eq!(detail.lecturer_count, 0);
        assert!(detail.offerings.is_empty());
    }
}
