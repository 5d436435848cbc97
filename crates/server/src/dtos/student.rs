use chrono::NaiveDate;
use database::entities::enrollments::EnrollmentStatus;
use database::services::student::{
    AdvisorBundle, EnrollmentDetailRow, StudentDetailBundle, StudentRow,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct StudentQueryParams {
    pub year: Option<i64>,
    pub min_grade: Option<f64>,
    pub max_grade: Option<f64>,
    pub program_id: Option<i32>,
    pub department_id: Option<i32>,
    pub graduation_status: Option<bool>,
    pub unregistered: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub student_id: i32,
    pub name: String,
    pub email: String,
    pub year: i32,
    pub current_grade: f64,
    pub program: Option<String>,
    pub advisor: Option<String>,
    pub enrollment_count: u64,
    pub courses_enrolled: Vec<String>,
    pub graduation_status: bool,
    pub disciplinary_record: bool,
}

impl From<StudentRow> for StudentResponse {
    fn from(row: StudentRow) -> Self {
        StudentResponse {
            student_id: row.student.id,
            name: row.student.name,
            email: row.student.email,
            year: row.student.year_of_study,
            current_grade: row.student.current_grades,
            program: row.program.map(|p| p.name),
            advisor: row.advisor.map(|a| a.name),
            enrollment_count: row.enrollment_count,
            courses_enrolled: row.course_codes,
            graduation_status: row.student.graduation_status,
            disciplinary_record: row.student.disciplinary_record,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProgramDetails {
    pub program_id: i32,
    pub program_name: String,
    pub degree_awarded: Option<String>,
    pub duration: i32,
    pub department: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdvisorDetails {
    pub advisor_id: i32,
    pub advisor_name: String,
    pub advisor_email: String,
    pub advisor_department: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentDetail {
    pub enrollment_id: i32,
    pub course_code: Option<String>,
    pub course_name: Option<String>,
    pub course_credits: Option<i32>,
    pub course_level: Option<String>,
    pub semester: Option<String>,
    pub year: Option<i32>,
    pub lecturer: Option<String>,
    pub enrollment_date: NaiveDate,
    pub enrollment_grade: Option<f64>,
    pub status: String,
}

impl From<EnrollmentDetailRow> for EnrollmentDetail {
    fn from(row: EnrollmentDetailRow) -> Self {
        EnrollmentDetail {
            enrollment_id: row.enrollment.id,
            course_code: row.course.as_ref().map(|c| c.code.clone()),
            course_name: row.course.as_ref().map(|c| c.name.clone()),
            course_credits: row.course.as_ref().map(|c| c.credits),
            course_level: row.course.map(|c| c.level),
            semester: row.semester,
            year: row.year,
            lecturer: row.lecturer_name,
            enrollment_date: row.enrollment.enrollment_date,
            enrollment_grade: row.enrollment.grade,
            status: row.enrollment.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDetailResponse {
    pub student_id: i32,
    pub name: String,
    pub email: String,
    pub year: i32,
    pub current_grade: f64,
    pub program_details: Option<ProgramDetails>,
    pub advisor_details: Option<AdvisorDetails>,
    pub enrollment_count: u64,
    pub total_enrolled_credits: i64,
    pub completed_credits: i64,
    pub calculated_gpa: Option<f64>,
    pub active_enrollment_count: u64,
    pub active_enrollments: Vec<EnrollmentDetail>,
    pub completed_enrollment_count: u64,
    pub completed_enrollments: Vec<EnrollmentDetail>,
    pub withdrawn_enrollment_count: u64,
    pub withdrawn_enrollments: Vec<EnrollmentDetail>,
    pub failed_enrollment_count: u64,
    pub failed_enrollments: Vec<EnrollmentDetail>,
    pub graduation_status: bool,
    pub disciplinary_record: bool,
}

/// Mean of non-null grades over completed enrollments, rounded to two
/// decimals. `None` when no completed enrollment carries a grade.
fn calculated_gpa(enrollments: &[EnrollmentDetailRow]) -> Option<f64> {
    let grades: Vec<f64> = enrollments
        .iter()
        .filter(|row| row.enrollment.status == EnrollmentStatus::Completed)
        .filter_map(|row| row.enrollment.grade)
        .collect();

    if grades.is_empty() {
        return None;
    }
    let mean = grades.iter().sum::<f64>() / grades.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}

impl From<StudentDetailBundle> for StudentDetailResponse {
    fn from(bundle: StudentDetailBundle) -> Self {
        let gpa = calculated_gpa(&bundle.enrollments);

        let total_enrolled_credits: i64 = bundle
            .enrollments
            .iter()
            .filter_map(|row| row.course.as_ref())
            .map(|course| course.credits as i64)
            .sum();
        let completed_credits: i64 = bundle
            .enrollments
            .iter()
            .filter(|row| row.enrollment.status == EnrollmentStatus::Completed)
            .filter_map(|row| row.course.as_ref())
            .map(|course| course.credits as i64)
            .sum();

        let enrollment_count = bundle.enrollments.len() as u64;
        let mut grouped: [Vec<EnrollmentDetail>; 4] = Default::default();
        for row in bundle.enrollments {
            let bucket = match row.enrollment.status {
                EnrollmentStatus::Active => 0,
                EnrollmentStatus::Completed => 1,
                EnrollmentStatus::Withdrawn => 2,
                EnrollmentStatus::Failed => 3,
            };
            grouped[bucket].push(EnrollmentDetail::from(row));
        }
        let [active, completed, withdrawn, failed] = grouped;

        let program_details = bundle.program.map(|program| ProgramDetails {
            program_id: program.id,
            program_name: program.name,
            degree_awarded: program.degree_awarded,
            duration: program.duration,
            department: bundle.program_department,
        });
        let advisor_details = bundle.advisor.map(|advisor| AdvisorDetails {
            advisor_id: advisor.id,
            advisor_name: advisor.name,
            advisor_email: advisor.email,
            advisor_department: bundle.advisor_department,
        });

        StudentDetailResponse {
            student_id: bundle.student.id,
            name: bundle.student.name,
            email: bundle.student.email,
            year: bundle.student.year_of_study,
            current_grade: bundle.student.current_grades,
            program_details,
            advisor_details,
            enrollment_count,
            total_enrolled_credits,
            completed_credits,
            calculated_gpa: gpa,
            active_enrollment_count: active.len() as u64,
            active_enrollments: active,
            completed_enrollment_count: completed.len() as u64,
            completed_enrollments: completed,
            withdrawn_enrollment_count: withdrawn.len() as u64,
            withdrawn_enrollments: withdrawn,
            failed_enrollment_count: failed.len() as u64,
            failed_enrollments: failed,
            graduation_status: bundle.student.graduation_status,
            disciplinary_record: bundle.student.disciplinary_record,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdvisorResponse {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub areas_of_expertise: Vec<String>,
    pub research_areas: Vec<String>,
    pub academic_qualifications: String,
}

impl From<AdvisorBundle> for AdvisorResponse {
    fn from(bundle: AdvisorBundle) -> Self {
        AdvisorResponse {
            name: bundle.lecturer.name,
            email: bundle.lecturer.email,
            department: bundle.department,
            areas_of_expertise: bundle.lecturer.areas_of_expertise,
            research_areas: bundle.lecturer.research_interests,
            academic_qualifications: bundle.lecturer.academic_qualifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::entities::{courses, enrollments, programs, students};

    fn student() -> students::Model {
        students::Model {
            id: 1,
            name: "John Doe".into(),
            email: "john.doe@student.uni.ac.uk".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 15).unwrap(),
            year_of_study: 2,
            current_grades: 75.5,
            graduation_status: false,
            disciplinary_record: false,
            program_id: Some(1),
            advisor_id: None,
        }
    }

    fn enrollment_row(
        id: i32,
        status: EnrollmentStatus,
        grade: Option<f64>,
        credits: i32,
    ) -> EnrollmentDetailRow {
        EnrollmentDetailRow {
            enrollment: enrollments::Model {
                id,
                student_id: 1,
                offering_id: id,
                enrollment_date: NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(),
                grade,
                status,
            },
            course: Some(courses::Model {
                id,
                code: format!("CS{id:03}"),
                name: "Course".into(),
                description: "".into(),
                level: "Undergraduate".into(),
                credits,
                schedule: None,
                department_id: None,
            }),
            lecturer_name: Some("Dr. Alice Smith".into()),
            semester: Some("Fall".into()),
            year: Some(2025),
        }
    }

    fn bundle(enrollments: Vec<EnrollmentDetailRow>) -> StudentDetailBundle {
        StudentDetailBundle {
            student: student(),
            program: Some(programs::Model {
                id: 1,
                name: "Computer Science BSc".into(),
                degree_awarded: Some("Bachelor of Science".into()),
                duration: 3,
                course_requirements: None,
                enrollment_details: None,
                department_id: Some(1),
            }),
            program_department: Some("Computer Science".into()),
            advisor: None,
            advisor_department: None,
            enrollments,
        }
    }

    #[test]
    fn gpa_is_null_without_graded_completed_enrollments() {
        let detail = StudentDetailResponse::from(bundle(vec![
            enrollment_row(1, EnrollmentStatus::Active, None, 15),
            enrollment_row(2, EnrollmentStatus::Completed, None, 20),
        ]));
        assert_eq!(detail.calculated_gpa, None);
    }

    #[test]
    fn gpa_averages_completed_grades_to_two_decimals() {
        let detail = StudentDetailResponse::from(bundle(vec![
            enrollment_row(1, EnrollmentStatus::Completed, Some(70.0), 15),
            enrollment_row(2, EnrollmentStatus::Completed, Some(71.5), 20),
            // active grades never count towards the GPA
            enrollment_row(3, EnrollmentStatus::Active, Some(10.0), 15),
        ]));
        assert_eq!(detail.calculated_gpa, Some(70.75));
    }

    #[test]
    fn credits_are_summed_per_group() {
        let detail = StudentDetailResponse::from(bundle(vec![
            enrollment_row(1, EnrollmentStatus::Active, None, 15),
            enrollment_row(2, EnrollmentStatus::Completed, Some(80.0), 20),
            enrollment_row(3, EnrollmentStatus::Withdrawn, None, 10),
        ]));
        assert_eq!(detail.total_enrolled_credits, 45);
        assert_eq!(detail.completed_credits, 20);
        assert_eq!(detail.active_enrollment_count, 1);
        assert_eq!(detail.withdrawn_enrollment_count, 1);
        assert_eq!(detail.failed_enrollment_count, 0);
        assert_eq!(detail.enrollment_count, 3);
    }

    #[test]
    fn program_details_carry_the_department_name() {
        let detail = StudentDetailResponse::from(bundle(vec![]));
        let program = detail.program_details.expect("program should be present");
        assert_eq!(program.program_name, "Computer Science BSc");
        assert_eq!(program.department.as_deref(), Some("Computer Science"));
        assert!(detail.advisor_details.is_none());
    }
}
