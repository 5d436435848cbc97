use database::services::department::{
    DepartmentDetailBundle, DepartmentLecturer, DepartmentProgram, DepartmentRow,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentResponse {
    pub department_id: i32,
    pub name: String,
    pub faculty: String,
    pub research_areas: Vec<String>,
    pub lecturer_count: u64,
    pub course_count: u64,
    pub program_count: u64,
}

impl From<DepartmentRow> for DepartmentResponse {
    fn from(row: DepartmentRow) -> Self {
        DepartmentResponse {
            department_id: row.department.id,
            name: row.department.name,
            faculty: row.department.faculty,
            research_areas: row.department.research_areas,
            lecturer_count: row.lecturer_count,
            course_count: row.course_count,
            program_count: row.program_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LecturerInDepartment {
    pub lecturer_id: i32,
    pub name: String,
    pub email: String,
    pub employment_type: String,
    pub areas_of_expertise: Vec<String>,
    pub course_load: u64,
    pub research_interests: Vec<String>,
}

impl From<DepartmentLecturer> for LecturerInDepartment {
    fn from(entry: DepartmentLecturer) -> Self {
        LecturerInDepartment {
            lecturer_id: entry.lecturer.id,
            name: entry.lecturer.name,
            email: entry.lecturer.email,
            employment_type: entry.lecturer.employment_type,
            areas_of_expertise: entry.lecturer.areas_of_expertise,
            course_load: entry.course_load,
            research_interests: entry.lecturer.research_interests,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseInDepartment {
    pub course_id: i32,
    pub code: String,
    pub name: String,
    pub level: String,
    pub credits: i32,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProgramInDepartment {
    pub program_id: i32,
    pub name: String,
    pub degree_awarded: Option<String>,
    pub duration: i32,
    pub enrolled_students: u64,
}

impl From<DepartmentProgram> for ProgramInDepartment {
    fn from(entry: DepartmentProgram) -> Self {
        ProgramInDepartment {
            program_id: entry.program.id,
            name: entry.program.name,
            degree_awarded: entry.program.degree_awarded,
            duration: entry.program.duration,
            enrolled_students: entry.enrolled_students,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StaffInDepartment {
    pub staff_id: i32,
    pub name: String,
    pub job_title: Option<String>,
    pub employment_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentDetailResponse {
    pub department_id: i32,
    pub name: String,
    pub faculty: String,
    pub research_areas: Vec<String>,
    pub lecturer_count: u64,
    pub lecturers: Vec<LecturerInDepartment>,
    pub course_count: u64,
    pub courses: Vec<CourseInDepartment>,
    pub program_count: u64,
    pub programs: Vec<ProgramInDepartment>,
    pub staff_count: u64,
    pub staff_members: Vec<StaffInDepartment>,
}

impl From<DepartmentDetailBundle> for DepartmentDetailResponse {
    fn from(bundle: DepartmentDetailBundle) -> Self {
        DepartmentDetailResponse {
            department_id: bundle.department.id,
            name: bundle.department.name,
            faculty: bundle.department.faculty,
            research_areas: bundle.department.research_areas,
            lecturer_count: bundle.lecturers.len() as u64,
            lecturers: bundle
                .lecturers
                .into_iter()
                .map(LecturerInDepartment::from)
                .collect(),
            course_count: bundle.courses.len() as u64,
            courses: bundle
                .courses
                .into_iter()
                .map(|course| CourseInDepartment {
                    course_id: course.id,
                    code: course.code,
                    name: course.name,
                    level: course.level,
                    credits: course.credits,
                    description: course.description,
                })
                .collect(),
            program_count: bundle.programs.len() as u64,
            programs: bundle
                .programs
                .into_iter()
                .map(ProgramInDepartment::from)
                .collect(),
            staff_count: bundle.staff_members.len() as u64,
            staff_members: bundle
                .staff_members
                .into_iter()
                .map(|staff| StaffInDepartment {
                    staff_id: staff.id,
                    name: staff.name,
                    job_title: staff.job_title,
                    employment_type: staff.employment_type,
                })
                .collect(),
        }
    }
}
