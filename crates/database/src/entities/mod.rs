pub mod course_offerings;
pub mod courses;
pub mod departments;
pub mod enrollments;
pub mod lecturers;
pub mod non_academic_staff;
pub mod programs;
pub mod project_team_members;
pub mod research_projects;
pub mod students;
