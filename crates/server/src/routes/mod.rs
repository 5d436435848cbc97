pub mod course;
pub mod department;
pub mod enrollment;
pub mod health;
pub mod lecturer;
pub mod root;
pub mod staff;
pub mod student;

use crate::AppState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn router(state: AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(root::root))
        .routes(routes!(health::health))
        .routes(routes!(student::get_students))
        .routes(routes!(student::get_student_by_id))
        .routes(routes!(student::get_student_advisor))
        .routes(routes!(lecturer::get_lecturers))
        .routes(routes!(lecturer::get_lecturer_by_id))
        .routes(routes!(lecturer::get_lecturer_advisees))
        .routes(routes!(course::get_courses))
        .routes(routes!(course::get_course_by_code))
        .routes(routes!(enrollment::get_enrollments))
        .routes(routes!(department::get_departments))
        .routes(routes!(department::get_department_by_id))
        .routes(routes!(staff::get_staff))
        .with_state(state)
}
