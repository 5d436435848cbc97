use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Students", description = "Student record endpoints"),
        (name = "Lecturers", description = "Lecturer record endpoints"),
        (name = "Courses", description = "Course catalog endpoints"),
        (name = "Enrollments", description = "Enrollment record endpoints"),
        (name = "Departments", description = "Department record endpoints"),
        (name = "Staff", description = "Non-academic staff endpoints"),
        (name = "Health", description = "Liveness endpoints"),
    ),
    info(
        title = "University Records API",
        version = "1.0.0",
        description = "University record management API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
