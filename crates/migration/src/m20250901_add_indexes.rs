use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Department lookups fan out from almost every listing endpoint
        manager
            .create_index(
                Index::create()
                    .name("idx_lecturers_department_id")
                    .table(Lecturers::Table)
                    .col(Lecturers::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_department_id")
                    .table(Courses::Table)
                    .col(Courses::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_programs_department_id")
                    .table(Programs::Table)
                    .col(Programs::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_non_academic_staff_department_id")
                    .table(NonAcademicStaff::Table)
                    .col(NonAcademicStaff::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_program_id")
                    .table(Students::Table)
                    .col(Students::ProgramId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_advisor_id")
                    .table(Students::Table)
                    .col(Students::AdvisorId)
                    .to_owned(),
            )
            .await?;

        // Offerings are joined from both the course and the lecturer side
        manager
            .create_index(
                Index::create()
                    .name("idx_course_offerings_course_id")
                    .table(CourseOfferings::Table)
                    .col(CourseOfferings::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_offerings_lecturer_id")
                    .table(CourseOfferings::Table)
                    .col(CourseOfferings::LecturerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_student_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_offering_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::OfferingId)
                    .to_owned(),
            )
            .await?;

        // Roster and unregistered-student queries filter on status
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_status")
                    .table(Enrollments::Table)
                    .col(Enrollments::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_enrollment_date")
                    .table(Enrollments::Table)
                    .col(Enrollments::EnrollmentDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_research_projects_principal_investigator_id")
                    .table(ResearchProjects::Table)
                    .col(ResearchProjects::PrincipalInvestigatorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_team_members_project_id")
                    .table(ProjectTeamMembers::Table)
                    .col(ProjectTeamMembers::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        manager
            .drop_index(
                Index::drop()
                    .name("idx_project_team_members_project_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_research_projects_principal_investigator_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_enrollments_enrollment_date")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_enrollments_status").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_enrollments_offering_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_enrollments_student_id").to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_offerings_lecturer_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_offerings_course_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_students_advisor_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_students_program_id").to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_non_academic_staff_department_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_programs_department_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_courses_department_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_lecturers_department_id").to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Lecturers {
    Table,
    DepartmentId,
}

#[derive(Iden)]
enum Courses {
    Table,
    DepartmentId,
}

#[derive(Iden)]
enum Programs {
    Table,
    DepartmentId,
}

#[derive(Iden)]
enum NonAcademicStaff {
    Table,
    DepartmentId,
}

#[derive(Iden)]
enum Students {
    Table,
    ProgramId,
    AdvisorId,
}

#[derive(Iden)]
enum CourseOfferings {
    Table,
    CourseId,
    LecturerId,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    StudentId,
    OfferingId,
    Status,
    EnrollmentDate,
}

#[derive(Iden)]
enum ResearchProjects {
    Table,
    PrincipalInvestigatorId,
}

#[derive(Iden)]
enum ProjectTeamMembers {
    Table,
    ProjectId,
}
