use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Tables in dependency order
        manager.create_table(departments_table()).await?;
        manager.create_table(lecturers_table()).await?;
        manager.create_table(courses_table()).await?;
        manager.create_table(programs_table()).await?;
        manager.create_table(students_table()).await?;
        manager.create_table(course_offerings_table()).await?;
        manager.create_table(enrollments_table()).await?;
        manager.create_table(non_academic_staff_table()).await?;
        manager.create_table(research_projects_table()).await?;
        manager.create_table(project_team_members_table()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(ProjectTeamMembers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ResearchProjects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(NonAcademicStaff::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseOfferings::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Programs::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Lecturers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;

        Ok(())
    }
}

fn departments_table() -> TableCreateStatement {
    Table::create()
        .table(Departments::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Departments::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Departments::Name)
                .string()
                .not_null()
                .unique_key(),
        )
        .col(ColumnDef::new(Departments::Faculty).string().not_null())
        .col(
            ColumnDef::new(Departments::ResearchAreas)
                .array(ColumnType::Text)
                .not_null(),
        )
        .to_owned()
}

fn lecturers_table() -> TableCreateStatement {
    Table::create()
        .table(Lecturers::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Lecturers::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Lecturers::Name).string().not_null())
        .col(
            ColumnDef::new(Lecturers::Email)
                .string()
                .not_null()
                .unique_key(),
        )
        .col(
            ColumnDef::new(Lecturers::AcademicQualifications)
                .string()
                .not_null(),
        )
        .col(ColumnDef::new(Lecturers::EmploymentType).string().not_null())
        .col(ColumnDef::new(Lecturers::ContractDetails).text())
        .col(
            ColumnDef::new(Lecturers::AreasOfExpertise)
                .array(ColumnType::Text)
                .not_null(),
        )
        .col(
            ColumnDef::new(Lecturers::CourseLoad)
                .integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Lecturers::ResearchInterests)
                .array(ColumnType::Text)
                .not_null(),
        )
        .col(
            ColumnDef::new(Lecturers::Publications)
                .array(ColumnType::Text)
                .not_null(),
        )
        .col(ColumnDef::new(Lecturers::DepartmentId).integer())
        .foreign_key(
            ForeignKey::create()
                .name("fk-lecturers-department_id")
                .from(Lecturers::Table, Lecturers::DepartmentId)
                .to(Departments::Table, Departments::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

fn courses_table() -> TableCreateStatement {
    Table::create()
        .table(Courses::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Courses::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Courses::Code)
                .string()
                .not_null()
                .unique_key(),
        )
        .col(ColumnDef::new(Courses::Name).string().not_null())
        .col(ColumnDef::new(Courses::Description).text().not_null())
        .col(ColumnDef::new(Courses::Level).string().not_null())
        .col(ColumnDef::new(Courses::Credits).integer().not_null())
        .col(ColumnDef::new(Courses::Schedule).string())
        .col(ColumnDef::new(Courses::DepartmentId).integer())
        .foreign_key(
            ForeignKey::create()
                .name("fk-courses-department_id")
                .from(Courses::Table, Courses::DepartmentId)
                .to(Departments::Table, Departments::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

fn programs_table() -> TableCreateStatement {
    Table::create()
        .table(Programs::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Programs::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Programs::Name).string().not_null())
        .col(ColumnDef::new(Programs::DegreeAwarded).string())
        .col(ColumnDef::new(Programs::Duration).integer().not_null())
        .col(ColumnDef::new(Programs::CourseRequirements).text())
        .col(ColumnDef::new(Programs::EnrollmentDetails).text())
        .col(ColumnDef::new(Programs::DepartmentId).integer())
        .foreign_key(
            ForeignKey::create()
                .name("fk-programs-department_id")
                .from(Programs::Table, Programs::DepartmentId)
                .to(Departments::Table, Departments::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

fn students_table() -> TableCreateStatement {
    Table::create()
        .table(Students::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Students::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Students::Name).string().not_null())
        .col(
            ColumnDef::new(Students::Email)
                .string()
                .not_null()
                .unique_key(),
        )
        .col(ColumnDef::new(Students::DateOfBirth).date().not_null())
        .col(
            ColumnDef::new(Students::YearOfStudy)
                .integer()
                .not_null()
                .check(Expr::col(Students::YearOfStudy).between(1, 10)),
        )
        .col(ColumnDef::new(Students::CurrentGrades).double().not_null())
        .col(
            ColumnDef::new(Students::GraduationStatus)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(Students::DisciplinaryRecord)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(Students::ProgramId).integer())
        .col(ColumnDef::new(Students::AdvisorId).integer())
        .foreign_key(
            ForeignKey::create()
                .name("fk-students-program_id")
                .from(Students::Table, Students::ProgramId)
                .to(Programs::Table, Programs::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk-students-advisor_id")
                .from(Students::Table, Students::AdvisorId)
                .to(Lecturers::Table, Lecturers::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

fn course_offerings_table() -> TableCreateStatement {
    Table::create()
        .table(CourseOfferings::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(CourseOfferings::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(CourseOfferings::CourseId).integer().not_null())
        .col(
            ColumnDef::new(CourseOfferings::LecturerId)
                .integer()
                .not_null(),
        )
        .col(ColumnDef::new(CourseOfferings::Semester).string())
        .col(ColumnDef::new(CourseOfferings::Year).integer())
        .foreign_key(
            ForeignKey::create()
                .name("fk-course_offerings-course_id")
                .from(CourseOfferings::Table, CourseOfferings::CourseId)
                .to(Courses::Table, Courses::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk-course_offerings-lecturer_id")
                .from(CourseOfferings::Table, CourseOfferings::LecturerId)
                .to(Lecturers::Table, Lecturers::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn enrollments_table() -> TableCreateStatement {
    Table::create()
        .table(Enrollments::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Enrollments::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Enrollments::StudentId).integer().not_null())
        .col(ColumnDef::new(Enrollments::OfferingId).integer().not_null())
        .col(
            ColumnDef::new(Enrollments::EnrollmentDate)
                .date()
                .not_null(),
        )
        .col(ColumnDef::new(Enrollments::Grade).double())
        .col(
            ColumnDef::new(Enrollments::Status)
                .string_len(20)
                .not_null()
                .default("active"),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk-enrollments-student_id")
                .from(Enrollments::Table, Enrollments::StudentId)
                .to(Students::Table, Students::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk-enrollments-offering_id")
                .from(Enrollments::Table, Enrollments::OfferingId)
                .to(CourseOfferings::Table, CourseOfferings::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn non_academic_staff_table() -> TableCreateStatement {
    Table::create()
        .table(NonAcademicStaff::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(NonAcademicStaff::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(NonAcademicStaff::Name).string().not_null())
        .col(ColumnDef::new(NonAcademicStaff::JobTitle).string())
        .col(
            ColumnDef::new(NonAcademicStaff::EmploymentType)
                .string()
                .not_null(),
        )
        .col(ColumnDef::new(NonAcademicStaff::DepartmentId).integer())
        .foreign_key(
            ForeignKey::create()
                .name("fk-non_academic_staff-department_id")
                .from(NonAcademicStaff::Table, NonAcademicStaff::DepartmentId)
                .to(Departments::Table, Departments::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

fn research_projects_table() -> TableCreateStatement {
    Table::create()
        .table(ResearchProjects::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(ResearchProjects::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(ResearchProjects::Title).string().not_null())
        .col(
            ColumnDef::new(ResearchProjects::FundingSources)
                .array(ColumnType::Text)
                .not_null(),
        )
        .col(
            ColumnDef::new(ResearchProjects::Publications)
                .array(ColumnType::Text)
                .not_null(),
        )
        .col(
            ColumnDef::new(ResearchProjects::Outcomes)
                .array(ColumnType::Text)
                .not_null(),
        )
        .col(ColumnDef::new(ResearchProjects::PrincipalInvestigatorId).integer())
        .foreign_key(
            ForeignKey::create()
                .name("fk-research_projects-principal_investigator_id")
                .from(
                    ResearchProjects::Table,
                    ResearchProjects::PrincipalInvestigatorId,
                )
                .to(Lecturers::Table, Lecturers::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

fn project_team_members_table() -> TableCreateStatement {
    Table::create()
        .table(ProjectTeamMembers::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(ProjectTeamMembers::LecturerId)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(ProjectTeamMembers::ProjectId)
                .integer()
                .not_null(),
        )
        .primary_key(
            Index::create()
                .col(ProjectTeamMembers::LecturerId)
                .col(ProjectTeamMembers::ProjectId),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk-project_team_members-lecturer_id")
                .from(ProjectTeamMembers::Table, ProjectTeamMembers::LecturerId)
                .to(Lecturers::Table, Lecturers::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk-project_team_members-project_id")
                .from(ProjectTeamMembers::Table, ProjectTeamMembers::ProjectId)
                .to(ResearchProjects::Table, ResearchProjects::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
    Name,
    Faculty,
    ResearchAreas,
}

#[derive(Iden)]
enum Lecturers {
    Table,
    Id,
    Name,
    Email,
    AcademicQualifications,
    EmploymentType,
    ContractDetails,
    AreasOfExpertise,
    CourseLoad,
    ResearchInterests,
    Publications,
    DepartmentId,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Code,
    Name,
    Description,
    Level,
    Credits,
    Schedule,
    DepartmentId,
}

#[derive(Iden)]
enum Programs {
    Table,
    Id,
    Name,
    DegreeAwarded,
    Duration,
    CourseRequirements,
    EnrollmentDetails,
    DepartmentId,
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
    Name,
    Email,
    DateOfBirth,
    YearOfStudy,
    CurrentGrades,
    GraduationStatus,
    DisciplinaryRecord,
    ProgramId,
    AdvisorId,
}

#[derive(Iden)]
enum CourseOfferings {
    Table,
    Id,
    CourseId,
    LecturerId,
    Semester,
    Year,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    OfferingId,
    EnrollmentDate,
    Grade,
    Status,
}

#[derive(Iden)]
enum NonAcademicStaff {
    Table,
    Id,
    Name,
    JobTitle,
    EmploymentType,
    DepartmentId,
}

#[derive(Iden)]
enum ResearchProjects {
    Table,
    Id,
    Title,
    FundingSources,
    Publications,
    Outcomes,
    PrincipalInvestigatorId,
}

#[derive(Iden)]
enum ProjectTeamMembers {
    Table,
    LecturerId,
    ProjectId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::sea_query::PostgresQueryBuilder;

    #[test]
    fn deleting_an_offering_or_student_cascades_to_enrollments() {
        let sql = enrollments_table().to_string(PostgresQueryBuilder);
        assert!(
            sql.contains(
                r#"FOREIGN KEY ("offering_id") REFERENCES "course_offerings" ("id") ON DELETE CASCADE"#
            ),
            "{sql}"
        );
        assert!(
            sql.contains(
                r#"FOREIGN KEY ("student_id") REFERENCES "students" ("id") ON DELETE CASCADE"#
            ),
            "{sql}"
        );
    }

    #[test]
    fn department_deletes_null_out_every_dependent() {
        for sql in [
            lecturers_table().to_string(PostgresQueryBuilder),
            courses_table().to_string(PostgresQueryBuilder),
            programs_table().to_string(PostgresQueryBuilder),
            non_academic_staff_table().to_string(PostgresQueryBuilder),
        ] {
            assert!(
                sql.contains(
                    r#"FOREIGN KEY ("department_id") REFERENCES "departments" ("id") ON DELETE SET NULL"#
                ),
                "{sql}"
            );
        }
    }

    #[test]
    fn team_memberships_cascade_from_both_sides() {
        let sql = project_team_members_table().to_string(PostgresQueryBuilder);
        assert_eq!(sql.matches("ON DELETE CASCADE").count(), 2, "{sql}");
    }
}
