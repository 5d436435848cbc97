use crate::entities::{
    course_offerings, courses, departments, lecturers, non_academic_staff, programs, students,
};
use futures::try_join;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct DepartmentRow {
    pub department: departments::Model,
    pub lecturer_count: u64,
    pub course_count: u64,
    pub program_count: u64,
}

#[derive(Debug, Clone)]
pub struct DepartmentLecturer {
    pub lecturer: lecturers::Model,
    pub course_load: u64,
}

#[derive(Debug, Clone)]
pub struct DepartmentProgram {
    pub program: programs::Model,
    pub enrolled_students: u64,
}

#[derive(Debug, Clone)]
pub struct DepartmentDetailBundle {
    pub department: departments::Model,
    pub lecturers: Vec<DepartmentLecturer>,
    pub courses: Vec<courses::Model>,
    pub programs: Vec<DepartmentProgram>,
    pub staff_members: Vec<non_academic_staff::Model>,
}

pub struct DepartmentService;

impl DepartmentService {
    /// All departments with lecturer/course/program counts
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<DepartmentRow>, DbErr> {
        let department_models = departments::Entity::find()
            .order_by_asc(departments::Column::Id)
            .all(db)
            .await?;

        if department_models.is_empty() {
            return Ok(vec![]);
        }

        let lecturer_counts = lecturers::Entity::find()
            .select_only()
            .column(lecturers::Column::DepartmentId)
            .column_as(lecturers::Column::Id.count(), "count")
            .filter(lecturers::Column::DepartmentId.is_not_null())
            .group_by(lecturers::Column::DepartmentId)
            .into_tuple::<(i32, i64)>()
            .all(db);
        let course_counts = courses::Entity::find()
            .select_only()
            .column(courses::Column::DepartmentId)
            .column_as(courses::Column::Id.count(), "count")
            .filter(courses::Column::DepartmentId.is_not_null())
            .group_by(courses::Column::DepartmentId)
            .into_tuple::<(i32, i64)>()
            .all(db);
        let program_counts = programs::Entity::find()
            .select_only()
            .column(programs::Column::DepartmentId)
            .column_as(programs::Column::Id.count(), "count")
            .filter(programs::Column::DepartmentId.is_not_null())
            .group_by(programs::Column::DepartmentId)
            .into_tuple::<(i32, i64)>()
            .all(db);

        let (lecturer_counts, course_counts, program_counts) =
            try_join!(lecturer_counts, course_counts, program_counts)?;

        let lecturer_counts: HashMap<i32, i64> = lecturer_counts.into_iter().collect();
        let course_counts: HashMap<i32, i64> = course_counts.into_iter().collect();
        let program_counts: HashMap<i32, i64> = program_counts.into_iter().collect();

        Ok(department_models
            .into_iter()
            .map(|department| DepartmentRow {
                lecturer_count: lecturer_counts
                    .get(&department.id)
                    .copied()
                    .unwrap_or_default() as u64,
                course_count: course_counts
                    .get(&department.id)
                    .copied()
                    .unwrap_or_default() as u64,
                program_count: program_counts
                    .get(&department.id)
                    .copied()
                    .unwrap_or_default() as u64,
                department,
            })
            .collect())
    }

    /// Get a single department with its full lecturer, course, program and
    /// staff rosters
    pub async fn find_detailed(
        db: &DatabaseConnection,
        department_id: i32,
    ) -> Result<Option<DepartmentDetailBundle>, DbErr> {
        let Some(department) = departments::Entity::find_by_id(department_id).one(db).await?
        else {
            return Ok(None);
        };

        let lecturer_models = lecturers::Entity::find()
            .filter(lecturers::Column::DepartmentId.eq(department_id))
            .order_by_asc(lecturers::Column::Id)
            .all(db)
            .await?;

        let lecturer_ids: Vec<i32> = lecturer_models.iter().map(|l| l.id).collect();
        let offering_counts: HashMap<i32, i64> = if lecturer_ids.is_empty() {
            HashMap::new()
        } else {
            course_offerings::Entity::find()
                .select_only()
                .column(course_offerings::Column::LecturerId)
                .column_as(course_offerings::Column::Id.count(), "offering_count")
                .filter(course_offerings::Column::LecturerId.is_in(lecturer_ids))
                .group_by(course_offerings::Column::LecturerId)
                .into_tuple::<(i32, i64)>()
                .all(db)
                .await?
                .into_iter()
                .collect()
        };

        let course_models = courses::Entity::find()
            .filter(courses::Column::DepartmentId.eq(department_id))
            .order_by_asc(courses::Column::Id)
            .all(db)
            .await?;

        let program_models = programs::Entity::find()
            .filter(programs::Column::DepartmentId.eq(department_id))
            .order_by_asc(programs::Column::Id)
            .all(db)
            .await?;

        let program_ids: Vec<i32> = program_models.iter().map(|p| p.id).collect();
        let student_counts: HashMap<i32, i64> = if program_ids.is_empty() {
            HashMap::new()
        } else {
            students::Entity::find()
                .select_only()
                .column(students::Column::ProgramId)
                .column_as(students::Column::Id.count(), "student_count")
                .filter(students::Column::ProgramId.is_in(program_ids))
                .group_by(students::Column::ProgramId)
                .into_tuple::<(i32, i64)>()
                .all(db)
                .await?
                .into_iter()
                .collect()
        };

        let staff_members = non_academic_staff::Entity::find()
            .filter(non_academic_staff::Column::DepartmentId.eq(department_id))
            .order_by_asc(non_academic_staff::Column::Id)
            .all(db)
            .await?;

        Ok(Some(DepartmentDetailBundle {
            department,
            lecturers: lecturer_models
                .into_iter()
                .map(|lecturer| DepartmentLecturer {
                    course_load: offering_counts
                        .get(&lecturer.id)
                        .copied()
                        .unwrap_or_default() as u64,
                    lecturer,
                })
                .collect(),
            courses: course_models,
            programs: program_models
                .into_iter()
                .map(|program| DepartmentProgram {
                    enrolled_students: student_counts
                        .get(&program.id)
                        .copied()
                        .unwrap_or_default() as u64,
                    program,
                })
                .collect(),
            staff_members,
        }))
    }

    /// Remove a department. Lecturers, courses, programs and staff keep their
    /// rows; the schema nulls their department reference instead of cascading.
    pub async fn delete(db: &DatabaseConnection, department_id: i32) -> Result<bool, DbErr> {
        let result = departments::Entity::delete_by_id(department_id)
            .exec(db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        assert!(DepartmentService::delete(&db, 1).await.unwrap());
        assert!(!DepartmentService::delete(&db, 999).await.unwrap());
    }
}
