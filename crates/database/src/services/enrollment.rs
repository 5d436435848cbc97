use crate::entities::{
    course_offerings, courses, enrollments, enrollments::EnrollmentStatus, lecturers, programs,
    students,
};
use crate::services::course::{CourseService, CourseStats};
use crate::services::{department_names, ilike};
use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use std::collections::{HashMap, HashSet};

pub struct EnrollmentFilters {
    pub course_code: Option<String>,
    pub student_id: Option<i32>,
    pub lecturer_id: Option<i32>,
    pub semester: Option<String>,
    pub year: Option<i32>,
    pub status: Option<EnrollmentStatus>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub has_grade: Option<bool>,
    pub limit: u64,
    pub offset: u64,
}

/// Enrollment with the student, course and lecturer context its simplified
/// representation needs
#[derive(Debug, Clone)]
pub struct EnrollmentRow {
    pub enrollment: enrollments::Model,
    pub student: students::Model,
    pub student_program: Option<String>,
    pub student_advisor: Option<String>,
    pub student_enrollment_count: u64,
    pub course: courses::Model,
    pub course_stats: CourseStats,
    pub lecturer: lecturers::Model,
    pub lecturer_department: Option<String>,
}

pub struct EnrollmentService;

impl EnrollmentService {
    /// Query enrollments with filtering and pagination. Offering-level
    /// attributes (semester, year, lecturer, course code) are filtered through
    /// joins; they are never stored on the enrollment row.
    pub async fn list(
        db: &DatabaseConnection,
        filters: &EnrollmentFilters,
    ) -> Result<Vec<EnrollmentRow>, DbErr> {
        let mut query = enrollments::Entity::find()
            .join(JoinType::InnerJoin, enrollments::Relation::Offering.def());

        if filters.course_code.is_some() {
            query = query.join(JoinType::InnerJoin, course_offerings::Relation::Course.def());
        }

        let mut condition = Condition::all();
        if let Some(code) = &filters.course_code {
            condition = condition.add(courses::Column::Code.eq(code.to_uppercase()));
        }
        if let Some(student_id) = filters.student_id {
            condition = condition.add(enrollments::Column::StudentId.eq(student_id));
        }
        if let Some(lecturer_id) = filters.lecturer_id {
            condition = condition.add(course_offerings::Column::LecturerId.eq(lecturer_id));
        }
        if let Some(semester) = &filters.semester {
            condition = condition.add(ilike("course_offerings.semester", semester));
        }
        if let Some(year) = filters.year {
            condition = condition.add(course_offerings::Column::Year.eq(year));
        }
        if let Some(status) = filters.status {
            condition = condition.add(enrollments::Column::Status.eq(status));
        }
        if let Some(from_date) = filters.from_date {
            condition = condition.add(enrollments::Column::EnrollmentDate.gte(from_date));
        }
        if let Some(to_date) = filters.to_date {
            condition = condition.add(enrollments::Column::EnrollmentDate.lte(to_date));
        }
        match filters.has_grade {
            Some(true) => condition = condition.add(enrollments::Column::Grade.is_not_null()),
            Some(false) => condition = condition.add(enrollments::Column::Grade.is_null()),
            None => {}
        }

        let enrollment_models = query
            .filter(condition)
            .order_by_asc(enrollments::Column::Id)
            .offset(filters.offset)
            .limit(filters.limit)
            .all(db)
            .await?;

        Self::load_rows(db, enrollment_models).await
    }

    async fn load_rows(
        db: &DatabaseConnection,
        enrollment_models: Vec<enrollments::Model>,
    ) -> Result<Vec<EnrollmentRow>, DbErr> {
        if enrollment_models.is_empty() {
            return Ok(vec![]);
        }

        let offering_ids: Vec<i32> = enrollment_models
            .iter()
            .map(|e| e.offering_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let offerings_by_id: HashMap<i32, course_offerings::Model> =
            course_offerings::Entity::find()
                .filter(course_offerings::Column::Id.is_in(offering_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|offering| (offering.id, offering))
                .collect();

        let course_ids: Vec<i32> = offerings_by_id
            .values()
            .map(|o| o.course_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let lecturer_ids: Vec<i32> = offerings_by_id
            .values()
            .map(|o| o.lecturer_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let courses_by_id: HashMap<i32, courses::Model> = if course_ids.is_empty() {
            HashMap::new()
        } else {
            courses::Entity::find()
                .filter(courses::Column::Id.is_in(course_ids.clone()))
                .all(db)
                .await?
                .into_iter()
                .map(|course| (course.id, course))
                .collect()
        };
        let course_stats = CourseService::load_stats(db, &course_ids).await?;

        let lecturers_by_id: HashMap<i32, lecturers::Model> = if lecturer_ids.is_empty() {
            HashMap::new()
        } else {
            lecturers::Entity::find()
                .filter(lecturers::Column::Id.is_in(lecturer_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|lecturer| (lecturer.id, lecturer))
                .collect()
        };

        let student_ids: Vec<i32> = enrollment_models
            .iter()
            .map(|e| e.student_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let students_by_id: HashMap<i32, students::Model> = students::Entity::find()
            .filter(students::Column::Id.is_in(student_ids.clone()))
            .all(db)
            .await?
            .into_iter()
            .map(|student| (student.id, student))
            .collect();

        let program_ids: Vec<i32> = students_by_id
            .values()
            .filter_map(|s| s.program_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let program_names: HashMap<i32, String> = if program_ids.is_empty() {
            HashMap::new()
        } else {
            programs::Entity::find()
                .filter(programs::Column::Id.is_in(program_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|program| (program.id, program.name))
                .collect()
        };

        let advisor_ids: Vec<i32> = students_by_id
            .values()
            .filter_map(|s| s.advisor_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let advisor_names: HashMap<i32, String> = if advisor_ids.is_empty() {
            HashMap::new()
        } else {
            lecturers::Entity::find()
                .filter(lecturers::Column::Id.is_in(advisor_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|lecturer| (lecturer.id, lecturer.name))
                .collect()
        };

        // Total enrollment count per student across the whole table, not just
        // the current page
        let enrollment_counts: HashMap<i32, i64> = enrollments::Entity::find()
            .select_only()
            .column(enrollments::Column::StudentId)
            .column_as(enrollments::Column::Id.count(), "enrollment_count")
            .filter(enrollments::Column::StudentId.is_in(student_ids))
            .group_by(enrollments::Column::StudentId)
            .into_tuple::<(i32, i64)>()
            .all(db)
            .await?
            .into_iter()
            .collect();

        let names_by_department = department_names(
            db,
            lecturers_by_id.values().filter_map(|l| l.department_id),
        )
        .await?;

        Ok(enrollment_models
            .into_iter()
            .filter_map(|enrollment| {
                let offering = offerings_by_id.get(&enrollment.offering_id)?;
                let course = courses_by_id.get(&offering.course_id)?.clone();
                let lecturer = lecturers_by_id.get(&offering.lecturer_id)?.clone();
                let student = students_by_id.get(&enrollment.student_id)?.clone();

                Some(EnrollmentRow {
                    student_program: student
                        .program_id
                        .and_then(|id| program_names.get(&id).cloned()),
                    student_advisor: student
                        .advisor_id
                        .and_then(|id| advisor_names.get(&id).cloned()),
                    student_enrollment_count: enrollment_counts
                        .get(&student.id)
                        .copied()
                        .unwrap_or_default() as u64,
                    course_stats: course_stats.get(&course.id).copied().unwrap_or_default(),
                    lecturer_department: lecturer
                        .department_id
                        .and_then(|id| names_by_department.get(&id).cloned()),
                    student,
                    course,
                    lecturer,
                    enrollment,
                })
            })
            .collect())
    }
}
