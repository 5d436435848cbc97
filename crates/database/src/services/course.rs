use crate::entities::{
    course_offerings, courses, enrollments, enrollments::EnrollmentStatus, lecturers, students,
};
use crate::services::{department_names, ilike};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, sea_query::Query,
};
use std::collections::{HashMap, HashSet};

pub struct CourseFilters {
    pub department_id: Option<i32>,
    pub level: Option<String>,
    pub min_credits: Option<i32>,
    pub max_credits: Option<i32>,
    pub lecturer_id: Option<i32>,
    pub student_id: Option<i32>,
    pub limit: u64,
    pub offset: u64,
}

/// Shallow counts computed alongside a course so serialization never has to
/// touch the connection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CourseStats {
    pub student_count: u64,
    pub lecturer_count: u64,
}

#[derive(Debug, Clone)]
pub struct CourseRow {
    pub course: courses::Model,
    pub stats: CourseStats,
}

#[derive(Debug, Clone)]
pub struct OfferingRow {
    pub offering: course_offerings::Model,
    pub lecturer_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnrolledStudent {
    pub student: students::Model,
    pub status: EnrollmentStatus,
}

#[derive(Debug, Clone)]
pub struct TeachingLecturer {
    pub lecturer: lecturers::Model,
    pub department: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CourseDetailBundle {
    pub course: courses::Model,
    pub offerings: Vec<OfferingRow>,
    pub students: Vec<EnrolledStudent>,
    pub lecturers: Vec<TeachingLecturer>,
}

pub struct CourseService;

impl CourseService {
    /// Query courses with filtering and pagination
    pub async fn list(
        db: &DatabaseConnection,
        filters: &CourseFilters,
    ) -> Result<Vec<CourseRow>, DbErr> {
        let mut condition = Condition::all();

        if let Some(department_id) = filters.department_id {
            condition = condition.add(courses::Column::DepartmentId.eq(department_id));
        }
        if let Some(level) = &filters.level {
            condition = condition.add(ilike("courses.level", level));
        }
        if let Some(min) = filters.min_credits {
            condition = condition.add(courses::Column::Credits.gte(min));
        }
        if let Some(max) = filters.max_credits {
            condition = condition.add(courses::Column::Credits.lte(max));
        }
        if let Some(lecturer_id) = filters.lecturer_id {
            let taught_by = Query::select()
                .column(course_offerings::Column::CourseId)
                .from(course_offerings::Entity)
                .and_where(course_offerings::Column::LecturerId.eq(lecturer_id))
                .to_owned();
            condition = condition.add(courses::Column::Id.in_subquery(taught_by));
        }

        let mut query = courses::Entity::find().filter(condition);

        // Courses the student is actively enrolled in, via offering join
        if let Some(student_id) = filters.student_id {
            query = query
                .join(JoinType::InnerJoin, courses::Relation::Offerings.def())
                .join(
                    JoinType::InnerJoin,
                    course_offerings::Relation::Enrollments.def(),
                )
                .filter(enrollments::Column::StudentId.eq(student_id))
                .filter(enrollments::Column::Status.eq(EnrollmentStatus::Active))
                .distinct();
        }

        let course_models = query
            .order_by_asc(courses::Column::Id)
            .offset(filters.offset)
            .limit(filters.limit)
            .all(db)
            .await?;

        let course_ids: Vec<i32> = course_models.iter().map(|c| c.id).collect();
        let mut stats = Self::load_stats(db, &course_ids).await?;

        Ok(course_models
            .into_iter()
            .map(|course| CourseRow {
                stats: stats.remove(&course.id).unwrap_or_default(),
                course,
            })
            .collect())
    }

    /// Batch-compute active-enrollment and distinct-lecturer counts per course
    pub async fn load_stats(
        db: &DatabaseConnection,
        course_ids: &[i32],
    ) -> Result<HashMap<i32, CourseStats>, DbErr> {
        if course_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let offerings = course_offerings::Entity::find()
            .filter(course_offerings::Column::CourseId.is_in(course_ids.to_vec()))
            .all(db)
            .await?;

        let mut stats: HashMap<i32, CourseStats> = course_ids
            .iter()
            .map(|id| (*id, CourseStats::default()))
            .collect();

        if offerings.is_empty() {
            return Ok(stats);
        }

        let mut lecturers_by_course: HashMap<i32, HashSet<i32>> = HashMap::new();
        for offering in &offerings {
            lecturers_by_course
                .entry(offering.course_id)
                .or_default()
                .insert(offering.lecturer_id);
        }

        let offering_ids: Vec<i32> = offerings.iter().map(|o| o.id).collect();
        let course_by_offering: HashMap<i32, i32> =
            offerings.iter().map(|o| (o.id, o.course_id)).collect();

        let active_enrollments = enrollments::Entity::find()
            .filter(enrollments::Column::OfferingId.is_in(offering_ids))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Active))
            .all(db)
            .await?;

        for enrollment in &active_enrollments {
            if let Some(course_id) = course_by_offering.get(&enrollment.offering_id)
                && let Some(entry) = stats.get_mut(course_id)
            {
                entry.student_count += 1;
            }
        }
        for (course_id, lecturer_ids) in lecturers_by_course {
            if let Some(entry) = stats.get_mut(&course_id) {
                entry.lecturer_count = lecturer_ids.len() as u64;
            }
        }

        Ok(stats)
    }

    /// Get a course by its (case-normalized) code with offerings and the
    /// de-duplicated student and lecturer rosters
    pub async fn find_by_code(
        db: &DatabaseConnection,
        code: &str,
    ) -> Result<Option<CourseDetailBundle>, DbErr> {
        let normalized = code.to_uppercase();
        let Some(course) = courses::Entity::find()
            .filter(courses::Column::Code.eq(normalized))
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        let offerings = course_offerings::Entity::find()
            .filter(course_offerings::Column::CourseId.eq(course.id))
            .order_by_asc(course_offerings::Column::Id)
            .all(db)
            .await?;

        if offerings.is_empty() {
            return Ok(Some(CourseDetailBundle {
                course,
                offerings: vec![],
                students: vec![],
                lecturers: vec![],
            }));
        }

        let lecturer_ids: Vec<i32> = offerings
            .iter()
            .map(|o| o.lecturer_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let lecturers_by_id: HashMap<i32, lecturers::Model> = lecturers::Entity::find()
            .filter(lecturers::Column::Id.is_in(lecturer_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|lecturer| (lecturer.id, lecturer))
            .collect();

        let names_by_department = department_names(
            db,
            lecturers_by_id.values().filter_map(|l| l.department_id),
        )
        .await?;

        let offering_ids: Vec<i32> = offerings.iter().map(|o| o.id).collect();
        let enrollment_models = enrollments::Entity::find()
            .filter(enrollments::Column::OfferingId.is_in(offering_ids))
            .order_by_asc(enrollments::Column::Id)
            .all(db)
            .await?;

        let student_ids: Vec<i32> = enrollment_models
            .iter()
            .map(|e| e.student_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let students_by_id: HashMap<i32, students::Model> = if student_ids.is_empty() {
            HashMap::new()
        } else {
            students::Entity::find()
                .filter(students::Column::Id.is_in(student_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|student| (student.id, student))
                .collect()
        };

        // Unique students in first-seen order, keeping the first status
        let mut seen_students = HashSet::new();
        let mut enrolled = Vec::new();
        for enrollment in &enrollment_models {
            if seen_students.insert(enrollment.student_id)
                && let Some(student) = students_by_id.get(&enrollment.student_id)
            {
                enrolled.push(EnrolledStudent {
                    student: student.clone(),
                    status: enrollment.status,
                });
            }
        }

        let mut seen_lecturers = HashSet::new();
        let mut teaching = Vec::new();
        for offering in &offerings {
            if seen_lecturers.insert(offering.lecturer_id)
                && let Some(lecturer) = lecturers_by_id.get(&offering.lecturer_id)
            {
                teaching.push(TeachingLecturer {
                    department: lecturer
                        .department_id
                        .and_then(|id| names_by_department.get(&id).cloned()),
                    lecturer: lecturer.clone(),
                });
            }
        }

        let offering_rows = offerings
            .into_iter()
            .map(|offering| OfferingRow {
                lecturer_name: lecturers_by_id
                    .get(&offering.lecturer_id)
                    .map(|l| l.name.clone()),
                offering,
            })
            .collect();

        Ok(Some(CourseDetailBundle {
            course,
            offerings: offering_rows,
            students: enrolled,
            lecturers: teaching,
        }))
    }

    /// Remove a course offering; its enrollments go with it (cascade policy
    /// declared in the schema)
    pub async fn delete_offering(
        db: &DatabaseConnection,
        offering_id: i32,
    ) -> Result<bool, DbErr> {
        let result = course_offerings::Entity::delete_by_id(offering_id)
            .exec(db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn course(id: i32, code: &str) -> courses::Model {
        courses::Model {
            id,
            code: code.into(),
            name: "Introduction to Programming".into(),
            description: "Fundamentals of programming".into(),
            level: "Undergraduate".into(),
            credits: 15,
            schedule: None,
            department_id: Some(1),
        }
    }

    #[tokio::test]
    async fn course_without_offerings_has_empty_rosters() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course(1, "CS101")]])
            .append_query_results([Vec::<course_offerings::Model>::new()])
            .into_connection();

        let bundle = CourseService::find_by_code(&db, "cs101")
            .await
            .unwrap()
            .expect("course should resolve");

        assert_eq!(bundle.course.code, "CS101");
        assert!(bundle.students.is_empty());
        assert!(bundle.lecturers.is_empty());
        assert!(bundle.offerings.is_empty());
    }

    #[tokio::test]
    async fn delete_offering_removes_the_offering_row() {
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

        assert!(CourseService::delete_offering(&db, 1).await.unwrap());
        assert!(!CourseService::delete_offering(&db, 999).await.unwrap());

        // Only the offering row is deleted here; its enrollments go through
        // the schema's cascade
        let log = db.into_transaction_log();
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("course_offerings"), "{sql}");
    }

    #[tokio::test]
    async fn find_by_code_normalizes_case() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<courses::Model>::new()])
            .into_connection();

        let bundle = CourseService::find_by_code(&db, "cs999").await.unwrap();
        assert!(bundle.is_none());

        let log = db.into_transaction_log();
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("CS999"), "expected upper-cased code: {sql}");
    }
}
