use crate::entities::{
    course_offerings, courses, departments, enrollments, enrollments::EnrollmentStatus, lecturers,
    programs, students,
};
use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, sea_query::Query,
};
use std::collections::{HashMap, HashSet};

pub struct StudentFilters {
    pub year: Option<i32>,
    pub min_grade: Option<f64>,
    pub max_grade: Option<f64>,
    pub program_id: Option<i32>,
    pub department_id: Option<i32>,
    pub graduation_status: Option<bool>,
    pub unregistered: bool,
    pub limit: u64,
    pub offset: u64,
}

/// Student with the related rows its summary representation needs
#[derive(Debug, Clone)]
pub struct StudentRow {
    pub student: students::Model,
    pub program: Option<programs::Model>,
    pub advisor: Option<lecturers::Model>,
    pub course_codes: Vec<String>,
    pub enrollment_count: u64,
}

#[derive(Debug, Clone)]
pub struct EnrollmentDetailRow {
    pub enrollment: enrollments::Model,
    pub course: Option<courses::Model>,
    pub lecturer_name: Option<String>,
    pub semester: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct StudentDetailBundle {
    pub student: students::Model,
    pub program: Option<programs::Model>,
    pub program_department: Option<String>,
    pub advisor: Option<lecturers::Model>,
    pub advisor_department: Option<String>,
    pub enrollments: Vec<EnrollmentDetailRow>,
}

#[derive(Debug, Clone)]
pub struct AdvisorBundle {
    pub lecturer: lecturers::Model,
    pub department: Option<String>,
}

pub enum AdvisorLookup {
    StudentNotFound,
    NoAdvisor,
    Found(AdvisorBundle),
}

/// The academic period the given date falls in: January through June is the
/// spring period, everything later belongs to the autumn period.
pub fn academic_period(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let year = today.year();
    if today.month() <= 6 {
        (
            NaiveDate::from_ymd_opt(year, 1, 1).expect("valid calendar date"),
            NaiveDate::from_ymd_opt(year, 6, 30).expect("valid calendar date"),
        )
    } else {
        (
            NaiveDate::from_ymd_opt(year, 8, 1).expect("valid calendar date"),
            NaiveDate::from_ymd_opt(year, 12, 31).expect("valid calendar date"),
        )
    }
}

pub struct StudentService;

impl StudentService {
    /// Query students with filtering and pagination
    pub async fn list(
        db: &DatabaseConnection,
        filters: &StudentFilters,
    ) -> Result<Vec<StudentRow>, DbErr> {
        let mut condition = Condition::all();

        if let Some(year) = filters.year {
            condition = condition.add(students::Column::YearOfStudy.eq(year));
        }
        if let Some(min_grade) = filters.min_grade {
            condition = condition.add(students::Column::CurrentGrades.gte(min_grade));
        }
        if let Some(max_grade) = filters.max_grade {
            condition = condition.add(students::Column::CurrentGrades.lte(max_grade));
        }
        if let Some(program_id) = filters.program_id {
            condition = condition.add(students::Column::ProgramId.eq(program_id));
        }
        if let Some(graduated) = filters.graduation_status {
            condition = condition.add(students::Column::GraduationStatus.eq(graduated));
        }

        // Students without an active enrollment dated within the current
        // academic period, expressed as a NOT IN subquery
        if filters.unregistered {
            let (start, end) = academic_period(Utc::now().date_naive());
            let registered = Query::select()
                .column(enrollments::Column::StudentId)
                .from(enrollments::Entity)
                .and_where(enrollments::Column::EnrollmentDate.between(start, end))
                .and_where(enrollments::Column::Status.eq(EnrollmentStatus::Active))
                .to_owned();
            condition = condition.add(students::Column::Id.not_in_subquery(registered));
        }

        let mut query = students::Entity::find().filter(condition);

        if let Some(department_id) = filters.department_id {
            query = query
                .join(JoinType::InnerJoin, students::Relation::Program.def())
                .filter(programs::Column::DepartmentId.eq(department_id));
        }

        let student_models = query
            .order_by_asc(students::Column::Id)
            .offset(filters.offset)
            .limit(filters.limit)
            .all(db)
            .await?;

        Self::load_rows(db, student_models).await
    }

    /// Batch-load the program, advisor and enrollment data for a page of students
    pub async fn load_rows(
        db: &DatabaseConnection,
        student_models: Vec<students::Model>,
    ) -> Result<Vec<StudentRow>, DbErr> {
        if student_models.is_empty() {
            return Ok(vec![]);
        }

        let student_ids: Vec<i32> = student_models.iter().map(|s| s.id).collect();
        let program_ids: Vec<i32> = student_models.iter().filter_map(|s| s.program_id).collect();
        let advisor_ids: Vec<i32> = student_models.iter().filter_map(|s| s.advisor_id).collect();

        let programs_by_id: HashMap<i32, programs::Model> = if program_ids.is_empty() {
            HashMap::new()
        } else {
            programs::Entity::find()
                .filter(programs::Column::Id.is_in(program_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|program| (program.id, program))
                .collect()
        };

        let advisors_by_id: HashMap<i32, lecturers::Model> = if advisor_ids.is_empty() {
            HashMap::new()
        } else {
            lecturers::Entity::find()
                .filter(lecturers::Column::Id.is_in(advisor_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|lecturer| (lecturer.id, lecturer))
                .collect()
        };

        let enrollment_models = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.is_in(student_ids))
            .all(db)
            .await?;

        let offering_ids: Vec<i32> = enrollment_models
            .iter()
            .map(|e| e.offering_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let offerings_by_id: HashMap<i32, course_offerings::Model> = if offering_ids.is_empty() {
            HashMap::new()
        } else {
            course_offerings::Entity::find()
                .filter(course_offerings::Column::Id.is_in(offering_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|offering| (offering.id, offering))
                .collect()
        };

        let course_ids: Vec<i32> = offerings_by_id
            .values()
            .map(|o| o.course_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let courses_by_id: HashMap<i32, courses::Model> = if course_ids.is_empty() {
            HashMap::new()
        } else {
            courses::Entity::find()
                .filter(courses::Column::Id.is_in(course_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|course| (course.id, course))
                .collect()
        };

        let mut codes_by_student: HashMap<i32, Vec<String>> = HashMap::new();
        let mut enrollment_counts: HashMap<i32, u64> = HashMap::new();
        for enrollment in &enrollment_models {
            *enrollment_counts.entry(enrollment.student_id).or_default() += 1;
            if let Some(offering) = offerings_by_id.get(&enrollment.offering_id)
                && let Some(course) = courses_by_id.get(&offering.course_id)
            {
                let codes = codes_by_student.entry(enrollment.student_id).or_default();
                if !codes.contains(&course.code) {
                    codes.push(course.code.clone());
                }
            }
        }

        Ok(student_models
            .into_iter()
            .map(|student| StudentRow {
                program: student
                    .program_id
                    .and_then(|id| programs_by_id.get(&id).cloned()),
                advisor: student
                    .advisor_id
                    .and_then(|id| advisors_by_id.get(&id).cloned()),
                course_codes: codes_by_student.remove(&student.id).unwrap_or_default(),
                enrollment_count: enrollment_counts.get(&student.id).copied().unwrap_or(0),
                student,
            })
            .collect())
    }

    /// Get a single student with everything its detailed representation needs
    pub async fn find_detailed(
        db: &DatabaseConnection,
        student_id: i32,
    ) -> Result<Option<StudentDetailBundle>, DbErr> {
        let Some(student) = students::Entity::find_by_id(student_id).one(db).await? else {
            return Ok(None);
        };

        let program = match student.program_id {
            Some(id) => programs::Entity::find_by_id(id).one(db).await?,
            None => None,
        };
        let program_department = match program.as_ref().and_then(|p| p.department_id) {
            Some(id) => departments::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(|d| d.name),
            None => None,
        };

        let advisor = match student.advisor_id {
            Some(id) => lecturers::Entity::find_by_id(id).one(db).await?,
            None => None,
        };
        let advisor_department = match advisor.as_ref().and_then(|a| a.department_id) {
            Some(id) => departments::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(|d| d.name),
            None => None,
        };

        let enrollment_models = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .order_by_asc(enrollments::Column::Id)
            .all(db)
            .await?;

        let enrollment_rows = Self::load_enrollment_rows(db, enrollment_models).await?;

        Ok(Some(StudentDetailBundle {
            student,
            program,
            program_department,
            advisor,
            advisor_department,
            enrollments: enrollment_rows,
        }))
    }

    async fn load_enrollment_rows(
        db: &DatabaseConnection,
        enrollment_models: Vec<enrollments::Model>,
    ) -> Result<Vec<EnrollmentDetailRow>, DbErr> {
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
                .filter(courses::Column::Id.is_in(course_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|course| (course.id, course))
                .collect()
        };

        let lecturer_names: HashMap<i32, String> = if lecturer_ids.is_empty() {
            HashMap::new()
        } else {
            lecturers::Entity::find()
                .filter(lecturers::Column::Id.is_in(lecturer_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|lecturer| (lecturer.id, lecturer.name))
                .collect()
        };

        Ok(enrollment_models
            .into_iter()
            .map(|enrollment| {
                let offering = offerings_by_id.get(&enrollment.offering_id);
                EnrollmentDetailRow {
                    course: offering.and_then(|o| courses_by_id.get(&o.course_id).cloned()),
                    lecturer_name: offering
                        .and_then(|o| lecturer_names.get(&o.lecturer_id).cloned()),
                    semester: offering.and_then(|o| o.semester.clone()),
                    year: offering.and_then(|o| o.year),
                    enrollment,
                }
            })
            .collect())
    }

    /// Resolve a student's advisor together with the advisor's department name
    pub async fn find_advisor(
        db: &DatabaseConnection,
        student_id: i32,
    ) -> Result<AdvisorLookup, DbErr> {
        let Some(student) = students::Entity::find_by_id(student_id).one(db).await? else {
            return Ok(AdvisorLookup::StudentNotFound);
        };

        let Some(advisor_id) = student.advisor_id else {
            return Ok(AdvisorLookup::NoAdvisor);
        };
        let Some(lecturer) = lecturers::Entity::find_by_id(advisor_id).one(db).await? else {
            return Ok(AdvisorLookup::NoAdvisor);
        };

        let department = match lecturer.department_id {
            Some(id) => departments::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(|d| d.name),
            None => None,
        };

        Ok(AdvisorLookup::Found(AdvisorBundle {
            lecturer,
            department,
        }))
    }

    /// Students advised by the given lecturer; `None` when the lecturer is unknown
    pub async fn list_advisees(
        db: &DatabaseConnection,
        lecturer_id: i32,
    ) -> Result<Option<Vec<StudentRow>>, DbErr> {
        if lecturers::Entity::find_by_id(lecturer_id)
            .one(db)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let student_models = students::Entity::find()
            .filter(students::Column::AdvisorId.eq(lecturer_id))
            .order_by_asc(students::Column::Id)
            .all(db)
            .await?;

        Ok(Some(Self::load_rows(db, student_models).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn sample_student() -> students::Model {
        students::Model {
            id: 1,
            name: "John Doe".into(),
            email: "john.doe@student.uni.ac.uk".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 15).unwrap(),
            year_of_study: 2,
            current_grades: 75.5,
            graduation_status: false,
            disciplinary_record: false,
            program_id: None,
            advisor_id: None,
        }
    }

    #[test]
    fn academic_period_first_half_of_year() {
        let (start, end) = academic_period(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 6, 30).unwrap());
    }

    #[test]
    fn academic_period_second_half_of_year() {
        let (start, end) = academic_period(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[tokio::test]
    async fn list_returns_rows_without_related_records() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_student()]])
            .append_query_results([Vec::<enrollments::Model>::new()])
            .into_connection();

        let filters = StudentFilters {
            year: None,
            min_grade: None,
            max_grade: None,
            program_id: None,
            department_id: None,
            graduation_status: None,
            unregistered: false,
            limit: 100,
            offset: 0,
        };

        let rows = StudentService::list(&db, &filters).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].student.name, "John Doe");
        assert_eq!(rows[0].enrollment_count, 0);
        assert!(rows[0].course_codes.is_empty());
        assert!(rows[0].program.is_none());
    }

    #[tokio::test]
    async fn unregistered_filter_uses_not_in_subquery() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<students::Model>::new()])
            .into_connection();

        let filters = StudentFilters {
            year: None,
            min_grade: None,
            max_grade: None,
            program_id: None,
            department_id: None,
            graduation_status: None,
            unregistered: true,
            limit: 100,
            offset: 0,
        };

        let rows = StudentService::list(&db, &filters).await.unwrap();
        assert!(rows.is_empty());

        let log = db.into_transaction_log();
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("NOT IN"), "expected NOT IN subquery: {sql}");
    }
}
