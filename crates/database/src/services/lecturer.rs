use crate::entities::{
    course_offerings, courses, departments, enrollments, lecturers, programs,
    project_team_members, research_projects, students,
};
use crate::services::{array_ilike, department_names, ilike};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::{HashMap, HashSet};

pub struct LecturerFilters {
    pub department_id: Option<i32>,
    pub expertise_area: Option<String>,
    pub research_area: Option<String>,
    pub employment_type: Option<String>,
    pub min_course_load: Option<i32>,
    pub max_course_load: Option<i32>,
    pub limit: u64,
    pub offset: u64,
}

/// Lecturer with its department name and live offering count
#[derive(Debug, Clone)]
pub struct LecturerRow {
    pub lecturer: lecturers::Model,
    pub department: Option<String>,
    pub course_load: u64,
}

#[derive(Debug, Clone)]
pub struct RankedSupervisor {
    pub lecturer: lecturers::Model,
    pub department: Option<String>,
    pub projects_count: u64,
    pub rank: u64,
}

#[derive(Debug, Clone)]
pub struct OfferingTaught {
    pub offering: course_offerings::Model,
    pub course: Option<courses::Model>,
    pub enrolled_students: u64,
}

#[derive(Debug, Clone)]
pub struct TeamProject {
    pub project: research_projects::Model,
    pub principal_investigator: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AdviseeRow {
    pub student: students::Model,
    pub program: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LecturerDetailBundle {
    pub lecturer: lecturers::Model,
    pub department: Option<String>,
    pub offerings: Vec<OfferingTaught>,
    pub advisees: Vec<AdviseeRow>,
    pub principal_projects: Vec<research_projects::Model>,
    pub team_projects: Vec<TeamProject>,
}

pub struct LecturerService;

impl LecturerService {
    /// Query lecturers with filtering and pagination
    pub async fn list(
        db: &DatabaseConnection,
        filters: &LecturerFilters,
    ) -> Result<Vec<LecturerRow>, DbErr> {
        let mut condition = Condition::all();

        if let Some(department_id) = filters.department_id {
            condition = condition.add(lecturers::Column::DepartmentId.eq(department_id));
        }
        if let Some(area) = &filters.expertise_area {
            condition = condition.add(array_ilike("lecturers.areas_of_expertise", area));
        }
        if let Some(area) = &filters.research_area {
            condition = condition.add(array_ilike("lecturers.research_interests", area));
        }
        if let Some(kind) = &filters.employment_type {
            condition = condition.add(ilike("lecturers.employment_type", kind));
        }
        if let Some(min) = filters.min_course_load {
            condition = condition.add(lecturers::Column::CourseLoad.gte(min));
        }
        if let Some(max) = filters.max_course_load {
            condition = condition.add(lecturers::Column::CourseLoad.lte(max));
        }

        let lecturer_models = lecturers::Entity::find()
            .filter(condition)
            .order_by_asc(lecturers::Column::Id)
            .offset(filters.offset)
            .limit(filters.limit)
            .all(db)
            .await?;

        Self::load_rows(db, lecturer_models).await
    }

    async fn load_rows(
        db: &DatabaseConnection,
        lecturer_models: Vec<lecturers::Model>,
    ) -> Result<Vec<LecturerRow>, DbErr> {
        if lecturer_models.is_empty() {
            return Ok(vec![]);
        }

        let lecturer_ids: Vec<i32> = lecturer_models.iter().map(|l| l.id).collect();
        let names_by_department =
            department_names(db, lecturer_models.iter().filter_map(|l| l.department_id)).await?;

        let offering_counts: HashMap<i32, i64> = course_offerings::Entity::find()
            .select_only()
            .column(course_offerings::Column::LecturerId)
            .column_as(course_offerings::Column::Id.count(), "offering_count")
            .filter(course_offerings::Column::LecturerId.is_in(lecturer_ids))
            .group_by(course_offerings::Column::LecturerId)
            .into_tuple::<(i32, i64)>()
            .all(db)
            .await?
            .into_iter()
            .collect();

        Ok(lecturer_models
            .into_iter()
            .map(|lecturer| LecturerRow {
                department: lecturer
                    .department_id
                    .and_then(|id| names_by_department.get(&id).cloned()),
                course_load: offering_counts
                    .get(&lecturer.id)
                    .copied()
                    .unwrap_or_default() as u64,
                lecturer,
            })
            .collect())
    }

    /// Lecturers ranked by number of research projects led as principal
    /// investigator, descending. Lecturers leading no project rank last.
    pub async fn list_top_supervisors(
        db: &DatabaseConnection,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<RankedSupervisor>, DbErr> {
        let project_counts: HashMap<i32, i64> = research_projects::Entity::find()
            .select_only()
            .column(research_projects::Column::PrincipalInvestigatorId)
            .column_as(research_projects::Column::Id.count(), "project_count")
            .filter(research_projects::Column::PrincipalInvestigatorId.is_not_null())
            .group_by(research_projects::Column::PrincipalInvestigatorId)
            .into_tuple::<(i32, i64)>()
            .all(db)
            .await?
            .into_iter()
            .collect();

        let mut pairs = lecturers::Entity::find()
            .find_also_related(departments::Entity)
            .order_by_asc(lecturers::Column::Id)
            .all(db)
            .await?;

        pairs.sort_by(|(a, _), (b, _)| {
            let count_a = project_counts.get(&a.id).copied().unwrap_or(0);
            let count_b = project_counts.get(&b.id).copied().unwrap_or(0);
            count_b.cmp(&count_a).then(a.id.cmp(&b.id))
        });

        Ok(pairs
            .into_iter()
            .enumerate()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|(idx, (lecturer, department))| RankedSupervisor {
                projects_count: project_counts.get(&lecturer.id).copied().unwrap_or(0) as u64,
                rank: idx as u64 + 1,
                department: department.map(|d| d.name),
                lecturer,
            })
            .collect())
    }

    /// Get a single lecturer with offerings, advisees and research projects
    pub async fn find_detailed(
        db: &DatabaseConnection,
        lecturer_id: i32,
    ) -> Result<Option<LecturerDetailBundle>, DbErr> {
        let Some(lecturer) = lecturers::Entity::find_by_id(lecturer_id).one(db).await? else {
            return Ok(None);
        };

        let department = match lecturer.department_id {
            Some(id) => departments::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(|d| d.name),
            None => None,
        };

        let offering_models = course_offerings::Entity::find()
            .filter(course_offerings::Column::LecturerId.eq(lecturer_id))
            .order_by_asc(course_offerings::Column::Id)
            .all(db)
            .await?;
        let offerings = Self::load_offerings(db, offering_models).await?;

        let advisees = Self::load_advisees(db, lecturer_id).await?;

        let principal_projects = research_projects::Entity::find()
            .filter(research_projects::Column::PrincipalInvestigatorId.eq(lecturer_id))
            .order_by_asc(research_projects::Column::Id)
            .all(db)
            .await?;

        let team_projects = Self::load_team_projects(db, lecturer_id).await?;

        Ok(Some(LecturerDetailBundle {
            lecturer,
            department,
            offerings,
            advisees,
            principal_projects,
            team_projects,
        }))
    }

    async fn load_offerings(
        db: &DatabaseConnection,
        offering_models: Vec<course_offerings::Model>,
    ) -> Result<Vec<OfferingTaught>, DbErr> {
        if offering_models.is_empty() {
            return Ok(vec![]);
        }

        let offering_ids: Vec<i32> = offering_models.iter().map(|o| o.id).collect();
        let course_ids: Vec<i32> = offering_models
            .iter()
            .map(|o| o.course_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let courses_by_id: HashMap<i32, courses::Model> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|course| (course.id, course))
            .collect();

        let enrollment_counts: HashMap<i32, i64> = enrollments::Entity::find()
            .select_only()
            .column(enrollments::Column::OfferingId)
            .column_as(enrollments::Column::Id.count(), "enrollment_count")
            .filter(enrollments::Column::OfferingId.is_in(offering_ids))
            .group_by(enrollments::Column::OfferingId)
            .into_tuple::<(i32, i64)>()
            .all(db)
            .await?
            .into_iter()
            .collect();

        Ok(offering_models
            .into_iter()
            .map(|offering| OfferingTaught {
                course: courses_by_id.get(&offering.course_id).cloned(),
                enrolled_students: enrollment_counts
                    .get(&offering.id)
                    .copied()
                    .unwrap_or_default() as u64,
                offering,
            })
            .collect())
    }

    async fn load_advisees(
        db: &DatabaseConnection,
        lecturer_id: i32,
    ) -> Result<Vec<AdviseeRow>, DbErr> {
        let student_models = students::Entity::find()
            .filter(students::Column::AdvisorId.eq(lecturer_id))
            .order_by_asc(students::Column::Id)
            .all(db)
            .await?;

        if student_models.is_empty() {
            return Ok(vec![]);
        }

        let program_ids: Vec<i32> = student_models
            .iter()
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

        Ok(student_models
            .into_iter()
            .map(|student| AdviseeRow {
                program: student
                    .program_id
                    .and_then(|id| program_names.get(&id).cloned()),
                student,
            })
            .collect())
    }

    /// Projects the lecturer contributes to as a team member, excluding those
    /// they also lead (avoids listing the same project twice)
    async fn load_team_projects(
        db: &DatabaseConnection,
        lecturer_id: i32,
    ) -> Result<Vec<TeamProject>, DbErr> {
        let memberships = project_team_members::Entity::find()
            .filter(project_team_members::Column::LecturerId.eq(lecturer_id))
            .find_also_related(research_projects::Entity)
            .all(db)
            .await?;

        let projects: Vec<research_projects::Model> = memberships
            .into_iter()
            .filter_map(|(_, project)| project)
            .filter(|project| project.principal_investigator_id != Some(lecturer_id))
            .collect();

        if projects.is_empty() {
            return Ok(vec![]);
        }

        let pi_ids: Vec<i32> = projects
            .iter()
            .filter_map(|p| p.principal_investigator_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let pi_names: HashMap<i32, String> = if pi_ids.is_empty() {
            HashMap::new()
        } else {
            lecturers::Entity::find()
                .filter(lecturers::Column::Id.is_in(pi_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|lecturer| (lecturer.id, lecturer.name))
                .collect()
        };

        Ok(projects
            .into_iter()
            .map(|project| TeamProject {
                principal_investigator: project
                    .principal_investigator_id
                    .and_then(|id| pi_names.get(&id).cloned()),
                project,
            })
            .collect())
    }

    /// Recompute the stored course_load column from the offerings table
    pub async fn refresh_course_load(
        db: &DatabaseConnection,
        lecturer_id: i32,
    ) -> Result<Option<i32>, DbErr> {
        let Some(lecturer) = lecturers::Entity::find_by_id(lecturer_id).one(db).await? else {
            return Ok(None);
        };

        let count = course_offerings::Entity::find()
            .filter(course_offerings::Column::LecturerId.eq(lecturer_id))
            .count(db)
            .await? as i32;

        let mut active: lecturers::ActiveModel = lecturer.into();
        active.course_load = Set(count);
        let updated = active.update(db).await?;

        Ok(Some(updated.course_load))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn project_count_row(lecturer_id: i32, count: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("principal_investigator_id", Value::from(lecturer_id)),
            ("project_count", Value::from(count)),
        ])
    }

    fn lecturer(id: i32, name: &str) -> lecturers::Model {
        lecturers::Model {
            id,
            name: name.into(),
            email: format!("{id}@uni.ac.uk"),
            academic_qualifications: "PhD".into(),
            employment_type: "Full-Time".into(),
            contract_details: None,
            areas_of_expertise: vec![],
            course_load: 0,
            research_interests: vec![],
            publications: vec![],
            department_id: None,
        }
    }

    fn department(id: i32, name: &str) -> departments::Model {
        departments::Model {
            id,
            name: name.into(),
            faculty: "Engineering".into(),
            research_areas: vec![],
        }
    }

    #[tokio::test]
    async fn top_supervisors_rank_by_project_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // grouped project counts: lecturer 2 leads three projects
            .append_query_results([vec![project_count_row(2, 3), project_count_row(1, 1)]])
            .append_query_results([vec![
                (lecturer(1, "Dr. A"), department(1, "Computer Science")),
                (lecturer(2, "Dr. B"), department(1, "Computer Science")),
                (lecturer(3, "Dr. C"), department(2, "Mathematics")),
            ]])
            .into_connection();

        let ranked = LecturerService::list_top_supervisors(&db, 100, 0)
            .await
            .unwrap();

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].lecturer.id, 2);
        assert_eq!(ranked[0].projects_count, 3);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].lecturer.id, 1);
        assert_eq!(ranked[2].lecturer.id, 3);
        assert_eq!(ranked[2].projects_count, 0);
        assert_eq!(ranked[2].rank, 3);
    }
}
