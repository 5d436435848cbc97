use crate::entities::non_academic_staff;
use crate::services::{department_names, ilike};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

pub struct StaffFilters {
    pub department_id: Option<i32>,
    pub job_title: Option<String>,
    pub employment_type: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Clone)]
pub struct StaffRow {
    pub staff: non_academic_staff::Model,
    pub department: Option<String>,
}

pub struct StaffService;

impl StaffService {
    /// Query non-academic staff with filtering and pagination
    pub async fn list(
        db: &DatabaseConnection,
        filters: &StaffFilters,
    ) -> Result<Vec<StaffRow>, DbErr> {
        let mut condition = Condition::all();

        if let Some(department_id) = filters.department_id {
            condition = condition.add(non_academic_staff::Column::DepartmentId.eq(department_id));
        }
        if let Some(title) = &filters.job_title {
            condition = condition.add(ilike("non_academic_staff.job_title", title));
        }
        if let Some(kind) = &filters.employment_type {
            condition = condition.add(ilike("non_academic_staff.employment_type", kind));
        }

        let staff_models = non_academic_staff::Entity::find()
            .filter(condition)
            .order_by_asc(non_academic_staff::Column::Id)
            .offset(filters.offset)
            .limit(filters.limit)
            .all(db)
            .await?;

        let names_by_department =
            department_names(db, staff_models.iter().filter_map(|s| s.department_id)).await?;

        Ok(staff_models
            .into_iter()
            .map(|staff| StaffRow {
                department: staff
                    .department_id
                    .and_then(|id| names_by_department.get(&id).cloned()),
                staff,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::departments;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn list_resolves_department_names() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![non_academic_staff::Model {
                id: 1,
                name: "Sarah Wilson".into(),
                job_title: Some("Department Administrator".into()),
                employment_type: "Full-Time".into(),
                department_id: Some(7),
            }]])
            .append_query_results([vec![departments::Model {
                id: 7,
                name: "Computer Science".into(),
                faculty: "Engineering".into(),
                research_areas: vec![],
            }]])
            .into_connection();

        let filters = StaffFilters {
            department_id: None,
            job_title: None,
            employment_type: None,
            limit: 100,
            offset: 0,
        };

        let rows = StaffService::list(&db, &filters).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].department.as_deref(), Some("Computer Science"));
    }
}
