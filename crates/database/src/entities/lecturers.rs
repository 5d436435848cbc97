use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lecturers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub academic_qualifications: String,
    pub employment_type: String,
    pub contract_details: Option<String>,
    pub areas_of_expertise: Vec<String>,
    /// Stored offering count, refreshed on demand from the offerings table
    pub course_load: i32,
    pub research_interests: Vec<String>,
    pub publications: Vec<String>,
    pub department_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::course_offerings::Entity")]
    Offerings,
    #[sea_orm(has_many = "super::students::Entity")]
    Advisees,
    #[sea_orm(has_many = "super::research_projects::Entity")]
    ResearchProjects,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::course_offerings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offerings.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Advisees.def()
    }
}

impl Related<super::research_projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResearchProjects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
