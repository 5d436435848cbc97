use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "research_projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub funding_sources: Vec<String>,
    pub publications: Vec<String>,
    pub outcomes: Vec<String>,
    pub principal_investigator_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lecturers::Entity",
        from = "Column::PrincipalInvestigatorId",
        to = "super::lecturers::Column::Id"
    )]
    PrincipalInvestigator,
    #[sea_orm(has_many = "super::project_team_members::Entity")]
    TeamMembers,
}

impl Related<super::lecturers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PrincipalInvestigator.def()
    }
}

impl Related<super::project_team_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
