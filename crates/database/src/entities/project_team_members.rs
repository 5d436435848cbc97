use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join table linking lecturers to research projects they work on
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project_team_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub lecturer_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub project_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lecturers::Entity",
        from = "Column::LecturerId",
        to = "super::lecturers::Column::Id"
    )]
    Lecturer,
    #[sea_orm(
        belongs_to = "super::research_projects::Entity",
        from = "Column::ProjectId",
        to = "super::research_projects::Column::Id"
    )]
    Project,
}

impl Related<super::lecturers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecturer.def()
    }
}

impl Related<super::research_projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
