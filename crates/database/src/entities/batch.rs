use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "batches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub coordinator_id: Option<i32>,
    pub start_date: Option<DateTime>,
    pub end_date: Option<DateTime>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CoordinatorId",
        to = "super::user::Column::Id"
    )]
    Coordinator,
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::content::Entity")]
    Contents,
    #[sea_orm(has_many = "super::schedule::Entity")]
    Schedules,
    #[sea_orm(has_many = "super::batch_teacher::Entity")]
    BatchTeachers,
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::content::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contents.def()
    }
}

impl Related<super::schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

// Many-to-many relationship with teachers
impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        super::batch_teacher::Relation::Teacher.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::batch_teacher::Relation::Batch.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
