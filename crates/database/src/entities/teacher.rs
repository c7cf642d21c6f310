use models::subjects::SubjectList;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Teaching profile attached to exactly one user
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub subjects: SubjectList,
    pub experience: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub qualifications: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::batch_teacher::Entity")]
    BatchTeachers,
    #[sea_orm(has_many = "super::timetable_slot::Entity")]
    TimetableSlots,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::timetable_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimetableSlots.def()
    }
}

// Many-to-many relationship with batches
impl Related<super::batch::Entity> for Entity {
    fn to() -> RelationDef {
        super::batch_teacher::Relation::Batch.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::batch_teacher::Relation::Teacher.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
