use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "check_ins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(unique)]
    pub attendee_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::attendee::Entity",
        from = "Column::AttendeeId",
        to = "super::attendee::Column::Id",
        on_delete = "Cascade"
    )]
    Attendee,
}

impl Related<super::attendee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::CheckIn {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            attendee_id: model.attendee_id,
            created_at: model.created_at.into(),
        }
    }
}
