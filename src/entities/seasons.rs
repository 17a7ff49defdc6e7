use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "seasons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub drama_id: i32,
    pub season_number: i32,
    pub title: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dramas::Entity",
        from = "Column::DramaId",
        to = "super::dramas::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Drama,
    #[sea_orm(has_many = "super::episodes::Entity")]
    Episodes,
}

impl Related<super::dramas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drama.def()
    }
}

impl Related<super::episodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Episodes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
