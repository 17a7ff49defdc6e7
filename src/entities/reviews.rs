use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub drama_id: i32,
    /// 1..=10
    pub rating: i32,
    pub review_text: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::dramas::Entity",
        from = "Column::DramaId",
        to = "super::dramas::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Drama,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::dramas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drama.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
