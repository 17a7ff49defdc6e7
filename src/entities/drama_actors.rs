use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "drama_actors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub drama_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub actor_id: i32,
    /// `main` or `support`
    pub role: String,
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
    #[sea_orm(
        belongs_to = "super::actors::Entity",
        from = "Column::ActorId",
        to = "super::actors::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Actor,
}

impl Related<super::dramas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drama.def()
    }
}

impl Related<super::actors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
