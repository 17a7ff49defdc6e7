use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "actors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub photo_url: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::drama_actors::Entity")]
    DramaActors,
}

impl Related<super::drama_actors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DramaActors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
