use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "genres")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::drama_genres::Entity")]
    DramaGenres,
}

impl Related<super::drama_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DramaGenres.def()
    }
}

impl Related<super::dramas::Entity> for Entity {
    fn to() -> RelationDef {
        super::drama_genres::Relation::Drama.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::drama_genres::Relation::Genre.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
