use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "dramas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub synopsis: Option<String>,

    pub poster_url: Option<String>,

    pub year: i32,

    /// Mean review rating, maintained by the review write path.
    pub rating: f64,

    pub total_seasons: i32,

    /// `ongoing` or `completed`
    pub status: String,

    pub view_count: i64,

    pub source_url: Option<String>,

    pub added_by: Option<i32>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AddedBy",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    AddedBy,
    #[sea_orm(has_many = "super::drama_genres::Entity")]
    DramaGenres,
    #[sea_orm(has_many = "super::drama_actors::Entity")]
    DramaActors,
    #[sea_orm(has_many = "super::seasons::Entity")]
    Seasons,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AddedBy.def()
    }
}

impl Related<super::drama_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DramaGenres.def()
    }
}

impl Related<super::drama_actors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DramaActors.def()
    }
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seasons.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        super::drama_genres::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::drama_genres::Relation::Drama.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
