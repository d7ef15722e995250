use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub budget: i64,
    pub genres: String,
    pub keywords: String,
    #[sea_orm(column_type = "Text")]
    pub overview: String,
    #[sea_orm(column_type = "Double")]
    pub popularity: f64,
    /// ISO `YYYY-MM-DD`.
    #[sea_orm(column_type = "Date")]
    pub release_date: String,
    pub revenue: i64,
    pub title: String,
    #[sea_orm(column_type = "Double")]
    pub vote_average: f64,
    pub vote_count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
