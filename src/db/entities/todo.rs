use sea_orm::entity::prelude::*;

/// One row of the `todos` table.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub title: String,
    pub description: String,
    #[sea_orm(default_value = false)]
    pub completed: bool,
}

impl ActiveModelBehavior for ActiveModel {}
