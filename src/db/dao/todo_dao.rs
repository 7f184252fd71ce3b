use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, Set};

use super::{DaoLayerError, DaoResult};
use crate::db::entities::prelude::Todo;
use crate::db::entities::todo;

const ENTITY: &str = "Todo";

/// Storage access for the `todos` table. Every call is one or two round-trips;
/// nothing is cached between calls.
#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl TodoDao {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn not_found(id: i32) -> DaoLayerError {
        DaoLayerError::NotFound { entity: ENTITY, id }
    }

    pub async fn create(&self, title: String, description: String) -> DaoResult<todo::Model> {
        let model = todo::ActiveModel {
            title: Set(title),
            description: Set(description),
            completed: Set(false),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    pub async fn find_by_id(&self, id: i32) -> DaoResult<todo::Model> {
        Todo::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Overwrites `title` and `description`. The existence check and the write are
    /// separate statements; a row deleted in between surfaces as `NotFound`.
    pub async fn update(
        &self,
        id: i32,
        title: String,
        description: String,
    ) -> DaoResult<todo::Model> {
        let existing = self.find_by_id(id).await?;

        let mut active = existing.into_active_model();
        active.title = Set(title);
        active.description = Set(description);

        match active.update(&self.db).await {
            Ok(model) => Ok(model),
            Err(DbErr::RecordNotUpdated) => Err(Self::not_found(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Single conditional `DELETE`; zero affected rows means the id was absent.
    pub async fn delete(&self, id: i32) -> DaoResult<i32> {
        let result = Todo::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(Self::not_found(id));
        }

        Ok(id)
    }
}
