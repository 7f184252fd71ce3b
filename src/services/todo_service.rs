use crate::{db::dao::TodoDao, db::entities::todo, error::AppError};

/// Input accepted by create and update; `completed` is never client-supplied.
#[derive(Debug, Clone)]
pub struct TodoFields {
    pub title: String,
    pub description: String,
}

#[derive(Clone)]
pub struct TodoService {
    todo_dao: TodoDao,
}

impl TodoService {
    pub fn new(todo_dao: TodoDao) -> Self {
        Self { todo_dao }
    }

    pub async fn create(&self, fields: TodoFields) -> Result<todo::Model, AppError> {
        let todo = self
            .todo_dao
            .create(fields.title, fields.description)
            .await?;
        tracing::debug!(id = todo.id, "todo created");
        Ok(todo)
    }

    pub async fn get(&self, id: i32) -> Result<todo::Model, AppError> {
        Ok(self.todo_dao.find_by_id(id).await?)
    }

    pub async fn update(&self, id: i32, fields: TodoFields) -> Result<todo::Model, AppError> {
        let todo = self
            .todo_dao
            .update(id, fields.title, fields.description)
            .await?;
        tracing::debug!(id, "todo updated");
        Ok(todo)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.todo_dao.delete(id).await?;
        tracing::debug!(id, "todo deleted");
        Ok(())
    }
}
