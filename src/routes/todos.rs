use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    db::entities::todo,
    error::AppError,
    services::{
        ServiceContext,
        todo_service::{TodoFields, TodoService},
    },
    state::AppState,
};

pub const TODO_NOT_FOUND: &str = "Todo not found";
pub const TODO_DELETED: &str = "Todo deleted successfully";

/// Body of `POST /todos` and `PUT /todos/{id}`. Unknown fields, including
/// `completed`, are ignored.
#[derive(Debug, Deserialize)]
pub struct TodoRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos", post(create_todo))
        .route(
            "/todos/{todo_id}",
            get(read_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(state)
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), AppError> {
    let todo = todo_service_from_state(&state).create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(todo.into())))
}

async fn read_todo(
    State(state): State<Arc<AppState>>,
    Path(todo_id): Path<String>,
) -> Result<Json<TodoResponse>, AppError> {
    let id = parse_todo_id(&todo_id)?;
    let todo = todo_service_from_state(&state).get(id).await?;
    Ok(Json(todo.into()))
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(todo_id): Path<String>,
    Json(body): Json<TodoRequest>,
) -> Result<Json<TodoResponse>, AppError> {
    let id = parse_todo_id(&todo_id)?;
    let todo = todo_service_from_state(&state)
        .update(id, body.into())
        .await?;
    Ok(Json(todo.into()))
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(todo_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_todo_id(&todo_id)?;
    todo_service_from_state(&state).delete(id).await?;
    Ok(Json(MessageResponse {
        message: TODO_DELETED,
    }))
}

/// Integers outside the key range cannot name a stored row, so they are
/// reported as not found rather than as malformed input.
fn parse_todo_id(raw: &str) -> Result<i32, AppError> {
    let digits = raw
        .strip_prefix('-')
        .or_else(|| raw.strip_prefix('+'))
        .unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::validation(format!(
            "todo_id must be an integer, got `{raw}`"
        )));
    }
    raw.parse::<i32>()
        .map_err(|_| AppError::not_found(TODO_NOT_FOUND))
}

fn todo_service_from_state(state: &AppState) -> TodoService {
    ServiceContext::from_state(state).todo()
}

impl From<TodoRequest> for TodoFields {
    fn from(body: TodoRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
        }
    }
}

impl From<todo::Model> for TodoResponse {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
        }
    }
}
