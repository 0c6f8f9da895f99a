use axum::Json;
use axum::extract::State;
use sqlx::SqlitePool;

use super::args::{CompleteTodoArgs, CreateTodoArgs, GetTodosArgs, ShareTodoArgs};
use super::envelope::{SUCCESS, ToolCallRequest, ToolResponse};
use super::response::{TodoResponse, attach_shares};
use super::share_record;
use crate::db::models::ShareKind;
use crate::db::{shares, todos as todo_db};
use crate::error::AppResult;

/// Handle POST /create_todo/.
pub async fn create_todo(
    State(pool): State<SqlitePool>,
    Json(request): Json<ToolCallRequest>,
) -> AppResult<Json<ToolResponse<TodoResponse>>> {
    let (call_id, args) = request.extract::<CreateTodoArgs>()?;

    let todo = todo_db::create_todo(
        &pool,
        &args.title,
        args.description.as_deref(),
        &args.created_by,
    )
    .await?;
    tracing::info!(todo_id = todo.id, created_by = %todo.created_by, "todo created");

    Ok(Json(ToolResponse::single(
        call_id,
        TodoResponse::new(todo, Vec::new()),
    )))
}

/// Handle POST /get_todos/.
pub async fn get_todos(
    State(pool): State<SqlitePool>,
    Json(request): Json<ToolCallRequest>,
) -> AppResult<Json<ToolResponse<Vec<TodoResponse>>>> {
    let (call_id, args) = request.extract::<GetTodosArgs>()?;

    let todos = todo_db::list_todos_for_user(&pool, &args.user_email).await?;
    let grants =
        shares::shared_with_visible(&pool, ShareKind::Todo, &args.user_email).await?;
    tracing::debug!(user_email = %args.user_email, count = todos.len(), "todos listed");

    Ok(Json(ToolResponse::single(
        call_id,
        attach_shares(todos, grants, |t| t.id, TodoResponse::new),
    )))
}

/// Handle POST /complete_todo/. Only the creator or a grantee may complete.
pub async fn complete_todo(
    State(pool): State<SqlitePool>,
    Json(request): Json<ToolCallRequest>,
) -> AppResult<Json<ToolResponse<TodoResponse>>> {
    let (call_id, args) = request.extract::<CompleteTodoArgs>()?;

    let todo = todo_db::complete_todo(&pool, args.id, &args.acting_user).await?;
    let shared_with = shares::shared_with(&pool, ShareKind::Todo, todo.id).await?;
    tracing::info!(todo_id = todo.id, user_email = %args.acting_user, "todo completed");

    Ok(Json(ToolResponse::single(
        call_id,
        TodoResponse::new(todo, shared_with),
    )))
}

/// Handle POST /share_todo/.
pub async fn share_todo(
    State(pool): State<SqlitePool>,
    Json(request): Json<ToolCallRequest>,
) -> AppResult<Json<ToolResponse<&'static str>>> {
    let (call_id, args) = request.extract::<ShareTodoArgs>()?;

    share_record(&pool, ShareKind::Todo, args.todo_id, &args.user_email).await?;

    Ok(Json(ToolResponse::single(call_id, SUCCESS)))
}
