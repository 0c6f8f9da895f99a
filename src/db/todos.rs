use sqlx::SqlitePool;

use super::models::{ShareKind, Todo};
use super::shares::visible_to_user_clause;
use crate::error::{AppError, AppResult};

/// Insert a new, uncompleted todo. Returns the stored row.
pub async fn create_todo(
    pool: &SqlitePool,
    title: &str,
    description: Option<&str>,
    created_by: &str,
) -> AppResult<Todo> {
    let result = sqlx::query("INSERT INTO todos (title, description, created_by) VALUES (?, ?, ?)")
        .bind(title)
        .bind(description)
        .bind(created_by)
        .execute(pool)
        .await?;

    get_todo_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Todo created but not found")))
}

/// Look up a todo by id.
pub async fn get_todo_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Todo>> {
    let todo = sqlx::query_as::<_, Todo>("SELECT * FROM todos WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(todo)
}

/// Todos created by or shared with a user, ordered by id.
pub async fn list_todos_for_user(pool: &SqlitePool, user_email: &str) -> AppResult<Vec<Todo>> {
    let query = format!(
        "SELECT * FROM todos WHERE {} ORDER BY id",
        visible_to_user_clause(ShareKind::Todo)
    );
    let todos = sqlx::query_as::<_, Todo>(&query)
        .bind(user_email)
        .bind(user_email)
        .fetch_all(pool)
        .await?;
    Ok(todos)
}

/// Look up a todo the user may act on. `None` covers both a missing todo and
/// one the user can't see.
pub async fn find_accessible_todo(
    pool: &SqlitePool,
    id: i64,
    user_email: &str,
) -> AppResult<Option<Todo>> {
    let query = format!(
        "SELECT * FROM todos WHERE id = ? AND {}",
        visible_to_user_clause(ShareKind::Todo)
    );
    let todo = sqlx::query_as::<_, Todo>(&query)
        .bind(id)
        .bind(user_email)
        .bind(user_email)
        .fetch_optional(pool)
        .await?;
    Ok(todo)
}

/// Mark a todo completed on behalf of its creator or a grantee.
/// Completing an already-completed todo is a no-op success.
pub async fn complete_todo(pool: &SqlitePool, id: i64, user_email: &str) -> AppResult<Todo> {
    let todo = find_accessible_todo(pool, id, user_email)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found or access denied".to_string()))?;

    sqlx::query("UPDATE todos SET completed = 1 WHERE id = ?")
        .bind(todo.id)
        .execute(pool)
        .await?;

    get_todo_by_id(pool, todo.id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Todo updated but not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::db::shares;

    #[tokio::test]
    async fn test_create_todo_defaults() {
        let pool = db::test_pool().await;

        let todo = create_todo(&pool, "Buy milk", None, "a@x.com").await.unwrap();

        assert!(todo.id > 0);
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, None);
        assert!(!todo.completed);
        assert_eq!(todo.created_by, "a@x.com");
    }

    #[tokio::test]
    async fn test_create_todo_ids_increase() {
        let pool = db::test_pool().await;

        let first = create_todo(&pool, "One", Some("first"), "a@x.com").await.unwrap();
        let second = create_todo(&pool, "Two", None, "a@x.com").await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.description.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_list_todos_union_of_created_and_shared() {
        let pool = db::test_pool().await;
        let own = create_todo(&pool, "Mine", None, "b@x.com").await.unwrap();
        let shared = create_todo(&pool, "Theirs", None, "a@x.com").await.unwrap();
        let _other = create_todo(&pool, "Private", None, "a@x.com").await.unwrap();

        shares::grant(&pool, ShareKind::Todo, shared.id, "b@x.com").await.unwrap();

        let todos = list_todos_for_user(&pool, "b@x.com").await.unwrap();
        let ids: Vec<i64> = todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![own.id, shared.id]);
    }

    #[tokio::test]
    async fn test_list_todos_no_duplicates_when_own_and_shared() {
        let pool = db::test_pool().await;
        let todo = create_todo(&pool, "Mine", None, "a@x.com").await.unwrap();

        // Sharing a todo back to its creator must not list it twice.
        shares::grant(&pool, ShareKind::Todo, todo.id, "a@x.com").await.unwrap();

        let todos = list_todos_for_user(&pool, "a@x.com").await.unwrap();
        assert_eq!(todos.len(), 1);
    }

    #[tokio::test]
    async fn test_list_todos_empty() {
        let pool = db::test_pool().await;
        create_todo(&pool, "Mine", None, "a@x.com").await.unwrap();

        let todos = list_todos_for_user(&pool, "nobody@x.com").await.unwrap();
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn test_complete_by_creator_is_idempotent() {
        let pool = db::test_pool().await;
        let todo = create_todo(&pool, "Buy milk", None, "a@x.com").await.unwrap();

        let done = complete_todo(&pool, todo.id, "a@x.com").await.unwrap();
        assert!(done.completed);

        let again = complete_todo(&pool, todo.id, "a@x.com").await.unwrap();
        assert!(again.completed);
        assert_eq!(again.created_at, todo.created_at);
    }

    #[tokio::test]
    async fn test_complete_by_grantee() {
        let pool = db::test_pool().await;
        let todo = create_todo(&pool, "Buy milk", None, "a@x.com").await.unwrap();
        shares::grant(&pool, ShareKind::Todo, todo.id, "b@x.com").await.unwrap();

        let done = complete_todo(&pool, todo.id, "b@x.com").await.unwrap();
        assert!(done.completed);
        assert_eq!(done.created_by, "a@x.com");
    }

    #[tokio::test]
    async fn test_complete_by_stranger_is_not_found() {
        let pool = db::test_pool().await;
        let todo = create_todo(&pool, "Buy milk", None, "a@x.com").await.unwrap();

        let result = complete_todo(&pool, todo.id, "z@x.com").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let unchanged = get_todo_by_id(&pool, todo.id).await.unwrap().unwrap();
        assert!(!unchanged.completed);
    }

    #[tokio::test]
    async fn test_complete_missing_todo_is_not_found() {
        let pool = db::test_pool().await;

        let result = complete_todo(&pool, 42, "a@x.com").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
