use sqlx::SqlitePool;

use super::models::{Reminder, ShareKind};
use super::shares::visible_to_user_clause;
use crate::error::{AppError, AppResult};

/// Insert a new reminder. Returns the stored row.
pub async fn create_reminder(
    pool: &SqlitePool,
    reminder_text: &str,
    importance: &str,
    created_by: &str,
) -> AppResult<Reminder> {
    let result = sqlx::query(
        "INSERT INTO reminders (reminder_text, importance, created_by) VALUES (?, ?, ?)",
    )
    .bind(reminder_text)
    .bind(importance)
    .bind(created_by)
    .execute(pool)
    .await?;

    get_reminder_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Reminder created but not found")))
}

/// Look up a reminder by id.
pub async fn get_reminder_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Reminder>> {
    let reminder = sqlx::query_as::<_, Reminder>("SELECT * FROM reminders WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(reminder)
}

/// Reminders created by or shared with a user, ordered by id.
pub async fn list_reminders_for_user(
    pool: &SqlitePool,
    user_email: &str,
) -> AppResult<Vec<Reminder>> {
    let query = format!(
        "SELECT * FROM reminders WHERE {} ORDER BY id",
        visible_to_user_clause(ShareKind::Reminder)
    );
    let reminders = sqlx::query_as::<_, Reminder>(&query)
        .bind(user_email)
        .bind(user_email)
        .fetch_all(pool)
        .await?;
    Ok(reminders)
}
