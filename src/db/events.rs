use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use super::models::{CalendarEvent, ShareKind};
use super::shares::visible_to_user_clause;
use crate::error::{AppError, AppResult};

/// Insert a new calendar event. Returns the stored row.
pub async fn create_event(
    pool: &SqlitePool,
    title: &str,
    description: Option<&str>,
    event_from: NaiveDateTime,
    event_to: NaiveDateTime,
    created_by: &str,
) -> AppResult<CalendarEvent> {
    let result = sqlx::query(
        "INSERT INTO calendar_events (title, description, event_from, event_to, created_by)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(title)
    .bind(description)
    .bind(event_from)
    .bind(event_to)
    .bind(created_by)
    .execute(pool)
    .await?;

    get_event_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Calendar event created but not found")))
}

/// Look up a calendar event by id.
pub async fn get_event_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<CalendarEvent>> {
    let event = sqlx::query_as::<_, CalendarEvent>("SELECT * FROM calendar_events WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(event)
}

/// Calendar events created by or shared with a user, ordered by start time.
pub async fn list_events_for_user(
    pool: &SqlitePool,
    user_email: &str,
) -> AppResult<Vec<CalendarEvent>> {
    let query = format!(
        "SELECT * FROM calendar_events WHERE {} ORDER BY event_from, id",
        visible_to_user_clause(ShareKind::CalendarEvent)
    );
    let events = sqlx::query_as::<_, CalendarEvent>(&query)
        .bind(user_email)
        .bind(user_email)
        .fetch_all(pool)
        .await?;
    Ok(events)
}
