mod args;
mod calendar;
mod dates;
mod envelope;
mod reminders;
mod response;
mod todos;
pub mod tools;

use axum::Router;
use axum::routing::{get, post};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::models::ShareKind;
use crate::db::shares;
use crate::error::{AppError, AppResult};

/// Build the tool-call router.
///
/// Every route takes the assistant platform's tool-call envelope and answers
/// with `{"results": [{"toolCallId", "result"}]}`. CORS mirrors the caller's
/// origin so credentialed requests from any site are allowed.
pub fn router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/create_todo/", post(todos::create_todo))
        .route("/get_todos/", post(todos::get_todos))
        .route("/complete_todo/", post(todos::complete_todo))
        .route("/share_todo/", post(todos::share_todo))
        .route("/add_reminder/", post(reminders::add_reminder))
        .route("/get_reminders/", post(reminders::get_reminders))
        .route("/share_reminder/", post(reminders::share_reminder))
        .route("/add_calendar_entry/", post(calendar::add_calendar_entry))
        .route("/get_calendar_entries/", post(calendar::get_calendar_entries))
        .route("/share_calendar_entry/", post(calendar::share_calendar_entry))
        .route("/tools", get(tools::list_tools))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(pool)
}

/// Grant `user_email` access to an existing record.
///
/// Anyone who knows a record id may share it; there is no ownership check.
async fn share_record(
    pool: &SqlitePool,
    kind: ShareKind,
    record_id: i64,
    user_email: &str,
) -> AppResult<()> {
    if !shares::record_exists(pool, kind, record_id).await? {
        return Err(AppError::NotFound(format!("{} not found", kind.label())));
    }

    let inserted = shares::grant(pool, kind, record_id, user_email).await?;
    tracing::info!(
        kind = kind.label(),
        record_id,
        user_email,
        inserted,
        "record shared"
    );
    Ok(())
}
