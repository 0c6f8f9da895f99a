use axum::Json;
use axum::extract::State;
use sqlx::SqlitePool;

use super::args::{AddReminderArgs, GetRemindersArgs, ShareReminderArgs};
use super::envelope::{SUCCESS, ToolCallRequest, ToolResponse};
use super::response::{ReminderResponse, attach_shares};
use super::share_record;
use crate::db::models::ShareKind;
use crate::db::{reminders as reminder_db, shares};
use crate::error::AppResult;

/// Handle POST /add_reminder/.
pub async fn add_reminder(
    State(pool): State<SqlitePool>,
    Json(request): Json<ToolCallRequest>,
) -> AppResult<Json<ToolResponse<ReminderResponse>>> {
    let (call_id, args) = request.extract::<AddReminderArgs>()?;

    let reminder = reminder_db::create_reminder(
        &pool,
        &args.reminder_text,
        &args.importance,
        &args.created_by,
    )
    .await?;
    tracing::info!(reminder_id = reminder.id, created_by = %reminder.created_by, "reminder added");

    Ok(Json(ToolResponse::single(
        call_id,
        ReminderResponse::new(reminder, Vec::new()),
    )))
}

/// Handle POST /get_reminders/.
pub async fn get_reminders(
    State(pool): State<SqlitePool>,
    Json(request): Json<ToolCallRequest>,
) -> AppResult<Json<ToolResponse<Vec<ReminderResponse>>>> {
    let (call_id, args) = request.extract::<GetRemindersArgs>()?;

    let reminders = reminder_db::list_reminders_for_user(&pool, &args.user_email).await?;
    let grants =
        shares::shared_with_visible(&pool, ShareKind::Reminder, &args.user_email).await?;

    Ok(Json(ToolResponse::single(
        call_id,
        attach_shares(reminders, grants, |r| r.id, ReminderResponse::new),
    )))
}

/// Handle POST /share_reminder/.
pub async fn share_reminder(
    State(pool): State<SqlitePool>,
    Json(request): Json<ToolCallRequest>,
) -> AppResult<Json<ToolResponse<&'static str>>> {
    let (call_id, args) = request.extract::<ShareReminderArgs>()?;

    share_record(&pool, ShareKind::Reminder, args.reminder_id, &args.user_email).await?;

    Ok(Json(ToolResponse::single(call_id, SUCCESS)))
}
