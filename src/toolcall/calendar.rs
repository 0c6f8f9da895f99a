use axum::Json;
use axum::extract::State;
use sqlx::SqlitePool;

use super::args::{AddCalendarEntryArgs, GetCalendarEntriesArgs, ShareCalendarEntryArgs};
use super::envelope::{SUCCESS, ToolCallRequest, ToolResponse};
use super::response::{CalendarEventResponse, attach_shares};
use super::share_record;
use crate::db::models::ShareKind;
use crate::db::{events as event_db, shares};
use crate::error::AppResult;

/// Handle POST /add_calendar_entry/.
pub async fn add_calendar_entry(
    State(pool): State<SqlitePool>,
    Json(request): Json<ToolCallRequest>,
) -> AppResult<Json<ToolResponse<CalendarEventResponse>>> {
    let (call_id, args) = request.extract::<AddCalendarEntryArgs>()?;

    let event = event_db::create_event(
        &pool,
        &args.title,
        args.description.as_deref(),
        args.event_from,
        args.event_to,
        &args.created_by,
    )
    .await?;
    tracing::info!(
        event_id = event.id,
        created_by = %event.created_by,
        event_from = %event.event_from,
        "calendar entry added"
    );

    Ok(Json(ToolResponse::single(
        call_id,
        CalendarEventResponse::new(event, Vec::new()),
    )))
}

/// Handle POST /get_calendar_entries/.
pub async fn get_calendar_entries(
    State(pool): State<SqlitePool>,
    Json(request): Json<ToolCallRequest>,
) -> AppResult<Json<ToolResponse<Vec<CalendarEventResponse>>>> {
    let (call_id, args) = request.extract::<GetCalendarEntriesArgs>()?;

    let events = event_db::list_events_for_user(&pool, &args.user_email).await?;
    let grants =
        shares::shared_with_visible(&pool, ShareKind::CalendarEvent, &args.user_email).await?;

    Ok(Json(ToolResponse::single(
        call_id,
        attach_shares(events, grants, |e| e.id, CalendarEventResponse::new),
    )))
}

/// Handle POST /share_calendar_entry/.
pub async fn share_calendar_entry(
    State(pool): State<SqlitePool>,
    Json(request): Json<ToolCallRequest>,
) -> AppResult<Json<ToolResponse<&'static str>>> {
    let (call_id, args) = request.extract::<ShareCalendarEntryArgs>()?;

    share_record(&pool, ShareKind::CalendarEvent, args.event_id, &args.user_email).await?;

    Ok(Json(ToolResponse::single(call_id, SUCCESS)))
}
