//! Typed arguments for each tool.
//!
//! Every tool call is validated here before any storage access: required keys
//! must be present and truthy, ids must be integers, dates must parse.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use super::dates::parse_iso_datetime;
use crate::error::{AppError, AppResult};

/// Arguments for one named tool, parsed from the call's argument map.
pub trait ToolArgs: Sized {
    /// `function.name` the assistant uses for this tool.
    const TOOL_NAME: &'static str;

    fn from_args(args: &Map<String, Value>) -> AppResult<Self>;
}

/// Truthiness as the assistant platform treats it: null, empty and zero are absent.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Reject the call unless every key in `keys` holds a truthy value.
fn require(args: &Map<String, Value>, keys: &[&str]) -> AppResult<()> {
    let missing = keys
        .iter()
        .any(|key| args.get(*key).is_none_or(is_falsy));
    if missing {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }
    Ok(())
}

/// A textual field. Numbers are accepted and rendered as text.
fn text(args: &Map<String, Value>, key: &str) -> AppResult<String> {
    match args.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(AppError::BadRequest(format!("Invalid {key}"))),
    }
}

fn optional_text(args: &Map<String, Value>, key: &str) -> AppResult<Option<String>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => text(args, key).map(Some),
    }
}

/// A record id, given as a JSON integer, an integral float such as `2.0`, or a
/// numeric string.
fn record_id(args: &Map<String, Value>, key: &str) -> AppResult<i64> {
    let id = match args.get(key) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    id.ok_or_else(|| AppError::BadRequest(format!("Invalid {key}")))
}

fn datetime(args: &Map<String, Value>, key: &str) -> AppResult<NaiveDateTime> {
    args.get(key)
        .and_then(Value::as_str)
        .and_then(parse_iso_datetime)
        .ok_or_else(|| AppError::BadRequest("Invalid date format".to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTodoArgs {
    pub title: String,
    pub description: Option<String>,
    pub created_by: String,
}

impl ToolArgs for CreateTodoArgs {
    const TOOL_NAME: &'static str = "createTodo";

    fn from_args(args: &Map<String, Value>) -> AppResult<Self> {
        require(args, &["title", "created_by"])?;
        Ok(Self {
            title: text(args, "title")?,
            description: optional_text(args, "description")?,
            created_by: text(args, "created_by")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetTodosArgs {
    pub user_email: String,
}

impl ToolArgs for GetTodosArgs {
    const TOOL_NAME: &'static str = "getTodos";

    fn from_args(args: &Map<String, Value>) -> AppResult<Self> {
        require(args, &["user_email"])?;
        Ok(Self {
            user_email: text(args, "user_email")?,
        })
    }
}

/// `created_by` here names the acting user, not the todo's creator.
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteTodoArgs {
    pub id: i64,
    pub acting_user: String,
}

impl ToolArgs for CompleteTodoArgs {
    const TOOL_NAME: &'static str = "completeTodo";

    fn from_args(args: &Map<String, Value>) -> AppResult<Self> {
        require(args, &["id", "created_by"])?;
        Ok(Self {
            id: record_id(args, "id")?,
            acting_user: text(args, "created_by")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareTodoArgs {
    pub todo_id: i64,
    pub user_email: String,
}

impl ToolArgs for ShareTodoArgs {
    const TOOL_NAME: &'static str = "shareTodo";

    fn from_args(args: &Map<String, Value>) -> AppResult<Self> {
        require(args, &["todo_id", "user_email"])?;
        Ok(Self {
            todo_id: record_id(args, "todo_id")?,
            user_email: text(args, "user_email")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddReminderArgs {
    pub reminder_text: String,
    pub importance: String,
    pub created_by: String,
}

impl ToolArgs for AddReminderArgs {
    const TOOL_NAME: &'static str = "addReminder";

    fn from_args(args: &Map<String, Value>) -> AppResult<Self> {
        require(args, &["reminder_text", "importance", "created_by"])?;
        Ok(Self {
            reminder_text: text(args, "reminder_text")?,
            importance: text(args, "importance")?,
            created_by: text(args, "created_by")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetRemindersArgs {
    pub user_email: String,
}

impl ToolArgs for GetRemindersArgs {
    const TOOL_NAME: &'static str = "getReminders";

    fn from_args(args: &Map<String, Value>) -> AppResult<Self> {
        require(args, &["user_email"])?;
        Ok(Self {
            user_email: text(args, "user_email")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareReminderArgs {
    pub reminder_id: i64,
    pub user_email: String,
}

impl ToolArgs for ShareReminderArgs {
    const TOOL_NAME: &'static str = "shareReminder";

    fn from_args(args: &Map<String, Value>) -> AppResult<Self> {
        require(args, &["reminder_id", "user_email"])?;
        Ok(Self {
            reminder_id: record_id(args, "reminder_id")?,
            user_email: text(args, "user_email")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCalendarEntryArgs {
    pub title: String,
    pub description: Option<String>,
    pub event_from: NaiveDateTime,
    pub event_to: NaiveDateTime,
    pub created_by: String,
}

impl ToolArgs for AddCalendarEntryArgs {
    const TOOL_NAME: &'static str = "addCalendarEntry";

    fn from_args(args: &Map<String, Value>) -> AppResult<Self> {
        require(args, &["title", "event_from", "event_to", "created_by"])?;
        Ok(Self {
            title: text(args, "title")?,
            description: optional_text(args, "description")?,
            event_from: datetime(args, "event_from")?,
            event_to: datetime(args, "event_to")?,
            created_by: text(args, "created_by")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetCalendarEntriesArgs {
    pub user_email: String,
}

impl ToolArgs for GetCalendarEntriesArgs {
    const TOOL_NAME: &'static str = "getCalendarEntries";

    fn from_args(args: &Map<String, Value>) -> AppResult<Self> {
        require(args, &["user_email"])?;
        Ok(Self {
            user_email: text(args, "user_email")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareCalendarEntryArgs {
    pub event_id: i64,
    pub user_email: String,
}

impl ToolArgs for ShareCalendarEntryArgs {
    const TOOL_NAME: &'static str = "shareCalendarEntry";

    fn from_args(args: &Map<String, Value>) -> AppResult<Self> {
        require(args, &["event_id", "user_email"])?;
        Ok(Self {
            event_id: record_id(args, "event_id")?,
            user_email: text(args, "user_email")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => panic!("expected an object"),
        }
    }

    fn is_missing(result: AppResult<impl std::fmt::Debug>) -> bool {
        matches!(result, Err(AppError::BadRequest(ref m)) if m == "Missing required fields")
    }

    #[test]
    fn test_create_todo_description_defaults_to_none() {
        let args = CreateTodoArgs::from_args(&map(json!({
            "title": "Buy milk",
            "created_by": "a@x.com"
        })))
        .unwrap();

        assert_eq!(
            args,
            CreateTodoArgs {
                title: "Buy milk".into(),
                description: None,
                created_by: "a@x.com".into(),
            }
        );
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        for title in [json!(""), json!(null), json!(false), json!(0), json!([])] {
            let result = CreateTodoArgs::from_args(&map(json!({
                "title": title,
                "created_by": "a@x.com"
            })));
            assert!(is_missing(result), "title {title} should be missing");
        }
        assert!(is_missing(CreateTodoArgs::from_args(&map(json!({"title": "x"})))));
    }

    #[test]
    fn test_ids_accept_numbers_and_numeric_strings() {
        let args = CompleteTodoArgs::from_args(&map(json!({"id": 4, "created_by": "a@x.com"})))
            .unwrap();
        assert_eq!(args.id, 4);
        assert_eq!(args.acting_user, "a@x.com");

        let args = ShareTodoArgs::from_args(&map(json!({"todo_id": " 12 ", "user_email": "b@x.com"})))
            .unwrap();
        assert_eq!(args.todo_id, 12);
    }

    #[test]
    fn test_integral_float_ids_accepted() {
        let args = CompleteTodoArgs::from_args(&map(json!({"id": 2.0, "created_by": "a@x.com"})))
            .unwrap();
        assert_eq!(args.id, 2);

        let err = ShareTodoArgs::from_args(&map(json!({"todo_id": 2.5, "user_email": "b@x.com"})))
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid todo_id"));
    }

    #[test]
    fn test_zero_id_is_missing_and_junk_id_is_invalid() {
        assert!(is_missing(CompleteTodoArgs::from_args(&map(json!({
            "id": 0,
            "created_by": "a@x.com"
        })))));

        let err = ShareReminderArgs::from_args(&map(json!({
            "reminder_id": "abc",
            "user_email": "b@x.com"
        })))
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid reminder_id"));
    }

    #[test]
    fn test_add_reminder_requires_all_fields() {
        assert!(is_missing(AddReminderArgs::from_args(&map(json!({
            "reminder_text": "Call mom",
            "created_by": "a@x.com"
        })))));

        let args = AddReminderArgs::from_args(&map(json!({
            "reminder_text": "Call mom",
            "importance": 3,
            "created_by": "a@x.com"
        })))
        .unwrap();
        assert_eq!(args.importance, "3");
    }

    #[test]
    fn test_calendar_entry_dates() {
        let args = AddCalendarEntryArgs::from_args(&map(json!({
            "title": "Standup",
            "event_from": "2026-03-01T09:00:00",
            "event_to": "2026-03-01T09:15:00",
            "created_by": "a@x.com"
        })))
        .unwrap();
        assert_eq!(args.event_from.to_string(), "2026-03-01 09:00:00");
        assert_eq!(args.description, None);

        let err = AddCalendarEntryArgs::from_args(&map(json!({
            "title": "Standup",
            "event_from": "not-a-date",
            "event_to": "2026-03-01T09:15:00",
            "created_by": "a@x.com"
        })))
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid date format"));
    }

    #[test]
    fn test_missing_fields_checked_before_dates() {
        let result = AddCalendarEntryArgs::from_args(&map(json!({
            "title": "Standup",
            "event_from": "not-a-date"
        })));
        assert!(is_missing(result));
    }

    #[test]
    fn test_non_text_description_rejected() {
        let err = CreateTodoArgs::from_args(&map(json!({
            "title": "Buy milk",
            "description": {"nested": true},
            "created_by": "a@x.com"
        })))
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid description"));
    }
}
