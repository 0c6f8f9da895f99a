use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A to-do item.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}

/// A free-text reminder with an importance label.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reminder {
    pub id: i64,
    pub reminder_text: String,
    pub importance: String,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}

/// A calendar entry spanning `event_from`..`event_to`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_from: NaiveDateTime,
    pub event_to: NaiveDateTime,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}

/// The kinds of record that can be shared. Each kind has its own share table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareKind {
    Todo,
    Reminder,
    CalendarEvent,
}

impl ShareKind {
    /// Human-readable name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            ShareKind::Todo => "Todo",
            ShareKind::Reminder => "Reminder",
            ShareKind::CalendarEvent => "Calendar event",
        }
    }

    /// Table holding the shared records.
    pub fn record_table(&self) -> &'static str {
        match self {
            ShareKind::Todo => "todos",
            ShareKind::Reminder => "reminders",
            ShareKind::CalendarEvent => "calendar_events",
        }
    }

    /// Table holding the `(record, user_email)` grants.
    pub fn share_table(&self) -> &'static str {
        match self {
            ShareKind::Todo => "todo_shares",
            ShareKind::Reminder => "reminder_shares",
            ShareKind::CalendarEvent => "calendar_shares",
        }
    }

    /// Foreign-key column in the share table.
    pub fn share_column(&self) -> &'static str {
        match self {
            ShareKind::Todo => "todo_id",
            ShareKind::Reminder => "reminder_id",
            ShareKind::CalendarEvent => "event_id",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_kind_tables() {
        assert_eq!(ShareKind::Todo.record_table(), "todos");
        assert_eq!(ShareKind::Todo.share_table(), "todo_shares");
        assert_eq!(ShareKind::Todo.share_column(), "todo_id");
        assert_eq!(ShareKind::Reminder.share_column(), "reminder_id");
        assert_eq!(ShareKind::CalendarEvent.record_table(), "calendar_events");
        assert_eq!(ShareKind::CalendarEvent.share_table(), "calendar_shares");
        assert_eq!(ShareKind::CalendarEvent.share_column(), "event_id");
    }

    #[test]
    fn test_todo_serializes_timestamps_as_iso() {
        let todo = Todo {
            id: 1,
            title: "Buy milk".into(),
            description: None,
            completed: false,
            created_by: "a@x.com".into(),
            created_at: NaiveDateTime::parse_from_str("2026-03-01 09:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["created_at"], "2026-03-01T09:00:00");
        assert!(json["description"].is_null());
    }
}
