use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::db::models::{CalendarEvent, Reminder, Todo};

#[derive(Debug, Clone, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub shared_with: Vec<String>,
}

impl TodoResponse {
    pub fn new(todo: Todo, shared_with: Vec<String>) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
            created_by: todo.created_by,
            created_at: todo.created_at,
            shared_with,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderResponse {
    pub id: i64,
    pub reminder_text: String,
    pub importance: String,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub shared_with: Vec<String>,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder, shared_with: Vec<String>) -> Self {
        Self {
            id: reminder.id,
            reminder_text: reminder.reminder_text,
            importance: reminder.importance,
            created_by: reminder.created_by,
            created_at: reminder.created_at,
            shared_with,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarEventResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_from: NaiveDateTime,
    pub event_to: NaiveDateTime,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub shared_with: Vec<String>,
}

impl CalendarEventResponse {
    pub fn new(event: CalendarEvent, shared_with: Vec<String>) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            event_from: event.event_from,
            event_to: event.event_to,
            created_by: event.created_by,
            created_at: event.created_at,
            shared_with,
        }
    }
}

/// Pair each record with its grants from `shares` (keyed by record id) and
/// build the response for it.
pub fn attach_shares<T, R>(
    records: Vec<T>,
    mut shares: HashMap<i64, Vec<String>>,
    id_of: impl Fn(&T) -> i64,
    build: impl Fn(T, Vec<String>) -> R,
) -> Vec<R> {
    records
        .into_iter()
        .map(|record| {
            let shared_with = shares.remove(&id_of(&record)).unwrap_or_default();
            build(record, shared_with)
        })
        .collect()
}
