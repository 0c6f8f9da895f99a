use axum::Json;
use serde_json::{Value, json};

use super::args::{
    AddCalendarEntryArgs, AddReminderArgs, CompleteTodoArgs, CreateTodoArgs,
    GetCalendarEntriesArgs, GetRemindersArgs, GetTodosArgs, ShareCalendarEntryArgs,
    ShareReminderArgs, ShareTodoArgs, ToolArgs,
};

/// A function definition to register with the assistant platform.
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

impl ToolDef {
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "parameters": self.parameters,
        })
    }
}

fn share_schema(id_key: &str, id_description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            id_key: {"type": "integer", "description": id_description},
            "user_email": {"type": "string", "description": "Email of the user to share with"}
        },
        "required": [id_key, "user_email"]
    })
}

fn list_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "user_email": {"type": "string", "description": "Email of the user whose items to list"}
        },
        "required": ["user_email"]
    })
}

/// Every tool this server accepts.
pub fn all_tools() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: CreateTodoArgs::TOOL_NAME,
            description: "Create a to-do item.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "title": {"type": "string", "description": "Short title of the to-do"},
                    "description": {"type": "string", "description": "Optional details"},
                    "created_by": {"type": "string", "description": "Email of the user creating it"}
                },
                "required": ["title", "created_by"]
            }),
        },
        ToolDef {
            name: GetTodosArgs::TOOL_NAME,
            description: "List to-do items created by or shared with a user.",
            parameters: list_schema(),
        },
        ToolDef {
            name: CompleteTodoArgs::TOOL_NAME,
            description: "Mark a to-do item as completed.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "id": {"type": "integer", "description": "To-do id"},
                    "created_by": {"type": "string", "description": "Email of the user completing it"}
                },
                "required": ["id", "created_by"]
            }),
        },
        ToolDef {
            name: ShareTodoArgs::TOOL_NAME,
            description: "Share a to-do item with another user.",
            parameters: share_schema("todo_id", "To-do id"),
        },
        ToolDef {
            name: AddReminderArgs::TOOL_NAME,
            description: "Add a reminder.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "reminder_text": {"type": "string", "description": "What to be reminded of"},
                    "importance": {"type": "string", "description": "Importance, e.g. low, medium, high"},
                    "created_by": {"type": "string", "description": "Email of the user creating it"}
                },
                "required": ["reminder_text", "importance", "created_by"]
            }),
        },
        ToolDef {
            name: GetRemindersArgs::TOOL_NAME,
            description: "List reminders created by or shared with a user.",
            parameters: list_schema(),
        },
        ToolDef {
            name: ShareReminderArgs::TOOL_NAME,
            description: "Share a reminder with another user.",
            parameters: share_schema("reminder_id", "Reminder id"),
        },
        ToolDef {
            name: AddCalendarEntryArgs::TOOL_NAME,
            description: "Add a calendar entry.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "title": {"type": "string", "description": "Event title"},
                    "description": {"type": "string", "description": "Optional details"},
                    "event_from": {"type": "string", "description": "Start, ISO-8601 e.g. 2026-03-01T09:00:00"},
                    "event_to": {"type": "string", "description": "End, ISO-8601 e.g. 2026-03-01T10:00:00"},
                    "created_by": {"type": "string", "description": "Email of the user creating it"}
                },
                "required": ["title", "event_from", "event_to", "created_by"]
            }),
        },
        ToolDef {
            name: GetCalendarEntriesArgs::TOOL_NAME,
            description: "List calendar entries created by or shared with a user.",
            parameters: list_schema(),
        },
        ToolDef {
            name: ShareCalendarEntryArgs::TOOL_NAME,
            description: "Share a calendar entry with another user.",
            parameters: share_schema("event_id", "Calendar entry id"),
        },
    ]
}

/// `{"tools": [...]}` for every tool definition.
pub fn tools_json() -> Value {
    let tools: Vec<Value> = all_tools().iter().map(ToolDef::to_json).collect();
    json!({ "tools": tools })
}

/// Handle GET /tools.
pub async fn list_tools() -> Json<Value> {
    Json(tools_json())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tool_names_unique() {
        let tools = all_tools();
        let names: HashSet<&str> = tools.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), tools.len());
        assert_eq!(tools.len(), 10);
    }

    #[test]
    fn test_required_keys_are_declared_properties() {
        for tool in all_tools() {
            let properties = tool.parameters["properties"].as_object().unwrap();
            for key in tool.parameters["required"].as_array().unwrap() {
                let key = key.as_str().unwrap();
                assert!(
                    properties.contains_key(key),
                    "{}: required key {key} has no property",
                    tool.name
                );
            }
        }
    }

    #[test]
    fn test_share_schema_uses_id_key() {
        let schema = share_schema("event_id", "Calendar entry id");
        assert_eq!(schema["properties"]["event_id"]["type"], "integer");
        assert_eq!(schema["required"], json!(["event_id", "user_email"]));
    }
}
