use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::args::ToolArgs;
use crate::error::{AppError, AppResult};

/// Result payload for share operations.
pub const SUCCESS: &str = "success";

/// Inbound request from the assistant platform.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallRequest {
    pub message: ToolCallMessage,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallMessage {
    pub tool_calls: Vec<ToolCall>,
}

/// One function invocation requested by the assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub function: ToolCallFunction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallFunction {
    pub name: String,
    pub arguments: ToolArguments,
}

/// Arguments arrive either as a JSON object or as JSON text encoding one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ToolArguments {
    Map(Map<String, Value>),
    Text(String),
}

impl ToolArguments {
    /// Decode into an argument map. Text that is not a JSON object is rejected.
    pub fn into_map(self) -> AppResult<Map<String, Value>> {
        match self {
            ToolArguments::Map(map) => Ok(map),
            ToolArguments::Text(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => Ok(map),
                Ok(_) | Err(_) => {
                    tracing::debug!(len = text.len(), "undecodable tool call arguments");
                    Err(invalid_request())
                }
            },
        }
    }
}

impl ToolCallRequest {
    /// The first tool call named `name`. Later calls with the same name are ignored.
    pub fn find_call(&self, name: &str) -> AppResult<&ToolCall> {
        self.message
            .tool_calls
            .iter()
            .find(|call| call.function.name == name)
            .ok_or_else(invalid_request)
    }

    /// Locate the call for `A` and parse its arguments. Returns the call id
    /// alongside the typed arguments.
    pub fn extract<A: ToolArgs>(&self) -> AppResult<(String, A)> {
        let call = self.find_call(A::TOOL_NAME)?;
        let args = call.function.arguments.clone().into_map()?;
        let parsed = A::from_args(&args)?;
        Ok((call.id.clone(), parsed))
    }
}

fn invalid_request() -> AppError {
    AppError::BadRequest("Invalid Request".to_string())
}

/// Outbound envelope: `{"results": [{"toolCallId": ..., "result": ...}]}`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResponse<T> {
    pub results: Vec<ToolResult<T>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult<T> {
    pub tool_call_id: String,
    pub result: T,
}

impl<T: Serialize> ToolResponse<T> {
    /// Envelope holding one result for one tool call.
    pub fn single(tool_call_id: String, result: T) -> Self {
        Self {
            results: vec![ToolResult {
                tool_call_id,
                result,
            }],
        }
    }
}
