use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A successful response body from the chat endpoint.
///
/// Only JSON objects are accepted.  Fields that are absent, empty or not
/// strings are treated as missing rather than as a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerBody {
    /// The `answer` field.
    pub answer: Option<String>,

    /// The `message` field.
    pub message: Option<String>,
}

impl AnswerBody {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns a serialization error when the body is not a JSON object.
    pub fn parse(body: &str) -> Result<Self> {
        let object: Map<String, Value> = serde_json::from_str(body).map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })?;
        Ok(Self {
            answer: non_empty_string(object.get("answer")),
            message: non_empty_string(object.get("message")),
        })
    }

    /// The reply text: `answer`, else `message`.
    pub fn reply(&self) -> Option<&str> {
        self.answer.as_deref().or(self.message.as_deref())
    }
}

/// The body of a 4xx response that carries a structured error.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// The human-readable error, if the server supplied one.
    #[serde(default)]
    pub error: Option<Value>,
}

impl ErrorBody {
    /// Extracts the non-empty `error` string from a body, if there is one.
    pub fn error_message(body: &str) -> Option<String> {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
        non_empty_string(parsed.error.as_ref())
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
