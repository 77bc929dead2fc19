use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// The JSON field that carries the question in a request body.
///
/// Deployed endpoints disagree on this name.  The choice is made once, in
/// configuration; a request never carries both fields.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PayloadField {
    /// `{"question": "..."}`, the canonical contract.
    #[default]
    Question,
    /// `{"message": "..."}`, for endpoints that only accept this name.
    Message,
}

impl PayloadField {
    /// The JSON key this variant serializes the question under.
    pub fn key(&self) -> &'static str {
        match self {
            PayloadField::Question => "question",
            PayloadField::Message => "message",
        }
    }
}

impl fmt::Display for PayloadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PayloadField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "question" => Ok(PayloadField::Question),
            "message" => Ok(PayloadField::Message),
            other => Err(format!(
                "unknown payload field {other:?} (expected question or message)"
            )),
        }
    }
}

/// The body posted to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRequest {
    /// The trimmed question text.
    pub question: String,

    /// Which key the question is sent under.
    pub field: PayloadField,
}

impl QuestionRequest {
    /// Creates a request using the given payload field.
    pub fn new<S: Into<String>>(question: S, field: PayloadField) -> Self {
        Self {
            question: question.into(),
            field,
        }
    }
}

impl Serialize for QuestionRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.field.key(), &self.question)?;
        map.end()
    }
}
