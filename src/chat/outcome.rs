//! Classifying how a question settled.

use std::fmt;

use crate::error::Result;
use crate::types::{AnswerBody, ErrorBody, HttpReply};

/// Reply used when a successful body carries neither `answer` nor `message`.
pub const DEFAULT_REPLY: &str = "I received your question!";

/// Shown for any 5xx status.
pub const SERVER_ERROR_TEXT: &str = "Server error. Please try again later.";

/// Shown when no response reached us.
pub const CONNECT_ERROR_TEXT: &str =
    "Unable to connect to the server. Please check your connection.";

/// Shown when a 2xx body is not a JSON object.
pub const PARSE_ERROR_TEXT: &str = "Sorry, I couldn't understand the server's response.";

/// Identifies one question sent by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request-{}", self.0)
    }
}

/// Why a question did not produce an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// No response reached the caller.
    TransportUnreachable,
    /// The server answered with a 5xx status.
    ServerError {
        /// HTTP status code.
        status: u16,
    },
    /// The server answered with a 4xx status.
    ClientError {
        /// HTTP status code.
        status: u16,
        /// The body's `error` field, if it had one.
        message: Option<String>,
    },
    /// Any other non-2xx status.
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
    },
    /// A 2xx body that is not a JSON object.
    ResponseParseError,
}

impl Failure {
    /// The bot message shown for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Failure::TransportUnreachable => CONNECT_ERROR_TEXT.to_string(),
            Failure::ServerError { .. } => SERVER_ERROR_TEXT.to_string(),
            Failure::ClientError {
                message: Some(message),
                ..
            } => message.clone(),
            Failure::ClientError { status, .. } | Failure::UnexpectedStatus { status } => {
                generic_error_text(*status)
            }
            Failure::ResponseParseError => PARSE_ERROR_TEXT.to_string(),
        }
    }

    /// The status code involved, if a response arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            Failure::ServerError { status }
            | Failure::ClientError { status, .. }
            | Failure::UnexpectedStatus { status } => Some(*status),
            Failure::TransportUnreachable | Failure::ResponseParseError => None,
        }
    }
}

/// The message shown for statuses without a more specific text.
pub fn generic_error_text(status: u16) -> String {
    format!("Sorry, I encountered an error processing your question (status {status}).")
}

/// How a question settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server answered; the reply is always rendered as plain text.
    Answered(String),
    /// Something went wrong.
    Failed(Failure),
}

impl Outcome {
    /// Classifies a transport result.
    ///
    /// Any `Err` is a transport failure: by the [`Transport`](crate::Transport)
    /// contract, errors mean no response arrived.
    pub fn classify(result: &Result<HttpReply>, fallback_reply: &str) -> Self {
        let reply = match result {
            Ok(reply) => reply,
            Err(_) => return Outcome::Failed(Failure::TransportUnreachable),
        };
        let status = reply.status;
        if reply.is_success() {
            return match AnswerBody::parse(&reply.body) {
                Ok(body) => Outcome::Answered(body.reply().unwrap_or(fallback_reply).to_string()),
                Err(_) => Outcome::Failed(Failure::ResponseParseError),
            };
        }
        let failure = match status {
            500.. => Failure::ServerError { status },
            400..=499 => Failure::ClientError {
                status,
                message: ErrorBody::error_message(&reply.body),
            },
            _ => Failure::UnexpectedStatus { status },
        };
        Outcome::Failed(failure)
    }

    /// The bot message text for this outcome.
    pub fn text(&self) -> String {
        match self {
            Outcome::Answered(reply) => reply.clone(),
            Outcome::Failed(failure) => failure.user_message(),
        }
    }

    /// Returns true if the server answered.
    pub fn is_answered(&self) -> bool {
        matches!(self, Outcome::Answered(_))
    }

    /// A one-line summary for logs.
    pub fn describe(&self) -> String {
        match self {
            Outcome::Answered(reply) => format!("answered ({} bytes)", reply.len()),
            Outcome::Failed(Failure::TransportUnreachable) => "transport unreachable".to_string(),
            Outcome::Failed(Failure::ServerError { status }) => format!("server error {status}"),
            Outcome::Failed(Failure::ClientError { status, message }) => match message {
                Some(message) => format!("client error {status}: {message}"),
                None => format!("client error {status}"),
            },
            Outcome::Failed(Failure::UnexpectedStatus { status }) => {
                format!("unexpected status {status}")
            }
            Outcome::Failed(Failure::ResponseParseError) => "unparseable response".to_string(),
        }
    }
}
