//! Logging trait for chat session traffic.
//!
//! This module provides the [`ChatLogger`] trait that allows hosts to capture
//! every question a [`ChatSession`](crate::chat::ChatSession) sends and every
//! settlement it applies.

use crate::chat::{Outcome, RequestId};
use crate::types::QuestionRequest;

/// A trait for logging chat session traffic.
///
/// # Example
///
/// ```rust,ignore
/// use folio_chat::{ChatLogger, Outcome, QuestionRequest, RequestId};
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ChatLogger for FileLogger {
///     fn log_request(&self, request_id: RequestId, request: &QuestionRequest) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "{request_id} -> {}", serde_json::to_string(request).unwrap()).unwrap();
///     }
///
///     fn log_settlement(&self, request_id: RequestId, outcome: &Outcome) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "{request_id} <- {outcome:?}").unwrap();
///     }
/// }
/// ```
pub trait ChatLogger: Send + Sync {
    /// Log a question as it is handed to the transport.
    fn log_request(&self, request_id: RequestId, request: &QuestionRequest);

    /// Log how a question settled.
    ///
    /// Called exactly once per request that settles while still pending;
    /// stale settlements are not logged.
    fn log_settlement(&self, request_id: RequestId, outcome: &Outcome);
}

/// Logs one line per event to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrLogger;

impl ChatLogger for StderrLogger {
    fn log_request(&self, request_id: RequestId, request: &QuestionRequest) {
        match serde_json::to_string(request) {
            Ok(body) => eprintln!("[{request_id}] POST {body}"),
            Err(err) => eprintln!("[{request_id}] POST <unserializable: {err}>"),
        }
    }

    fn log_settlement(&self, request_id: RequestId, outcome: &Outcome) {
        eprintln!("[{request_id}] {}", outcome.describe());
    }
}
