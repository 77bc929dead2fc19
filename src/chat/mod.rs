//! The chat widget: a scripted greeting, one question at a time, and an input
//! bar that stays above the on-screen keyboard.
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: The question state machine
//! - [`outcome`]: Classifying how a question settled
//! - [`greeting`]: The scripted greeting's copy and steps
//! - [`widget`]: The event loop that drives the session and the viewport guard
//! - [`commands`]: Slash command parsing for the terminal front-end

pub mod commands;
pub mod config;
pub mod greeting;
pub mod outcome;
pub mod session;
pub mod widget;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use greeting::{GreetingContent, GreetingStep};
pub use outcome::{Failure, Outcome, RequestId};
pub use session::{ChatSession, OutgoingRequest, SessionState, SessionStats, SessionTimer};
pub use widget::{ChatWidget, SCROLLING_CLASS, WidgetEvent, WidgetTimer};
