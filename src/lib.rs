// Public modules
pub mod chat;
pub mod chat_logger;
pub mod client;
pub mod error;
pub mod observability;
pub mod render;
pub mod scheduler;
pub mod surface;
pub mod types;
pub mod viewport;

// Re-exports
pub use chat::{
    ChatArgs, ChatConfig, ChatSession, ChatWidget, Failure, GreetingContent, Outcome, RequestId,
    SessionState, SessionTimer, WidgetEvent, WidgetTimer,
};
pub use chat_logger::{ChatLogger, StderrLogger};
pub use client::{HttpTransport, Transport};
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use render::{MessageNode, NodeContent, NodeKind, TerminalSurface, render_message};
pub use scheduler::{ManualScheduler, Scheduler, TokioScheduler};
pub use surface::{MemorySurface, NodeId, Notification, Surface};
pub use types::*;
pub use viewport::{GuardTimer, Platform, ViewportConfig, ViewportGuard, ViewportMode};
