// Public modules
pub mod answer_body;
pub mod http_reply;
pub mod message;
pub mod question_request;
pub mod viewport_frame;

// Re-exports
pub use answer_body::{AnswerBody, ErrorBody};
pub use http_reply::HttpReply;
pub use message::Message;
pub use question_request::{PayloadField, QuestionRequest};
pub use viewport_frame::ViewportFrame;
