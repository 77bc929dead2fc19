/// A response that reached the caller: status code and raw body.
///
/// Transports return this for every status, success or not; classifying the
/// status is the session's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,

    /// Response body, possibly empty.
    pub body: String,
}

impl HttpReply {
    /// Creates a new reply.
    pub fn new<S: Into<String>>(status: u16, body: S) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
