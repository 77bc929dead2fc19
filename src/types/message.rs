use serde::{Deserialize, Serialize};

/// A single entry in the conversation.
///
/// Messages are immutable once created and are only ever appended to a
/// session's history.  `is_html` is reserved for build-time greeting strings;
/// user input and server replies are always plain text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// The message content.
    pub text: String,

    /// Whether the user authored this message.
    pub is_user: bool,

    /// Whether `text` is trusted markup rather than plain text.
    #[serde(default)]
    pub is_html: bool,
}

impl Message {
    /// Creates a plain-text message authored by the user.
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            is_user: true,
            is_html: false,
        }
    }

    /// Creates a plain-text message authored by the bot.
    pub fn bot<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            is_user: false,
            is_html: false,
        }
    }

    /// Creates a bot message whose text is trusted markup.
    ///
    /// Only call this with strings fixed at build or configuration time.
    pub(crate) fn bot_html<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            is_user: false,
            is_html: true,
        }
    }
}
