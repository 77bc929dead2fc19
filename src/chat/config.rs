//! Configuration types for the chat widget.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling the widget, loadable from YAML.

use std::path::Path;
use std::time::Duration;

use arrrg_derive::CommandLine;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::chat::greeting::GreetingContent;
use crate::chat::outcome::DEFAULT_REPLY;
use crate::client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};
use crate::types::PayloadField;
use crate::viewport::ViewportConfig;

/// How long each greeting indicator stays up.
const DEFAULT_TYPING_DELAY_MS: u64 = 1000;

/// Pause between the first greeting message and the second indicator.
const DEFAULT_GREETING_GAP_MS: u64 = 100;

/// How long the scrollbar stays visible after the last scroll.
const DEFAULT_SCROLLBAR_FADE_MS: u64 = 1000;

/// Command-line arguments for the folio-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Endpoint questions are posted to.
    #[arrrg(optional, "Chat endpoint URL (default: http://127.0.0.1:8080/api/chat)", "URL")]
    pub endpoint: Option<String>,

    /// YAML file with greeting copy and tuning.
    #[arrrg(optional, "YAML configuration file", "FILE")]
    pub config: Option<String>,

    /// JSON key the question is sent under.
    #[arrrg(optional, "Payload field: question or message (default: question)", "FIELD")]
    pub payload_field: Option<String>,

    /// Request deadline in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 30)", "SECONDS")]
    pub timeout: Option<u64>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Log every request and settlement to stderr.
    #[arrrg(flag, "Log requests and settlements to stderr")]
    pub verbose: bool,
}

/// Configuration for a chat widget.
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// endpoint: "https://example.com/api/chat"
/// greeting:
///   resume_file: "cv.pdf"
/// viewport:
///   fallback_threshold: 130
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    /// The endpoint questions are posted to.
    pub endpoint: String,

    /// JSON key the question is sent under.
    pub payload_field: PayloadField,

    /// Deadline for a single request, in milliseconds.
    pub request_timeout_ms: u64,

    /// Greeting copy.
    pub greeting: GreetingContent,

    /// How long each greeting indicator stays up, in milliseconds.
    pub typing_delay_ms: u64,

    /// Gap between the two greeting messages, in milliseconds.
    pub greeting_gap_ms: u64,

    /// Reply used when a successful response carries no text.
    pub fallback_reply: String,

    /// How long the scrollbar stays visible after scrolling, in milliseconds.
    pub scrollbar_fade_ms: u64,

    /// Keyboard tracking knobs.
    pub viewport: ViewportConfig,

    /// Whether to use ANSI colors and styles in terminal output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Endpoint: http://127.0.0.1:8080/api/chat
    /// - Payload field: question
    /// - Request timeout: 30s
    /// - Greeting indicators: 1000ms, 100ms apart
    /// - Scrollbar fade: 1000ms
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            payload_field: PayloadField::Question,
            request_timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            greeting: GreetingContent::default(),
            typing_delay_ms: DEFAULT_TYPING_DELAY_MS,
            greeting_gap_ms: DEFAULT_GREETING_GAP_MS,
            fallback_reply: DEFAULT_REPLY.to_string(),
            scrollbar_fade_ms: DEFAULT_SCROLLBAR_FADE_MS,
            viewport: ViewportConfig::default(),
            use_color: true,
        }
    }

    /// Loads a configuration from a YAML file and validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the YAML is invalid, or
    /// the values fail [`ChatConfig::validate`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|err| Error::io(format!("failed to read {}", path.display()), err))?;
        let config: ChatConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the endpoint.
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the payload field.
    pub fn with_payload_field(mut self, field: PayloadField) -> Self {
        self.payload_field = field;
        self
    }

    /// Sets the request deadline, rounded down to whole milliseconds.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = timeout.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// Sets the greeting copy.
    pub fn with_greeting(mut self, greeting: GreetingContent) -> Self {
        self.greeting = greeting;
        self
    }

    /// Sets the reply used for successful responses without text.
    pub fn with_fallback_reply<S: Into<String>>(mut self, reply: S) -> Self {
        self.fallback_reply = reply.into();
        self
    }

    /// Sets the keyboard tracking knobs.
    pub fn with_viewport(mut self, viewport: ViewportConfig) -> Self {
        self.viewport = viewport;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// The request deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// How long each greeting indicator stays up.
    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    /// Gap between the greeting messages.
    pub fn greeting_gap(&self) -> Duration {
        Duration::from_millis(self.greeting_gap_ms)
    }

    /// How long the scrollbar stays visible after scrolling.
    pub fn scrollbar_fade(&self) -> Duration {
        Duration::from_millis(self.scrollbar_fade_ms)
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        let endpoint = Url::parse(&self.endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::validation(
                format!("unsupported endpoint scheme {:?}", endpoint.scheme()),
                Some("endpoint".to_string()),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(Error::validation(
                "request timeout must be positive",
                Some("request_timeout_ms".to_string()),
            ));
        }
        if self.fallback_reply.trim().is_empty() {
            return Err(Error::validation(
                "fallback reply must not be empty",
                Some("fallback_reply".to_string()),
            ));
        }
        self.viewport.validate()
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<ChatArgs> for ChatConfig {
    type Error = Error;

    /// Resolves arguments into a configuration.
    ///
    /// A `--config` file supplies the base; explicit flags override it.
    fn try_from(args: ChatArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => ChatConfig::from_file(path)?,
            None => ChatConfig::new(),
        };
        if let Some(endpoint) = args.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(field) = args.payload_field {
            config.payload_field = field
                .parse()
                .map_err(|err: String| Error::validation(err, Some("payload-field".to_string())))?;
        }
        if let Some(timeout) = args.timeout {
            config.request_timeout_ms = timeout.saturating_mul(1000);
        }
        if args.no_color {
            config.use_color = false;
        }
        config.validate()?;
        Ok(config)
    }
}
