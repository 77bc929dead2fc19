//! Turning messages into nodes, and a terminal surface to show them on.
//!
//! [`render_message`] is the one place that decides whether content is
//! escaped text or injected markup.  [`TerminalSurface`] is a [`Surface`] for
//! desktop terminals; it has no on-screen keyboard, so every viewport query
//! reports a static window.

use std::io::{self, Stdout, Write};

use scraper::{ElementRef, Html};

use crate::error::Result;
use crate::surface::{NodeId, Surface};
use crate::types::{Message, ViewportFrame};

/// ANSI escape code for dim text (used for the typing indicator).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for italic text (used for the typing indicator).
const ANSI_ITALIC: &str = "\x1b[3m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for bot messages).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for user messages).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI sequence that returns to column zero and clears the line.
const ANSI_CLEAR_LINE: &str = "\r\x1b[2K";

/// Text shown while a reply is pending.
pub const TYPING_INDICATOR_TEXT: &str = "Thinking...";

/// Who a node belongs to, which decides its container classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A message typed by the user.
    User,
    /// A message from the bot.
    Bot,
    /// The transient typing indicator.
    Indicator,
}

impl NodeKind {
    /// The container's class attribute.
    pub fn class_name(&self) -> &'static str {
        match self {
            NodeKind::User => "message user-message",
            NodeKind::Bot => "message bot-message",
            NodeKind::Indicator => "message bot-message loading",
        }
    }
}

/// What goes inside the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeContent {
    /// Plain text; escaped whenever it is serialized as HTML.
    Text(String),
    /// Trusted markup, injected as-is.
    Markup(String),
}

/// A rendered message container ready to be appended to a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageNode {
    /// Whose node this is.
    pub kind: NodeKind,
    /// The node's content.
    pub content: NodeContent,
}

impl MessageNode {
    /// Returns true for the typing indicator.
    pub fn is_indicator(&self) -> bool {
        self.kind == NodeKind::Indicator
    }

    /// Serializes the node as an HTML fragment.
    pub fn to_html(&self) -> String {
        let inner = match &self.content {
            NodeContent::Text(text) => escape_html(text),
            NodeContent::Markup(markup) => markup.clone(),
        };
        format!(
            r#"<div class="{}"><p>{}</p></div>"#,
            self.kind.class_name(),
            inner
        )
    }

    /// The node's content as a human would read it.
    pub fn display_text(&self) -> String {
        match &self.content {
            NodeContent::Text(text) => text.clone(),
            NodeContent::Markup(markup) => markup_to_text(markup),
        }
    }
}

/// Builds the node for a message.
pub fn render_message(message: &Message) -> MessageNode {
    let kind = if message.is_user {
        NodeKind::User
    } else {
        NodeKind::Bot
    };
    let content = if message.is_html {
        NodeContent::Markup(message.text.clone())
    } else {
        NodeContent::Text(message.text.clone())
    };
    MessageNode { kind, content }
}

/// Builds the typing indicator node.
pub fn typing_indicator() -> MessageNode {
    MessageNode {
        kind: NodeKind::Indicator,
        content: NodeContent::Text(TYPING_INDICATOR_TEXT.to_string()),
    }
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Flattens trusted markup for a text-only display.
///
/// Tags are dropped and entities decoded; an anchor's `href` is kept in
/// parentheses after its label so links stay usable.
pub fn markup_to_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let mut out = String::with_capacity(markup.len());
    flatten(fragment.root_element(), &mut out);
    out
}

fn flatten(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            flatten(child, out);
        }
    }
    if element.value().name() == "a"
        && let Some(href) = element.value().attr("href")
    {
        out.push_str(&format!(" ({href})"));
    }
}

///////////////////////////////////////// Terminal /////////////////////////////////////////

/// Surface that prints the conversation to stdout.
///
/// The typing indicator is printed without a newline and erased in place when
/// it is removed.
pub struct TerminalSurface {
    stdout: Stdout,
    use_color: bool,
    next_id: NodeId,
    indicator: Option<NodeId>,
    controls_enabled: bool,
    window_height: f64,
}

impl TerminalSurface {
    /// Creates a new TerminalSurface with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new TerminalSurface with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            next_id: 0,
            indicator: None,
            controls_enabled: true,
            window_height: 0.0,
        }
    }

    /// Whether the prompt should accept input.
    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    /// Flushes stdout to ensure immediate display.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn clear_indicator_line(&mut self) {
        if self.indicator.take().is_some() {
            print!("{ANSI_CLEAR_LINE}");
        }
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TerminalSurface {
    fn append_node(&mut self, node: MessageNode) -> NodeId {
        self.next_id += 1;
        let id = self.next_id;
        self.clear_indicator_line();
        let text = node.display_text();
        match (node.kind, self.use_color) {
            (NodeKind::Indicator, true) => {
                print!("{ANSI_DIM}{ANSI_ITALIC}{text}{ANSI_RESET}");
                self.indicator = Some(id);
            }
            (NodeKind::Indicator, false) => {
                print!("{text}");
                self.indicator = Some(id);
            }
            (NodeKind::User, true) => println!("{ANSI_GREEN}You:{ANSI_RESET} {text}"),
            (NodeKind::User, false) => println!("You: {text}"),
            (NodeKind::Bot, true) => println!("{ANSI_CYAN}Bot:{ANSI_RESET} {text}"),
            (NodeKind::Bot, false) => println!("Bot: {text}"),
        }
        self.flush();
        id
    }

    fn remove_node(&mut self, id: NodeId) -> bool {
        if self.indicator == Some(id) {
            self.clear_indicator_line();
            self.flush();
            true
        } else {
            false
        }
    }

    fn scroll_messages_to_bottom(&mut self) {}

    fn set_messages_class(&mut self, _class: &str, _present: bool) {}

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    fn input_value(&self) -> String {
        String::new()
    }

    fn clear_input(&mut self) {}

    fn focus_input(&mut self) -> Result<()> {
        Ok(())
    }

    fn visual_viewport(&self) -> Option<ViewportFrame> {
        None
    }

    fn window_height(&self) -> f64 {
        self.window_height
    }

    fn set_input_bar_offset(&mut self, _pixels: f64) {}

    fn scroll_window_to(&mut self, _y: f64) {}

    fn scroll_input_into_view(&mut self) {}
}
