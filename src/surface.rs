//! The rendering surface the widget draws on.
//!
//! A [`Surface`] is whatever hosts the widget: a browser DOM behind bindings,
//! a terminal, or the in-memory [`MemorySurface`] used for tests and headless
//! hosts.  The widget never touches globals; it only talks to the surface it
//! was given.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::render::MessageNode;
use crate::types::ViewportFrame;

/// Identifies a node appended to a surface.
pub type NodeId = u64;

/// Operations the widget needs from its host.
pub trait Surface {
    /// Appends a node to the message list and returns its id.
    fn append_node(&mut self, node: MessageNode) -> NodeId;

    /// Removes a node.  Returns false if it was already gone.
    fn remove_node(&mut self, id: NodeId) -> bool;

    /// Scrolls the message list so the newest node is visible.
    fn scroll_messages_to_bottom(&mut self);

    /// Adds or removes a CSS class on the message list.
    fn set_messages_class(&mut self, class: &str, present: bool);

    /// Enables or disables both the input and the send control.
    fn set_controls_enabled(&mut self, enabled: bool);

    /// Current contents of the input control.
    fn input_value(&self) -> String;

    /// Empties the input control.
    fn clear_input(&mut self);

    /// Moves focus to the input control.  Platforms may refuse.
    fn focus_input(&mut self) -> Result<()>;

    /// Visual viewport geometry, or `None` where the platform lacks the API.
    fn visual_viewport(&self) -> Option<ViewportFrame>;

    /// Height of the window (layout viewport).
    fn window_height(&self) -> f64;

    /// Sets the input bar's bottom offset in pixels.
    fn set_input_bar_offset(&mut self, pixels: f64);

    /// Scrolls the window to a vertical position.
    fn scroll_window_to(&mut self, y: f64);

    /// Scrolls the input control into view.
    fn scroll_input_into_view(&mut self);
}

/// A notification a real host would raise as a side effect of our own calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// The window scrolled.
    WindowScrolled,
    /// The visual viewport resized or moved.
    ViewportChanged,
}

/// An in-memory surface that records everything done to it.
///
/// With [`MemorySurface::echo_scrolls`] enabled it mimics mobile browsers that
/// report a window scroll and a viewport change for every programmatic
/// scroll, optionally nudging the viewport by `scroll_jitter` pixels each
/// time.  Hosts drain those with [`MemorySurface::take_notifications`].
#[derive(Debug, Clone)]
pub struct MemorySurface {
    nodes: Vec<(NodeId, MessageNode)>,
    next_id: NodeId,
    controls_enabled: bool,
    input: String,
    focused: bool,
    refuse_focus: bool,
    frame: Option<ViewportFrame>,
    window_height: f64,
    input_bar_offset: f64,
    offset_writes: Vec<f64>,
    window_scrolls: Vec<f64>,
    input_into_view: usize,
    messages_scrolled: usize,
    messages_classes: BTreeSet<String>,
    echo_scrolls: bool,
    scroll_jitter: f64,
    notifications: Vec<Notification>,
}

impl MemorySurface {
    /// A desktop-like surface with no visual viewport API.
    pub fn new(window_height: f64) -> Self {
        Self {
            nodes: Vec::new(),
            next_id: 0,
            controls_enabled: true,
            input: String::new(),
            focused: false,
            refuse_focus: false,
            frame: None,
            window_height,
            input_bar_offset: 0.0,
            offset_writes: Vec::new(),
            window_scrolls: Vec::new(),
            input_into_view: 0,
            messages_scrolled: 0,
            messages_classes: BTreeSet::new(),
            echo_scrolls: false,
            scroll_jitter: 0.0,
            notifications: Vec::new(),
        }
    }

    /// A surface with a visual viewport matching the window.
    pub fn with_visual_viewport(window_height: f64) -> Self {
        let mut surface = Self::new(window_height);
        surface.frame = Some(ViewportFrame::new(window_height, 0.0, window_height));
        surface
    }

    /// Raise scroll and viewport notifications for programmatic scrolls.
    pub fn echo_scrolls(mut self, jitter: f64) -> Self {
        self.echo_scrolls = true;
        self.scroll_jitter = jitter;
        self
    }

    /// Make `focus_input` fail, as some mobile browsers do outside a gesture.
    pub fn refuse_focus(mut self) -> Self {
        self.refuse_focus = true;
        self
    }

    /// Simulates the keyboard taking `inset` pixels of the visual viewport.
    pub fn show_keyboard(&mut self, inset: f64) {
        if let Some(frame) = self.frame.as_mut() {
            frame.visual_height = frame.window_height - inset - frame.visual_offset_top;
        }
    }

    /// Simulates the keyboard closing.
    pub fn hide_keyboard(&mut self) {
        if let Some(frame) = self.frame.as_mut() {
            frame.visual_height = frame.window_height;
            frame.visual_offset_top = 0.0;
        }
    }

    /// Changes the window height, as fallback platforms do for keyboards.
    pub fn set_window_height(&mut self, height: f64) {
        self.window_height = height;
        if let Some(frame) = self.frame.as_mut() {
            frame.window_height = height;
        }
    }

    /// Types into the input control.
    pub fn type_text(&mut self, text: &str) {
        self.input.push_str(text);
    }

    /// Current contents of the input control.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// All nodes currently in the message list, in order.
    pub fn nodes(&self) -> impl Iterator<Item = &MessageNode> {
        self.nodes.iter().map(|(_, node)| node)
    }

    /// Returns true if a node with this id is present.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|(existing, _)| *existing == id)
    }

    /// Number of typing indicators on screen.
    pub fn indicator_count(&self) -> usize {
        self.nodes().filter(|node| node.is_indicator()).count()
    }

    /// Whether input and send are enabled.
    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    /// Whether the input holds focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The input bar's current bottom offset.
    pub fn input_bar_offset(&self) -> f64 {
        self.input_bar_offset
    }

    /// Every offset written, in order.
    pub fn offset_writes(&self) -> &[f64] {
        &self.offset_writes
    }

    /// Every window scroll position requested, in order.
    pub fn window_scrolls(&self) -> &[f64] {
        &self.window_scrolls
    }

    /// How many times the input was scrolled into view.
    pub fn input_into_view(&self) -> usize {
        self.input_into_view
    }

    /// How many times the message list was scrolled to the bottom.
    pub fn messages_scrolled(&self) -> usize {
        self.messages_scrolled
    }

    /// Returns true if the message list carries `class`.
    pub fn has_messages_class(&self, class: &str) -> bool {
        self.messages_classes.contains(class)
    }

    /// Drains the notifications raised since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn echo_scroll(&mut self) {
        if !self.echo_scrolls {
            return;
        }
        if let Some(frame) = self.frame.as_mut() {
            frame.visual_offset_top += self.scroll_jitter;
        }
        self.notifications.push(Notification::WindowScrolled);
        self.notifications.push(Notification::ViewportChanged);
    }
}

impl Surface for MemorySurface {
    fn append_node(&mut self, node: MessageNode) -> NodeId {
        self.next_id += 1;
        self.nodes.push((self.next_id, node));
        self.next_id
    }

    fn remove_node(&mut self, id: NodeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|(existing, _)| *existing != id);
        self.nodes.len() != before
    }

    fn scroll_messages_to_bottom(&mut self) {
        self.messages_scrolled += 1;
    }

    fn set_messages_class(&mut self, class: &str, present: bool) {
        if present {
            self.messages_classes.insert(class.to_string());
        } else {
            self.messages_classes.remove(class);
        }
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
        if !enabled {
            self.focused = false;
        }
    }

    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn focus_input(&mut self) -> Result<()> {
        if self.refuse_focus {
            return Err(Error::platform("focus is only allowed during a user gesture"));
        }
        self.focused = true;
        Ok(())
    }

    fn visual_viewport(&self) -> Option<ViewportFrame> {
        self.frame
    }

    fn window_height(&self) -> f64 {
        self.window_height
    }

    fn set_input_bar_offset(&mut self, pixels: f64) {
        self.input_bar_offset = pixels;
        self.offset_writes.push(pixels);
    }

    fn scroll_window_to(&mut self, y: f64) {
        self.window_scrolls.push(y);
        self.echo_scroll();
    }

    fn scroll_input_into_view(&mut self) {
        self.input_into_view += 1;
        self.echo_scroll();
    }
}
