//! The event loop that ties the guard, the session and the host together.
//!
//! A host turns whatever it observes (DOM events, terminal input, timers,
//! finished requests) into [`WidgetEvent`]s and feeds them to
//! [`ChatWidget::handle_event`] one at a time.  Requests run as tokio tasks
//! and come back through the same channel as [`WidgetEvent::Settled`].

use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::chat::config::ChatConfig;
use crate::chat::outcome::RequestId;
use crate::chat::session::{ChatSession, SessionTimer};
use crate::chat_logger::ChatLogger;
use crate::client::Transport;
use crate::error::Result;
use crate::scheduler::Scheduler;
use crate::surface::Surface;
use crate::types::HttpReply;
use crate::viewport::{GuardTimer, Platform, ViewportGuard};

/// Class the message list carries while it is being scrolled.
pub const SCROLLING_CLASS: &str = "scrolling";

/// Every timer the widget and its parts schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetTimer {
    /// A keyboard tracking timer.
    Guard(GuardTimer),
    /// A greeting or deadline timer.
    Session(SessionTimer),
    /// Hide the scrollbar, unless the list scrolled again since.
    ScrollbarFade {
        /// Scroll that scheduled this.
        generation: u64,
    },
}

impl From<GuardTimer> for WidgetTimer {
    fn from(timer: GuardTimer) -> Self {
        WidgetTimer::Guard(timer)
    }
}

impl From<SessionTimer> for WidgetTimer {
    fn from(timer: SessionTimer) -> Self {
        WidgetTimer::Session(timer)
    }
}

/// Something that happened to the widget.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    /// The input gained focus.
    Focus,
    /// The input lost focus.
    Blur,
    /// The visual viewport (or, without one, the window) resized.
    ViewportChanged,
    /// The window scrolled.
    WindowScrolled,
    /// The message list scrolled.
    MessagesScrolled,
    /// A key went down in the input.
    KeyPress {
        /// The key's name, as in the DOM's `KeyboardEvent.key`.
        key: String,
        /// Whether Shift was held.
        shift: bool,
    },
    /// The send control was activated with this text.
    Submit(String),
    /// A scheduled timer fired.
    Timer(WidgetTimer),
    /// A request finished.
    Settled {
        /// The request that finished.
        request_id: RequestId,
        /// What the transport produced.
        result: Result<HttpReply>,
    },
}

impl From<WidgetTimer> for WidgetEvent {
    fn from(timer: WidgetTimer) -> Self {
        WidgetEvent::Timer(timer)
    }
}

impl From<GuardTimer> for WidgetEvent {
    fn from(timer: GuardTimer) -> Self {
        WidgetEvent::Timer(timer.into())
    }
}

impl From<SessionTimer> for WidgetEvent {
    fn from(timer: SessionTimer) -> Self {
        WidgetEvent::Timer(timer.into())
    }
}

/// The chat widget: one surface, one guard, one session.
pub struct ChatWidget<S: Surface, K: Scheduler<WidgetTimer>> {
    config: ChatConfig,
    surface: S,
    scheduler: K,
    guard: ViewportGuard,
    session: ChatSession,
    transport: Arc<dyn Transport>,
    events: UnboundedSender<WidgetEvent>,
    scrollbar_generation: u64,
    torn_down: bool,
}

impl<S: Surface, K: Scheduler<WidgetTimer>> ChatWidget<S, K> {
    /// Creates a widget.  Settlements are sent to `events`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `config` fails [`ChatConfig::validate`].
    pub fn new(
        config: ChatConfig,
        platform: &Platform,
        surface: S,
        scheduler: K,
        transport: Arc<dyn Transport>,
        events: UnboundedSender<WidgetEvent>,
    ) -> Result<Self> {
        config.validate()?;
        let guard = ViewportGuard::for_platform(platform, config.viewport.clone());
        let session = ChatSession::new(config.clone());
        Ok(Self {
            config,
            surface,
            scheduler,
            guard,
            session,
            transport,
            events,
            scrollbar_generation: 0,
            torn_down: false,
        })
    }

    /// Installs a logger for requests and settlements.
    pub fn with_logger(mut self, logger: Arc<dyn ChatLogger>) -> Self {
        self.session.set_logger(Some(logger));
        self
    }

    /// Returns the widget's configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Returns the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the surface for mutation, e.g. to simulate the host.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Returns the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut K {
        &mut self.scheduler
    }

    /// Returns the session.
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Returns the viewport guard.
    pub fn guard(&self) -> &ViewportGuard {
        &self.guard
    }

    /// Returns true once [`ChatWidget::teardown`] has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Returns true when no question is in flight and the greeting is done.
    pub fn is_idle(&self) -> bool {
        self.session.is_idle() && !self.session.is_greeting()
    }

    /// Records the starting geometry and plays the greeting.
    pub fn start(&mut self) {
        if self.torn_down {
            return;
        }
        self.guard.observe(&self.surface);
        let scheduler: &mut dyn Scheduler<WidgetTimer> = &mut self.scheduler;
        self.session
            .initialize_greeting(&mut self.surface, scheduler);
    }

    /// Stops the widget.  Every later event, including timers and
    /// settlements already in flight, is ignored.
    pub fn teardown(&mut self) {
        self.torn_down = true;
    }

    /// Routes one event.
    pub fn handle_event(&mut self, event: WidgetEvent) {
        if self.torn_down {
            return;
        }
        let scheduler: &mut dyn Scheduler<WidgetTimer> = &mut self.scheduler;
        match event {
            WidgetEvent::Focus => {
                self.guard.observe(&self.surface);
                self.guard.on_focus(scheduler);
            }
            WidgetEvent::Blur => self.guard.on_blur(scheduler),
            WidgetEvent::ViewportChanged => {
                self.guard.on_viewport_change(&mut self.surface, scheduler);
            }
            WidgetEvent::WindowScrolled => {
                self.guard.on_window_scroll(&mut self.surface, scheduler);
            }
            WidgetEvent::MessagesScrolled => {
                self.surface.set_messages_class(SCROLLING_CLASS, true);
                self.scrollbar_generation += 1;
                scheduler.schedule(
                    self.config.scrollbar_fade(),
                    WidgetTimer::ScrollbarFade {
                        generation: self.scrollbar_generation,
                    },
                );
            }
            WidgetEvent::KeyPress { key, shift } => {
                if key == "Enter" && !shift {
                    let text = self.surface.input_value();
                    self.submit(&text);
                }
            }
            WidgetEvent::Submit(text) => self.submit(&text),
            WidgetEvent::Timer(WidgetTimer::Guard(timer)) => {
                self.guard.on_timer(timer, &mut self.surface, scheduler);
            }
            WidgetEvent::Timer(WidgetTimer::Session(timer)) => {
                self.session.on_timer(timer, &mut self.surface, scheduler);
            }
            WidgetEvent::Timer(WidgetTimer::ScrollbarFade { generation }) => {
                if generation == self.scrollbar_generation {
                    self.surface.set_messages_class(SCROLLING_CLASS, false);
                }
            }
            WidgetEvent::Settled { request_id, result } => {
                self.session.settle(request_id, result, &mut self.surface);
            }
        }
    }

    /// Handles events from `events` until the widget is idle.
    ///
    /// Returns early if the channel closes or the widget is torn down.
    pub async fn run_until_idle(&mut self, events: &mut UnboundedReceiver<WidgetEvent>) {
        while !self.is_idle() && !self.torn_down {
            let Some(event) = events.recv().await else {
                break;
            };
            self.handle_event(event);
        }
    }

    fn submit(&mut self, text: &str) {
        let scheduler: &mut dyn Scheduler<WidgetTimer> = &mut self.scheduler;
        let Some(outgoing) = self.session.submit(text, &mut self.surface, scheduler) else {
            return;
        };
        let transport = Arc::clone(&self.transport);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = transport.post(&outgoing.request).await;
            let _ = events.send(WidgetEvent::Settled {
                request_id: outgoing.request_id,
                result,
            });
        });
    }
}
