//! Core chat session management.
//!
//! This module provides the [`ChatSession`] state machine that owns the
//! conversation: it renders messages, hands one question at a time to the
//! caller for transport, and applies whatever the transport produced.

use std::sync::Arc;
use std::time::Duration;

use crate::chat::config::ChatConfig;
use crate::chat::greeting::GreetingStep;
use crate::chat::outcome::{Outcome, RequestId};
use crate::chat_logger::ChatLogger;
use crate::client::Transport;
use crate::error::{Error, Result};
use crate::observability::{
    SESSION_ANSWERS, SESSION_EMPTY_SUBMITS, SESSION_FAILURES, SESSION_FOCUS_FAILURES,
    SESSION_FORCED_TIMEOUTS, SESSION_STALE_SETTLEMENTS, SESSION_SUBMITS,
};
use crate::render::{render_message, typing_indicator};
use crate::scheduler::Scheduler;
use crate::surface::{NodeId, Surface};
use crate::types::{HttpReply, Message, QuestionRequest};

/// Where the session is in the question lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Ready for a question; controls are enabled.
    Idle,
    /// A question is in flight; controls are disabled.
    AwaitingResponse,
}

/// Timers the session schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTimer {
    /// Advance the greeting, if it is still waiting on this step.
    Greeting(GreetingStep),
    /// Force-settle a request that has been pending too long.
    Deadline {
        /// The request the deadline belongs to.
        request_id: RequestId,
    },
}

/// A question the caller must deliver to a transport, then report back via
/// [`ChatSession::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// Key for the settlement.
    pub request_id: RequestId,
    /// The body to post.
    pub request: QuestionRequest,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    request_id: RequestId,
    indicator: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GreetingPhase {
    NotStarted,
    Running {
        next: GreetingStep,
        indicator: Option<NodeId>,
    },
    Done,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Messages in the conversation, greeting included.
    pub message_count: usize,
    /// Questions sent.
    pub total_requests: u64,
    /// Questions the server answered.
    pub answered: u64,
    /// Questions that ended in any failure.
    pub failed: u64,
    /// Settlements dropped because their request was no longer pending.
    pub stale_settlements: u64,
    /// Requests settled by their deadline.
    pub forced_timeouts: u64,
    /// Refocus attempts the surface refused.
    pub focus_failures: u64,
}

/// A chat session that manages conversation state.
///
/// Accepts at most one question at a time.  Everything that touches the
/// screen goes through the [`Surface`] passed into each call, and every delay
/// through the [`Scheduler`].
pub struct ChatSession {
    config: ChatConfig,
    state: SessionState,
    messages: Vec<Message>,
    pending: Option<Pending>,
    greeting: GreetingPhase,
    next_request_id: u64,
    logger: Option<Arc<dyn ChatLogger>>,
    stats: SessionStats,
}

impl ChatSession {
    /// Creates a new idle session.
    pub fn new(config: ChatConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
            messages: Vec::new(),
            pending: None,
            greeting: GreetingPhase::NotStarted,
            next_request_id: 0,
            logger: None,
            stats: SessionStats::default(),
        }
    }

    /// Installs a logger for requests and settlements.
    pub fn with_logger(mut self, logger: Arc<dyn ChatLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Installs or removes the logger.
    pub fn set_logger(&mut self, logger: Option<Arc<dyn ChatLogger>>) {
        self.logger = logger;
    }

    /// Returns the session's configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Returns the current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns true if no question is in flight.
    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// The conversation so far, in arrival order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The request currently in flight, if any.
    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending.map(|pending| pending.request_id)
    }

    /// Returns true while greeting messages are still scheduled.
    pub fn is_greeting(&self) -> bool {
        matches!(self.greeting, GreetingPhase::Running { .. })
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            message_count: self.messages.len(),
            ..self.stats.clone()
        }
    }

    /// Starts the scripted greeting.  Calling it again has no effect.
    pub fn initialize_greeting<T: From<SessionTimer>>(
        &mut self,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler<T>,
    ) {
        if self.greeting != GreetingPhase::NotStarted {
            return;
        }
        let indicator = show_indicator(surface);
        self.greeting = GreetingPhase::Running {
            next: GreetingStep::RevealAbout,
            indicator: Some(indicator),
        };
        scheduler.schedule(
            self.greeting_delay(GreetingStep::RevealAbout),
            SessionTimer::Greeting(GreetingStep::RevealAbout).into(),
        );
    }

    /// Submits a question.
    ///
    /// Returns the request to send, or `None` if the text was blank or a
    /// question is already in flight.  A greeting still in progress is
    /// completed first so its messages stay together.
    pub fn submit<T: From<SessionTimer>>(
        &mut self,
        raw_text: &str,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler<T>,
    ) -> Option<OutgoingRequest> {
        let question = raw_text.trim();
        if question.is_empty() {
            SESSION_EMPTY_SUBMITS.click();
            return None;
        }
        if self.state != SessionState::Idle {
            return None;
        }
        self.fast_forward_greeting(surface);

        self.append(Message::user(question), surface);
        surface.clear_input();
        self.state = SessionState::AwaitingResponse;
        surface.set_controls_enabled(false);
        let indicator = show_indicator(surface);

        self.next_request_id += 1;
        let request_id = RequestId::new(self.next_request_id);
        self.pending = Some(Pending {
            request_id,
            indicator,
        });
        scheduler.schedule(
            self.config.request_timeout(),
            SessionTimer::Deadline { request_id }.into(),
        );

        let request = QuestionRequest::new(question, self.config.payload_field);
        if let Some(logger) = &self.logger {
            logger.log_request(request_id, &request);
        }
        self.stats.total_requests += 1;
        SESSION_SUBMITS.click();
        Some(OutgoingRequest {
            request_id,
            request,
        })
    }

    /// Applies a transport result.
    ///
    /// Returns the outcome shown, or `None` if `request_id` is no longer
    /// pending (it already settled or its deadline passed).
    pub fn settle(
        &mut self,
        request_id: RequestId,
        result: Result<HttpReply>,
        surface: &mut dyn Surface,
    ) -> Option<Outcome> {
        let Some(pending) = self.pending.filter(|p| p.request_id == request_id) else {
            self.stats.stale_settlements += 1;
            SESSION_STALE_SETTLEMENTS.click();
            return None;
        };
        self.pending = None;
        surface.remove_node(pending.indicator);

        let outcome = Outcome::classify(&result, &self.config.fallback_reply);
        self.append(Message::bot(outcome.text()), surface);
        if outcome.is_answered() {
            self.stats.answered += 1;
            SESSION_ANSWERS.click();
        } else {
            self.stats.failed += 1;
            SESSION_FAILURES.click();
        }
        if let Some(logger) = &self.logger {
            logger.log_settlement(request_id, &outcome);
        }

        self.state = SessionState::Idle;
        surface.set_controls_enabled(true);
        if surface.focus_input().is_err() {
            self.stats.focus_failures += 1;
            SESSION_FOCUS_FAILURES.click();
        }
        Some(outcome)
    }

    /// One of the session's own timers fired.
    pub fn on_timer<T: From<SessionTimer>>(
        &mut self,
        timer: SessionTimer,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler<T>,
    ) {
        match timer {
            SessionTimer::Greeting(step) => self.advance_greeting(step, surface, scheduler),
            SessionTimer::Deadline { request_id } => {
                if self.pending_request() == Some(request_id) {
                    self.stats.forced_timeouts += 1;
                    SESSION_FORCED_TIMEOUTS.click();
                    let timeout = self.config.request_timeout();
                    self.settle(
                        request_id,
                        Err(Error::timeout(
                            "request deadline elapsed",
                            Some(timeout.as_secs_f64()),
                        )),
                        surface,
                    );
                }
            }
        }
    }

    /// Submits a question and waits on `transport` for its settlement.
    ///
    /// For hosts without an event loop.  The deadline timer still goes to
    /// `scheduler`; once this returns it finds nothing pending.
    pub async fn ask<T: From<SessionTimer>>(
        &mut self,
        raw_text: &str,
        transport: &dyn Transport,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler<T>,
    ) -> Option<Outcome> {
        let outgoing = self.submit(raw_text, surface, scheduler)?;
        let result = transport.post(&outgoing.request).await;
        self.settle(outgoing.request_id, result, surface)
    }

    fn advance_greeting<T: From<SessionTimer>>(
        &mut self,
        step: GreetingStep,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler<T>,
    ) {
        let GreetingPhase::Running { next, indicator } = self.greeting else {
            return;
        };
        if next != step {
            return;
        }
        if let Some(indicator) = indicator {
            surface.remove_node(indicator);
        }
        let indicator = match step {
            GreetingStep::RevealAbout => {
                self.append(self.config.greeting.about_message(), surface);
                None
            }
            GreetingStep::ShowResumeIndicator => Some(show_indicator(surface)),
            GreetingStep::RevealResume => {
                self.append(self.config.greeting.resume_message(), surface);
                None
            }
        };
        let Some(next) = step.next() else {
            self.greeting = GreetingPhase::Done;
            return;
        };
        self.greeting = GreetingPhase::Running { next, indicator };
        scheduler.schedule(self.greeting_delay(next), SessionTimer::Greeting(next).into());
    }

    /// How long the greeting waits before running `step`.
    fn greeting_delay(&self, step: GreetingStep) -> Duration {
        match step {
            GreetingStep::ShowResumeIndicator => self.config.greeting_gap(),
            GreetingStep::RevealAbout | GreetingStep::RevealResume => self.config.typing_delay(),
        }
    }

    fn fast_forward_greeting(&mut self, surface: &mut dyn Surface) {
        let GreetingPhase::Running { next, indicator } = self.greeting else {
            return;
        };
        self.greeting = GreetingPhase::Done;
        if let Some(indicator) = indicator {
            surface.remove_node(indicator);
        }
        if next == GreetingStep::RevealAbout {
            self.append(self.config.greeting.about_message(), surface);
        }
        self.append(self.config.greeting.resume_message(), surface);
    }

    fn append(&mut self, message: Message, surface: &mut dyn Surface) {
        surface.append_node(render_message(&message));
        surface.scroll_messages_to_bottom();
        self.messages.push(message);
    }
}

fn show_indicator(surface: &mut dyn Surface) -> NodeId {
    let id = surface.append_node(typing_indicator());
    surface.scroll_messages_to_bottom();
    id
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::chat::outcome::{CONNECT_ERROR_TEXT, SERVER_ERROR_TEXT};
    use crate::render::NodeKind;
    use crate::scheduler::ManualScheduler;
    use crate::surface::MemorySurface;
    use crate::types::PayloadField;

    fn setup() -> (ChatSession, MemorySurface, ManualScheduler<SessionTimer>) {
        (
            ChatSession::new(ChatConfig::new()),
            MemorySurface::new(800.0),
            ManualScheduler::new(),
        )
    }

    fn advance(
        session: &mut ChatSession,
        surface: &mut MemorySurface,
        scheduler: &mut ManualScheduler<SessionTimer>,
        by: Duration,
    ) {
        scheduler.run_for(by, |scheduler, timer| {
            session.on_timer(timer, surface, scheduler)
        });
    }

    fn texts(session: &ChatSession) -> Vec<(&str, bool)> {
        session
            .messages()
            .iter()
            .map(|m| (m.text.as_str(), m.is_user))
            .collect()
    }

    #[test]
    fn blank_submit_is_noop() {
        let (mut session, mut surface, mut scheduler) = setup();
        surface.type_text("   ");
        assert!(session.submit("   \n\t", &mut surface, &mut scheduler).is_none());
        assert!(session.submit("", &mut surface, &mut scheduler).is_none());
        assert!(session.messages().is_empty());
        assert!(session.is_idle());
        assert!(surface.controls_enabled());
        assert_eq!(surface.input(), "   ");
        assert!(scheduler.is_empty());
    }

    #[test]
    fn submit_enters_awaiting_response() {
        let (mut session, mut surface, mut scheduler) = setup();
        surface.type_text("  hi  ");
        let outgoing = session.submit("  hi  ", &mut surface, &mut scheduler).unwrap();

        assert_eq!(texts(&session), vec![("hi", true)]);
        assert_eq!(session.state(), SessionState::AwaitingResponse);
        assert!(!surface.controls_enabled());
        assert_eq!(surface.input(), "");
        assert_eq!(surface.indicator_count(), 1);
        assert_eq!(session.pending_request(), Some(outgoing.request_id));
        assert_eq!(
            serde_json::to_string(&outgoing.request).unwrap(),
            r#"{"question":"hi"}"#
        );
    }

    #[test]
    fn second_submit_is_rejected_while_awaiting() {
        let (mut session, mut surface, mut scheduler) = setup();
        session.submit("one", &mut surface, &mut scheduler).unwrap();
        assert!(session.submit("two", &mut surface, &mut scheduler).is_none());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(surface.indicator_count(), 1);
    }

    #[test]
    fn answer_settles_to_idle() {
        let (mut session, mut surface, mut scheduler) = setup();
        let outgoing = session.submit("hi", &mut surface, &mut scheduler).unwrap();
        let outcome = session.settle(
            outgoing.request_id,
            Ok(HttpReply::new(200, r#"{"answer":"X"}"#)),
            &mut surface,
        );

        assert_eq!(outcome, Some(Outcome::Answered("X".to_string())));
        assert_eq!(texts(&session), vec![("hi", true), ("X", false)]);
        assert!(session.is_idle());
        assert!(surface.controls_enabled());
        assert!(surface.is_focused());
        assert_eq!(surface.indicator_count(), 0);
        assert_eq!(surface.nodes().count(), 2);
    }

    #[test]
    fn failures_become_one_bot_message() {
        let cases: Vec<(Result<HttpReply>, &str)> = vec![
            (Ok(HttpReply::new(503, "")), SERVER_ERROR_TEXT),
            (
                Ok(HttpReply::new(400, r#"{"error":"bad question"}"#)),
                "bad question",
            ),
            (Err(Error::connection("refused", None)), CONNECT_ERROR_TEXT),
        ];
        for (result, expected) in cases {
            let (mut session, mut surface, mut scheduler) = setup();
            let outgoing = session.submit("hi", &mut surface, &mut scheduler).unwrap();
            session.settle(outgoing.request_id, result, &mut surface);
            assert_eq!(texts(&session), vec![("hi", true), (expected, false)]);
            assert!(session.is_idle());
            assert!(surface.controls_enabled());
            assert_eq!(surface.indicator_count(), 0);
            assert_eq!(session.stats().failed, 1);
        }
    }

    #[test]
    fn stale_settlements_are_ignored() {
        let (mut session, mut surface, mut scheduler) = setup();
        let first = session.submit("one", &mut surface, &mut scheduler).unwrap();
        session.settle(first.request_id, Ok(HttpReply::new(200, "{}")), &mut surface);
        assert!(
            session
                .settle(first.request_id, Ok(HttpReply::new(200, "{}")), &mut surface)
                .is_none()
        );
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.stats().stale_settlements, 1);
    }

    #[test]
    fn deadline_forces_transport_failure() {
        let (mut session, mut surface, mut scheduler) = setup();
        let outgoing = session.submit("slow", &mut surface, &mut scheduler).unwrap();

        advance(&mut session, &mut surface, &mut scheduler, Duration::from_secs(29));
        assert!(!session.is_idle());

        advance(&mut session, &mut surface, &mut scheduler, Duration::from_secs(1));
        assert!(session.is_idle());
        assert_eq!(session.messages()[1].text, CONNECT_ERROR_TEXT);
        assert_eq!(surface.indicator_count(), 0);

        // The reply shows up after all.
        assert!(
            session
                .settle(
                    outgoing.request_id,
                    Ok(HttpReply::new(200, r#"{"answer":"late"}"#)),
                    &mut surface
                )
                .is_none()
        );
        assert_eq!(session.messages().len(), 2);
        let stats = session.stats();
        assert_eq!(stats.forced_timeouts, 1);
        assert_eq!(stats.stale_settlements, 1);
    }

    #[test]
    fn deadline_after_settlement_is_ignored() {
        let (mut session, mut surface, mut scheduler) = setup();
        let outgoing = session.submit("quick", &mut surface, &mut scheduler).unwrap();
        session.settle(outgoing.request_id, Ok(HttpReply::new(200, "{}")), &mut surface);
        let next = session.submit("again", &mut surface, &mut scheduler).unwrap();

        // The first deadline fires while the second request is pending.
        let timer = scheduler.pop_next().unwrap();
        session.on_timer(timer, &mut surface, &mut scheduler);
        assert_eq!(session.pending_request(), Some(next.request_id));
        assert_eq!(session.messages().len(), 3);
    }

    #[test]
    fn greeting_timeline() {
        let (mut session, mut surface, mut scheduler) = setup();
        session.initialize_greeting(&mut surface, &mut scheduler);
        session.initialize_greeting(&mut surface, &mut scheduler);
        assert_eq!(surface.indicator_count(), 1);
        assert_eq!(scheduler.pending(), 1);

        let mut step = |by: u64, session: &mut ChatSession, surface: &mut MemorySurface| {
            advance(session, surface, &mut scheduler, Duration::from_millis(by));
        };

        step(999, &mut session, &mut surface);
        assert!(session.messages().is_empty());
        step(1, &mut session, &mut surface);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(surface.indicator_count(), 0);
        step(99, &mut session, &mut surface);
        assert_eq!(surface.indicator_count(), 0);
        step(1, &mut session, &mut surface);
        assert_eq!(surface.indicator_count(), 1);
        step(999, &mut session, &mut surface);
        assert_eq!(surface.indicator_count(), 1);
        step(1, &mut session, &mut surface);
        assert_eq!(surface.indicator_count(), 0);
        assert!(!session.is_greeting());

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| !m.is_user));
        assert!(!messages[0].is_html);
        assert!(messages[1].is_html);
        assert!(messages[1].text.contains(r#"href="resume.pdf""#));
    }

    #[test]
    fn greeting_chains_within_one_long_step() {
        let (mut session, mut surface, mut scheduler) = setup();
        session.initialize_greeting(&mut surface, &mut scheduler);

        // The resume indicator goes up at 1100ms even when time jumps past it.
        advance(&mut session, &mut surface, &mut scheduler, Duration::from_millis(1200));
        assert_eq!(session.messages().len(), 1);
        assert_eq!(surface.indicator_count(), 1);
        assert_eq!(scheduler.next_due(), Some(Duration::from_millis(2100)));

        advance(&mut session, &mut surface, &mut scheduler, Duration::from_millis(900));
        assert_eq!(session.messages().len(), 2);
        assert_eq!(surface.indicator_count(), 0);
        assert!(!session.is_greeting());
    }

    #[test]
    fn submit_during_greeting_fast_forwards() {
        let (mut session, mut surface, mut scheduler) = setup();
        session.initialize_greeting(&mut surface, &mut scheduler);
        advance(&mut session, &mut surface, &mut scheduler, Duration::from_millis(1000));
        assert_eq!(session.messages().len(), 1);

        session.submit("hello", &mut surface, &mut scheduler).unwrap();
        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert!(!messages[0].is_user);
        assert!(messages[1].is_html);
        assert!(messages[2].is_user);
        assert_eq!(surface.indicator_count(), 1);

        // Leftover greeting timers do nothing.
        while let Some(timer) = scheduler.pop_next() {
            if matches!(timer, SessionTimer::Greeting(_)) {
                session.on_timer(timer, &mut surface, &mut scheduler);
            }
        }
        assert_eq!(session.messages().len(), 3);
        assert_eq!(surface.indicator_count(), 1);
    }

    #[test]
    fn refused_focus_is_swallowed() {
        let mut session = ChatSession::new(ChatConfig::new());
        let mut surface = MemorySurface::new(800.0).refuse_focus();
        let mut scheduler = ManualScheduler::<SessionTimer>::new();
        let outgoing = session.submit("hi", &mut surface, &mut scheduler).unwrap();
        session.settle(outgoing.request_id, Ok(HttpReply::new(200, "{}")), &mut surface);
        assert!(session.is_idle());
        assert!(surface.controls_enabled());
        assert_eq!(session.stats().focus_failures, 1);
        assert_eq!(
            surface.nodes().map(|n| n.kind).collect::<Vec<_>>(),
            vec![NodeKind::User, NodeKind::Bot]
        );
    }

    #[test]
    fn message_payload_field() {
        let config = ChatConfig::new().with_payload_field(PayloadField::Message);
        let mut session = ChatSession::new(config);
        let mut surface = MemorySurface::new(800.0);
        let mut scheduler = ManualScheduler::<SessionTimer>::new();
        let outgoing = session.submit("hi", &mut surface, &mut scheduler).unwrap();
        assert_eq!(
            serde_json::to_string(&outgoing.request).unwrap(),
            r#"{"message":"hi"}"#
        );
    }

    #[derive(Default)]
    struct RecordingLogger {
        lines: Mutex<Vec<String>>,
    }

    impl ChatLogger for RecordingLogger {
        fn log_request(&self, request_id: RequestId, request: &QuestionRequest) {
            self.lines
                .lock()
                .unwrap()
                .push(format!("{request_id} {}", request.question));
        }

        fn log_settlement(&self, request_id: RequestId, outcome: &Outcome) {
            self.lines
                .lock()
                .unwrap()
                .push(format!("{request_id} {}", outcome.describe()));
        }
    }

    #[test]
    fn logger_sees_requests_and_settlements() {
        let logger = Arc::new(RecordingLogger::default());
        let mut session = ChatSession::new(ChatConfig::new()).with_logger(logger.clone());
        let mut surface = MemorySurface::new(800.0);
        let mut scheduler = ManualScheduler::<SessionTimer>::new();
        let outgoing = session.submit("hi", &mut surface, &mut scheduler).unwrap();
        session.settle(outgoing.request_id, Ok(HttpReply::new(503, "")), &mut surface);
        session.settle(outgoing.request_id, Ok(HttpReply::new(503, "")), &mut surface);
        assert_eq!(
            *logger.lines.lock().unwrap(),
            vec![
                "request-1 hi".to_string(),
                "request-1 server error 503".to_string()
            ]
        );
    }

    struct FixedTransport(HttpReply);

    #[async_trait::async_trait]
    impl Transport for FixedTransport {
        async fn post(&self, _request: &QuestionRequest) -> Result<HttpReply> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn ask_round_trip() {
        let (mut session, mut surface, mut scheduler) = setup();
        let transport = FixedTransport(HttpReply::new(200, r#"{"message":"M"}"#));
        let outcome = session
            .ask("hi", &transport, &mut surface, &mut scheduler)
            .await;
        assert_eq!(outcome, Some(Outcome::Answered("M".to_string())));
        assert_eq!(texts(&session), vec![("hi", true), ("M", false)]);
        assert!(session.is_idle());

        // The deadline left behind finds nothing to do.
        let timer = scheduler.pop_next().unwrap();
        session.on_timer(timer, &mut surface, &mut scheduler);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.stats().forced_timeouts, 0);
    }
}
