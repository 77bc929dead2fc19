use biometrics::{Collector, Counter, Moments};

pub(crate) static TRANSPORT_REQUESTS: Counter = Counter::new("folio.transport.requests");
pub(crate) static TRANSPORT_REQUEST_ERRORS: Counter =
    Counter::new("folio.transport.request_errors");
pub(crate) static TRANSPORT_REQUEST_DURATION: Moments =
    Moments::new("folio.transport.request_duration_seconds");

pub(crate) static SESSION_SUBMITS: Counter = Counter::new("folio.session.submits");
pub(crate) static SESSION_EMPTY_SUBMITS: Counter = Counter::new("folio.session.empty_submits");
pub(crate) static SESSION_ANSWERS: Counter = Counter::new("folio.session.answers");
pub(crate) static SESSION_FAILURES: Counter = Counter::new("folio.session.failures");
pub(crate) static SESSION_STALE_SETTLEMENTS: Counter =
    Counter::new("folio.session.stale_settlements");
pub(crate) static SESSION_FORCED_TIMEOUTS: Counter =
    Counter::new("folio.session.forced_timeouts");
pub(crate) static SESSION_FOCUS_FAILURES: Counter = Counter::new("folio.session.focus_failures");

pub(crate) static VIEWPORT_REPOSITIONS: Counter = Counter::new("folio.viewport.repositions");
pub(crate) static VIEWPORT_SCROLL_ADJUSTMENTS: Counter =
    Counter::new("folio.viewport.scroll_adjustments");
pub(crate) static VIEWPORT_SUPPRESSED: Counter = Counter::new("folio.viewport.suppressed");
pub(crate) static VIEWPORT_KEYBOARD_INSET: Moments =
    Moments::new("folio.viewport.keyboard_inset_pixels");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&TRANSPORT_REQUESTS);
    collector.register_counter(&TRANSPORT_REQUEST_ERRORS);
    collector.register_moments(&TRANSPORT_REQUEST_DURATION);

    collector.register_counter(&SESSION_SUBMITS);
    collector.register_counter(&SESSION_EMPTY_SUBMITS);
    collector.register_counter(&SESSION_ANSWERS);
    collector.register_counter(&SESSION_FAILURES);
    collector.register_counter(&SESSION_STALE_SETTLEMENTS);
    collector.register_counter(&SESSION_FORCED_TIMEOUTS);
    collector.register_counter(&SESSION_FOCUS_FAILURES);

    collector.register_counter(&VIEWPORT_REPOSITIONS);
    collector.register_counter(&VIEWPORT_SCROLL_ADJUSTMENTS);
    collector.register_counter(&VIEWPORT_SUPPRESSED);
    collector.register_moments(&VIEWPORT_KEYBOARD_INSET);
}
