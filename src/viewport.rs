//! Keeping the input bar above the on-screen keyboard.
//!
//! Mobile browsers shrink the visual viewport when the keyboard opens, and
//! they do it on their own schedule.  [`ViewportGuard`] samples the geometry
//! whenever the host reports a change (and a few times after focus, since the
//! keyboard animates in), then moves the input bar up by the keyboard inset.
//!
//! Moving the bar means pinning the window scroll, and on most mobile
//! browsers scrolling the window raises another resize/scroll notification.
//! Left alone the two feed each other forever.  The guard breaks the cycle
//! with a busy flag: it is raised before every programmatic scroll, every
//! notification that arrives while it is up is dropped, and a timer lowers it
//! after a grace period.  Lowering the flag does not recompute.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::observability::{
    VIEWPORT_KEYBOARD_INSET, VIEWPORT_REPOSITIONS, VIEWPORT_SCROLL_ADJUSTMENTS,
    VIEWPORT_SUPPRESSED,
};
use crate::scheduler::Scheduler;
use crate::surface::Surface;

/// User agents treated as touch devices with software keyboards.
const MOBILE_USER_AGENTS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Smallest allowed fallback threshold, in pixels.
pub const MIN_FALLBACK_THRESHOLD: f64 = 120.0;
/// Largest allowed fallback threshold, in pixels.
pub const MAX_FALLBACK_THRESHOLD: f64 = 150.0;

/// Capabilities of the host, supplied by whoever embeds the widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Platform {
    /// The browser's user agent string.
    pub user_agent: String,
    /// Whether the visual viewport API and its resize event exist.
    pub has_visual_viewport: bool,
}

impl Platform {
    /// Creates a platform description.
    pub fn new<S: Into<String>>(user_agent: S, has_visual_viewport: bool) -> Self {
        Self {
            user_agent: user_agent.into(),
            has_visual_viewport,
        }
    }

    /// A desktop host with no on-screen keyboard.
    pub fn desktop() -> Self {
        Self::default()
    }

    /// Returns true if the user agent looks like a touch device.
    pub fn is_mobile(&self) -> bool {
        let user_agent = self.user_agent.to_lowercase();
        MOBILE_USER_AGENTS.iter().any(|ua| user_agent.contains(ua))
    }
}

/// How the guard learns about the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportMode {
    /// Fine-grained visual viewport geometry is available.
    VisualViewport,
    /// Only the window height is available; a large shrink means "keyboard".
    ResizeFallback,
    /// Not a touch device; the guard does nothing.
    Disabled,
}

impl ViewportMode {
    /// Picks the mode for a platform.
    pub fn detect(platform: &Platform) -> Self {
        if !platform.is_mobile() {
            ViewportMode::Disabled
        } else if platform.has_visual_viewport {
            ViewportMode::VisualViewport
        } else {
            ViewportMode::ResizeFallback
        }
    }
}

/// Timing and threshold knobs for the guard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Delays after focus at which to recompute, covering slow keyboard animations.
    pub focus_delays_ms: Vec<u64>,
    /// Delay after blur before the bar drops back down.
    pub blur_reset_ms: u64,
    /// How long the busy flag stays up after a programmatic scroll.
    pub busy_grace_ms: u64,
    /// Window shrinkage that counts as "keyboard open" in fallback mode.
    pub fallback_threshold: f64,
}

impl ViewportConfig {
    /// Creates a new ViewportConfig with default values.
    ///
    /// Defaults:
    /// - Focus recomputes: 100ms, 300ms, 600ms
    /// - Blur reset: 150ms
    /// - Busy grace: 100ms
    /// - Fallback threshold: 150px
    pub fn new() -> Self {
        Self {
            focus_delays_ms: vec![100, 300, 600],
            blur_reset_ms: 150,
            busy_grace_ms: 100,
            fallback_threshold: MAX_FALLBACK_THRESHOLD,
        }
    }

    /// Sets the fallback threshold.
    pub fn with_fallback_threshold(mut self, threshold: f64) -> Self {
        self.fallback_threshold = threshold;
        self
    }

    /// Sets the busy grace period.
    pub fn with_busy_grace(mut self, grace: Duration) -> Self {
        self.busy_grace_ms = grace.as_millis() as u64;
        self
    }

    /// Checks that the values make sense together.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_FALLBACK_THRESHOLD..=MAX_FALLBACK_THRESHOLD).contains(&self.fallback_threshold) {
            return Err(Error::validation(
                format!(
                    "fallback threshold must be between {MIN_FALLBACK_THRESHOLD} and {MAX_FALLBACK_THRESHOLD} pixels"
                ),
                Some("fallback_threshold".to_string()),
            ));
        }
        if self.busy_grace_ms == 0 {
            return Err(Error::validation(
                "busy grace must be positive",
                Some("busy_grace_ms".to_string()),
            ));
        }
        Ok(())
    }

    fn busy_grace(&self) -> Duration {
        Duration::from_millis(self.busy_grace_ms)
    }

    fn blur_reset(&self) -> Duration {
        Duration::from_millis(self.blur_reset_ms)
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Timers the guard schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardTimer {
    /// Recompute after focus, if still focused in the same focus session.
    FocusRecompute {
        /// Focus session that scheduled this.
        generation: u64,
    },
    /// Drop the bar after blur, unless focus came back.
    BlurReset {
        /// Blur that scheduled this.
        generation: u64,
    },
    /// Lower the busy flag, unless a later adjustment raised it again.
    ReleaseBusy {
        /// Adjustment that scheduled this.
        generation: u64,
    },
}

/// Repositions the input bar above the on-screen keyboard.
#[derive(Debug, Clone)]
pub struct ViewportGuard {
    mode: ViewportMode,
    config: ViewportConfig,
    focused: bool,
    focus_generation: u64,
    blur_generation: u64,
    busy: bool,
    busy_generation: u64,
    applied_offset: f64,
    keyboard_open: bool,
    tallest_window: f64,
}

impl ViewportGuard {
    /// Creates a guard for the given mode.
    pub fn new(mode: ViewportMode, config: ViewportConfig) -> Self {
        Self {
            mode,
            config,
            focused: false,
            focus_generation: 0,
            blur_generation: 0,
            busy: false,
            busy_generation: 0,
            applied_offset: 0.0,
            keyboard_open: false,
            tallest_window: 0.0,
        }
    }

    /// Creates a guard for a platform.
    pub fn for_platform(platform: &Platform, config: ViewportConfig) -> Self {
        Self::new(ViewportMode::detect(platform), config)
    }

    /// The guard's mode.
    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    /// Whether notifications are currently being dropped.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The offset last written to the input bar.
    pub fn applied_offset(&self) -> f64 {
        self.applied_offset
    }

    /// In fallback mode, whether the keyboard is believed open.
    pub fn keyboard_open(&self) -> bool {
        self.keyboard_open
    }

    /// Records the current window height as the keyboard-closed baseline.
    ///
    /// While the keyboard is believed open the baseline can only grow;
    /// otherwise the current height replaces it, so a rotation to landscape
    /// is not mistaken for a keyboard.
    pub fn observe(&mut self, surface: &dyn Surface) {
        let height = surface.window_height();
        if self.keyboard_open {
            self.tallest_window = self.tallest_window.max(height);
        } else {
            self.tallest_window = height;
        }
    }

    /// The input gained focus: recompute a few times while the keyboard animates in.
    pub fn on_focus<T: From<GuardTimer>>(&mut self, scheduler: &mut dyn Scheduler<T>) {
        if self.mode == ViewportMode::Disabled {
            return;
        }
        self.focused = true;
        self.focus_generation += 1;
        let generation = self.focus_generation;
        for delay in &self.config.focus_delays_ms {
            scheduler.schedule(
                Duration::from_millis(*delay),
                GuardTimer::FocusRecompute { generation }.into(),
            );
        }
    }

    /// The input lost focus: drop the bar once the keyboard has gone.
    pub fn on_blur<T: From<GuardTimer>>(&mut self, scheduler: &mut dyn Scheduler<T>) {
        if self.mode == ViewportMode::Disabled {
            return;
        }
        self.focused = false;
        self.blur_generation += 1;
        scheduler.schedule(
            self.config.blur_reset(),
            GuardTimer::BlurReset {
                generation: self.blur_generation,
            }
            .into(),
        );
    }

    /// The visual viewport (or, in fallback mode, the window) resized.
    ///
    /// Returns true if anything on screen moved.
    pub fn on_viewport_change<T: From<GuardTimer>>(
        &mut self,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler<T>,
    ) -> bool {
        self.recompute(surface, scheduler)
    }

    /// The window scrolled.
    pub fn on_window_scroll<T: From<GuardTimer>>(
        &mut self,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler<T>,
    ) -> bool {
        self.recompute(surface, scheduler)
    }

    /// One of the guard's own timers fired.
    pub fn on_timer<T: From<GuardTimer>>(
        &mut self,
        timer: GuardTimer,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler<T>,
    ) {
        match timer {
            GuardTimer::FocusRecompute { generation } => {
                if self.focused && generation == self.focus_generation {
                    self.recompute(surface, scheduler);
                }
            }
            GuardTimer::BlurReset { generation } => {
                if !self.focused && generation == self.blur_generation {
                    self.keyboard_open = false;
                    self.observe(&*surface);
                    if self.applied_offset != 0.0 {
                        self.applied_offset = 0.0;
                        surface.set_input_bar_offset(0.0);
                        VIEWPORT_REPOSITIONS.click();
                    }
                }
            }
            GuardTimer::ReleaseBusy { generation } => {
                if generation == self.busy_generation {
                    self.busy = false;
                }
            }
        }
    }

    fn recompute<T: From<GuardTimer>>(
        &mut self,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler<T>,
    ) -> bool {
        match self.mode {
            ViewportMode::Disabled => false,
            _ if self.busy => {
                VIEWPORT_SUPPRESSED.click();
                false
            }
            ViewportMode::VisualViewport => self.reposition(surface, scheduler),
            ViewportMode::ResizeFallback => self.detect_resize(surface, scheduler),
        }
    }

    fn reposition<T: From<GuardTimer>>(
        &mut self,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler<T>,
    ) -> bool {
        let Some(frame) = surface.visual_viewport() else {
            return false;
        };
        let inset = frame.keyboard_inset();
        if inset == self.applied_offset {
            return false;
        }
        self.applied_offset = inset;
        surface.set_input_bar_offset(inset);
        VIEWPORT_REPOSITIONS.click();
        VIEWPORT_KEYBOARD_INSET.add(inset);
        if inset > 0.0 {
            // iOS scrolls the window to reveal the input; pin it back so the bar stays put.
            self.raise_busy(scheduler);
            surface.scroll_window_to(0.0);
        }
        true
    }

    fn detect_resize<T: From<GuardTimer>>(
        &mut self,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler<T>,
    ) -> bool {
        let height = surface.window_height();
        self.tallest_window = self.tallest_window.max(height);
        let open = self.tallest_window - height > self.config.fallback_threshold;
        if open == self.keyboard_open {
            return false;
        }
        self.keyboard_open = open;
        if open && self.focused {
            self.raise_busy(scheduler);
            surface.scroll_input_into_view();
        }
        true
    }

    fn raise_busy<T: From<GuardTimer>>(&mut self, scheduler: &mut dyn Scheduler<T>) {
        self.busy = true;
        self.busy_generation += 1;
        VIEWPORT_SCROLL_ADJUSTMENTS.click();
        scheduler.schedule(
            self.config.busy_grace(),
            GuardTimer::ReleaseBusy {
                generation: self.busy_generation,
            }
            .into(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use crate::surface::{MemorySurface, Notification};

    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";

    fn visual_guard() -> ViewportGuard {
        ViewportGuard::new(ViewportMode::VisualViewport, ViewportConfig::new())
    }

    fn fire_all(
        guard: &mut ViewportGuard,
        surface: &mut MemorySurface,
        scheduler: &mut ManualScheduler<GuardTimer>,
    ) {
        while let Some(timer) = scheduler.pop_next() {
            guard.on_timer(timer, surface, scheduler);
        }
    }

    fn advance(
        guard: &mut ViewportGuard,
        surface: &mut MemorySurface,
        scheduler: &mut ManualScheduler<GuardTimer>,
        by: Duration,
    ) {
        scheduler.run_for(by, |scheduler, timer| {
            guard.on_timer(timer, surface, scheduler)
        });
    }

    /// Feeds the surface's echoed notifications back into the guard, the way
    /// a browser event loop would, until they stop or a bound is hit.
    fn pump_notifications(
        guard: &mut ViewportGuard,
        surface: &mut MemorySurface,
        scheduler: &mut ManualScheduler<GuardTimer>,
    ) -> usize {
        let mut delivered = 0;
        for _ in 0..1000 {
            let notifications = surface.take_notifications();
            if notifications.is_empty() {
                break;
            }
            for notification in notifications {
                delivered += 1;
                match notification {
                    Notification::WindowScrolled => guard.on_window_scroll(surface, scheduler),
                    Notification::ViewportChanged => guard.on_viewport_change(surface, scheduler),
                };
            }
        }
        delivered
    }

    #[test]
    fn detect_modes() {
        assert_eq!(
            ViewportMode::detect(&Platform::new(IPHONE, true)),
            ViewportMode::VisualViewport
        );
        assert_eq!(
            ViewportMode::detect(&Platform::new("Opera Mini/8.0 (J2ME)", false)),
            ViewportMode::ResizeFallback
        );
        assert_eq!(
            ViewportMode::detect(&Platform::new(
                "Mozilla/5.0 (X11; Linux x86_64) Firefox/130.0",
                true
            )),
            ViewportMode::Disabled
        );
        assert_eq!(
            ViewportMode::detect(&Platform::desktop()),
            ViewportMode::Disabled
        );
    }

    #[test]
    fn config_validation() {
        assert!(ViewportConfig::new().validate().is_ok());
        assert!(
            ViewportConfig::new()
                .with_fallback_threshold(120.0)
                .validate()
                .is_ok()
        );
        assert!(
            ViewportConfig::new()
                .with_fallback_threshold(100.0)
                .validate()
                .is_err()
        );
        assert!(
            ViewportConfig::new()
                .with_busy_grace(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn focus_moves_bar_above_keyboard() {
        let mut guard = visual_guard();
        let mut surface = MemorySurface::with_visual_viewport(800.0);
        let mut scheduler = ManualScheduler::<GuardTimer>::new();

        guard.on_focus(&mut scheduler);
        assert_eq!(scheduler.pending(), 3);

        // Keyboard is still animating at the first recompute.
        surface.show_keyboard(120.0);
        advance(&mut guard, &mut surface, &mut scheduler, Duration::from_millis(100));
        assert_eq!(surface.input_bar_offset(), 120.0);

        surface.show_keyboard(300.0);
        fire_all(&mut guard, &mut surface, &mut scheduler);
        assert_eq!(surface.input_bar_offset(), 300.0);
        assert_eq!(guard.applied_offset(), 300.0);
        assert!(!guard.is_busy());
    }

    #[test]
    fn identical_viewport_changes_move_once() {
        let mut guard = visual_guard();
        let mut surface = MemorySurface::with_visual_viewport(800.0);
        let mut scheduler = ManualScheduler::<GuardTimer>::new();
        surface.show_keyboard(300.0);

        assert!(guard.on_viewport_change(&mut surface, &mut scheduler));
        assert!(!guard.on_viewport_change(&mut surface, &mut scheduler));
        assert_eq!(surface.offset_writes(), &[300.0]);
        assert_eq!(surface.window_scrolls(), &[0.0]);

        // Still no movement once the busy flag is gone.
        fire_all(&mut guard, &mut surface, &mut scheduler);
        assert!(!guard.on_viewport_change(&mut surface, &mut scheduler));
        assert_eq!(surface.offset_writes(), &[300.0]);
        assert_eq!(surface.window_scrolls(), &[0.0]);
    }

    #[test]
    fn scroll_feedback_settles() {
        let mut guard = visual_guard();
        // Every programmatic scroll nudges the viewport and echoes two events.
        let mut surface = MemorySurface::with_visual_viewport(800.0).echo_scrolls(1.0);
        let mut scheduler = ManualScheduler::<GuardTimer>::new();
        surface.show_keyboard(300.0);

        assert!(guard.on_viewport_change(&mut surface, &mut scheduler));
        let delivered = pump_notifications(&mut guard, &mut surface, &mut scheduler);
        assert_eq!(delivered, 2);
        assert_eq!(surface.offset_writes(), &[300.0]);
        assert_eq!(surface.window_scrolls().len(), 1);

        fire_all(&mut guard, &mut surface, &mut scheduler);
        assert!(!guard.is_busy());
        assert!(surface.take_notifications().is_empty());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn echoes_after_grace_are_new_geometry() {
        // An echo delivered after the flag drops is indistinguishable from a
        // real resize, so it moves the bar again; one move per grace period.
        let mut guard = visual_guard();
        let mut surface = MemorySurface::with_visual_viewport(800.0).echo_scrolls(1.0);
        let mut scheduler = ManualScheduler::<GuardTimer>::new();
        surface.show_keyboard(300.0);

        guard.on_viewport_change(&mut surface, &mut scheduler);
        for _ in 0..10 {
            fire_all(&mut guard, &mut surface, &mut scheduler);
            for notification in surface.take_notifications() {
                if notification == Notification::ViewportChanged {
                    guard.on_viewport_change(&mut surface, &mut scheduler);
                }
            }
        }
        assert_eq!(surface.window_scrolls().len(), 11);
    }

    #[test]
    fn blur_resets_after_delay() {
        let mut guard = visual_guard();
        let mut surface = MemorySurface::with_visual_viewport(800.0);
        let mut scheduler = ManualScheduler::<GuardTimer>::new();
        guard.on_focus(&mut scheduler);
        surface.show_keyboard(300.0);
        fire_all(&mut guard, &mut surface, &mut scheduler);

        guard.on_blur(&mut scheduler);
        assert_eq!(surface.input_bar_offset(), 300.0);
        advance(&mut guard, &mut surface, &mut scheduler, Duration::from_millis(149));
        assert_eq!(surface.input_bar_offset(), 300.0);
        advance(&mut guard, &mut surface, &mut scheduler, Duration::from_millis(1));
        assert_eq!(surface.input_bar_offset(), 0.0);
    }

    #[test]
    fn refocus_cancels_blur_reset() {
        let mut guard = visual_guard();
        let mut surface = MemorySurface::with_visual_viewport(800.0);
        let mut scheduler = ManualScheduler::<GuardTimer>::new();
        guard.on_focus(&mut scheduler);
        surface.show_keyboard(300.0);
        fire_all(&mut guard, &mut surface, &mut scheduler);

        guard.on_blur(&mut scheduler);
        guard.on_focus(&mut scheduler);
        fire_all(&mut guard, &mut surface, &mut scheduler);
        assert_eq!(surface.input_bar_offset(), 300.0);
        assert_eq!(surface.offset_writes(), &[300.0]);
    }

    #[test]
    fn focus_timers_after_blur_are_ignored() {
        let mut guard = visual_guard();
        let mut surface = MemorySurface::with_visual_viewport(800.0);
        let mut scheduler = ManualScheduler::<GuardTimer>::new();
        guard.on_focus(&mut scheduler);
        guard.on_blur(&mut scheduler);
        surface.show_keyboard(300.0);
        fire_all(&mut guard, &mut surface, &mut scheduler);
        assert!(surface.offset_writes().is_empty());
    }

    #[test]
    fn fallback_uses_threshold() {
        let mut guard = ViewportGuard::new(ViewportMode::ResizeFallback, ViewportConfig::new());
        let mut surface = MemorySurface::new(800.0);
        let mut scheduler = ManualScheduler::<GuardTimer>::new();
        guard.observe(&surface);
        guard.on_focus(&mut scheduler);

        // Address bar collapsing: below the threshold.
        surface.set_window_height(700.0);
        assert!(!guard.on_viewport_change(&mut surface, &mut scheduler));
        assert!(!guard.keyboard_open());

        surface.set_window_height(500.0);
        assert!(guard.on_viewport_change(&mut surface, &mut scheduler));
        assert!(guard.keyboard_open());
        assert_eq!(surface.input_into_view(), 1);
        assert!(surface.offset_writes().is_empty());

        fire_all(&mut guard, &mut surface, &mut scheduler);
        surface.set_window_height(800.0);
        assert!(guard.on_viewport_change(&mut surface, &mut scheduler));
        assert!(!guard.keyboard_open());
        assert_eq!(surface.input_into_view(), 1);
    }

    #[test]
    fn fallback_mistriggers_at_threshold_edge() {
        let mut guard = ViewportGuard::new(ViewportMode::ResizeFallback, ViewportConfig::new());
        let mut surface = MemorySurface::new(800.0);
        let mut scheduler = ManualScheduler::<GuardTimer>::new();
        guard.observe(&surface);

        surface.set_window_height(649.0);
        assert!(guard.on_viewport_change(&mut surface, &mut scheduler));
        assert!(guard.keyboard_open());
        surface.set_window_height(650.0);
        assert!(guard.on_viewport_change(&mut surface, &mut scheduler));
        assert!(!guard.keyboard_open());
    }

    #[test]
    fn fallback_rebaselines_after_rotation() {
        let mut guard = ViewportGuard::new(ViewportMode::ResizeFallback, ViewportConfig::new());
        let mut surface = MemorySurface::new(800.0);
        let mut scheduler = ManualScheduler::<GuardTimer>::new();
        guard.observe(&surface);
        guard.on_focus(&mut scheduler);
        surface.set_window_height(480.0);
        guard.on_viewport_change(&mut surface, &mut scheduler);
        assert!(guard.keyboard_open());

        // The keyboard goes away and the phone turns to landscape.
        guard.on_blur(&mut scheduler);
        surface.set_window_height(400.0);
        fire_all(&mut guard, &mut surface, &mut scheduler);
        assert!(!guard.keyboard_open());

        guard.observe(&surface);
        guard.on_focus(&mut scheduler);
        assert!(!guard.on_viewport_change(&mut surface, &mut scheduler));
        assert!(!guard.keyboard_open());

        surface.set_window_height(200.0);
        assert!(guard.on_viewport_change(&mut surface, &mut scheduler));
        assert!(guard.keyboard_open());
    }

    #[test]
    fn rotation_while_unfocused_is_not_a_keyboard() {
        let mut guard = ViewportGuard::new(ViewportMode::ResizeFallback, ViewportConfig::new());
        let mut surface = MemorySurface::new(800.0);
        let mut scheduler = ManualScheduler::<GuardTimer>::new();
        guard.observe(&surface);

        surface.set_window_height(400.0);
        guard.observe(&surface);
        guard.on_focus(&mut scheduler);
        assert!(!guard.on_viewport_change(&mut surface, &mut scheduler));
        assert!(!guard.keyboard_open());
    }

    #[test]
    fn desktop_is_noop() {
        let mut guard = ViewportGuard::for_platform(&Platform::desktop(), ViewportConfig::new());
        let mut surface = MemorySurface::with_visual_viewport(800.0);
        let mut scheduler = ManualScheduler::<GuardTimer>::new();
        surface.show_keyboard(300.0);
        guard.on_focus(&mut scheduler);
        assert!(!guard.on_viewport_change(&mut surface, &mut scheduler));
        guard.on_blur(&mut scheduler);
        assert!(scheduler.is_empty());
        assert!(surface.offset_writes().is_empty());
        assert!(surface.window_scrolls().is_empty());
    }
}
