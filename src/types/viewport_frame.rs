/// Viewport geometry sampled from the host on each change notification.
///
/// All values are CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportFrame {
    /// Height of the visual viewport.
    pub visual_height: f64,

    /// Offset of the visual viewport from the top of the layout viewport.
    pub visual_offset_top: f64,

    /// Height of the window (layout viewport).
    pub window_height: f64,
}

impl ViewportFrame {
    /// Creates a new frame.
    pub fn new(visual_height: f64, visual_offset_top: f64, window_height: f64) -> Self {
        Self {
            visual_height,
            visual_offset_top,
            window_height,
        }
    }

    /// The space taken by the on-screen keyboard, in whole pixels.
    ///
    /// Never negative; overscroll can briefly make the visual viewport larger
    /// than the window.
    pub fn keyboard_inset(&self) -> f64 {
        let inset = self.window_height - (self.visual_height + self.visual_offset_top);
        if inset.is_finite() && inset > 0.0 {
            inset.round()
        } else {
            0.0
        }
    }
}
