//! Frame-aligned scroll event coalescing.

/// Coalesces raw scroll events so that at most one scroll-driven update runs
/// per animation frame, always reflecting the most recent offset observed.
///
/// The host feeds every raw event through [`FrameThrottle::push`] and calls
/// [`FrameThrottle::take`] once per frame. A pending offset survives until it
/// is taken, so the final event before a quiet period is never dropped.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    pending: Option<f32>,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw scroll offset. Later offsets within the same frame
    /// replace earlier ones.
    pub fn push(&mut self, scroll_top: f32) {
        self.pending = Some(scroll_top);
    }

    /// Take the coalesced offset for this frame, if any scroll event fired
    /// since the last take.
    pub fn take(&mut self) -> Option<f32> {
        self.pending.take()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
