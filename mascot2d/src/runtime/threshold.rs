//! Reveal threshold and scroll-fraction math.

/// Fraction of the hero region (or viewport) scrolled past before the
/// reveal fires.
pub const HERO_THRESHOLD_RATIO: f32 = 0.8;

/// Read-only snapshot of the host page's scroll geometry, in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Viewport {
    pub scroll_top: f32,
    /// Total scrollable height of the page content.
    pub scroll_height: f32,
    pub viewport_height: f32,
    /// Rendered height of the hero region, when the host located one.
    /// Absence is a valid, non-error condition.
    pub hero_height: Option<f32>,
}

impl Viewport {
    pub fn hero_threshold(&self) -> f32 {
        hero_threshold(self.hero_height, self.viewport_height)
    }

    pub fn with_scroll_top(mut self, scroll_top: f32) -> Self {
        self.scroll_top = scroll_top;
        self
    }
}

/// Scroll offset marking the end of the page's hero region: 0.8 times the
/// hero height, falling back to 0.8 times the viewport height when no hero
/// region exists.
pub fn hero_threshold(hero_height: Option<f32>, viewport_height: f32) -> f32 {
    match hero_height {
        Some(h) if h.is_finite() && h > 0.0 => h * HERO_THRESHOLD_RATIO,
        _ => viewport_height.max(0.0) * HERO_THRESHOLD_RATIO,
    }
}

/// Scroll progress through the page in `0.0..=1.0`, or `None` when the page
/// has no scrollable overflow (content height <= viewport height). The
/// denominator is never allowed to reach zero or go negative.
pub fn scroll_fraction(view: &Viewport) -> Option<f32> {
    let denom = view.scroll_height - view.viewport_height;
    if !denom.is_finite() || denom <= 0.0 {
        return None;
    }
    Some((view.scroll_top / denom).clamp(0.0, 1.0))
}
