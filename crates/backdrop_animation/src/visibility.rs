//! Viewport visibility triggers
//!
//! A trigger turns a stream of "is the element intersecting the viewport"
//! observations into start/reset edges for entrance animations.

use backdrop_core::Rect;

/// Whether a trigger may fire more than once per mount
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerMode {
    /// Fires on first entry and stays fired for the rest of the mount
    #[default]
    Once,
    /// Fires on every entry and resets on every exit
    Restartable,
}

/// Edge produced by a visibility observation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEdge {
    /// Nothing changed
    None,
    /// The element became visible and the entrance should (re)start
    Fired,
    /// The element left the viewport and the entrance should rewind
    Reset,
}

/// One-shot (or restartable) viewport gate
#[derive(Clone, Copy, Debug, Default)]
pub struct VisibilityTrigger {
    mode: TriggerMode,
    options: ViewportOptions,
    fired: bool,
    in_view: bool,
}

impl VisibilityTrigger {
    pub fn new(mode: TriggerMode) -> Self {
        Self {
            mode,
            options: ViewportOptions::default(),
            fired: false,
            in_view: false,
        }
    }

    /// Replace the intersection settings used by [`Self::observe_rects`]
    pub fn with_options(mut self, options: ViewportOptions) -> Self {
        self.options = options;
        self
    }

    /// A trigger that fires at most once
    pub fn once() -> Self {
        Self::new(TriggerMode::Once)
    }

    /// A trigger that replays on every entry
    pub fn restartable() -> Self {
        Self::new(TriggerMode::Restartable)
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    pub fn options(&self) -> ViewportOptions {
        self.options
    }

    /// Whether the entrance has been fired (and not reset)
    pub fn is_fired(&self) -> bool {
        self.fired
    }

    /// Feed the latest intersection state
    pub fn observe(&mut self, intersecting: bool) -> TriggerEdge {
        let was_in_view = std::mem::replace(&mut self.in_view, intersecting);

        match (self.mode, was_in_view, intersecting) {
            (TriggerMode::Once, _, true) if !self.fired => {
                self.fired = true;
                TriggerEdge::Fired
            }
            (TriggerMode::Restartable, false, true) => {
                self.fired = true;
                TriggerEdge::Fired
            }
            (TriggerMode::Restartable, true, false) => {
                self.fired = false;
                TriggerEdge::Reset
            }
            _ => TriggerEdge::None,
        }
    }

    /// Feed an element's page rect and the viewport rect
    pub fn observe_rects(&mut self, element: Rect, viewport: Rect) -> TriggerEdge {
        let intersecting = self.options.is_intersecting(element, viewport);
        self.observe(intersecting)
    }
}

/// Intersection settings shared by viewport-gated wrappers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportOptions {
    /// Grows (positive) or shrinks (negative) the viewport before testing,
    /// in pixels. Negative margins require the element to be well inside.
    pub margin: f32,
}

impl ViewportOptions {
    /// Element must be 100px inside the viewport edge
    pub const ENTRANCE: ViewportOptions = ViewportOptions { margin: -100.0 };
    /// Element must be 200px inside the viewport edge
    pub const PARALLAX: ViewportOptions = ViewportOptions { margin: -200.0 };

    /// Test an element's page rect against the viewport rect
    pub fn is_intersecting(&self, element: Rect, viewport: Rect) -> bool {
        element.intersects(&viewport.outset(self.margin))
    }
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self::ENTRANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_once_never_reverts() {
        let mut trigger = VisibilityTrigger::once();
        assert!(!trigger.is_fired());

        assert_eq!(trigger.observe(false), TriggerEdge::None);
        assert_eq!(trigger.observe(true), TriggerEdge::Fired);
        assert!(trigger.is_fired());

        // Scrolling away and back never replays or resets
        for visible in [false, true, false, true, true, false] {
            assert_eq!(trigger.observe(visible), TriggerEdge::None);
            assert!(trigger.is_fired());
        }
    }

    #[test]
    fn test_restartable_fires_per_entry() {
        let mut trigger = VisibilityTrigger::restartable();
        assert_eq!(trigger.observe(true), TriggerEdge::Fired);
        assert_eq!(trigger.observe(true), TriggerEdge::None);
        assert_eq!(trigger.observe(false), TriggerEdge::Reset);
        assert!(!trigger.is_fired());
        assert_eq!(trigger.observe(true), TriggerEdge::Fired);
    }

    #[test]
    fn test_negative_margin() {
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let options = ViewportOptions::ENTRANCE;

        // Peeking 50px above the bottom edge is not enough
        let peeking = Rect::new(0.0, 750.0, 200.0, 200.0);
        assert!(!options.is_intersecting(peeking, viewport));

        let inside = Rect::new(0.0, 600.0, 200.0, 200.0);
        assert!(options.is_intersecting(inside, viewport));
    }

    #[test]
    fn test_trigger_uses_its_margin() {
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        // 150px inside the bottom edge
        let element = Rect::new(300.0, 650.0, 200.0, 200.0);

        let mut entrance = VisibilityTrigger::once();
        assert_eq!(entrance.options(), ViewportOptions::ENTRANCE);
        assert_eq!(entrance.observe_rects(element, viewport), TriggerEdge::Fired);

        let mut parallax = VisibilityTrigger::restartable().with_options(ViewportOptions::PARALLAX);
        assert_eq!(parallax.observe_rects(element, viewport), TriggerEdge::None);
        let deeper = Rect::new(300.0, 550.0, 200.0, 200.0);
        assert_eq!(parallax.observe_rects(deeper, viewport), TriggerEdge::Fired);
    }
}
