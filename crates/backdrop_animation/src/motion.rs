//! Motion behaviors and the content wrapper
//!
//! Every wrapper in this crate is a [`Motion`]: input handlers only record
//! state, [`Motion::tick`] advances time, and [`Motion::style`] reads the
//! resolved visual state for the current frame. [`Wrapped`] pairs arbitrary
//! content with one behavior so page sections can animate their own content
//! without owning any transition math.

use crate::easing::Easing;
use crate::transition::{MotionStyle, Property, Transition};
use crate::visibility::{TriggerEdge, ViewportOptions, VisibilityTrigger};
use backdrop_core::{PointerEvent, Rect};
use smallvec::SmallVec;

/// A motion behavior driven by pointer messages, visibility and time
pub trait Motion {
    /// Record a pointer message; effects apply on the next tick
    fn handle_pointer(&mut self, _event: PointerEvent) {}

    /// Record the latest viewport intersection state
    fn set_visible(&mut self, _visible: bool) {}

    /// Advance by `dt` seconds
    fn tick(&mut self, dt: f32);

    /// Visual state for the current frame
    fn style(&self) -> MotionStyle;
}

/// Content paired with the behavior that animates it
#[derive(Clone, Debug)]
pub struct Wrapped<C, M> {
    content: C,
    motion: M,
}

impl<C, M: Motion> Wrapped<C, M> {
    pub fn new(content: C, motion: M) -> Self {
        Self { content, motion }
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    pub fn motion(&self) -> &M {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut M {
        &mut self.motion
    }

    /// Split back into content and behavior
    pub fn into_parts(self) -> (C, M) {
        (self.content, self.motion)
    }
}

impl<C, M: Motion> Motion for Wrapped<C, M> {
    fn handle_pointer(&mut self, event: PointerEvent) {
        self.motion.handle_pointer(event);
    }

    fn set_visible(&mut self, visible: bool) {
        self.motion.set_visible(visible);
    }

    fn tick(&mut self, dt: f32) {
        self.motion.tick(dt);
    }

    fn style(&self) -> MotionStyle {
        self.motion.style()
    }
}

/// What starts an entrance
#[derive(Clone, Copy, Debug)]
pub enum EntranceGate {
    /// Starts when the element scrolls into view
    Viewport(VisibilityTrigger),
    /// Started explicitly by a parent (stagger containers, text runs)
    Parent,
}

/// One-shot entrance made of parallel property transitions
///
/// Before the entrance starts every property sits at its `from` value. Once
/// started the transitions play against a local clock; a restartable gate
/// rewinds the clock when the element leaves the viewport.
#[derive(Clone, Debug)]
pub struct Entrance {
    transitions: SmallVec<[Transition; 3]>,
    gate: EntranceGate,
    clock: Option<f32>,
}

impl Entrance {
    pub fn new(transitions: impl IntoIterator<Item = Transition>, gate: EntranceGate) -> Self {
        Self {
            transitions: transitions.into_iter().collect(),
            gate,
            clock: None,
        }
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Whether the entrance has started playing
    pub fn has_started(&self) -> bool {
        self.clock.is_some()
    }

    /// Whether every transition has reached its target
    pub fn is_complete(&self) -> bool {
        match self.clock {
            Some(t) => self.transitions.iter().all(|tr| t >= tr.end_time()),
            None => false,
        }
    }

    /// Start playing after an extra `lead_in` seconds
    ///
    /// Ignored if already playing so a second start never replays.
    pub fn start(&mut self, lead_in: f32) {
        if self.clock.is_none() {
            self.clock = Some(-lead_in.max(0.0));
        }
    }

    /// Rewind to the initial state
    pub fn rewind(&mut self) {
        self.clock = None;
    }

    /// Intersection settings of a viewport gate, `None` for parent-started entrances
    pub fn viewport_options(&self) -> Option<ViewportOptions> {
        match &self.gate {
            EntranceGate::Viewport(trigger) => Some(trigger.options()),
            EntranceGate::Parent => None,
        }
    }

    /// Test the element's page rect against the viewport using the gate's margin
    pub fn observe_rects(&mut self, element: Rect, viewport: Rect) {
        if let Some(options) = self.viewport_options() {
            self.set_visible(options.is_intersecting(element, viewport));
        }
    }
}

impl Motion for Entrance {
    fn set_visible(&mut self, visible: bool) {
        if let EntranceGate::Viewport(trigger) = &mut self.gate {
            match trigger.observe(visible) {
                TriggerEdge::Fired => self.start(0.0),
                TriggerEdge::Reset => self.rewind(),
                TriggerEdge::None => {}
            }
        }
    }

    fn tick(&mut self, dt: f32) {
        if let Some(clock) = self.clock.as_mut() {
            *clock += dt.max(0.0);
        }
    }

    fn style(&self) -> MotionStyle {
        let mut style = MotionStyle::NEUTRAL;
        for transition in &self.transitions {
            let value = match self.clock {
                Some(t) => transition.value_at(t),
                None => transition.from,
            };
            style.set(transition.property, value);
        }
        style
    }
}

/// Reversible hover tween between a rest pose and a hover pose
///
/// Progress moves toward 1 while hovered and back toward 0 otherwise at a
/// constant rate of `1 / duration`; the easing shapes the output.
#[derive(Clone, Debug)]
pub struct HoverTween {
    targets: SmallVec<[(Property, f32, f32); 3]>,
    duration: f32,
    easing: Easing,
    hovered: bool,
    progress: f32,
}

impl HoverTween {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            targets: SmallVec::new(),
            duration,
            easing,
            hovered: false,
            progress: 0.0,
        }
    }

    /// Animate `property` from `rest` to `hover`
    pub fn with(mut self, property: Property, rest: f32, hover: f32) -> Self {
        self.targets.push((property, rest, hover));
        self
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Write the current values into `style`
    pub fn apply(&self, style: &mut MotionStyle) {
        let eased = self.easing.apply(self.progress);
        for &(property, rest, hover) in &self.targets {
            style.set(property, rest + (hover - rest) * eased);
        }
    }
}

impl Motion for HoverTween {
    fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Enter(_) | PointerEvent::Move(_) => self.hovered = true,
            PointerEvent::Leave => self.hovered = false,
            PointerEvent::Down | PointerEvent::Up => {}
        }
    }

    fn tick(&mut self, dt: f32) {
        let goal = if self.hovered { 1.0 } else { 0.0 };
        if self.duration <= 0.0 {
            self.progress = goal;
            return;
        }
        let step = dt.max(0.0) / self.duration;
        self.progress = if goal > self.progress {
            (self.progress + step).min(goal)
        } else {
            (self.progress - step).max(goal)
        };
    }

    fn style(&self) -> MotionStyle {
        let mut style = MotionStyle::NEUTRAL;
        self.apply(&mut style);
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::Point;

    fn fade() -> Entrance {
        Entrance::new(
            [Transition::tween(Property::Opacity, 0.0, 1.0, 1.0, Easing::Linear)],
            EntranceGate::Parent,
        )
    }

    #[test]
    fn test_entrance_waits_for_start() {
        let mut entrance = fade();
        entrance.tick(5.0);
        assert_eq!(entrance.style().opacity, 0.0);
        assert!(!entrance.has_started());

        entrance.start(0.5);
        entrance.tick(0.5);
        assert_eq!(entrance.style().opacity, 0.0);
        entrance.tick(0.5);
        assert!((entrance.style().opacity - 0.5).abs() < 1e-5);
        entrance.tick(1.0);
        assert!(entrance.is_complete());
    }

    #[test]
    fn test_second_start_does_not_replay() {
        let mut entrance = fade();
        entrance.start(0.0);
        entrance.tick(2.0);
        entrance.start(0.0);
        assert_eq!(entrance.style().opacity, 1.0);
    }

    #[test]
    fn test_parent_gate_ignores_viewport() {
        let mut entrance = fade();
        entrance.set_visible(true);
        assert!(!entrance.has_started());
    }

    #[test]
    fn test_hover_tween_reverses() {
        let mut hover = HoverTween::new(0.3, Easing::Linear).with(Property::Scale, 1.0, 1.02);
        hover.handle_pointer(PointerEvent::Enter(Point::ZERO));
        hover.tick(0.15);
        assert!((hover.style().scale - 1.01).abs() < 1e-5);
        hover.tick(1.0);
        assert_eq!(hover.progress(), 1.0);

        hover.handle_pointer(PointerEvent::Leave);
        hover.tick(1.0);
        assert_eq!(hover.style().scale, 1.0);
    }
}
