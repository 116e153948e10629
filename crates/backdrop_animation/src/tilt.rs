//! Pointer-driven 3D tilt

use crate::motion::{Motion, Wrapped};
use crate::spring::{Spring, SpringConfig};
use crate::transition::MotionStyle;
use backdrop_core::{Point, PointerEvent, Rect};

/// Configuration for [`tilt_card`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltConfig {
    /// Rotation in degrees when the pointer sits on an edge
    pub max_tilt_degrees: f32,
    pub spring: SpringConfig,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_tilt_degrees: 10.0,
            spring: SpringConfig::tilt(),
        }
    }
}

/// Target rotation `(x, y)` in degrees for a pointer over `bounds`
///
/// A pointer left of center tilts toward positive Y and a pointer above
/// center toward positive X. Offsets are normalized by the half extents and
/// clamped, so a pointer outside the bounds never exceeds `max_degrees`.
pub fn tilt_angles(bounds: Rect, pointer: Point, max_degrees: f32) -> (f32, f32) {
    let (half_w, half_h) = bounds.half_extents();
    if !(half_w > 0.0 && half_h > 0.0) {
        return (0.0, 0.0);
    }
    let center = bounds.center();
    let nx = ((pointer.x - center.x) / half_w).clamp(-1.0, 1.0);
    let ny = ((pointer.y - center.y) / half_h).clamp(-1.0, 1.0);
    (-ny * max_degrees, -nx * max_degrees)
}

/// Tilt state: a target from the latest pointer, springs chasing it
#[derive(Clone, Debug)]
pub struct Tilt {
    config: TiltConfig,
    bounds: Rect,
    pointer: Option<Point>,
    rotate_x: Spring,
    rotate_y: Spring,
}

impl Tilt {
    pub fn new(config: TiltConfig) -> Self {
        Self {
            config,
            bounds: Rect::ZERO,
            pointer: None,
            rotate_x: Spring::new(config.spring, 0.0),
            rotate_y: Spring::new(config.spring, 0.0),
        }
    }

    /// Update the element's layout bounds, in the same space as pointer events
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Rotation the springs are heading toward
    pub fn target(&self) -> (f32, f32) {
        match self.pointer {
            Some(pointer) => tilt_angles(self.bounds, pointer, self.config.max_tilt_degrees),
            None => (0.0, 0.0),
        }
    }

    /// Current rotation `(x, y)` in degrees
    pub fn rotation(&self) -> (f32, f32) {
        (self.rotate_x.value(), self.rotate_y.value())
    }
}

impl Default for Tilt {
    fn default() -> Self {
        Self::new(TiltConfig::default())
    }
}

impl Motion for Tilt {
    fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Enter(point) | PointerEvent::Move(point) => self.pointer = Some(point),
            PointerEvent::Leave => self.pointer = None,
            PointerEvent::Down | PointerEvent::Up => {}
        }
    }

    fn tick(&mut self, dt: f32) {
        let (x, y) = self.target();
        self.rotate_x.set_target(x);
        self.rotate_y.set_target(y);
        self.rotate_x.step(dt);
        self.rotate_y.step(dt);
    }

    fn style(&self) -> MotionStyle {
        let (rotate_x, rotate_y) = self.rotation();
        MotionStyle {
            rotate_x,
            rotate_y,
            ..MotionStyle::NEUTRAL
        }
    }
}

/// Wrap `content` so it leans toward the pointer
pub fn tilt_card<C>(content: C, config: TiltConfig) -> Wrapped<C, Tilt> {
    Wrapped::new(content, Tilt::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Rect = Rect::new(100.0, 100.0, 200.0, 100.0);

    fn settle(card: &mut Wrapped<&str, Tilt>) {
        for _ in 0..180 {
            card.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn test_center_is_neutral() {
        assert_eq!(tilt_angles(CARD, Point::new(200.0, 150.0), 10.0), (0.0, 0.0));
    }

    #[test]
    fn test_corners_reach_max() {
        let (x, y) = tilt_angles(CARD, Point::new(100.0, 100.0), 10.0);
        assert_eq!((x, y), (10.0, 10.0));

        let (x, y) = tilt_angles(CARD, Point::new(300.0, 200.0), 10.0);
        assert_eq!((x, y), (-10.0, -10.0));

        // Outside the bounds is clamped
        let (_, y) = tilt_angles(CARD, Point::new(-500.0, 150.0), 10.0);
        assert_eq!(y, 10.0);
    }

    #[test]
    fn test_sign_convention() {
        let (_, left) = tilt_angles(CARD, Point::new(150.0, 150.0), 10.0);
        assert!(left > 0.0);
        let (above, _) = tilt_angles(CARD, Point::new(200.0, 120.0), 10.0);
        assert!(above > 0.0);
    }

    #[test]
    fn test_degenerate_bounds() {
        let flat = Rect::new(10.0, 10.0, 0.0, 40.0);
        assert_eq!(tilt_angles(flat, Point::new(0.0, 0.0), 10.0), (0.0, 0.0));
    }

    #[test]
    fn test_hitched_frames_stay_bounded() {
        for dt in [0.5, 1.0, f32::NAN] {
            let mut card = tilt_card("project", TiltConfig::default());
            card.motion_mut().set_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
            card.handle_pointer(PointerEvent::Move(Point::new(0.0, 0.0)));
            card.tick(dt);
            card.tick(1.0 / 60.0);
            let style = card.style();
            for angle in [style.rotate_x, style.rotate_y] {
                assert!(angle.is_finite() && angle.abs() <= 12.0, "dt {dt}: {angle}");
            }
        }
    }

    #[test]
    fn test_card_follows_and_resets() {
        let mut card = tilt_card("project", TiltConfig::default());
        card.motion_mut().set_bounds(CARD);

        card.handle_pointer(PointerEvent::Move(Point::new(100.0, 100.0)));
        assert_eq!(card.style().rotate_y, 0.0);
        settle(&mut card);
        assert!((card.style().rotate_x - 10.0).abs() < 0.01);
        assert!((card.style().rotate_y - 10.0).abs() < 0.01);

        card.handle_pointer(PointerEvent::Leave);
        settle(&mut card);
        let style = card.style();
        assert!(style.rotate_x.abs() < 0.01 && style.rotate_y.abs() < 0.01);
    }
}
