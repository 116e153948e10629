//! Pointer input
//!
//! Input arrives as messages. Handlers record the latest state only; visible
//! effects are applied on the next frame tick.

use crate::geometry::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer position in normalized device coordinates
///
/// `x` runs from -1 (left edge) to 1 (right edge), `y` from -1 (bottom) to 1
/// (top). Values outside the range are clamped on construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec2", into = "Vec2")]
pub struct PointerNdc(Vec2);

impl From<Vec2> for PointerNdc {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<PointerNdc> for Vec2 {
    fn from(pointer: PointerNdc) -> Self {
        pointer.0
    }
}

impl PointerNdc {
    pub const CENTER: PointerNdc = PointerNdc(Vec2::ZERO);

    pub fn new(x: f32, y: f32) -> Self {
        let clamp = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        Self(Vec2::new(clamp(x), clamp(y)))
    }

    /// Convert a window-space pixel position to NDC
    ///
    /// A zero-sized viewport maps every position to the center.
    pub fn from_window(position: Point, width: f32, height: f32) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::CENTER;
        }
        Self::new(
            (position.x / width) * 2.0 - 1.0,
            -(position.y / height) * 2.0 + 1.0,
        )
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    pub fn as_vec2(&self) -> Vec2 {
        self.0
    }
}

/// Element-level pointer messages delivered to motion wrappers
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered the element at a page position
    Enter(Point),
    /// Pointer moved within the element
    Move(Point),
    /// Pointer left the element
    Leave,
    /// Primary button pressed over the element
    Down,
    /// Primary button released
    Up,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_to_ndc() {
        let center = PointerNdc::from_window(Point::new(400.0, 300.0), 800.0, 600.0);
        assert_eq!(center, PointerNdc::CENTER);

        let top_left = PointerNdc::from_window(Point::new(0.0, 0.0), 800.0, 600.0);
        assert_eq!((top_left.x(), top_left.y()), (-1.0, 1.0));

        let degenerate = PointerNdc::from_window(Point::new(5.0, 5.0), 0.0, 600.0);
        assert_eq!(degenerate, PointerNdc::CENTER);
    }

    #[test]
    fn test_clamps_out_of_range() {
        let p = PointerNdc::new(3.0, f32::NAN);
        assert_eq!((p.x(), p.y()), (1.0, 0.0));
    }

    #[test]
    fn test_deserialize_clamps() {
        let p: PointerNdc = serde_json::from_str(r#"{"x": -4.0, "y": 0.25}"#).unwrap();
        assert_eq!((p.x(), p.y()), (-1.0, 0.25));

        let json = serde_json::to_string(&PointerNdc::new(0.5, -0.5)).unwrap();
        assert_eq!(json, r#"{"x":0.5,"y":-0.5}"#);
    }
}
