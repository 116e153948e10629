//! Hover and press feedback
//!
//! - `magnetic_button`: spring scale up on hover, down on press
//! - `floating_card`: lift and lean back while hovered

use crate::easing::Easing;
use crate::motion::{HoverTween, Motion, Wrapped};
use crate::spring::{Spring, SpringConfig};
use crate::transition::{MotionStyle, Property};
use backdrop_core::PointerEvent;

/// Scale while hovered
pub const HOVER_SCALE: f32 = 1.05;
/// Scale while pressed
pub const PRESS_SCALE: f32 = 0.95;

/// Spring-scaled hover/press behavior
#[derive(Clone, Debug)]
pub struct Magnetic {
    scale: Spring,
    hovered: bool,
    pressed: bool,
}

impl Magnetic {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            scale: Spring::new(config, 1.0),
            hovered: false,
            pressed: false,
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Scale the spring is heading toward
    pub fn target_scale(&self) -> f32 {
        if self.pressed {
            PRESS_SCALE
        } else if self.hovered {
            HOVER_SCALE
        } else {
            1.0
        }
    }

    pub fn is_at_rest(&self) -> bool {
        self.scale.is_settled()
    }
}

impl Default for Magnetic {
    fn default() -> Self {
        Self::new(SpringConfig::button())
    }
}

impl Motion for Magnetic {
    fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Enter(_) | PointerEvent::Move(_) => self.hovered = true,
            PointerEvent::Leave => {
                self.hovered = false;
                self.pressed = false;
            }
            PointerEvent::Down => self.pressed = true,
            PointerEvent::Up => self.pressed = false,
        }
    }

    fn tick(&mut self, dt: f32) {
        self.scale.set_target(self.target_scale());
        self.scale.step(dt);
    }

    fn style(&self) -> MotionStyle {
        MotionStyle {
            scale: self.scale.value(),
            ..MotionStyle::NEUTRAL
        }
    }
}

/// Wrap `content` with magnetic hover/press scaling
pub fn magnetic_button<C>(content: C) -> Wrapped<C, Magnetic> {
    Wrapped::new(content, Magnetic::default())
}

/// Lift `content` 10px and tilt it 5° on both axes while hovered
pub fn floating_card<C>(content: C) -> Wrapped<C, HoverTween> {
    Wrapped::new(
        content,
        HoverTween::new(0.3, Easing::EaseOut)
            .with(Property::TranslateY, 0.0, -10.0)
            .with(Property::RotateX, 0.0, 5.0)
            .with(Property::RotateY, 0.0, 5.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::Point;

    fn run(motion: &mut impl Motion, seconds: f32) {
        let frames = (seconds * 60.0) as usize;
        for _ in 0..frames {
            motion.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn test_hover_then_press_then_leave() {
        let mut button = magnetic_button("Contact");

        button.handle_pointer(PointerEvent::Enter(Point::new(4.0, 4.0)));
        run(&mut button, 1.0);
        assert!((button.style().scale - HOVER_SCALE).abs() < 0.001);

        button.handle_pointer(PointerEvent::Down);
        run(&mut button, 1.0);
        assert!((button.style().scale - PRESS_SCALE).abs() < 0.001);

        button.handle_pointer(PointerEvent::Up);
        assert_eq!(button.motion().target_scale(), HOVER_SCALE);

        button.handle_pointer(PointerEvent::Leave);
        run(&mut button, 1.0);
        assert!((button.style().scale - 1.0).abs() < 0.001);
        assert!(button.motion().is_at_rest());
    }

    #[test]
    fn test_spring_not_linear() {
        let mut button = magnetic_button(());
        button.handle_pointer(PointerEvent::Enter(Point::ZERO));

        // An underdamped spring overshoots before settling
        let mut peak = 1.0f32;
        for _ in 0..60 {
            button.tick(1.0 / 120.0);
            peak = peak.max(button.style().scale);
        }
        assert!(peak > HOVER_SCALE);
    }

    #[test]
    fn test_hitched_frames_stay_bounded() {
        for dt in [0.5, 1.0, f32::NAN] {
            let mut button = magnetic_button(());
            button.handle_pointer(PointerEvent::Enter(Point::ZERO));
            button.tick(dt);
            button.tick(1.0 / 60.0);
            let scale = button.style().scale;
            assert!(scale.is_finite() && (0.9..=1.15).contains(&scale), "dt {dt}: {scale}");
        }
    }

    #[test]
    fn test_input_applies_on_tick() {
        let mut button = magnetic_button(());
        button.handle_pointer(PointerEvent::Enter(Point::ZERO));
        assert_eq!(button.style().scale, 1.0);
    }

    #[test]
    fn test_floating_card() {
        let mut card = floating_card("project");
        card.handle_pointer(PointerEvent::Enter(Point::ZERO));
        card.tick(0.3);
        let style = card.style();
        assert_eq!(style.translate_y, -10.0);
        assert_eq!((style.rotate_x, style.rotate_y), (5.0, 5.0));
    }
}
