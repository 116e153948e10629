//! Declarative transitions and the visual style they produce
//!
//! A [`Transition`] describes one property tween (from, to, duration, delay,
//! curve). Hosts with their own interpolation engine can hand these over
//! directly; everything else samples them with [`Transition::value_at`].

use crate::easing::Easing;
use crate::spring::SpringConfig;
use serde::{Deserialize, Serialize};

/// Visual properties a motion wrapper can drive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    Opacity,
    /// Horizontal offset in pixels
    TranslateX,
    /// Vertical offset in pixels (positive is down)
    TranslateY,
    /// Uniform scale factor
    Scale,
    /// Rotation about the horizontal axis in degrees
    RotateX,
    /// Rotation about the vertical axis in degrees
    RotateY,
    /// Horizontal background position in percent
    BackgroundPosition,
}

/// How progress moves from `from` to `to`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Curve {
    /// Fixed-duration tween shaped by an easing function
    Eased(Easing),
    /// Physically based spring; duration is derived from settling time
    Spring(SpringConfig),
}

/// One property tween
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub property: Property,
    pub from: f32,
    pub to: f32,
    /// Duration in seconds (ignored by spring curves)
    pub duration: f32,
    /// Delay in seconds before the tween starts
    pub delay: f32,
    pub curve: Curve,
}

impl Transition {
    /// Eased tween of `property` from `from` to `to`
    pub fn tween(property: Property, from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            property,
            from,
            to,
            duration,
            delay: 0.0,
            curve: Curve::Eased(easing),
        }
    }

    /// Spring-driven move of `property` from `from` to `to`
    pub fn spring(property: Property, from: f32, to: f32, config: SpringConfig) -> Self {
        Self {
            property,
            from,
            to,
            duration: config.settle_time(),
            delay: 0.0,
            curve: Curve::Spring(config),
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Seconds from start until the tween rests at `to`
    pub fn end_time(&self) -> f32 {
        self.delay + self.duration.max(0.0)
    }

    /// Value `t` seconds after the transition was started
    pub fn value_at(&self, t: f32) -> f32 {
        let local = t - self.delay;
        if local <= 0.0 {
            return self.from;
        }
        let progress = match self.curve {
            Curve::Eased(easing) => {
                if self.duration <= 0.0 || local >= self.duration {
                    1.0
                } else {
                    easing.apply(local / self.duration)
                }
            }
            Curve::Spring(config) => {
                if local >= self.duration {
                    1.0
                } else {
                    config.progress_at(local)
                }
            }
        };
        self.from + (self.to - self.from) * progress
    }
}

/// Resolved visual state of a wrapped element for one frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionStyle {
    pub opacity: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
    pub rotate_x: f32,
    pub rotate_y: f32,
    /// `None` when the element has no animated background
    pub background_position: Option<f32>,
}

impl MotionStyle {
    /// Fully visible, untransformed
    pub const NEUTRAL: MotionStyle = MotionStyle {
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
        background_position: None,
    };

    /// Write a single property value
    pub fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::Opacity => self.opacity = value,
            Property::TranslateX => self.translate_x = value,
            Property::TranslateY => self.translate_y = value,
            Property::Scale => self.scale = value,
            Property::RotateX => self.rotate_x = value,
            Property::RotateY => self.rotate_y = value,
            Property::BackgroundPosition => self.background_position = Some(value),
        }
    }

    /// Read a single property value
    pub fn get(&self, property: Property) -> f32 {
        match property {
            Property::Opacity => self.opacity,
            Property::TranslateX => self.translate_x,
            Property::TranslateY => self.translate_y,
            Property::Scale => self.scale,
            Property::RotateX => self.rotate_x,
            Property::RotateY => self.rotate_y,
            Property::BackgroundPosition => self.background_position.unwrap_or(0.0),
        }
    }
}

impl Default for MotionStyle {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_respects_delay() {
        let fade = Transition::tween(Property::Opacity, 0.0, 1.0, 0.8, Easing::Linear).with_delay(0.2);

        assert_eq!(fade.value_at(0.0), 0.0);
        assert_eq!(fade.value_at(0.2), 0.0);
        assert!((fade.value_at(0.6) - 0.5).abs() < 1e-5);
        assert_eq!(fade.value_at(1.0), 1.0);
        assert_eq!(fade.value_at(100.0), 1.0);
        assert!((fade.end_time() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let jump = Transition::tween(Property::Scale, 0.8, 1.0, 0.0, Easing::EaseOut);
        assert_eq!(jump.value_at(0.0), 0.8);
        assert_eq!(jump.value_at(0.001), 1.0);
    }

    #[test]
    fn test_spring_transition_lands_on_target() {
        let rise = Transition::spring(Property::TranslateY, 20.0, 0.0, SpringConfig::letter());
        assert_eq!(rise.value_at(0.0), 20.0);
        assert_eq!(rise.value_at(rise.end_time()), 0.0);
    }

    #[test]
    fn test_style_set_get() {
        let mut style = MotionStyle::NEUTRAL;
        assert_eq!(style.background_position, None);
        style.set(Property::BackgroundPosition, 40.0);
        style.set(Property::RotateY, -3.0);
        assert_eq!(style.get(Property::BackgroundPosition), 40.0);
        assert_eq!(style.rotate_y, -3.0);
    }
}
