//! Infinite ambient loops
//!
//! Neither effect reacts to visibility; both are pure functions of how long
//! they have been mounted.

use crate::easing::Easing;
use crate::motion::{HoverTween, Motion, Wrapped};
use crate::transition::{MotionStyle, Property};
use crate::values::LoopTrack;
use backdrop_core::{Color, PointerEvent};

/// Glow pulse period in seconds
pub const ORB_PERIOD: f32 = 4.0;
/// Border sweep period in seconds
pub const SWEEP_PERIOD: f32 = 5.0;

/// Appearance of a [`GlowingOrb`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowingOrbConfig {
    pub color: Color,
    /// Diameter in pixels
    pub size: f32,
}

impl GlowingOrbConfig {
    pub fn new(color: Color, size: f32) -> Self {
        Self { color, size }
    }

    /// Resolve a color name: `cyan`, `purple`, or any `#rrggbb` literal
    ///
    /// Unrecognized names fall back to cyan.
    pub fn named(color: &str, size: f32) -> Self {
        let color = match color {
            "cyan" => Color::from_hex(0x06b6d4),
            "purple" => Color::from_hex(0x8b5cf6),
            other => Color::parse_hex(other).unwrap_or_else(|| {
                tracing::warn!(color = other, "unknown orb color, using cyan");
                Color::from_hex(0x06b6d4)
            }),
        };
        Self::new(color, size)
    }
}

impl Default for GlowingOrbConfig {
    fn default() -> Self {
        Self::named("cyan", 100.0)
    }
}

/// Blurred orb that breathes in scale and opacity forever
#[derive(Clone, Debug)]
pub struct GlowingOrb {
    config: GlowingOrbConfig,
    scale: LoopTrack<f32>,
    opacity: LoopTrack<f32>,
    elapsed: f32,
}

/// Create a pulsing decorative orb
pub fn glowing_orb(config: GlowingOrbConfig) -> GlowingOrb {
    GlowingOrb {
        config,
        scale: LoopTrack::new(vec![1.0, 1.2, 1.0], ORB_PERIOD, Easing::EaseInOut),
        opacity: LoopTrack::new(vec![0.3, 0.5, 0.3], ORB_PERIOD, Easing::EaseInOut),
        elapsed: 0.0,
    }
}

impl GlowingOrb {
    pub fn config(&self) -> &GlowingOrbConfig {
        &self.config
    }

    /// Style at an arbitrary time since mount
    pub fn style_at(&self, elapsed: f32) -> MotionStyle {
        MotionStyle {
            scale: self.scale.sample(elapsed).unwrap_or(1.0),
            opacity: self.opacity.sample(elapsed).unwrap_or(0.3),
            ..MotionStyle::NEUTRAL
        }
    }
}

impl Motion for GlowingOrb {
    fn tick(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    fn style(&self) -> MotionStyle {
        self.style_at(self.elapsed)
    }
}

/// Card whose gradient border sweeps back and forth forever
#[derive(Clone, Debug)]
pub struct GradientBorder {
    sweep: LoopTrack<f32>,
    hover: HoverTween,
    elapsed: f32,
}

impl GradientBorder {
    pub fn new() -> Self {
        Self {
            sweep: LoopTrack::new(vec![0.0, 100.0, 0.0], SWEEP_PERIOD, Easing::Linear),
            hover: HoverTween::new(0.3, Easing::EaseOut).with(Property::Scale, 1.0, 1.02),
            elapsed: 0.0,
        }
    }

    /// Background position in percent at an arbitrary time since mount
    pub fn position_at(&self, elapsed: f32) -> f32 {
        self.sweep.sample(elapsed).unwrap_or(0.0)
    }
}

impl Default for GradientBorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Motion for GradientBorder {
    fn handle_pointer(&mut self, event: PointerEvent) {
        self.hover.handle_pointer(event);
    }

    fn tick(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
        self.hover.tick(dt);
    }

    fn style(&self) -> MotionStyle {
        let mut style = MotionStyle::NEUTRAL;
        self.hover.apply(&mut style);
        style.background_position = Some(self.position_at(self.elapsed));
        style
    }
}

/// Wrap `content` in an animated gradient border
pub fn gradient_border_card<C>(content: C) -> Wrapped<C, GradientBorder> {
    Wrapped::new(content, GradientBorder::new())
}
