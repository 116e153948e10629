//! Per-object animation rules
//!
//! Everything here is a pure function of time. An object's animator is
//! sampled at `elapsed * speed`; the float modifier is sampled at raw
//! elapsed time so objects with different speeds still bob at one rate.

use backdrop_core::{Color, Euler, Vec3};
use serde::{Deserialize, Serialize};

/// Rotation after `t` seconds of spinning at `rates` radians per second
pub fn compute_rotation(t: f32, rates: Vec3) -> Euler {
    Euler::new(t * rates.x, t * rates.y, t * rates.z)
}

/// Static attributes an animator works from
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectBase {
    pub position: Vec3,
    pub size: f32,
    pub color: Color,
    /// Multiplier applied to elapsed time before sampling the animator
    pub speed: f32,
}

/// Output of an animator for one instant
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub rotation: Euler,
    /// Added to the base position
    pub offset: Vec3,
    /// Multiplies every layer's opacity
    pub opacity: f32,
    pub color: Color,
}

/// How an object turns
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RotationRule {
    /// Holds a fixed orientation
    Fixed { rotation: Euler },
    /// Linear spin on top of a base orientation
    Spin { base: Euler, rates: Vec3 },
    /// Sinusoidal rock around `base` plus an optional linear spin
    Wobble {
        base: Euler,
        amplitude: Vec3,
        frequency: f32,
        rates: Vec3,
    },
}

impl RotationRule {
    pub fn spin(rates: Vec3) -> Self {
        RotationRule::Spin {
            base: Euler::IDENTITY,
            rates,
        }
    }

    pub fn sample(&self, t: f32) -> Euler {
        match *self {
            RotationRule::Fixed { rotation } => rotation,
            RotationRule::Spin { base, rates } => base.compose(compute_rotation(t, rates)),
            RotationRule::Wobble {
                base,
                amplitude,
                frequency,
                rates,
            } => {
                let rock = (t * frequency).sin();
                base.compose(Euler::new(amplitude.x * rock, amplitude.y * rock, amplitude.z * rock))
                    .compose(compute_rotation(t, rates))
            }
        }
    }
}

impl Default for RotationRule {
    fn default() -> Self {
        RotationRule::Fixed {
            rotation: Euler::IDENTITY,
        }
    }
}

/// Circular path around a vertical axis through `center`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    pub center: Vec3,
    /// Radians per second
    pub rate: f32,
}

impl Orbit {
    /// Offset that carries `position` to where the orbit has moved it by `t`
    pub fn offset(&self, position: Vec3, t: f32) -> Vec3 {
        let local = position - self.center;
        let (sin, cos) = (t * self.rate).sin_cos();
        let rotated = Vec3::new(
            local.x * cos + local.z * sin,
            local.y,
            -local.x * sin + local.z * cos,
        );
        rotated - local
    }
}

/// Sinusoidal opacity (and optionally color) modulation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    /// Radians per second
    pub frequency: f32,
    pub phase: f32,
    /// Opacity multiplier at the trough; the crest is always 1
    pub min_opacity: f32,
    /// Color reached at the crest
    pub tint: Option<Color>,
}

impl Pulse {
    pub fn new(frequency: f32, min_opacity: f32) -> Self {
        Self {
            frequency,
            phase: 0.0,
            min_opacity,
            tint: None,
        }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = Some(tint);
        self
    }

    /// Wave position in [0, 1]
    pub fn level(&self, t: f32) -> f32 {
        0.5 + 0.5 * (t * self.frequency + self.phase).sin()
    }
}

/// Complete animation rule of a scene object
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Animator {
    pub rotation: RotationRule,
    pub orbit: Option<Orbit>,
    pub pulse: Option<Pulse>,
}

impl Animator {
    pub fn new(rotation: RotationRule) -> Self {
        Self {
            rotation,
            orbit: None,
            pulse: None,
        }
    }

    pub fn with_orbit(mut self, orbit: Orbit) -> Self {
        self.orbit = Some(orbit);
        self
    }

    pub fn with_pulse(mut self, pulse: Pulse) -> Self {
        self.pulse = Some(pulse);
        self
    }

    /// Pose at animation time `t` (already multiplied by the object's speed)
    pub fn sample(&self, t: f32, base: &ObjectBase) -> Pose {
        let offset = match self.orbit {
            Some(orbit) => orbit.offset(base.position, t),
            None => Vec3::ZERO,
        };
        let (opacity, color) = match self.pulse {
            Some(pulse) => {
                let level = pulse.level(t);
                let opacity = pulse.min_opacity + (1.0 - pulse.min_opacity) * level;
                let color = match pulse.tint {
                    Some(tint) => Color::lerp(&base.color, &tint, level),
                    None => base.color,
                };
                (opacity, color)
            }
            None => (1.0, base.color),
        };
        Pose {
            rotation: self.rotation.sample(t),
            offset,
            opacity,
            color,
        }
    }
}

/// Gentle bob and sway layered on top of an object's own animation
///
/// `phase` desynchronizes objects that share the same settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatMotion {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    pub phase: f32,
}

impl Default for FloatMotion {
    fn default() -> Self {
        Self {
            speed: 1.0,
            rotation_intensity: 1.0,
            float_intensity: 1.0,
            phase: 0.0,
        }
    }
}

impl FloatMotion {
    /// Sway rotation and vertical offset at `elapsed` seconds
    pub fn sample(&self, elapsed: f32) -> (Euler, Vec3) {
        let angle = (self.phase + elapsed) / 4.0 * self.speed;
        let (sin, cos) = angle.sin_cos();
        let rotation = Euler::new(
            cos / 8.0 * self.rotation_intensity,
            sin / 8.0 * self.rotation_intensity,
            sin / 20.0 * self.rotation_intensity,
        );
        (rotation, Vec3::new(0.0, sin / 10.0 * self.float_intensity, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn base() -> ObjectBase {
        ObjectBase {
            position: Vec3::new(2.0, 0.0, 0.0),
            size: 1.0,
            color: Color::NEON_CYAN,
            speed: 1.0,
        }
    }

    #[test]
    fn test_rotation_deterministic() {
        let rates = Vec3::new(0.3, 0.5, 0.0);
        assert_eq!(compute_rotation(12.5, rates), compute_rotation(12.5, rates));
        assert_eq!(compute_rotation(2.0, rates), Euler::new(0.6, 1.0, 0.0));
    }

    #[test]
    fn test_wobble() {
        let ring = RotationRule::Wobble {
            base: Euler::new(FRAC_PI_2, 0.0, 0.0),
            amplitude: Vec3::new(0.3, 0.0, 0.0),
            frequency: 0.5,
            rates: Vec3::new(0.0, 0.0, 0.5),
        };
        assert_eq!(ring.sample(0.0), Euler::new(FRAC_PI_2, 0.0, 0.0));
        let r = ring.sample(PI);
        assert!((r.x - (FRAC_PI_2 + 0.3)).abs() < 1e-5);
        assert!((r.z - PI * 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_orbit_quarter_turn() {
        let orbit = Orbit {
            center: Vec3::ZERO,
            rate: FRAC_PI_2,
        };
        let moved = Vec3::new(2.0, 0.0, 0.0) + orbit.offset(Vec3::new(2.0, 0.0, 0.0), 1.0);
        assert!(moved.x.abs() < 1e-5);
        assert!((moved.z + 2.0).abs() < 1e-5);
        assert_eq!(orbit.offset(Vec3::new(2.0, 0.0, 0.0), 0.0), Vec3::ZERO);
    }

    #[test]
    fn test_pulse_bounds() {
        let animator = Animator::default().with_pulse(Pulse::new(3.0, 0.2).with_tint(Color::NEON_MAGENTA));
        for i in 0..100 {
            let pose = animator.sample(i as f32 * 0.1, &base());
            assert!(pose.opacity >= 0.2 - 1e-6 && pose.opacity <= 1.0 + 1e-6);
        }
        let crest = animator.sample(PI / 6.0, &base());
        assert!((crest.opacity - 1.0).abs() < 1e-5);
        assert!((crest.color.r - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_pulse_keeps_base() {
        let pose = Animator::new(RotationRule::spin(Vec3::new(0.2, 0.3, 0.0))).sample(4.0, &base());
        assert_eq!(pose.opacity, 1.0);
        assert_eq!(pose.color, Color::NEON_CYAN);
        assert_eq!(pose.offset, Vec3::ZERO);
    }

    #[test]
    fn test_float_range() {
        let float = FloatMotion {
            speed: 2.0,
            rotation_intensity: 0.5,
            float_intensity: 1.0,
            phase: 0.0,
        };
        for i in 0..200 {
            let (rotation, offset) = float.sample(i as f32 * 0.05);
            assert!(offset.y.abs() <= 0.1 + 1e-6);
            assert!(rotation.x.abs() <= 0.5 / 8.0 + 1e-6);
        }
        let (rotation, offset) = float.sample(0.0);
        assert_eq!(offset.y, 0.0);
        assert!((rotation.x - 0.5 / 8.0).abs() < 1e-6);
    }
}
