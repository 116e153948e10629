//! Spring physics
//!
//! Two views of the same damped oscillator:
//! - [`Spring`] is stateful and RK4-integrated, used by hover/press/tilt
//!   behaviors whose target changes while in flight.
//! - [`SpringConfig::progress_at`] is the closed-form response from rest,
//!   used to sample declarative spring transitions as a pure function of time.

use serde::{Deserialize, Serialize};

/// Largest interval integrated in one RK4 step
pub const MAX_SUBSTEP: f32 = 1.0 / 120.0;

/// Longest frame a single `step` call simulates; longer hitches are clamped
pub const MAX_FRAME: f32 = 0.1;

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Snappy spring for press/hover feedback on buttons
    pub fn button() -> Self {
        Self::new(400.0, 17.0, 1.0)
    }

    /// Bouncy spring for per-letter text entrances
    pub fn letter() -> Self {
        Self::new(200.0, 12.0, 1.0)
    }

    /// Soft spring for pointer-following tilt
    pub fn tilt() -> Self {
        Self::new(150.0, 18.0, 1.0)
    }

    /// A gentle, slow spring
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Damping ratio (1 = critically damped)
    pub fn damping_ratio(&self) -> f32 {
        let critical = self.critical_damping();
        if critical > 0.0 {
            self.damping / critical
        } else {
            1.0
        }
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    fn natural_frequency(&self) -> f32 {
        if self.mass > 0.0 && self.stiffness > 0.0 {
            (self.stiffness / self.mass).sqrt()
        } else {
            0.0
        }
    }

    /// Normalized progress (0 at rest start, 1 at target) after `t` seconds
    ///
    /// Starts from rest with zero velocity. Underdamped springs overshoot 1
    /// before settling. Degenerate configurations jump straight to 1.
    pub fn progress_at(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        let w0 = self.natural_frequency();
        if w0 <= 0.0 {
            return 1.0;
        }
        let zeta = self.damping_ratio();

        let displacement = if (zeta - 1.0).abs() < 1e-4 {
            -(-w0 * t).exp() * (1.0 + w0 * t)
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * w0 * t).exp();
            -envelope * ((wd * t).cos() + (zeta * w0 / wd) * (wd * t).sin())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            let c1 = r2 / (r1 - r2);
            let c2 = -1.0 - c1;
            c1 * (r1 * t).exp() + c2 * (r2 * t).exp()
        };

        1.0 + displacement
    }

    /// Time after which the response stays within 0.1% of the target
    pub fn settle_time(&self) -> f32 {
        let w0 = self.natural_frequency();
        if w0 <= 0.0 {
            return 0.0;
        }
        let zeta = self.damping_ratio();
        // Slowest decaying mode dominates for overdamped springs
        let decay = if zeta <= 1.0 {
            zeta * w0
        } else {
            w0 * (zeta - (zeta * zeta - 1.0).sqrt())
        };
        if decay <= 0.0 {
            return f32::INFINITY;
        }
        1000.0f32.ln() / decay
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::button()
    }
}

/// A spring-based animator whose target can move mid-flight
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    rest_delta: f32,
    rest_speed: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            rest_delta: 0.001,
            rest_speed: 0.01,
        }
    }

    /// Override the settling thresholds (units of the animated value)
    pub fn with_precision(mut self, rest_delta: f32, rest_speed: f32) -> Self {
        self.rest_delta = rest_delta;
        self.rest_speed = rest_speed;
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to a value with no velocity
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.rest_delta && self.velocity.abs() < self.rest_speed
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// Non-finite or negative `dt` is a no-op. Frames longer than
    /// [`MAX_FRAME`] are clamped, and the rest is integrated in RK4 substeps
    /// of at most [`MAX_SUBSTEP`] so a stiff spring stays stable.
    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(MAX_FRAME);
        let substeps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = dt / substeps as f32;
        for _ in 0..substeps {
            if self.is_settled() {
                self.value = self.target;
                self.velocity = 0.0;
                return;
            }
            self.integrate(h);
        }
    }

    fn integrate(&mut self, dt: f32) {
        let (x, v) = (self.value, self.velocity);
        let half = dt * 0.5;

        let k1_v = self.acceleration(x, v);
        let k1_x = v;

        let k2_v = self.acceleration(x + k1_x * half, v + k1_v * half);
        let k2_x = v + k1_v * half;

        let k3_v = self.acceleration(x + k2_x * half, v + k2_v * half);
        let k3_x = v + k2_v * half;

        let k4_v = self.acceleration(x + k3_x * dt, v + k3_v * dt);
        let k4_x = v + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        if self.config.mass > 0.0 {
            (spring_force + damping_force) / self.config.mass
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_settles_to_target() {
        let mut spring = Spring::new(SpringConfig::button(), 1.0);
        spring.set_target(1.05);

        for _ in 0..120 {
            spring.step(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert!((spring.value() - 1.05).abs() < 0.001);
    }

    #[test]
    fn test_spring_inherits_velocity() {
        let mut spring = Spring::new(SpringConfig::button(), 1.0);
        spring.set_target(1.05);
        for _ in 0..3 {
            spring.step(1.0 / 60.0);
        }

        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        spring.set_target(0.95);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_presets_are_underdamped() {
        assert!(SpringConfig::button().is_underdamped());
        assert!(SpringConfig::letter().is_underdamped());
    }

    #[test]
    fn test_closed_form_matches_integration() {
        let config = SpringConfig::letter();
        let mut spring = Spring::new(config, 0.0);
        spring.set_target(1.0);

        let dt = 1.0 / 240.0;
        for frame in 1..=120 {
            spring.step(dt);
            let expected = config.progress_at(frame as f32 * dt);
            assert!(
                (spring.value() - expected).abs() < 0.01,
                "frame {frame}: {} vs {expected}",
                spring.value()
            );
        }
    }

    #[test]
    fn test_progress_endpoints() {
        for config in [
            SpringConfig::button(),
            SpringConfig::new(100.0, 20.0, 1.0),
            SpringConfig::new(100.0, 60.0, 1.0),
        ] {
            assert_eq!(config.progress_at(0.0), 0.0);
            let settled = config.progress_at(config.settle_time() * 2.0);
            assert!((settled - 1.0).abs() < 0.001, "{config:?}: {settled}");
        }
    }

    #[test]
    fn test_long_frame_stays_bounded() {
        for dt in [0.25, 0.5, 1.0, 10.0] {
            let mut spring = Spring::new(SpringConfig::button(), 1.0);
            spring.set_target(1.05);
            spring.step(dt);
            let v = spring.value();
            assert!(v.is_finite() && (0.9..=1.2).contains(&v), "dt {dt}: {v}");
        }
    }

    #[test]
    fn test_non_finite_step_ignored() {
        let mut spring = Spring::new(SpringConfig::button(), 1.0);
        spring.set_target(1.05);
        spring.step(f32::NAN);
        spring.step(f32::INFINITY);
        assert_eq!(spring.value(), 1.0);
        spring.step(1.0 / 60.0);
        assert!(spring.value().is_finite());
    }

    #[test]
    fn test_underdamped_overshoots() {
        let config = SpringConfig::button();
        let peak = (1..200)
            .map(|i| config.progress_at(i as f32 / 200.0))
            .fold(0.0f32, f32::max);
        assert!(peak > 1.0);
    }
}
