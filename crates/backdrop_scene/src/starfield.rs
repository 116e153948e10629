//! Background starfield
//!
//! Stars sit on shells between `radius` and `radius + depth`, with hues
//! spread around the color wheel by index. Only the twinkle clock changes
//! after construction.

use crate::config::StarfieldSpec;
use crate::generators::sphere_shell_point;
use backdrop_core::{Color, Vec3};
use rand::rngs::StdRng;
use rand::RngExt;
use serde::{Deserialize, Serialize};

/// Lightness of every star color
const STAR_LIGHTNESS: f32 = 0.9;

/// A single star
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub position: Vec3,
    pub color: Color,
    pub size: f32,
}

/// Point set on concentric shells with a shared twinkle clock
#[derive(Clone, Debug)]
pub struct Starfield {
    stars: Vec<Star>,
    spec: StarfieldSpec,
    time: f32,
}

impl Starfield {
    pub fn new(spec: &StarfieldSpec, rng: &mut StdRng) -> Self {
        let count = spec.count;
        let step = if count > 0 {
            spec.depth / count as f32
        } else {
            0.0
        };
        let mut r = spec.radius + spec.depth;
        let stars = (0..count)
            .map(|i| {
                r -= step * rng.random_range(0.0..1.0f32);
                let u = rng.random_range(0.0..1.0f32);
                let v = rng.random_range(0.0..1.0f32);
                Star {
                    position: sphere_shell_point(r, u, v),
                    color: Color::from_hsl(i as f32 / count as f32, spec.saturation, STAR_LIGHTNESS),
                    size: (0.5 + 0.5 * rng.random_range(0.0..1.0f32)) * spec.factor,
                }
            })
            .collect();

        Self {
            stars,
            spec: spec.clone(),
            time: 0.0,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn spec(&self) -> &StarfieldSpec {
        &self.spec
    }

    /// Twinkle clock in seconds, scaled by the configured speed
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn tick(&mut self, elapsed: f32) {
        self.time = elapsed * self.spec.speed;
    }

    /// Size multiplier of star `index` at the current twinkle time
    pub fn twinkle(&self, index: usize) -> f32 {
        self.stars
            .get(index)
            .map_or(0.0, |star| 3.0 + (star.position.x + 2.0 * self.time + 100.0).sin())
    }

    /// Alpha at distance `d` from a sprite's center (0 center, 0.5 edge)
    pub fn fade_alpha(&self, d: f32) -> f32 {
        if self.spec.fade {
            1.0 / (1.0 + (16.0 * (d - 0.25)).exp())
        } else {
            1.0
        }
    }
}

/// Serializable view of the starfield for one frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarfieldFrame {
    pub time: f32,
    pub fade: bool,
    pub stars: Vec<Star>,
}

impl From<&Starfield> for StarfieldFrame {
    fn from(starfield: &Starfield) -> Self {
        Self {
            time: starfield.time,
            fade: starfield.spec.fade,
            stars: starfield.stars.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn spec(count: usize) -> StarfieldSpec {
        StarfieldSpec {
            count,
            ..StarfieldSpec::default()
        }
    }

    #[test]
    fn test_stars_within_shell() {
        let spec = spec(500);
        let field = Starfield::new(&spec, &mut StdRng::seed_from_u64(11));
        assert_eq!(field.stars().len(), 500);
        for star in field.stars() {
            let d = star.position.length();
            assert!(d >= spec.radius - 1e-2 && d <= spec.radius + spec.depth + 1e-2);
            assert!(star.size >= 0.5 * spec.factor && star.size <= spec.factor);
        }
    }

    #[test]
    fn test_zero_saturation_is_grey() {
        let field = Starfield::new(&spec(10), &mut StdRng::seed_from_u64(1));
        for star in field.stars() {
            assert!((star.color.r - star.color.g).abs() < 1e-6);
            assert!((star.color.r - 0.9).abs() < 1e-5);
        }
    }

    #[test]
    fn test_tick_scales_time() {
        let mut field = Starfield::new(
            &StarfieldSpec {
                speed: 2.0,
                ..spec(3)
            },
            &mut StdRng::seed_from_u64(1),
        );
        field.tick(1.5);
        assert_eq!(field.time(), 3.0);
        let t = field.twinkle(0);
        assert!((2.0..=4.0).contains(&t));
        assert_eq!(field.twinkle(99), 0.0);
    }

    #[test]
    fn test_fade() {
        let field = Starfield::new(&spec(0), &mut StdRng::seed_from_u64(1));
        assert!(field.stars().is_empty());
        assert!((field.fade_alpha(0.25) - 0.5).abs() < 1e-6);
        assert!(field.fade_alpha(0.0) > 0.95);
        assert!(field.fade_alpha(0.5) < 0.05);
    }
}
