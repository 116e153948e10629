//! Particle systems
//!
//! A system is a fixed set of points created once at build time. `Drift`
//! systems never move their points and only rotate as a whole.
//! `FollowPointer` systems integrate a damped velocity per point every
//! frame, which is the only accumulated state in a scene.

use crate::config::ParticleSpec;
use backdrop_core::{Color, Euler, Vec3};
use rand::rngs::StdRng;
use rand::RngExt;
use serde::{Deserialize, Serialize};

/// Region initial particle positions are drawn from
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SpawnVolume {
    /// Axis-aligned box centered on the origin
    Box { half_extents: Vec3 },
    /// Solid ball centered on the origin
    Sphere { radius: f32 },
}

impl Default for SpawnVolume {
    fn default() -> Self {
        SpawnVolume::Box {
            half_extents: Vec3::splat(10.0),
        }
    }
}

impl SpawnVolume {
    /// Draw a uniformly distributed position
    pub fn sample_position(&self, rng: &mut impl FnMut() -> f32) -> Vec3 {
        match *self {
            SpawnVolume::Box { half_extents } => Vec3::new(
                (rng() - 0.5) * 2.0 * half_extents.x,
                (rng() - 0.5) * 2.0 * half_extents.y,
                (rng() - 0.5) * 2.0 * half_extents.z,
            ),
            SpawnVolume::Sphere { radius } => {
                let theta = rng() * std::f32::consts::TAU;
                let phi = (1.0 - 2.0 * rng()).acos();
                let r = rng().cbrt() * radius;
                Vec3::new(
                    r * phi.sin() * theta.cos(),
                    r * phi.cos(),
                    r * phi.sin() * theta.sin(),
                )
            }
        }
    }
}

/// How a particle system moves
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParticleBehavior {
    /// The whole cloud turns slowly: `y = t * spin_rate`,
    /// `x = sin(t * sway_frequency) * sway_amplitude`
    Drift {
        spin_rate: f32,
        sway_frequency: f32,
        sway_amplitude: f32,
    },
    /// Each point is pulled toward its home shifted by the pointer
    FollowPointer {
        /// Fraction of the remaining distance added to velocity per frame
        attraction: f32,
        /// Velocity multiplier per frame, in (0, 1)
        damping: f32,
        /// Amplitude of the `sin(elapsed + index)` depth wave
        depth_amplitude: f32,
        /// How far the pointer's world position shifts the targets
        reach: f32,
    },
}

impl ParticleBehavior {
    pub const DRIFT: ParticleBehavior = ParticleBehavior::Drift {
        spin_rate: 0.05,
        sway_frequency: 0.03,
        sway_amplitude: 0.1,
    };

    pub const FOLLOW_POINTER: ParticleBehavior = ParticleBehavior::FollowPointer {
        attraction: 0.02,
        damping: 0.95,
        depth_amplitude: 0.5,
        reach: 0.5,
    };
}

impl Default for ParticleBehavior {
    fn default() -> Self {
        Self::DRIFT
    }
}

/// A single point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position the point returns to when the pointer is centered
    pub home: Vec3,
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Color,
}

/// GPU-ready per-particle record
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

/// Fixed-size set of points animated as one object
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    behavior: ParticleBehavior,
    size: f32,
    opacity: f32,
    rotation: Euler,
}

impl ParticleSystem {
    /// Lay out `spec.count` points from the spawn volume
    ///
    /// Colors are picked uniformly from the palette; an empty palette gives
    /// white points.
    pub fn new(spec: &ParticleSpec, rng: &mut StdRng) -> Self {
        let particles = (0..spec.count)
            .map(|_| {
                let home = spec.spawn.sample_position(&mut || rng.random_range(0.0..1.0f32));
                let color = if spec.colors.is_empty() {
                    Color::WHITE
                } else {
                    spec.colors[rng.random_range(0..spec.colors.len())]
                };
                Particle {
                    home,
                    position: home,
                    velocity: Vec3::ZERO,
                    color,
                }
            })
            .collect();

        Self::from_particles(particles, spec.behavior, spec.size, spec.opacity)
    }

    /// Build from explicit particles
    pub fn from_particles(
        particles: Vec<Particle>,
        behavior: ParticleBehavior,
        size: f32,
        opacity: f32,
    ) -> Self {
        Self {
            particles,
            behavior,
            size,
            opacity,
            rotation: Euler::IDENTITY,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn behavior(&self) -> &ParticleBehavior {
        &self.behavior
    }

    /// Point size in world units
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whole-cloud rotation written by the last tick
    pub fn rotation(&self) -> Euler {
        self.rotation
    }

    /// Advance one frame
    ///
    /// `pointer` is the pointer projected into world space, `None` when no
    /// pointer has been seen; targets then sit at the home positions.
    pub fn tick(&mut self, elapsed: f32, pointer: Option<Vec3>) {
        match self.behavior {
            ParticleBehavior::Drift {
                spin_rate,
                sway_frequency,
                sway_amplitude,
            } => {
                self.rotation = Euler::new(
                    (elapsed * sway_frequency).sin() * sway_amplitude,
                    elapsed * spin_rate,
                    0.0,
                );
            }
            ParticleBehavior::FollowPointer {
                attraction,
                damping,
                depth_amplitude,
                reach,
            } => {
                let shift = pointer.unwrap_or(Vec3::ZERO) * reach;
                for (i, particle) in self.particles.iter_mut().enumerate() {
                    let target = Vec3::new(
                        particle.home.x + shift.x,
                        particle.home.y + shift.y,
                        particle.position.z,
                    );
                    particle.velocity += (target - particle.position) * attraction;
                    particle.position += particle.velocity;
                    particle.velocity *= damping;
                    particle.position.z = (elapsed + i as f32).sin() * depth_amplitude;
                }
            }
        }
    }

    /// Pack the current points for upload
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.particles
            .iter()
            .map(|p| ParticleInstance {
                position: p.position.to_array(),
                size: self.size,
                color: p.color.with_alpha(p.color.a * self.opacity).to_array(),
            })
            .collect()
    }
}

/// Serializable view of a particle system for one frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleFrame {
    pub rotation: Euler,
    pub size: f32,
    pub opacity: f32,
    /// Interleaved xyz positions
    pub positions: Vec<f32>,
    /// Interleaved rgb colors
    pub colors: Vec<f32>,
}

impl From<&ParticleSystem> for ParticleFrame {
    fn from(system: &ParticleSystem) -> Self {
        Self {
            rotation: system.rotation,
            size: system.size,
            opacity: system.opacity,
            positions: system
                .particles
                .iter()
                .flat_map(|p| p.position.to_array())
                .collect(),
            colors: system
                .particles
                .iter()
                .flat_map(|p| [p.color.r, p.color.g, p.color.b])
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn follower(attraction: f32, damping: f32) -> ParticleSystem {
        let particles = vec![Particle {
            home: Vec3::new(1.0, -1.0, 0.0),
            position: Vec3::new(8.0, 6.0, 0.0),
            velocity: Vec3::ZERO,
            color: Color::WHITE,
        }];
        ParticleSystem::from_particles(
            particles,
            ParticleBehavior::FollowPointer {
                attraction,
                damping,
                depth_amplitude: 0.5,
                reach: 1.0,
            },
            0.08,
            0.8,
        )
    }

    #[test]
    fn test_velocity_bounded() {
        let mut system = follower(0.02, 0.95);
        let mut max_speed = 0.0f32;
        for frame in 0..10_000 {
            system.tick(frame as f32 / 60.0, Some(Vec3::new(3.0, 2.0, 0.0)));
            max_speed = max_speed.max(system.particles()[0].velocity.length());
        }
        assert!(max_speed.is_finite() && max_speed < 10.0);

        let p = system.particles()[0].position;
        assert!((p.x - 4.0).abs() < 1e-3);
        assert!((p.y - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_bounded_for_strong_attraction() {
        let mut system = follower(1.0, 0.5);
        for frame in 0..1_000 {
            system.tick(frame as f32, Some(Vec3::new(-5.0, 5.0, 0.0)));
            assert!(system.particles()[0].velocity.length() < 100.0);
        }
    }

    #[test]
    fn test_depth_wave() {
        let mut system = follower(0.02, 0.95);
        system.tick(1.0, None);
        let z = system.particles()[0].position.z;
        assert!((z - 1.0f32.sin() * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_drift_rotation() {
        let mut system = ParticleSystem::from_particles(Vec::new(), ParticleBehavior::DRIFT, 0.08, 0.8);
        system.tick(10.0, Some(Vec3::new(1.0, 1.0, 0.0)));
        let r = system.rotation();
        assert!((r.y - 0.5).abs() < 1e-6);
        assert!((r.x - 0.3f32.sin() * 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_seeded_layout_reproducible() {
        let spec = ParticleSpec::default();
        let a = ParticleSystem::new(&spec, &mut StdRng::seed_from_u64(9));
        let b = ParticleSystem::new(&spec, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.len(), spec.count);
    }

    #[test]
    fn test_spawn_within_volume() {
        let mut rng = StdRng::seed_from_u64(3);
        let volume = SpawnVolume::Box {
            half_extents: Vec3::splat(10.0),
        };
        let ball = SpawnVolume::Sphere { radius: 4.0 };
        for _ in 0..500 {
            let p = volume.sample_position(&mut || rng.random_range(0.0..1.0f32));
            assert!(p.x.abs() <= 10.0 && p.y.abs() <= 10.0 && p.z.abs() <= 10.0);
            let q = ball.sample_position(&mut || rng.random_range(0.0..1.0f32));
            assert!(q.length() <= 4.0 + 1e-4);
        }
    }

    #[test]
    fn test_instances_pack() {
        let system = follower(0.02, 0.95);
        let instances = system.instances();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].size, 0.08);
        assert_eq!(instances[0].color[3], 0.8);
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), std::mem::size_of::<ParticleInstance>());
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
    }
}
