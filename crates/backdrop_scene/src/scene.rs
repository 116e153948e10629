//! Scene construction and the per-frame tick

use crate::animator::{Animator, FloatMotion, ObjectBase, Orbit, Pulse, RotationRule};
use crate::config::{FloatSpec, HelixSpec, SceneConfig, ShapeSpec};
use crate::error::Result;
use crate::generators::helix_point;
use crate::geometry::Geometry;
use crate::lights::{Camera, Light};
use crate::material::{MaterialLayer, Shading};
use crate::object::{ObjectFrame, SceneObject};
use crate::particles::{ParticleFrame, ParticleSystem};
use crate::starfield::{Starfield, StarfieldFrame};
use backdrop_core::{resolve_seed, Color, Euler, PointerNdc, Vec3};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Built scene, ticked once per rendered frame
#[derive(Clone, Debug)]
pub struct Scene {
    objects: Vec<SceneObject>,
    particle_systems: Vec<ParticleSystem>,
    starfield: Option<Starfield>,
    lights: Vec<Light>,
    camera: Camera,
    seed: u64,
    elapsed: f32,
    frame: u64,
}

/// Validate `config` and instantiate every enabled group
pub fn build_scene(config: &SceneConfig) -> Result<Scene> {
    config.validate()?;

    let seed = resolve_seed(config.seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let particle_systems: Vec<ParticleSystem> = config
        .particles
        .iter()
        .map(|spec| ParticleSystem::new(spec, &mut rng))
        .collect();
    let starfield = config
        .starfield
        .enabled
        .then(|| Starfield::new(&config.starfield, &mut rng));

    let mut builder = ObjectBuilder {
        objects: Vec::with_capacity(config.object_count()),
        rng: &mut rng,
    };
    builder.cubes(&config.cubes);
    builder.polyhedra(&config.polyhedra);
    builder.crystals(&config.crystals);
    builder.orbs(config);
    builder.orbiting_rings(config);
    builder.floating_rings(&config.floating_rings);
    if config.helix.enabled {
        builder.helix(config);
    }
    if config.grid.enabled {
        builder.grid(config);
    }
    if config.beams.enabled {
        builder.beams(config);
    }
    let objects = builder.objects;

    tracing::info!(
        seed,
        objects = objects.len(),
        particle_systems = particle_systems.len(),
        particles = particle_systems.iter().map(ParticleSystem::len).sum::<usize>(),
        stars = starfield.as_ref().map_or(0, |s| s.stars().len()),
        "scene built"
    );

    let mut scene = Scene {
        objects,
        particle_systems,
        starfield,
        lights: config.lights.clone(),
        camera: config.camera,
        seed,
        elapsed: 0.0,
        frame: 0,
    };
    for object in &mut scene.objects {
        object.tick(0.0);
    }
    Ok(scene)
}

impl Scene {
    /// Advance to `elapsed` seconds since mount
    ///
    /// Object transforms are recomputed from `elapsed` alone, so repeating
    /// a time leaves them untouched. Pointer-following particles step their
    /// velocities once per call regardless of `elapsed`.
    pub fn tick(&mut self, elapsed: f32, pointer: Option<PointerNdc>) {
        if !elapsed.is_finite() {
            tracing::warn!(elapsed, "ignoring tick with non-finite time");
            return;
        }
        self.elapsed = elapsed;
        self.frame += 1;

        for object in &mut self.objects {
            object.tick(elapsed);
        }

        let pointer_world = pointer.map(|p| self.camera.unproject(p, 0.0));
        for system in &mut self.particle_systems {
            system.tick(elapsed, pointer_world);
        }

        if let Some(starfield) = &mut self.starfield {
            starfield.tick(elapsed);
        }

        tracing::trace!(frame = self.frame, elapsed, "scene ticked");
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Retained handles; anything written here is overwritten by the next tick
    pub fn objects_mut(&mut self) -> &mut [SceneObject] {
        &mut self.objects
    }

    pub fn particle_systems(&self) -> &[ParticleSystem] {
        &self.particle_systems
    }

    pub fn starfield(&self) -> Option<&Starfield> {
        self.starfield.as_ref()
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Match the camera to a resized viewport
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
    }

    /// Seed the random layout was drawn from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Time passed to the last tick
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Ticks since the scene was built
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Snapshot of everything a renderer needs for this frame
    pub fn frame(&self) -> FrameSnapshot {
        FrameSnapshot {
            elapsed: self.elapsed,
            camera: self.camera,
            lights: self.lights.clone(),
            objects: self.objects.iter().map(ObjectFrame::from).collect(),
            particles: self.particle_systems.iter().map(ParticleFrame::from).collect(),
            starfield: self.starfield.as_ref().map(StarfieldFrame::from),
        }
    }
}

/// Serializable description of one frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub elapsed: f32,
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub objects: Vec<ObjectFrame>,
    pub particles: Vec<ParticleFrame>,
    pub starfield: Option<StarfieldFrame>,
}

impl FrameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

struct ObjectBuilder<'a> {
    objects: Vec<SceneObject>,
    rng: &'a mut StdRng,
}

impl ObjectBuilder<'_> {
    fn float(&mut self, spec: FloatSpec) -> FloatMotion {
        FloatMotion {
            speed: spec.speed,
            rotation_intensity: spec.rotation_intensity,
            float_intensity: spec.float_intensity,
            phase: self.rng.random_range(0.0..100.0f32),
        }
    }

    fn push(&mut self, object: SceneObject, float: Option<FloatSpec>) {
        let object = match float {
            Some(spec) => {
                let motion = self.float(spec);
                object.with_float(motion)
            }
            None => object,
        };
        self.objects.push(object);
    }

    fn base(shape: &ShapeSpec) -> ObjectBase {
        ObjectBase {
            position: shape.position,
            size: shape.size,
            color: shape.color,
            speed: shape.speed,
        }
    }

    fn cubes(&mut self, shapes: &[ShapeSpec]) {
        for shape in shapes {
            let object = SceneObject::new(Geometry::cube(shape.size), Self::base(shape))
                .with_layer(MaterialLayer::solid(shape.color, 0.1))
                .with_layer(MaterialLayer::wireframe(shape.color, 0.6))
                .with_animator(Animator::new(RotationRule::spin(Vec3::new(0.3, 0.5, 0.0))));
            self.push(object, shape.float);
        }
    }

    fn polyhedra(&mut self, shapes: &[ShapeSpec]) {
        for shape in shapes {
            let object = SceneObject::new(Geometry::icosahedron(shape.size), Self::base(shape))
                .with_layer(MaterialLayer::solid(shape.color, 0.15))
                .with_layer(MaterialLayer::wireframe(shape.color, 0.5))
                .with_animator(Animator::new(RotationRule::spin(Vec3::new(0.2, 0.0, 0.3))));
            self.push(object, shape.float);
        }
    }

    fn crystals(&mut self, shapes: &[ShapeSpec]) {
        for shape in shapes {
            let object = SceneObject::new(
                Geometry::cone(shape.size * 0.5, shape.size * 1.5),
                Self::base(shape),
            )
            .with_layer(MaterialLayer::solid(shape.color, 0.2))
            .with_layer(MaterialLayer::wireframe(shape.color, 0.6))
            .with_animator(Animator::new(RotationRule::Wobble {
                base: Euler::IDENTITY,
                amplitude: Vec3::new(0.0, 0.0, 0.2),
                frequency: 0.7,
                rates: Vec3::new(0.0, 0.6, 0.0),
            }));
            self.push(object, shape.float);
        }
    }

    fn orbs(&mut self, config: &SceneConfig) {
        for orb in &config.orbs {
            let base = ObjectBase {
                position: orb.position,
                size: orb.size,
                color: orb.color,
                speed: 1.0,
            };
            let layer = MaterialLayer::basic(orb.color, orb.opacity).with_shading(Shading::Distort {
                distort: orb.distort,
                speed: orb.distort_speed,
                roughness: orb.roughness,
                metalness: orb.metalness,
            });
            let object = SceneObject::new(Geometry::sphere(orb.size, orb.segments), base)
                .with_layer(layer)
                .with_animator(Animator::new(RotationRule::spin(orb.spin)));
            self.push(object, orb.float);
        }
    }

    fn orbiting_rings(&mut self, config: &SceneConfig) {
        for ring in &config.orbiting_rings {
            let base = ObjectBase {
                position: Vec3::ZERO,
                size: ring.radius,
                color: ring.color,
                speed: 1.0,
            };
            let object = SceneObject::new(Geometry::torus(ring.radius, ring.tube), base)
                .with_layer(MaterialLayer::basic(ring.color, ring.opacity))
                .with_animator(Animator::new(RotationRule::Spin {
                    base: ring.base_rotation,
                    rates: ring.rates,
                }));
            self.push(object, None);
        }
    }

    fn floating_rings(&mut self, shapes: &[ShapeSpec]) {
        for shape in shapes {
            let geometry = Geometry::Torus {
                radius: shape.size,
                tube: shape.size * 0.05,
                radial_segments: 16,
                tubular_segments: 64,
            };
            let object = SceneObject::new(geometry, Self::base(shape))
                .with_layer(MaterialLayer::basic(shape.color, 0.6))
                .with_animator(Animator::new(RotationRule::Wobble {
                    base: Euler::new(FRAC_PI_2, 0.0, 0.0),
                    amplitude: Vec3::new(0.3, 0.0, 0.0),
                    frequency: 0.5,
                    rates: Vec3::new(0.0, 0.0, 0.5),
                }));
            self.push(object, shape.float);
        }
    }

    fn helix(&mut self, config: &SceneConfig) {
        let helix = &config.helix;
        let orbit = Orbit {
            center: helix.position,
            rate: helix.spin_rate,
        };

        for (strand, color) in helix.colors.iter().enumerate() {
            for i in 0..helix.count {
                let local = strand_point(helix, strand, i);
                let base = ObjectBase {
                    position: helix.position + local,
                    size: helix.node_size,
                    color: *color,
                    speed: 1.0,
                };
                let pulse = Pulse::new(2.0, 0.4).with_phase(i as f32 * 0.3);
                let object = SceneObject::new(Geometry::sphere(helix.node_size, 8), base)
                    .with_layer(MaterialLayer::basic(*color, 0.9))
                    .with_animator(Animator::default().with_orbit(orbit).with_pulse(pulse));
                self.push(object, None);
            }
        }

        if helix.rung_every == 0 {
            return;
        }
        for i in (0..helix.count).step_by(helix.rung_every) {
            let base = ObjectBase {
                position: helix.position,
                size: helix.radius,
                color: helix.colors[0],
                speed: 1.0,
            };
            let geometry = Geometry::LineSegment {
                start: strand_point(helix, 0, i),
                end: strand_point(helix, 1, i),
            };
            let tint = Color::lerp(&helix.colors[0], &helix.colors[1], 0.5);
            let object = SceneObject::new(geometry, base)
                .with_layer(MaterialLayer::basic(tint, 0.35))
                .with_animator(Animator::new(RotationRule::spin(Vec3::new(0.0, helix.spin_rate, 0.0))));
            self.push(object, None);
        }
    }

    fn grid(&mut self, config: &SceneConfig) {
        let grid = &config.grid;
        let base = ObjectBase {
            position: grid.position,
            size: grid.size,
            color: grid.color,
            speed: 1.0,
        };
        let mut animator = Animator::default();
        if grid.pulse_frequency != 0.0 {
            animator = animator.with_pulse(Pulse::new(grid.pulse_frequency, 0.5));
        }
        let geometry = Geometry::Grid {
            size: grid.size,
            divisions: grid.divisions as u32,
        };
        let object = SceneObject::new(geometry, base)
            .with_layer(MaterialLayer::basic(grid.color, grid.opacity))
            .with_animator(animator);
        self.push(object, None);
    }

    fn beams(&mut self, config: &SceneConfig) {
        let beams = &config.beams;
        for (i, endpoint) in beams.endpoints.iter().enumerate() {
            let base = ObjectBase {
                position: Vec3::ZERO,
                size: 1.0,
                color: beams.color,
                speed: 1.0,
            };
            let geometry = Geometry::LineSegment {
                start: *endpoint,
                end: beams.center,
            };
            let pulse = Pulse::new(beams.pulse_frequency, 0.2).with_phase(i as f32 * 0.7);
            let object = SceneObject::new(geometry, base)
                .with_layer(MaterialLayer::basic(beams.color, beams.opacity))
                .with_animator(Animator::default().with_pulse(pulse));
            self.push(object, None);
        }
    }
}

/// Node `i` of a helix strand relative to the helix center
fn strand_point(helix: &HelixSpec, strand: usize, i: usize) -> Vec3 {
    let p = helix_point(i, helix.count, helix.turns, helix.radius, helix.height);
    if strand == 0 {
        p
    } else {
        Vec3::new(-p.x, p.y, -p.z)
    }
}
