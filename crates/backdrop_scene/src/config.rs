//! Scene configuration and presets
//!
//! A [`SceneConfig`] lists which decorative groups to build and where every
//! object goes. Any field missing from a TOML document is taken from the
//! `cyber` preset, and tables inside a group fill from that group's own
//! defaults.

use crate::error::{Result, SceneError};
use crate::lights::{Camera, Light};
use crate::particles::{ParticleBehavior, SpawnVolume};
use backdrop_core::{Color, Euler, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Most objects a single group may hold
pub const MAX_GROUP_OBJECTS: usize = 64;
/// Most points a particle system may hold
pub const MAX_PARTICLES: usize = 100_000;
/// Most stars a starfield may hold
pub const MAX_STARS: usize = 200_000;
/// Most nodes per helix strand
pub const MAX_HELIX_NODES: usize = 512;
/// Most grid divisions
pub const MAX_GRID_DIVISIONS: usize = 1_000;

/// Gentle bob and sway settings for a floating object
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatSpec {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

impl Default for FloatSpec {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl FloatSpec {
    pub const fn new(speed: f32, rotation_intensity: f32, float_intensity: f32) -> Self {
        Self {
            speed,
            rotation_intensity,
            float_intensity,
        }
    }
}

/// Placement of one cube, polyhedron, crystal or floating ring
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeSpec {
    pub position: Vec3,
    pub size: f32,
    pub color: Color,
    /// Animation speed multiplier
    pub speed: f32,
    pub float: Option<FloatSpec>,
}

impl Default for ShapeSpec {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            size: 1.0,
            color: Color::NEON_CYAN,
            speed: 1.0,
            float: None,
        }
    }
}

impl ShapeSpec {
    pub fn new(position: [f32; 3], size: f32, color: Color, speed: f32) -> Self {
        Self {
            position: position.into(),
            size,
            color,
            speed,
            float: None,
        }
    }

    pub fn floating(mut self, float: FloatSpec) -> Self {
        self.float = Some(float);
        self
    }
}

/// A glowing, distorting sphere
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbSpec {
    pub position: Vec3,
    pub size: f32,
    pub color: Color,
    pub opacity: f32,
    pub segments: u32,
    pub distort: f32,
    pub distort_speed: f32,
    pub roughness: f32,
    pub metalness: f32,
    /// Spin rates in radians per second
    pub spin: Vec3,
    pub float: Option<FloatSpec>,
}

impl Default for OrbSpec {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -5.0),
            size: 2.0,
            color: Color::NEON_CYAN,
            opacity: 0.3,
            segments: 64,
            distort: 0.4,
            distort_speed: 2.0,
            roughness: 0.1,
            metalness: 0.8,
            spin: Vec3::new(0.2, 0.3, 0.0),
            float: Some(FloatSpec::new(3.0, 0.2, 1.0)),
        }
    }
}

/// Thin ring centered on the origin that spins in place
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitRingSpec {
    pub radius: f32,
    pub tube: f32,
    pub color: Color,
    pub opacity: f32,
    pub base_rotation: Euler,
    /// Spin rates in radians per second
    pub rates: Vec3,
}

impl Default for OrbitRingSpec {
    fn default() -> Self {
        Self {
            radius: 3.0,
            tube: 0.02,
            color: Color::NEON_CYAN,
            opacity: 0.4,
            base_rotation: Euler::IDENTITY,
            rates: Vec3::new(0.0, 0.0, 0.3),
        }
    }
}

/// Double helix of small nodes joined by rungs
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelixSpec {
    pub enabled: bool,
    /// Center of the helix
    pub position: Vec3,
    /// Nodes per strand
    pub count: usize,
    pub turns: f32,
    pub radius: f32,
    pub height: f32,
    pub node_size: f32,
    pub colors: [Color; 2],
    /// Spin around the vertical axis in radians per second
    pub spin_rate: f32,
    /// Draw a rung between the strands every this many nodes; 0 for none
    pub rung_every: usize,
}

impl Default for HelixSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            position: Vec3::new(0.0, 0.0, -4.0),
            count: 40,
            turns: 3.0,
            radius: 1.5,
            height: 8.0,
            node_size: 0.08,
            colors: [Color::NEON_CYAN, Color::NEON_MAGENTA],
            spin_rate: 0.3,
            rung_every: 4,
        }
    }
}

/// Line grid floor
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub enabled: bool,
    pub position: Vec3,
    pub size: f32,
    pub divisions: usize,
    pub color: Color,
    pub opacity: f32,
    /// Opacity pulse frequency in radians per second; 0 holds steady
    pub pulse_frequency: f32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            position: Vec3::new(0.0, -4.0, 0.0),
            size: 40.0,
            divisions: 40,
            color: Color::NEON_CYAN,
            opacity: 0.15,
            pulse_frequency: 0.5,
        }
    }
}

/// Pulsing lines from fixed points to a shared center
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamSpec {
    pub enabled: bool,
    pub center: Vec3,
    pub endpoints: Vec<Vec3>,
    pub color: Color,
    pub opacity: f32,
    /// Radians per second
    pub pulse_frequency: f32,
}

impl Default for BeamSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            center: Vec3::new(0.0, 0.0, -5.0),
            endpoints: Vec::new(),
            color: Color::NEON_CYAN,
            opacity: 0.3,
            pulse_frequency: 2.0,
        }
    }
}

/// One particle system
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSpec {
    pub count: usize,
    pub spawn: SpawnVolume,
    /// Palette each point picks from uniformly
    pub colors: Vec<Color>,
    pub size: f32,
    pub opacity: f32,
    pub behavior: ParticleBehavior,
}

impl Default for ParticleSpec {
    fn default() -> Self {
        Self {
            count: 150,
            spawn: SpawnVolume::default(),
            colors: vec![Color::rgb(0.0, 0.96, 1.0), Color::NEON_MAGENTA],
            size: 0.08,
            opacity: 0.8,
            behavior: ParticleBehavior::DRIFT,
        }
    }
}

/// Background stars
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldSpec {
    pub enabled: bool,
    /// Inner shell radius
    pub radius: f32,
    /// Distance from the inner to the outer shell
    pub depth: f32,
    pub count: usize,
    /// Size multiplier
    pub factor: f32,
    pub saturation: f32,
    /// Soften sprite edges
    pub fade: bool,
    /// Twinkle speed
    pub speed: f32,
}

impl Default for StarfieldSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 100.0,
            depth: 50.0,
            count: 3000,
            factor: 4.0,
            saturation: 0.0,
            fade: true,
            speed: 1.0,
        }
    }
}

/// Everything needed to build a scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for the random initial layout; a fresh seed is drawn when unset
    pub seed: Option<u64>,
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub cubes: Vec<ShapeSpec>,
    pub polyhedra: Vec<ShapeSpec>,
    pub crystals: Vec<ShapeSpec>,
    pub orbs: Vec<OrbSpec>,
    pub orbiting_rings: Vec<OrbitRingSpec>,
    pub floating_rings: Vec<ShapeSpec>,
    pub helix: HelixSpec,
    pub grid: GridSpec,
    pub beams: BeamSpec,
    pub particles: Vec<ParticleSpec>,
    pub starfield: StarfieldSpec,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::cyber()
    }
}

impl SceneConfig {
    /// Neon hero background: wireframe cubes and polyhedra around a
    /// distorting orb, orbiting rings, a drifting particle cloud and stars
    pub fn cyber() -> Self {
        let cube_float = FloatSpec::new(2.0, 0.5, 1.0);
        let poly_float = FloatSpec::new(1.5, 0.3, 0.8);
        let ring_float = FloatSpec::new(2.0, 1.0, 0.5);

        Self {
            seed: None,
            camera: Camera::default(),
            lights: vec![
                Light::ambient(0.2),
                Light::point(Vec3::splat(10.0), Color::NEON_CYAN, 1.0),
                Light::point(Vec3::splat(-10.0), Color::NEON_MAGENTA, 0.5),
                Light::spot(Vec3::new(0.0, 10.0, 0.0), Color::WHITE, 0.5, 0.5),
            ],
            cubes: vec![
                ShapeSpec::new([-6.0, 2.0, -3.0], 1.5, Color::NEON_CYAN, 0.5).floating(cube_float),
                ShapeSpec::new([7.0, -1.0, -4.0], 1.0, Color::NEON_MAGENTA, 0.7).floating(cube_float),
                ShapeSpec::new([-4.0, -3.0, -2.0], 0.8, Color::NEON_GREEN, 0.9).floating(cube_float),
                ShapeSpec::new([5.0, 3.0, -5.0], 1.2, Color::NEON_YELLOW, 0.6).floating(cube_float),
            ],
            polyhedra: vec![
                ShapeSpec::new([4.0, 1.0, -2.0], 0.8, Color::NEON_MAGENTA, 1.0).floating(poly_float),
                ShapeSpec::new([-5.0, -2.0, -4.0], 1.0, Color::NEON_CYAN, 1.0).floating(poly_float),
                ShapeSpec::new([0.0, 4.0, -6.0], 0.6, Color::NEON_GREEN, 1.0).floating(poly_float),
            ],
            crystals: Vec::new(),
            orbs: vec![OrbSpec::default()],
            orbiting_rings: vec![
                OrbitRingSpec::default(),
                OrbitRingSpec {
                    radius: 3.5,
                    color: Color::NEON_MAGENTA,
                    opacity: 0.3,
                    base_rotation: Euler::new(PI / 3.0, 0.0, 0.0),
                    rates: Vec3::new(0.2, 0.0, 0.0),
                    ..OrbitRingSpec::default()
                },
                OrbitRingSpec {
                    radius: 4.0,
                    color: Color::NEON_GREEN,
                    opacity: 0.3,
                    base_rotation: Euler::new(0.0, PI / 4.0, PI / 6.0),
                    rates: Vec3::new(0.0, 0.25, 0.0),
                    ..OrbitRingSpec::default()
                },
            ],
            floating_rings: vec![
                ShapeSpec::new([-3.0, 0.0, -1.0], 0.8, Color::NEON_CYAN, 1.2).floating(ring_float),
                ShapeSpec::new([4.0, -2.0, -3.0], 1.2, Color::NEON_MAGENTA, 0.8).floating(ring_float),
                ShapeSpec::new([0.0, 2.0, -4.0], 1.0, Color::NEON_GREEN, 1.0).floating(ring_float),
            ],
            helix: HelixSpec {
                enabled: false,
                ..HelixSpec::default()
            },
            grid: GridSpec {
                enabled: false,
                ..GridSpec::default()
            },
            beams: BeamSpec {
                enabled: false,
                ..BeamSpec::default()
            },
            particles: vec![ParticleSpec::default()],
            starfield: StarfieldSpec::default(),
        }
    }

    /// Lighter variant: a spinning double helix over a grid floor, crystals
    /// wired to the center, and particles that lean toward the pointer
    pub fn minimal() -> Self {
        let crystal_float = FloatSpec::new(1.5, 0.4, 0.6);
        let crystals = vec![
            ShapeSpec::new([-5.0, 1.5, -3.0], 0.6, Color::NEON_CYAN, 0.8).floating(crystal_float),
            ShapeSpec::new([5.0, 2.0, -4.0], 0.5, Color::NEON_MAGENTA, 1.0).floating(crystal_float),
            ShapeSpec::new([3.5, -2.5, -2.0], 0.4, Color::NEON_GREEN, 1.2).floating(crystal_float),
        ];
        let helix = HelixSpec::default();

        Self {
            seed: None,
            camera: Camera::default(),
            lights: vec![
                Light::ambient(0.3),
                Light::point(Vec3::splat(10.0), Color::NEON_CYAN, 1.0),
            ],
            cubes: Vec::new(),
            polyhedra: vec![
                ShapeSpec::new([-6.0, -2.0, -5.0], 0.8, Color::NEON_MAGENTA, 1.0)
                    .floating(FloatSpec::new(1.5, 0.3, 0.8)),
            ],
            beams: BeamSpec {
                center: helix.position,
                endpoints: crystals.iter().map(|c| c.position).collect(),
                ..BeamSpec::default()
            },
            crystals,
            orbs: Vec::new(),
            orbiting_rings: vec![OrbitRingSpec {
                radius: 2.5,
                ..OrbitRingSpec::default()
            }],
            floating_rings: Vec::new(),
            helix,
            grid: GridSpec::default(),
            particles: vec![ParticleSpec {
                count: 80,
                spawn: SpawnVolume::Box {
                    half_extents: Vec3::new(8.0, 5.0, 1.0),
                },
                behavior: ParticleBehavior::FOLLOW_POINTER,
                ..ParticleSpec::default()
            }],
            starfield: StarfieldSpec {
                count: 800,
                ..StarfieldSpec::default()
            },
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse and validate a TOML scene description
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Total scene objects the config will produce, excluding particles and stars
    pub fn object_count(&self) -> usize {
        let helix = if self.helix.enabled {
            let rungs = match self.helix.rung_every {
                0 => 0,
                every => self.helix.count.div_ceil(every),
            };
            self.helix.count * 2 + rungs
        } else {
            0
        };
        self.cubes.len()
            + self.polyhedra.len()
            + self.crystals.len()
            + self.orbs.len()
            + self.orbiting_rings.len()
            + self.floating_rings.len()
            + helix
            + usize::from(self.grid.enabled)
            + if self.beams.enabled { self.beams.endpoints.len() } else { 0 }
    }

    /// Reject counts, sizes and coefficients the scene cannot animate sanely
    pub fn validate(&self) -> Result<()> {
        let camera = &self.camera;
        check_vec("camera.position", camera.position)?;
        check_range("camera.fov_degrees", camera.fov_degrees, 1.0, 179.0)?;
        check_positive("camera.aspect", camera.aspect)?;

        for (i, light) in self.lights.iter().enumerate() {
            check_non_negative(&format!("lights[{i}].intensity"), light.intensity())?;
        }

        let groups = [
            ("cubes", &self.cubes),
            ("polyhedra", &self.polyhedra),
            ("crystals", &self.crystals),
            ("floating_rings", &self.floating_rings),
        ];
        for (name, shapes) in groups {
            check_count(name, shapes.len(), 0, MAX_GROUP_OBJECTS)?;
            for (i, shape) in shapes.iter().enumerate() {
                validate_shape(&format!("{name}[{i}]"), shape)?;
            }
        }

        check_count("orbs", self.orbs.len(), 0, MAX_GROUP_OBJECTS)?;
        for (i, orb) in self.orbs.iter().enumerate() {
            let field = format!("orbs[{i}]");
            check_vec(&format!("{field}.position"), orb.position)?;
            check_positive(&format!("{field}.size"), orb.size)?;
            check_range(&format!("{field}.opacity"), orb.opacity, 0.0, 1.0)?;
            check_count(&format!("{field}.segments"), orb.segments as usize, 3, 256)?;
            check_non_negative(&format!("{field}.distort"), orb.distort)?;
            check_non_negative(&format!("{field}.distort_speed"), orb.distort_speed)?;
            check_range(&format!("{field}.roughness"), orb.roughness, 0.0, 1.0)?;
            check_range(&format!("{field}.metalness"), orb.metalness, 0.0, 1.0)?;
            check_vec(&format!("{field}.spin"), orb.spin)?;
            if let Some(float) = &orb.float {
                validate_float(&field, float)?;
            }
        }

        check_count("orbiting_rings", self.orbiting_rings.len(), 0, MAX_GROUP_OBJECTS)?;
        for (i, ring) in self.orbiting_rings.iter().enumerate() {
            let field = format!("orbiting_rings[{i}]");
            check_positive(&format!("{field}.radius"), ring.radius)?;
            check_positive(&format!("{field}.tube"), ring.tube)?;
            check_range(&format!("{field}.opacity"), ring.opacity, 0.0, 1.0)?;
            check_vec(&format!("{field}.rates"), ring.rates)?;
        }

        if self.helix.enabled {
            let helix = &self.helix;
            check_vec("helix.position", helix.position)?;
            check_count("helix.count", helix.count, 1, MAX_HELIX_NODES)?;
            check_finite("helix.turns", helix.turns)?;
            check_positive("helix.radius", helix.radius)?;
            check_non_negative("helix.height", helix.height)?;
            check_positive("helix.node_size", helix.node_size)?;
            check_finite("helix.spin_rate", helix.spin_rate)?;
        }

        if self.grid.enabled {
            let grid = &self.grid;
            check_vec("grid.position", grid.position)?;
            check_positive("grid.size", grid.size)?;
            check_count("grid.divisions", grid.divisions, 1, MAX_GRID_DIVISIONS)?;
            check_range("grid.opacity", grid.opacity, 0.0, 1.0)?;
            check_finite("grid.pulse_frequency", grid.pulse_frequency)?;
        }

        if self.beams.enabled {
            let beams = &self.beams;
            check_vec("beams.center", beams.center)?;
            check_count("beams.endpoints", beams.endpoints.len(), 0, MAX_GROUP_OBJECTS)?;
            for (i, endpoint) in beams.endpoints.iter().enumerate() {
                check_vec(&format!("beams.endpoints[{i}]"), *endpoint)?;
            }
            check_range("beams.opacity", beams.opacity, 0.0, 1.0)?;
            check_finite("beams.pulse_frequency", beams.pulse_frequency)?;
        }

        check_count("particles", self.particles.len(), 0, MAX_GROUP_OBJECTS)?;
        for (i, spec) in self.particles.iter().enumerate() {
            validate_particles(&format!("particles[{i}]"), spec)?;
        }

        if self.starfield.enabled {
            let stars = &self.starfield;
            check_count("starfield.count", stars.count, 0, MAX_STARS)?;
            check_positive("starfield.radius", stars.radius)?;
            check_non_negative("starfield.depth", stars.depth)?;
            check_positive("starfield.factor", stars.factor)?;
            check_range("starfield.saturation", stars.saturation, 0.0, 1.0)?;
            check_non_negative("starfield.speed", stars.speed)?;
        }

        Ok(())
    }
}

fn validate_shape(field: &str, shape: &ShapeSpec) -> Result<()> {
    check_vec(&format!("{field}.position"), shape.position)?;
    check_positive(&format!("{field}.size"), shape.size)?;
    check_non_negative(&format!("{field}.speed"), shape.speed)?;
    match &shape.float {
        Some(float) => validate_float(field, float),
        None => Ok(()),
    }
}

fn validate_float(field: &str, float: &FloatSpec) -> Result<()> {
    check_non_negative(&format!("{field}.float.speed"), float.speed)?;
    check_non_negative(&format!("{field}.float.rotation_intensity"), float.rotation_intensity)?;
    check_non_negative(&format!("{field}.float.float_intensity"), float.float_intensity)
}

fn validate_particles(field: &str, spec: &ParticleSpec) -> Result<()> {
    check_count(&format!("{field}.count"), spec.count, 0, MAX_PARTICLES)?;
    check_positive(&format!("{field}.size"), spec.size)?;
    check_range(&format!("{field}.opacity"), spec.opacity, 0.0, 1.0)?;

    match spec.spawn {
        SpawnVolume::Box { half_extents } => {
            check_vec(&format!("{field}.spawn.half_extents"), half_extents)?;
            for value in half_extents.to_array() {
                check_non_negative(&format!("{field}.spawn.half_extents"), value)?;
            }
        }
        SpawnVolume::Sphere { radius } => {
            check_non_negative(&format!("{field}.spawn.radius"), radius)?;
        }
    }

    match spec.behavior {
        ParticleBehavior::Drift {
            spin_rate,
            sway_frequency,
            sway_amplitude,
        } => {
            check_finite(&format!("{field}.behavior.spin_rate"), spin_rate)?;
            check_finite(&format!("{field}.behavior.sway_frequency"), sway_frequency)?;
            check_finite(&format!("{field}.behavior.sway_amplitude"), sway_amplitude)?;
        }
        ParticleBehavior::FollowPointer {
            attraction,
            damping,
            depth_amplitude,
            reach,
        } => {
            if !(attraction > 0.0 && attraction <= 1.0) {
                return Err(SceneError::InvalidCoefficient {
                    field: format!("{field}.behavior.attraction"),
                    value: attraction,
                    expected: "a value in (0, 1]",
                });
            }
            if !(damping > 0.0 && damping < 1.0) {
                return Err(SceneError::InvalidCoefficient {
                    field: format!("{field}.behavior.damping"),
                    value: damping,
                    expected: "a value in (0, 1)",
                });
            }
            check_non_negative(&format!("{field}.behavior.depth_amplitude"), depth_amplitude)?;
            check_finite(&format!("{field}.behavior.reach"), reach)?;
        }
    }
    Ok(())
}

fn check_count(field: &str, count: usize, min: usize, max: usize) -> Result<()> {
    if count < min || count > max {
        return Err(SceneError::InvalidCount {
            field: field.to_string(),
            count,
            min,
            max,
        });
    }
    Ok(())
}

fn invalid(field: &str, value: f32, expected: &'static str) -> SceneError {
    SceneError::InvalidParameter {
        field: field.to_string(),
        value,
        expected,
    }
}

fn check_finite(field: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "a finite number"))
    }
}

fn check_positive(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "a finite number greater than zero"))
    }
}

fn check_non_negative(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "a finite number of at least zero"))
    }
}

fn check_range(field: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(invalid(field, value, "a number within the allowed range"))
    }
}

fn check_vec(field: &str, value: Vec3) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        let bad = value.to_array().into_iter().find(|v| !v.is_finite()).unwrap_or(f32::NAN);
        Err(invalid(field, bad, "finite coordinates"))
    }
}
