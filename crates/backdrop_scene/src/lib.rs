//! Backdrop Scene
//!
//! Procedural 3D background for a portfolio page: neon wireframe primitives,
//! rings, a distorted orb, particle clouds and a starfield, each animated as
//! a function of elapsed time.
//!
//! # Features
//!
//! - **Config**: presets plus TOML overrides, validated before anything is built
//! - **Objects**: cubes, polyhedra, crystals, rings, helix strands, grid and beams
//! - **Particles**: drifting clouds and damped pointer-following swarms
//! - **Starfield**: shell-distributed stars with a shared twinkle clock
//! - **Host**: frame and pointer subscriptions released on unmount
//!
//! # Example
//!
//! ```ignore
//! use backdrop_scene::{build_scene, SceneConfig};
//!
//! let mut scene = build_scene(&SceneConfig::cyber().with_seed(7))?;
//! scene.tick(0.016, None);
//! let frame = scene.frame();
//! ```

pub mod animator;
pub mod config;
pub mod error;
pub mod generators;
pub mod geometry;
pub mod host;
pub mod lights;
pub mod material;
pub mod object;
pub mod particles;
pub mod scene;
pub mod starfield;

pub use animator::{compute_rotation, Animator, FloatMotion, ObjectBase, Orbit, Pose, Pulse, RotationRule};
pub use config::{
    BeamSpec, FloatSpec, GridSpec, HelixSpec, OrbSpec, OrbitRingSpec, ParticleSpec, SceneConfig,
    ShapeSpec, StarfieldSpec,
};
pub use error::{Result, SceneError};
pub use generators::{grid_lines, helix_point, ring_point, sphere_shell_point};
pub use geometry::{Geometry, GeometryKind};
pub use host::{FrameHost, ListenerId, MountedScene, Subscription};
pub use lights::{Camera, Light};
pub use material::{MaterialLayer, Shading};
pub use object::{ObjectFrame, SceneObject};
pub use particles::{
    Particle, ParticleBehavior, ParticleFrame, ParticleInstance, ParticleSystem, SpawnVolume,
};
pub use scene::{build_scene, FrameSnapshot, Scene};
pub use starfield::{Star, Starfield, StarfieldFrame};
