//! Backdrop Core
//!
//! Shared value types for the Backdrop crates:
//!
//! - **Geometry**: screen-space `Point`/`Size`/`Rect` and world-space
//!   `Vec2`/`Vec3`/`Euler`
//! - **Color**: linear RGBA with hex and HSL constructors
//! - **Transform**: the retained-mode per-object handle written every frame
//! - **Input**: pointer messages and normalized device coordinates
//! - **Seed**: reproducible or per-run seeds for decorative randomness

pub mod color;
pub mod geometry;
pub mod input;
pub mod seed;
pub mod transform;

pub use color::{Color, InvalidColor};
pub use geometry::{Euler, Point, Rect, Size, Vec2, Vec3};
pub use input::{PointerEvent, PointerNdc};
pub use seed::{entropy_seed, resolve_seed};
pub use transform::Transform;
