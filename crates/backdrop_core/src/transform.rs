//! Retained-mode transform handle
//!
//! Every scene object owns one `Transform`. The per-frame tick writes it in
//! place instead of rebuilding a scene description, and renderers read it
//! back when drawing.

use crate::geometry::{Euler, Vec3};
use serde::{Deserialize, Serialize};

/// Position, rotation and scale of an object in world space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Euler,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Euler::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform placed at `position`
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Euler) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_uniform_scale(mut self, s: f32) -> Self {
        self.scale = Vec3::splat(s);
        self
    }
}
