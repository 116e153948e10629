//! Material layers
//!
//! Decorative objects are drawn as a stack of layers over the same geometry,
//! typically a faint lit solid plus a brighter wireframe overlay.

use backdrop_core::Color;
use serde::{Deserialize, Serialize};

/// How a layer is shaded
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shading {
    /// Flat color, no lighting
    Basic,
    /// Physically based lit surface
    Standard { roughness: f32, metalness: f32 },
    /// Lit surface whose vertices wobble with animated noise
    Distort {
        /// Displacement strength
        distort: f32,
        /// Noise speed
        speed: f32,
        roughness: f32,
        metalness: f32,
    },
    /// Point sprites sized in world units
    Points { size: f32, size_attenuation: bool },
}

/// One drawable layer of an object
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialLayer {
    pub shading: Shading,
    /// Base color; point layers multiply it with per-vertex colors
    pub color: Color,
    pub opacity: f32,
    pub wireframe: bool,
    /// Use per-vertex colors
    pub vertex_colors: bool,
}

impl MaterialLayer {
    /// Translucent lit solid
    pub fn solid(color: Color, opacity: f32) -> Self {
        Self {
            shading: Shading::Standard {
                roughness: 1.0,
                metalness: 0.0,
            },
            color,
            opacity,
            wireframe: false,
            vertex_colors: false,
        }
    }

    /// Unlit wireframe overlay
    pub fn wireframe(color: Color, opacity: f32) -> Self {
        Self {
            shading: Shading::Basic,
            color,
            opacity,
            wireframe: true,
            vertex_colors: false,
        }
    }

    /// Unlit translucent fill
    pub fn basic(color: Color, opacity: f32) -> Self {
        Self {
            shading: Shading::Basic,
            color,
            opacity,
            wireframe: false,
            vertex_colors: false,
        }
    }

    /// Point sprites colored per vertex
    pub fn points(size: f32, opacity: f32) -> Self {
        Self {
            shading: Shading::Points {
                size,
                size_attenuation: true,
            },
            color: Color::WHITE,
            opacity,
            wireframe: false,
            vertex_colors: true,
        }
    }

    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    /// Whether the layer needs blending
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0 || self.color.a < 1.0
    }
}
