//! Lights and camera

use backdrop_core::{Color, PointerNdc, Vec3};
use serde::{Deserialize, Serialize};

/// Light descriptor handed to the renderer
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Light {
    /// Uniform light from every direction
    Ambient { color: Color, intensity: f32 },
    /// Omnidirectional light at a position
    Point {
        position: Vec3,
        color: Color,
        intensity: f32,
    },
    /// Cone of light pointing at `target`
    Spot {
        position: Vec3,
        target: Vec3,
        color: Color,
        intensity: f32,
        /// Half-angle of the cone in radians
        angle: f32,
    },
}

impl Light {
    pub fn ambient(intensity: f32) -> Self {
        Light::Ambient {
            color: Color::WHITE,
            intensity,
        }
    }

    pub fn point(position: Vec3, color: Color, intensity: f32) -> Self {
        Light::Point {
            position,
            color,
            intensity,
        }
    }

    /// Spot light aimed at the origin
    pub fn spot(position: Vec3, color: Color, intensity: f32, angle: f32) -> Self {
        Light::Spot {
            position,
            target: Vec3::ZERO,
            color,
            intensity,
            angle,
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            Light::Ambient { color, .. } | Light::Point { color, .. } | Light::Spot { color, .. } => color,
        }
    }

    pub fn intensity(&self) -> f32 {
        match *self {
            Light::Ambient { intensity, .. }
            | Light::Point { intensity, .. }
            | Light::Spot { intensity, .. } => intensity,
        }
    }
}

/// Perspective camera looking down -Z
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Viewport width over height
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            fov_degrees: 60.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    /// Update the aspect ratio from a viewport size; degenerate sizes are ignored
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        let aspect = width / height;
        if width > 0.0 && height > 0.0 && aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Half width and half height of the view at depth `z`
    pub fn half_extents_at(&self, z: f32) -> (f32, f32) {
        let distance = (self.position.z - z).abs();
        let half_height = (self.fov_degrees.to_radians() * 0.5).tan() * distance;
        (half_height * self.aspect, half_height)
    }

    /// World position under the pointer on the plane `z`
    pub fn unproject(&self, pointer: PointerNdc, z: f32) -> Vec3 {
        let (half_width, half_height) = self.half_extents_at(z);
        Vec3::new(
            self.position.x + pointer.x() * half_width,
            self.position.y + pointer.y() * half_height,
            z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unproject_center_and_edge() {
        let camera = Camera::default();
        assert_eq!(camera.unproject(PointerNdc::CENTER, 0.0), Vec3::ZERO);

        let top = camera.unproject(PointerNdc::new(0.0, 1.0), 0.0);
        let expected = 30.0f32.to_radians().tan() * 10.0;
        assert!((top.y - expected).abs() < 1e-4);

        let right = camera.unproject(PointerNdc::new(1.0, 0.0), 0.0);
        assert!((right.x - expected * 16.0 / 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_viewport_ignored() {
        let mut camera = Camera::default();
        camera.set_viewport(0.0, 800.0);
        assert_eq!(camera.aspect, 16.0 / 9.0);
        camera.set_viewport(800.0, 800.0);
        assert_eq!(camera.aspect, 1.0);
    }

    #[test]
    fn test_non_finite_viewport_ignored() {
        let mut camera = Camera::default();
        camera.set_viewport(f32::INFINITY, 800.0);
        camera.set_viewport(800.0, f32::NAN);
        camera.set_viewport(f32::MAX, f32::MIN_POSITIVE);
        assert_eq!(camera.aspect, 16.0 / 9.0);

        let (w, h) = camera.half_extents_at(0.0);
        assert!(w.is_finite() && h.is_finite());
    }

    #[test]
    fn test_light_accessors() {
        let light = Light::point(Vec3::splat(10.0), Color::NEON_CYAN, 1.0);
        assert_eq!(light.color(), Color::NEON_CYAN);
        assert_eq!(Light::ambient(0.2).intensity(), 0.2);
    }
}
