//! Deterministic shape generators
//!
//! Pure functions from an index and a few shape parameters to positions.
//! Nothing in here touches a random source, so the same arguments always
//! produce the same points.

use backdrop_core::Vec3;
use std::f32::consts::TAU;

/// Point `i` of `count` on a vertical helix centered on the origin
///
/// The helix makes `turns` full revolutions while rising from `-height / 2`
/// to `height / 2`. A second strand is the same point mirrored through the
/// Y axis.
pub fn helix_point(i: usize, count: usize, turns: f32, radius: f32, height: f32) -> Vec3 {
    let t = if count > 1 {
        i as f32 / (count - 1) as f32
    } else {
        0.0
    };
    let angle = t * turns * TAU;
    Vec3::new(angle.cos() * radius, (t - 0.5) * height, angle.sin() * radius)
}

/// Point `i` of `count` evenly spaced on a circle in the XZ plane
pub fn ring_point(i: usize, count: usize, radius: f32) -> Vec3 {
    if count == 0 {
        return Vec3::ZERO;
    }
    let angle = i as f32 / count as f32 * TAU;
    Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
}

/// Line segments of a square grid of side `size` on the XZ plane
///
/// Produces `divisions + 1` lines along each axis. A grid with no divisions
/// has no lines.
pub fn grid_lines(size: f32, divisions: u32) -> Vec<(Vec3, Vec3)> {
    if divisions == 0 {
        return Vec::new();
    }
    let half = size * 0.5;
    let step = size / divisions as f32;
    let mut lines = Vec::with_capacity(2 * (divisions as usize + 1));
    for k in 0..=divisions {
        let offset = -half + step * k as f32;
        lines.push((Vec3::new(offset, 0.0, -half), Vec3::new(offset, 0.0, half)));
        lines.push((Vec3::new(-half, 0.0, offset), Vec3::new(half, 0.0, offset)));
    }
    lines
}

/// Map unit-square coordinates onto a sphere of radius `r`
///
/// `u` sweeps the azimuth and `v` the polar angle, with `v` spaced in
/// `cos` so uniformly distributed inputs give uniformly distributed points.
pub fn sphere_shell_point(r: f32, u: f32, v: f32) -> Vec3 {
    let theta = u * TAU;
    let phi = (1.0 - 2.0 * v).clamp(-1.0, 1.0).acos();
    Vec3::new(
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
        r * phi.sin() * theta.cos(),
    )
}
