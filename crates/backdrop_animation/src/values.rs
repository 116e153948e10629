//! Animatable values and looping keyframe tracks

use crate::easing::Easing;
use backdrop_core::{Color, Vec3};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Vec3 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec3::lerp(self, *other, t)
    }
}

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::lerp(self, other, t)
    }
}

/// An endlessly repeating keyframe track
///
/// Keyframes are spread evenly over one period and every segment uses the
/// same easing. Sampling is a pure function of elapsed time, so the loop
/// never drifts no matter how irregular the frame timing is.
#[derive(Clone, Debug)]
pub struct LoopTrack<T: Interpolate> {
    values: Vec<T>,
    period: f32,
    easing: Easing,
}

impl<T: Interpolate> LoopTrack<T> {
    /// Create a track from keyframe values played over `period` seconds
    pub fn new(values: Vec<T>, period: f32, easing: Easing) -> Self {
        Self {
            values,
            period,
            easing,
        }
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Sample the track at `elapsed` seconds since it started
    ///
    /// Returns `None` only for a track without keyframes.
    pub fn sample(&self, elapsed: f32) -> Option<T> {
        let first = self.values.first()?;
        let segments = self.values.len() - 1;
        if segments == 0 || self.period <= 0.0 || !elapsed.is_finite() {
            return Some(first.clone());
        }

        let phase = (elapsed / self.period).rem_euclid(1.0) * segments as f32;
        let index = (phase.floor() as usize).min(segments - 1);
        let local = self.easing.apply(phase - index as f32);
        Some(self.values[index].lerp(&self.values[index + 1], local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_track_keyframes() {
        let track = LoopTrack::new(vec![1.0f32, 1.2, 1.0], 4.0, Easing::EaseInOut);

        assert_eq!(track.sample(0.0), Some(1.0));
        assert!((track.sample(2.0).unwrap() - 1.2).abs() < 1e-5);
        assert!((track.sample(4.0).unwrap() - 1.0).abs() < 1e-5);
        // Second period repeats the first
        assert_eq!(track.sample(1.0), track.sample(5.0));
    }

    #[test]
    fn test_loop_track_degenerate() {
        let empty: LoopTrack<f32> = LoopTrack::new(vec![], 1.0, Easing::Linear);
        assert_eq!(empty.sample(0.5), None);

        let single = LoopTrack::new(vec![3.0f32], 1.0, Easing::Linear);
        assert_eq!(single.sample(0.5), Some(3.0));

        let zero_period = LoopTrack::new(vec![0.0f32, 1.0], 0.0, Easing::Linear);
        assert_eq!(zero_period.sample(10.0), Some(0.0));
    }

    #[test]
    fn test_color_track() {
        let track = LoopTrack::new(vec![Color::BLACK, Color::WHITE], 2.0, Easing::Linear);
        let mid = track.sample(1.0).unwrap();
        assert!((mid.r - 0.5).abs() < 1e-5);
    }
}
