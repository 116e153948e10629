//! Viewport-gated entrance wrappers
//!
//! - `fade_in`: opacity and a 40px slide from a chosen side, once per mount
//! - `scale_in`: opacity and a grow from 80%, once per mount
//! - `parallax`: vertical settle that replays every time the element enters

use crate::easing::Easing;
use crate::motion::{Entrance, EntranceGate, Wrapped};
use crate::transition::{Property, Transition};
use crate::visibility::{TriggerMode, ViewportOptions, VisibilityTrigger};
use std::str::FromStr;

/// Distance in pixels a fade-in slides from
pub const FADE_DISTANCE: f32 = 40.0;
/// Fade-in duration in seconds
pub const FADE_DURATION: f32 = 0.8;
/// Scale-in duration in seconds
pub const SCALE_DURATION: f32 = 0.6;
/// Scale an element grows from during scale-in
pub const SCALE_FROM: f32 = 0.8;
/// Parallax settle duration in seconds
pub const PARALLAX_DURATION: f32 = 1.0;

/// Direction content travels while fading in
///
/// `Up` means the content rises into place (starts below).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
    /// Fade only, no slide
    None,
}

impl Direction {
    /// Parse a direction name, falling back to [`Direction::None`]
    ///
    /// Unknown names are decorative misconfiguration, not errors.
    pub fn parse(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(direction = name, "unknown fade direction, fading without slide");
            Direction::None
        })
    }

    /// Starting offset (x, y) in pixels
    pub fn offset(&self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, FADE_DISTANCE),
            Direction::Down => (0.0, -FADE_DISTANCE),
            Direction::Left => (FADE_DISTANCE, 0.0),
            Direction::Right => (-FADE_DISTANCE, 0.0),
            Direction::None => (0.0, 0.0),
        }
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "none" => Ok(Direction::None),
            _ => Err(()),
        }
    }
}

/// Configuration for [`fade_in`]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FadeInConfig {
    /// Delay in seconds after the element becomes visible
    pub delay: f32,
    pub direction: Direction,
    /// Replay on every entry instead of once per mount
    pub restartable: bool,
}

impl FadeInConfig {
    pub fn new(delay: f32, direction: Direction) -> Self {
        Self {
            delay,
            direction,
            restartable: false,
        }
    }
}

fn viewport_gate(restartable: bool, options: ViewportOptions) -> EntranceGate {
    let mode = if restartable {
        TriggerMode::Restartable
    } else {
        TriggerMode::Once
    };
    EntranceGate::Viewport(VisibilityTrigger::new(mode).with_options(options))
}

/// Fade `content` in and slide it 40px into place on first entry
pub fn fade_in<C>(content: C, config: FadeInConfig) -> Wrapped<C, Entrance> {
    let (dx, dy) = config.direction.offset();
    let tween = |property, from, to| {
        Transition::tween(property, from, to, FADE_DURATION, Easing::SMOOTH_OUT).with_delay(config.delay)
    };

    let mut transitions = vec![tween(Property::Opacity, 0.0, 1.0)];
    if dx != 0.0 {
        transitions.push(tween(Property::TranslateX, dx, 0.0));
    }
    if dy != 0.0 {
        transitions.push(tween(Property::TranslateY, dy, 0.0));
    }

    Wrapped::new(content, Entrance::new(transitions, viewport_gate(config.restartable, ViewportOptions::ENTRANCE)))
}

/// Fade `content` in while growing it from 80% on first entry
pub fn scale_in<C>(content: C, delay: f32) -> Wrapped<C, Entrance> {
    let tween = |property, from, to| {
        Transition::tween(property, from, to, SCALE_DURATION, Easing::SMOOTH_OUT).with_delay(delay)
    };
    Wrapped::new(
        content,
        Entrance::new(
            [
                tween(Property::Opacity, 0.0, 1.0),
                tween(Property::Scale, SCALE_FROM, 1.0),
            ],
            viewport_gate(false, ViewportOptions::ENTRANCE),
        ),
    )
}

/// Settle `content` from `offset` pixels below into place whenever it enters
///
/// Leaving the viewport rewinds it so the next entry plays again.
pub fn parallax<C>(content: C, offset: f32) -> Wrapped<C, Entrance> {
    Wrapped::new(
        content,
        Entrance::new(
            [Transition::tween(
                Property::TranslateY,
                offset,
                0.0,
                PARALLAX_DURATION,
                Easing::SMOOTH_OUT,
            )],
            viewport_gate(true, ViewportOptions::PARALLAX),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Motion;
    use backdrop_core::Rect;

    #[test]
    fn test_fade_in_hidden_until_visible() {
        let mut block = fade_in("About", FadeInConfig::new(0.0, Direction::Up));
        block.tick(10.0);
        let style = block.style();
        assert_eq!(style.opacity, 0.0);
        assert_eq!(style.translate_y, FADE_DISTANCE);
        assert_eq!(style.translate_x, 0.0);
    }

    #[test]
    fn test_fade_in_settles() {
        let mut block = fade_in("About", FadeInConfig::new(0.2, Direction::Left));
        block.set_visible(true);
        block.tick(0.1);
        assert_eq!(block.style().opacity, 0.0);

        block.tick(FADE_DURATION + 0.5);
        let style = block.style();
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.translate_x, 0.0);
        assert!(block.motion().is_complete());
    }

    #[test]
    fn test_fade_in_fires_once() {
        let mut block = fade_in((), FadeInConfig::default());
        block.set_visible(true);
        block.tick(0.4);
        let mid = block.style().opacity;
        assert!(mid > 0.0 && mid < 1.0);

        // Leaving and re-entering neither rewinds nor restarts
        block.set_visible(false);
        block.set_visible(true);
        assert_eq!(block.style().opacity, mid);
        block.tick(1.0);
        assert_eq!(block.style().opacity, 1.0);
        block.set_visible(false);
        block.set_visible(true);
        assert_eq!(block.style().opacity, 1.0);
    }

    #[test]
    fn test_unknown_direction_is_neutral() {
        assert_eq!(Direction::parse("diagonal"), Direction::None);
        assert_eq!(Direction::parse(" Right "), Direction::Right);

        let block = fade_in((), FadeInConfig::new(0.0, Direction::parse("sideways")));
        assert_eq!(block.motion().transitions().len(), 1);
        let style = block.style();
        assert_eq!((style.translate_x, style.translate_y), (0.0, 0.0));
    }

    #[test]
    fn test_scale_in() {
        let mut card = scale_in("card", 0.0);
        assert_eq!(card.style().scale, SCALE_FROM);
        card.set_visible(true);
        card.tick(SCALE_DURATION);
        assert_eq!(card.style().scale, 1.0);
    }

    #[test]
    fn test_parallax_replays() {
        let mut layer = parallax((), 50.0);
        layer.set_visible(true);
        layer.tick(PARALLAX_DURATION);
        assert_eq!(layer.style().translate_y, 0.0);

        layer.set_visible(false);
        assert_eq!(layer.style().translate_y, 50.0);

        layer.set_visible(true);
        layer.tick(PARALLAX_DURATION / 2.0);
        let y = layer.style().translate_y;
        assert!(y > 0.0 && y < 50.0);
    }

    #[test]
    fn test_parallax_waits_deeper_than_fade() {
        assert_eq!(parallax((), 50.0).motion().viewport_options(), Some(ViewportOptions::PARALLAX));
        assert_eq!(
            fade_in((), FadeInConfig::default()).motion().viewport_options(),
            Some(ViewportOptions::ENTRANCE)
        );

        // 150px inside the bottom edge: enough for a fade, not for parallax
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let element = Rect::new(300.0, 650.0, 200.0, 200.0);

        let mut block = fade_in((), FadeInConfig::default());
        block.motion_mut().observe_rects(element, viewport);
        assert!(block.motion().has_started());

        let mut layer = parallax((), 50.0);
        layer.motion_mut().observe_rects(element, viewport);
        assert!(!layer.motion().has_started());
        layer.motion_mut().observe_rects(Rect::new(300.0, 550.0, 200.0, 200.0), viewport);
        assert!(layer.motion().has_started());
    }
}
