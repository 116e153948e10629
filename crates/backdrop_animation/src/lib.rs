//! Backdrop Animation
//!
//! Motion wrappers for page content, built on springs, easings and looping
//! keyframe tracks.
//!
//! # Features
//!
//! - **Entrances**: viewport-gated fade, scale, stagger and parallax
//! - **Hover Feedback**: magnetic buttons, floating and tilting cards
//! - **Ambient Loops**: glowing orbs and sweeping gradient borders
//! - **Text Effects**: hover scramble, per-letter springs, typewriter reveal
//! - **Spring Physics**: RK4-integrated springs plus closed-form progress curves
//!
//! Every wrapper implements [`Motion`]: pointer and visibility messages only
//! record state, and effects appear on the next [`Motion::tick`].

pub mod ambient;
pub mod easing;
pub mod enter;
pub mod hover;
pub mod motion;
pub mod spring;
pub mod stagger;
pub mod text;
pub mod tilt;
pub mod transition;
pub mod values;
pub mod visibility;

pub use ambient::{
    glowing_orb, gradient_border_card, GlowingOrb, GlowingOrbConfig, GradientBorder,
};
pub use easing::Easing;
pub use enter::{fade_in, parallax, scale_in, Direction, FadeInConfig};
pub use hover::{floating_card, magnetic_button, Magnetic};
pub use motion::{Entrance, EntranceGate, HoverTween, Motion, Wrapped};
pub use spring::{Spring, SpringConfig};
pub use stagger::{
    stagger_container, stagger_item, StaggerConfig, StaggerContainer, StaggerDirection,
    StaggerItem,
};
pub use text::{
    animated_text, hacker_text_scramble, typing_text, AnimatedText, ScrambleConfig,
    TextScramble, TypingText, SCRAMBLE_ALPHABET,
};
pub use tilt::{tilt_angles, tilt_card, Tilt, TiltConfig};
pub use transition::{Curve, MotionStyle, Property, Transition};
pub use values::{Interpolate, LoopTrack};
pub use visibility::{TriggerEdge, TriggerMode, ViewportOptions, VisibilityTrigger};
