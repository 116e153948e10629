//! Text effects
//!
//! - `hacker_text_scramble`: left-to-right reveal through random glyphs on hover
//! - `animated_text`: per-letter spring entrance on mount
//! - `typing_text`: linear typewriter reveal

use crate::motion::{Entrance, EntranceGate, Motion, Wrapped};
use crate::spring::SpringConfig;
use crate::transition::{MotionStyle, Property, Transition};
use backdrop_core::{resolve_seed, PointerEvent};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Glyphs drawn for characters that are not yet revealed
pub const SCRAMBLE_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+";

/// Seconds between letter starts in [`animated_text`]
pub const LETTER_STAGGER: f32 = 0.03;
/// Distance in pixels each letter rises from
pub const LETTER_RISE: f32 = 20.0;

const NBSP: char = '\u{00A0}';

/// Timing of a [`TextScramble`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrambleConfig {
    /// Seconds between redraws
    pub tick_interval: f32,
    /// Redraws spent on each character before it locks in
    pub ticks_per_char: u32,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            tick_interval: 0.03,
            ticks_per_char: 3,
        }
    }
}

impl ScrambleConfig {
    /// Seconds a full reveal of `len` characters takes
    pub fn duration_for(&self, len: usize) -> f32 {
        self.tick_interval * (len as u32 * self.ticks_per_char) as f32
    }
}

/// Hover-triggered scramble that resolves into the real text
#[derive(Debug)]
pub struct TextScramble {
    text: Vec<char>,
    alphabet: Vec<char>,
    display: String,
    config: ScrambleConfig,
    rng: StdRng,
    /// Completed redraws, `None` while idle
    ticks: Option<u32>,
    pending: f32,
}

/// Scramble `text` on pointer enter with a per-run seed
pub fn hacker_text_scramble(text: &str) -> TextScramble {
    TextScramble::new(text, ScrambleConfig::default(), None)
}

impl TextScramble {
    pub fn new(text: &str, config: ScrambleConfig, seed: Option<u64>) -> Self {
        Self {
            text: text.chars().collect(),
            alphabet: SCRAMBLE_ALPHABET.chars().collect(),
            display: text.to_string(),
            config,
            rng: StdRng::seed_from_u64(resolve_seed(seed)),
            ticks: None,
            pending: 0.0,
        }
    }

    /// Same glyph sequence on every run
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// The final text
    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// What should be drawn this frame
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn config(&self) -> &ScrambleConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.ticks.is_some()
    }

    /// Characters already locked in
    pub fn revealed(&self) -> usize {
        match self.ticks {
            Some(ticks) => (ticks / self.config.ticks_per_char.max(1)) as usize,
            None => self.text.len(),
        }
    }

    /// Whether the real text is showing
    pub fn is_complete(&self) -> bool {
        self.ticks.is_none()
    }

    /// Begin a reveal; a reveal already in progress keeps going
    pub fn start(&mut self) {
        if self.ticks.is_none() {
            self.ticks = Some(0);
            self.pending = 0.0;
        }
    }

    /// Run one redraw
    pub fn step(&mut self) {
        let Some(ticks) = self.ticks.as_mut() else {
            return;
        };
        *ticks += 1;

        let revealed = self.revealed();
        if revealed >= self.text.len() {
            self.ticks = None;
            self.display = self.text();
            tracing::trace!(text = %self.display, "scramble resolved");
            return;
        }

        self.display.clear();
        for (index, &c) in self.text.iter().enumerate() {
            if index < revealed || c.is_whitespace() {
                self.display.push(c);
            } else {
                let glyph = self.alphabet[self.rng.random_range(0..self.alphabet.len())];
                self.display.push(glyph);
            }
        }
    }
}

impl Motion for TextScramble {
    fn handle_pointer(&mut self, event: PointerEvent) {
        if let PointerEvent::Enter(_) = event {
            self.start();
        }
    }

    fn tick(&mut self, dt: f32) {
        if self.ticks.is_none() {
            return;
        }
        let interval = self.config.tick_interval;
        if interval <= 0.0 {
            while self.ticks.is_some() {
                self.step();
            }
            return;
        }
        self.pending += dt.max(0.0);
        while self.pending >= interval && self.ticks.is_some() {
            self.pending -= interval;
            self.step();
        }
    }

    fn style(&self) -> MotionStyle {
        MotionStyle::NEUTRAL
    }
}

/// Letters of a headline that spring into place one after another
#[derive(Clone, Debug)]
pub struct AnimatedText {
    letters: Vec<Wrapped<char, Entrance>>,
}

/// Spring each letter of `text` up from 20px, starting after `delay`
///
/// Plays immediately on mount. Spaces are kept as non-breaking spaces so
/// the line keeps its word gaps while letters are laid out individually.
pub fn animated_text(text: &str, delay: f32) -> AnimatedText {
    let spring = SpringConfig::letter();
    let letters = text
        .chars()
        .enumerate()
        .map(|(index, c)| {
            let glyph = if c == ' ' { NBSP } else { c };
            let mut entrance = Entrance::new(
                [
                    Transition::spring(Property::Opacity, 0.0, 1.0, spring),
                    Transition::spring(Property::TranslateY, LETTER_RISE, 0.0, spring),
                ],
                EntranceGate::Parent,
            );
            entrance.start(delay.max(0.0) + LETTER_STAGGER * index as f32);
            Wrapped::new(glyph, entrance)
        })
        .collect();
    AnimatedText { letters }
}

impl AnimatedText {
    pub fn letters(&self) -> &[Wrapped<char, Entrance>] {
        &self.letters
    }

    /// Visual state of every letter; opacity overshoot is clamped
    pub fn letter_styles(&self) -> Vec<MotionStyle> {
        self.letters
            .iter()
            .map(|letter| {
                let mut style = letter.style();
                style.opacity = style.opacity.clamp(0.0, 1.0);
                style
            })
            .collect()
    }

    /// The displayed string, with spaces already made non-breaking
    pub fn glyphs(&self) -> String {
        self.letters.iter().map(|letter| *letter.content()).collect()
    }
}

impl Motion for AnimatedText {
    fn tick(&mut self, dt: f32) {
        for letter in &mut self.letters {
            letter.tick(dt);
        }
    }

    fn style(&self) -> MotionStyle {
        MotionStyle::NEUTRAL
    }
}

/// Typewriter reveal at a constant rate
#[derive(Clone, Debug)]
pub struct TypingText {
    text: String,
    char_count: usize,
    duration: f32,
    elapsed: f32,
}

/// Reveal `text` linearly over `len * speed_ms` milliseconds
pub fn typing_text(text: &str, speed_ms: f32) -> TypingText {
    let char_count = text.chars().count();
    TypingText {
        text: text.to_string(),
        char_count,
        duration: char_count as f32 * speed_ms.max(0.0) / 1000.0,
        elapsed: 0.0,
    }
}

impl TypingText {
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Fraction of the text width uncovered so far
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn visible_chars(&self) -> usize {
        ((self.progress() * self.char_count as f32).floor() as usize).min(self.char_count)
    }

    /// The uncovered prefix
    pub fn visible_text(&self) -> &str {
        match self.text.char_indices().nth(self.visible_chars()) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }
}

impl Motion for TypingText {
    fn tick(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    fn style(&self) -> MotionStyle {
        MotionStyle::NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::Point;

    fn is_scramble_glyph(c: char) -> bool {
        SCRAMBLE_ALPHABET.contains(c)
    }

    #[test]
    fn test_scramble_converges() {
        let mut scramble = hacker_text_scramble("HELLO").with_seed(42);
        assert_eq!(scramble.display(), "HELLO");

        scramble.handle_pointer(PointerEvent::Enter(Point::ZERO));
        assert!(scramble.is_running());

        let text: Vec<char> = "HELLO".chars().collect();
        for _ in 0..(5 * 3 - 1) {
            scramble.step();
            for (i, c) in scramble.display().chars().enumerate() {
                assert!(c == text[i] || is_scramble_glyph(c), "unexpected glyph {c:?}");
            }
        }
        assert!(!scramble.is_complete());

        scramble.step();
        assert_eq!(scramble.display(), "HELLO");
        assert!(scramble.is_complete());
    }

    #[test]
    fn test_scramble_reveals_left_to_right() {
        let mut scramble = hacker_text_scramble("ABCD").with_seed(7);
        scramble.start();
        for _ in 0..6 {
            scramble.step();
        }
        assert_eq!(scramble.revealed(), 2);
        assert!(scramble.display().starts_with("AB"));
    }

    #[test]
    fn test_scramble_keeps_whitespace() {
        let mut scramble = hacker_text_scramble("RUST DEV").with_seed(1);
        scramble.start();
        scramble.step();
        assert_eq!(scramble.display().chars().nth(4), Some(' '));
    }

    #[test]
    fn test_scramble_timing() {
        let mut scramble = hacker_text_scramble("HELLO");
        let duration = scramble.config().duration_for(5);
        assert!((duration - 0.45).abs() < 1e-6);

        scramble.handle_pointer(PointerEvent::Enter(Point::ZERO));
        for _ in 0..60 {
            scramble.tick(1.0 / 60.0);
        }
        assert_eq!(scramble.display(), "HELLO");
    }

    #[test]
    fn test_empty_scramble() {
        let mut scramble = hacker_text_scramble("");
        scramble.start();
        scramble.tick(1.0);
        assert!(scramble.is_complete());
        assert_eq!(scramble.display(), "");
    }

    #[test]
    fn test_animated_text_letters() {
        let mut headline = animated_text("Hi there", 0.2);
        assert_eq!(headline.letters().len(), 8);
        assert_eq!(headline.glyphs().chars().nth(2), Some(NBSP));

        let styles = headline.letter_styles();
        assert!(styles.iter().all(|s| s.opacity == 0.0 && s.translate_y == LETTER_RISE));

        headline.tick(0.2 + LETTER_STAGGER * 2.0);
        let styles = headline.letter_styles();
        assert!(styles[0].translate_y < styles[1].translate_y);
        assert_eq!(styles[7].translate_y, LETTER_RISE);

        headline.tick(3.0);
        for style in headline.letter_styles() {
            assert_eq!(style.opacity, 1.0);
            assert_eq!(style.translate_y, 0.0);
        }
    }

    #[test]
    fn test_typing_text() {
        let mut typing = typing_text("cargo", 50.0);
        assert!((typing.duration() - 0.25).abs() < 1e-6);
        assert_eq!(typing.visible_text(), "");

        typing.tick(0.11);
        assert_eq!(typing.visible_chars(), 2);
        assert_eq!(typing.visible_text(), "ca");

        typing.tick(1.0);
        assert_eq!(typing.visible_text(), "cargo");
    }
}
