//! Staggered list entrances
//!
//! A container owns one viewport trigger; when it fires each item starts its
//! own entrance offset by `index * stagger_delay`.

use crate::easing::Easing;
use crate::motion::{Entrance, EntranceGate, Motion, Wrapped};
use crate::transition::{MotionStyle, Property, Transition};
use crate::visibility::{TriggerEdge, VisibilityTrigger};

/// Distance in pixels each item rises from
pub const ITEM_RISE: f32 = 20.0;
/// Per-item entrance duration in seconds
pub const ITEM_DURATION: f32 = 0.5;

/// Order in which items are started
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaggerDirection {
    /// First to last
    #[default]
    Forward,
    /// Last to first
    Reverse,
    /// Center outward
    FromCenter,
}

/// Configuration for [`stagger_container`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaggerConfig {
    /// Seconds between consecutive item starts
    pub stagger_delay: f32,
    pub direction: StaggerDirection,
    /// Cap the offset at this many steps so long lists don't lag behind
    pub limit: Option<usize>,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl StaggerConfig {
    pub fn new(stagger_delay: f32) -> Self {
        Self {
            stagger_delay: stagger_delay.max(0.0),
            direction: StaggerDirection::Forward,
            limit: None,
        }
    }

    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Start offset in seconds for the item at `index` of `total`
    pub fn delay_for_index(&self, index: usize, total: usize) -> f32 {
        let steps = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerDirection::FromCenter => index.abs_diff(total / 2),
        };
        let steps = self.limit.map_or(steps, |limit| steps.min(limit));
        self.stagger_delay * steps as f32
    }
}

/// A child whose entrance is started by its container
pub type StaggerItem<C> = Wrapped<C, Entrance>;

/// Wrap a child so a [`StaggerContainer`] can start it
pub fn stagger_item<C>(child: C) -> StaggerItem<C> {
    let tween = |property, from, to| Transition::tween(property, from, to, ITEM_DURATION, Easing::SMOOTH_OUT);
    Wrapped::new(
        child,
        Entrance::new(
            [
                tween(Property::Opacity, 0.0, 1.0),
                tween(Property::TranslateY, ITEM_RISE, 0.0),
            ],
            EntranceGate::Parent,
        ),
    )
}

/// A list of items that enter one after another
#[derive(Clone, Debug)]
pub struct StaggerContainer<C> {
    items: Vec<StaggerItem<C>>,
    config: StaggerConfig,
    trigger: VisibilityTrigger,
}

/// Group `children` so they enter in sequence on first entry
pub fn stagger_container<C>(
    children: impl IntoIterator<Item = StaggerItem<C>>,
    config: StaggerConfig,
) -> StaggerContainer<C> {
    StaggerContainer {
        items: children.into_iter().collect(),
        config,
        trigger: VisibilityTrigger::once(),
    }
}

impl<C> StaggerContainer<C> {
    pub fn items(&self) -> &[StaggerItem<C>] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [StaggerItem<C>] {
        &mut self.items
    }

    pub fn config(&self) -> &StaggerConfig {
        &self.config
    }

    /// Style of the item at `index`
    pub fn item_style(&self, index: usize) -> Option<MotionStyle> {
        self.items.get(index).map(|item| item.style())
    }
}

impl<C> Motion for StaggerContainer<C> {
    fn handle_pointer(&mut self, event: backdrop_core::PointerEvent) {
        for item in &mut self.items {
            item.handle_pointer(event);
        }
    }

    fn set_visible(&mut self, visible: bool) {
        if self.trigger.observe(visible) == TriggerEdge::Fired {
            let total = self.items.len();
            tracing::debug!(items = total, "stagger container entered viewport");
            for (index, item) in self.items.iter_mut().enumerate() {
                let lead_in = self.config.delay_for_index(index, total);
                item.motion_mut().start(lead_in);
            }
        }
    }

    fn tick(&mut self, dt: f32) {
        for item in &mut self.items {
            item.tick(dt);
        }
    }

    /// The container itself does not move
    fn style(&self) -> MotionStyle {
        MotionStyle::NEUTRAL
    }
}
