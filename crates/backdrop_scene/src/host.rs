//! Frame and pointer delivery
//!
//! The embedding application owns a [`FrameHost`] and forwards its render
//! loop and pointer events into it. A [`MountedScene`] registers one
//! listener of each kind on mount and releases both when dropped, so an
//! unmounted scene never receives another event.
//!
//! ```ignore
//! let host = FrameHost::new();
//! let mounted = MountedScene::mount(&host, &SceneConfig::cyber())?;
//!
//! host.emit_pointer(PointerNdc::from_window(cursor, width, height));
//! host.emit_frame(clock.elapsed_secs());
//!
//! drop(mounted); // listeners released
//! ```

use crate::config::SceneConfig;
use crate::error::Result;
use crate::scene::{build_scene, FrameSnapshot, Scene};
use backdrop_core::PointerNdc;
use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

new_key_type! {
    /// Handle to a registered host listener
    pub struct ListenerId;
}

type FrameCallback = Rc<RefCell<dyn FnMut(f32)>>;
type PointerCallback = Rc<RefCell<dyn FnMut(PointerNdc)>>;

#[derive(Clone)]
enum Listener {
    Frame(FrameCallback),
    Pointer(PointerCallback),
}

struct HostInner {
    listeners: SlotMap<ListenerId, Listener>,
}

/// Single-threaded event source for frames and pointer moves
///
/// Listeners may register or drop subscriptions while an event is being
/// delivered; such changes apply from the next event on.
pub struct FrameHost {
    inner: Rc<RefCell<HostInner>>,
}

impl Default for FrameHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHost {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HostInner {
                listeners: SlotMap::with_key(),
            })),
        }
    }

    /// Call `callback` with the elapsed seconds of every frame
    pub fn on_frame(&self, callback: impl FnMut(f32) + 'static) -> Subscription {
        self.register(Listener::Frame(Rc::new(RefCell::new(callback))))
    }

    /// Call `callback` with every pointer position
    pub fn on_pointer(&self, callback: impl FnMut(PointerNdc) + 'static) -> Subscription {
        self.register(Listener::Pointer(Rc::new(RefCell::new(callback))))
    }

    fn register(&self, listener: Listener) -> Subscription {
        let id = self.inner.borrow_mut().listeners.insert(listener);
        tracing::debug!(?id, "listener registered");
        Subscription {
            host: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver a frame to every frame listener
    pub fn emit_frame(&self, elapsed: f32) {
        for listener in self.snapshot() {
            if let Listener::Frame(callback) = listener {
                // A listener that re-enters the host does not see its own event
                if let Ok(mut callback) = callback.try_borrow_mut() {
                    (&mut *callback)(elapsed);
                }
            }
        }
    }

    /// Deliver a pointer move to every pointer listener
    pub fn emit_pointer(&self, pointer: PointerNdc) {
        for listener in self.snapshot() {
            if let Listener::Pointer(callback) = listener {
                if let Ok(mut callback) = callback.try_borrow_mut() {
                    (&mut *callback)(pointer);
                }
            }
        }
    }

    /// Number of live subscriptions of either kind
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn snapshot(&self) -> Vec<Listener> {
        self.inner.borrow().listeners.values().cloned().collect()
    }
}

/// Registration guard; the listener is removed when this is dropped
#[must_use = "dropping a subscription unregisters its listener"]
pub struct Subscription {
    host: Weak<RefCell<HostInner>>,
    id: ListenerId,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the host is alive and still holds this listener
    pub fn is_active(&self) -> bool {
        self.host
            .upgrade()
            .is_some_and(|inner| inner.borrow().listeners.contains_key(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.host.upgrade() {
            if let Ok(mut inner) = inner.try_borrow_mut() {
                inner.listeners.remove(self.id);
                tracing::debug!(id = ?self.id, "listener released");
            }
        }
    }
}

struct MountState {
    scene: Scene,
    pointer: Option<PointerNdc>,
}

/// A scene wired to a host for as long as it lives
///
/// Pointer events only record the latest position; the frame listener ticks
/// the scene with it.
pub struct MountedScene {
    state: Rc<RefCell<MountState>>,
    _frame: Subscription,
    _pointer: Subscription,
}

impl MountedScene {
    /// Build the scene from `config` and subscribe it to `host`
    pub fn mount(host: &FrameHost, config: &SceneConfig) -> Result<Self> {
        let scene = build_scene(config)?;
        let seed = scene.seed();
        let state = Rc::new(RefCell::new(MountState {
            scene,
            pointer: None,
        }));

        let frame = {
            let state = Rc::clone(&state);
            host.on_frame(move |elapsed| {
                if let Ok(mut state) = state.try_borrow_mut() {
                    let pointer = state.pointer;
                    state.scene.tick(elapsed, pointer);
                }
            })
        };
        let pointer = {
            let state = Rc::clone(&state);
            host.on_pointer(move |ndc| {
                if let Ok(mut state) = state.try_borrow_mut() {
                    state.pointer = Some(ndc);
                }
            })
        };

        tracing::debug!(seed, "scene mounted");
        Ok(Self {
            state,
            _frame: frame,
            _pointer: pointer,
        })
    }

    /// Run `f` against the scene
    pub fn with_scene<R>(&self, f: impl FnOnce(&Scene) -> R) -> R {
        f(&self.state.borrow().scene)
    }

    /// Run `f` against the scene mutably
    pub fn with_scene_mut<R>(&self, f: impl FnOnce(&mut Scene) -> R) -> R {
        f(&mut self.state.borrow_mut().scene)
    }

    /// Latest pointer position received
    pub fn pointer(&self) -> Option<PointerNdc> {
        self.state.borrow().pointer
    }

    pub fn set_viewport(&self, width: f32, height: f32) {
        self.state.borrow_mut().scene.set_viewport(width, height);
    }

    pub fn frame(&self) -> FrameSnapshot {
        self.state.borrow().scene.frame()
    }
}

impl Drop for MountedScene {
    fn drop(&mut self) {
        let frames = self.state.try_borrow().map_or(0, |s| s.scene.frame_count());
        tracing::debug!(frames, "scene unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_subscription_drop_unregisters() {
        let host = FrameHost::new();
        let hits = Rc::new(Cell::new(0));

        let sub = {
            let hits = Rc::clone(&hits);
            host.on_frame(move |_| hits.set(hits.get() + 1))
        };
        assert!(sub.is_active());
        host.emit_frame(0.1);
        host.emit_frame(0.2);
        assert_eq!(hits.get(), 2);

        drop(sub);
        host.emit_frame(0.3);
        assert_eq!(hits.get(), 2);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_events_routed_by_kind() {
        let host = FrameHost::new();
        let frames = Rc::new(Cell::new(0));
        let pointers = Rc::new(Cell::new(0));

        let _f = {
            let frames = Rc::clone(&frames);
            host.on_frame(move |_| frames.set(frames.get() + 1))
        };
        let _p = {
            let pointers = Rc::clone(&pointers);
            host.on_pointer(move |_| pointers.set(pointers.get() + 1))
        };

        host.emit_pointer(PointerNdc::CENTER);
        assert_eq!((frames.get(), pointers.get()), (0, 1));
        host.emit_frame(1.0);
        assert_eq!((frames.get(), pointers.get()), (1, 1));
    }

    #[test]
    fn test_unsubscribe_during_delivery() {
        let host = FrameHost::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let sub = {
            let slot = Rc::clone(&slot);
            let hits = Rc::clone(&hits);
            host.on_frame(move |_| {
                hits.set(hits.get() + 1);
                slot.borrow_mut().take();
            })
        };
        *slot.borrow_mut() = Some(sub);

        host.emit_frame(0.0);
        host.emit_frame(0.1);
        assert_eq!(hits.get(), 1);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_subscription_outlives_host() {
        let host = FrameHost::new();
        let sub = host.on_frame(|_| {});
        drop(host);
        assert!(!sub.is_active());
        drop(sub);
    }

    #[test]
    fn test_mounted_scene_follows_pointer() {
        let host = FrameHost::new();
        let mounted = MountedScene::mount(&host, &SceneConfig::minimal().with_seed(4)).unwrap();
        assert_eq!(host.listener_count(), 2);

        host.emit_pointer(PointerNdc::new(1.0, 1.0));
        assert_eq!(mounted.pointer(), Some(PointerNdc::new(1.0, 1.0)));

        let before = mounted.with_scene(|s| s.particle_systems()[0].particles()[0].position);
        for i in 0..30 {
            host.emit_frame(i as f32 / 60.0);
        }
        let after = mounted.with_scene(|s| s.particle_systems()[0].particles()[0].position);
        assert!(after.x > before.x);
        assert!(after.y > before.y);
        assert_eq!(mounted.with_scene(Scene::frame_count), 30);

        drop(mounted);
        assert_eq!(host.listener_count(), 0);
    }
}
