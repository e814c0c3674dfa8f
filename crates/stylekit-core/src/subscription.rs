//! Live accessibility settings with per-setting subscriptions.
//!
//! Native modules push change notifications; [`SettingsHub`] is where a host
//! bridge delivers them. The hub keeps the latest snapshot (so it can serve
//! as an [`AccessibilityInfo`]) and fans changes out to subscribers.
//!
//! # How it works
//!
//! 1. `subscribe(kind, callback)` registers a callback and returns a
//!    [`Subscription`] handle.
//! 2. `update(kind, value)` stores the new value and, if it changed, invokes
//!    every callback registered for `kind` with the new value.
//! 3. Dropping or cancelling the handle removes the callback.
//!
//! Callbacks run after the hub's locks are released, so a callback may read
//! the hub, subscribe, or update again. Changes are delivered in the order
//! they were stored: the first `update` to find delivery idle drains the
//! queue, and an `update` that arrives meanwhile (from another thread or from
//! inside a callback) only enqueues. Subscribers therefore always finish on
//! the stored value.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use ahash::AHashMap;

use crate::accessibility::{AccessibilityInfo, AccessibilityKind, AccessibilitySettings};
use crate::logging::{debug, trace};

/// Unique identifier for a subscription within one hub.
pub type SubId = u64;

type Callback = Arc<dyn Fn(Option<bool>) + Send + Sync>;

struct HubState {
    settings: AccessibilitySettings,
    pending: VecDeque<(AccessibilityKind, Option<bool>)>,
    draining: bool,
}

struct HubInner {
    state: Mutex<HubState>,
    listeners: Mutex<AHashMap<AccessibilityKind, Vec<(SubId, Callback)>>>,
    next_id: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl HubInner {
    fn remove(&self, kind: AccessibilityKind, id: SubId) {
        let mut listeners = lock(&self.listeners);
        if let Some(list) = listeners.get_mut(&kind) {
            list.retain(|(sub, _)| *sub != id);
            if list.is_empty() {
                listeners.remove(&kind);
            }
        }
    }
}

/// Hands delivery back if a callback panics mid-drain.
struct DrainGuard<'a>(&'a HubInner);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        lock(&self.0.state).draining = false;
    }
}

/// Latest accessibility settings plus change subscriptions.
///
/// Cloning a hub yields another handle to the same state.
#[derive(Clone)]
pub struct SettingsHub {
    inner: Arc<HubInner>,
}

impl SettingsHub {
    pub fn new(initial: AccessibilitySettings) -> Self {
        Self {
            inner: Arc::new(HubInner {
                state: Mutex::new(HubState {
                    settings: initial,
                    pending: VecDeque::new(),
                    draining: false,
                }),
                listeners: Mutex::new(AHashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Current settings.
    pub fn snapshot(&self) -> AccessibilitySettings {
        lock(&self.inner.state).settings
    }

    /// Replace every setting, notifying subscribers of each changed value.
    pub fn replace(&self, settings: AccessibilitySettings) {
        for kind in AccessibilityKind::ALL {
            self.update(kind, settings.get(kind));
        }
    }

    /// Store a new value for `kind`.
    ///
    /// Returns `true` when the value changed. Subscribers are notified before
    /// this returns unless another `update` is already delivering, in which
    /// case that call delivers this change after the ones queued before it.
    pub fn update(&self, kind: AccessibilityKind, value: Option<bool>) -> bool {
        {
            let mut state = lock(&self.inner.state);
            if state.settings.get(kind) == value {
                return false;
            }
            state.settings.set(kind, value);
            state.pending.push_back((kind, value));
            if state.draining {
                trace!(setting = kind.name(), "change queued behind delivery");
                return true;
            }
            state.draining = true;
        }

        let guard = DrainGuard(&self.inner);
        loop {
            let next = {
                let mut state = lock(&self.inner.state);
                let next = state.pending.pop_front();
                if next.is_none() {
                    // Released under the lock so no enqueued change is stranded.
                    state.draining = false;
                }
                next
            };
            let Some((kind, value)) = next else { break };
            self.notify(kind, value);
        }
        std::mem::forget(guard);
        true
    }

    fn notify(&self, kind: AccessibilityKind, value: Option<bool>) {
        let callbacks: Vec<Callback> = lock(&self.inner.listeners)
            .get(&kind)
            .map(|list| list.iter().map(|(_, cb)| Arc::clone(cb)).collect())
            .unwrap_or_default();

        debug!(
            setting = kind.name(),
            ?value,
            subscribers = callbacks.len(),
            "accessibility setting changed"
        );
        for callback in callbacks {
            callback(value);
        }
    }

    /// Register `callback` for changes to `kind`.
    pub fn subscribe<F>(&self, kind: AccessibilityKind, callback: F) -> Subscription
    where
        F: Fn(Option<bool>) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.listeners)
            .entry(kind)
            .or_default()
            .push((id, Arc::new(callback)));
        trace!(setting = kind.name(), id, "subscribed");
        Subscription {
            id,
            kind,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Number of live subscriptions for `kind`.
    pub fn subscriber_count(&self, kind: AccessibilityKind) -> usize {
        lock(&self.inner.listeners).get(&kind).map_or(0, Vec::len)
    }

    /// Drop every subscription. Outstanding handles become inert.
    pub fn remove_all_listeners(&self) {
        lock(&self.inner.listeners).clear();
    }
}

impl Default for SettingsHub {
    fn default() -> Self {
        Self::new(AccessibilitySettings::default())
    }
}

impl std::fmt::Debug for SettingsHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsHub")
            .field("settings", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl AccessibilityInfo for SettingsHub {
    fn all_settings(&self) -> AccessibilitySettings {
        self.snapshot()
    }
}

/// Handle for one registered callback. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    id: SubId,
    kind: AccessibilityKind,
    hub: Weak<HubInner>,
}

impl Subscription {
    pub fn id(&self) -> SubId {
        self.id
    }

    pub fn kind(&self) -> AccessibilityKind {
        self.kind
    }

    /// Unsubscribe now.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.remove(self.kind, self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn(Option<bool>) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn update_notifies_matching_subscribers_only() {
        let hub = SettingsHub::default();
        let (motion, on_motion) = counter();
        let (gray, on_gray) = counter();
        let _a = hub.subscribe(AccessibilityKind::ReduceMotion, on_motion);
        let _b = hub.subscribe(AccessibilityKind::Grayscale, on_gray);

        assert!(hub.update(AccessibilityKind::ReduceMotion, Some(true)));
        assert_eq!(motion.load(Ordering::SeqCst), 1);
        assert_eq!(gray.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unchanged_value_does_not_notify() {
        let hub = SettingsHub::new(
            AccessibilitySettings::default().with(AccessibilityKind::BoldText, Some(true)),
        );
        let (count, cb) = counter();
        let _sub = hub.subscribe(AccessibilityKind::BoldText, cb);
        assert!(!hub.update(AccessibilityKind::BoldText, Some(true)));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn callback_receives_new_value() {
        let hub = SettingsHub::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = hub.subscribe(AccessibilityKind::Grayscale, move |v| {
            sink.lock().unwrap().push(v);
        });
        hub.update(AccessibilityKind::Grayscale, Some(true));
        hub.update(AccessibilityKind::Grayscale, None);
        assert_eq!(*seen.lock().unwrap(), vec![Some(true), None]);
    }

    #[test]
    fn dropping_handle_unsubscribes() {
        let hub = SettingsHub::default();
        let (count, cb) = counter();
        let sub = hub.subscribe(AccessibilityKind::VoiceOver, cb);
        assert_eq!(hub.subscriber_count(AccessibilityKind::VoiceOver), 1);
        sub.cancel();
        assert_eq!(hub.subscriber_count(AccessibilityKind::VoiceOver), 0);
        hub.update(AccessibilityKind::VoiceOver, Some(true));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn handle_outliving_hub_is_inert() {
        let hub = SettingsHub::default();
        let (_count, cb) = counter();
        let sub = hub.subscribe(AccessibilityKind::MonoAudio, cb);
        drop(hub);
        drop(sub);
    }

    #[test]
    fn remove_all_listeners_clears_every_kind() {
        let hub = SettingsHub::default();
        let (_c1, cb1) = counter();
        let (_c2, cb2) = counter();
        let _a = hub.subscribe(AccessibilityKind::ReduceMotion, cb1);
        let _b = hub.subscribe(AccessibilityKind::Grayscale, cb2);
        hub.remove_all_listeners();
        assert_eq!(hub.subscriber_count(AccessibilityKind::ReduceMotion), 0);
        assert_eq!(hub.subscriber_count(AccessibilityKind::Grayscale), 0);
    }

    #[test]
    fn replace_notifies_only_changed_kinds() {
        let hub = SettingsHub::default();
        let (motion, on_motion) = counter();
        let (bold, on_bold) = counter();
        let _a = hub.subscribe(AccessibilityKind::ReduceMotion, on_motion);
        let _b = hub.subscribe(AccessibilityKind::BoldText, on_bold);

        hub.replace(
            AccessibilitySettings::default().with(AccessibilityKind::ReduceMotion, Some(false)),
        );
        assert_eq!(motion.load(Ordering::SeqCst), 1);
        assert_eq!(bold.load(Ordering::SeqCst), 0);
        assert_eq!(
            hub.all_settings().get(AccessibilityKind::ReduceMotion),
            Some(false)
        );
    }

    #[test]
    fn callback_may_reenter_hub() {
        let hub = SettingsHub::default();
        let inner = hub.clone();
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let _sub = hub.subscribe(AccessibilityKind::InvertColors, move |_| {
            *sink.lock().unwrap() = Some(inner.snapshot().is_invert_colors_enabled);
        });
        hub.update(AccessibilityKind::InvertColors, Some(true));
        assert_eq!(*seen.lock().unwrap(), Some(Some(true)));
    }

    #[test]
    fn update_from_callback_is_delivered_after_current_change() {
        let hub = SettingsHub::default();
        let inner = hub.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = hub.subscribe(AccessibilityKind::Grayscale, move |v| {
            sink.lock().unwrap().push(v);
            if v == Some(true) {
                inner.update(AccessibilityKind::Grayscale, Some(false));
            }
        });

        assert!(hub.update(AccessibilityKind::Grayscale, Some(true)));
        assert_eq!(*seen.lock().unwrap(), vec![Some(true), Some(false)]);
        assert_eq!(hub.snapshot().get(AccessibilityKind::Grayscale), Some(false));
    }

    #[test]
    fn concurrent_updates_leave_subscribers_on_stored_value() {
        let hub = SettingsHub::default();
        let last = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&last);
        let _sub = hub.subscribe(AccessibilityKind::ReduceMotion, move |v| {
            *sink.lock().unwrap() = Some(v);
        });

        let workers: Vec<_> = (0..8)
            .map(|t| {
                let hub = hub.clone();
                std::thread::spawn(move || {
                    for i in 0..200 {
                        let value = match (t + i) % 3 {
                            0 => Some(true),
                            1 => Some(false),
                            _ => None,
                        };
                        hub.update(AccessibilityKind::ReduceMotion, value);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let stored = hub.snapshot().get(AccessibilityKind::ReduceMotion);
        if let Some(delivered) = *last.lock().unwrap() {
            assert_eq!(delivered, stored);
        } else {
            assert_eq!(stored, None);
        }
    }
}
