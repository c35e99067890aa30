//! Viewport observation capability.
//!
//! The environment (terminal loop, egui frame, JS host) owns the real
//! scroll position; it pushes `Viewport` snapshots into a [`ViewportHub`]
//! and the tracker and reveal controllers react. Tests drive the same hub
//! with synthetic geometry, so nothing here touches a rendering surface.

pub mod reveal;
pub mod scroll;

pub use reveal::{RevealController, RevealFrame, RevealState};
pub use scroll::ScrollTracker;

use std::sync::{Arc, Mutex, Weak};

use folio_protocol::Viewport;

type Callback = Box<dyn FnMut(Viewport) + Send>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
    /// True while `emit` runs callbacks with the list swapped out.
    dispatching: bool,
    /// Ids unsubscribed from inside a callback, applied after dispatch.
    dropped_mid_emit: Vec<u64>,
}

/// Fan-out point for viewport change notifications.
///
/// Delivery is synchronous and in subscription order, on whichever thread
/// calls [`ViewportHub::emit`] — there is one cooperative event queue, not
/// a thread pool. `Send` bounds exist only so front ends can hand the hub
/// to a background thread for teardown.
#[derive(Clone, Default)]
pub struct ViewportHub {
    inner: Arc<Mutex<HubInner>>,
}

impl ViewportHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; it fires on every subsequent [`emit`] until
    /// the returned [`Subscription`] is dropped.
    ///
    /// [`emit`]: ViewportHub::emit
    #[must_use = "dropping the Subscription immediately unsubscribes"]
    pub fn subscribe(&self, callback: impl FnMut(Viewport) + Send + 'static) -> Subscription {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Box::new(callback)));
        Subscription {
            id,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver a viewport snapshot to every live subscriber, in
    /// subscription order. No coalescing: one emit, one delivery each.
    ///
    /// The subscriber list is swapped out before dispatch so callbacks run
    /// without the hub lock held — a one-shot callback may drop its own
    /// [`Subscription`] (or subscribe a new one) mid-delivery.
    pub fn emit(&self, viewport: Viewport) {
        let mut active = {
            let mut inner = self.lock();
            inner.dispatching = true;
            std::mem::take(&mut inner.subscribers)
        };

        for (_, callback) in &mut active {
            callback(viewport);
        }

        let mut inner = self.lock();
        inner.dispatching = false;
        let dropped = std::mem::take(&mut inner.dropped_mid_emit);
        active.retain(|(id, _)| !dropped.contains(id));
        // Subscriptions made during dispatch landed in `inner.subscribers`;
        // appending them keeps the list ordered by subscription time.
        let added = std::mem::take(&mut inner.subscribers);
        active.extend(added);
        inner.subscribers = active;
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HubInner> {
        // Callbacks are plain closures; a panic inside one still leaves
        // the subscriber list structurally intact.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// RAII guard for a hub subscription. Dropping it unsubscribes; if the
/// hub itself is already gone, dropping is a no-op.
pub struct Subscription {
    id: u64,
    hub: Weak<Mutex<HubInner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            let mut inner = hub.lock().unwrap_or_else(|e| e.into_inner());
            inner.subscribers.retain(|(id, _)| *id != self.id);
            // During dispatch this entry lives in emit's swapped-out list;
            // record the id so the merge drops it.
            if inner.dispatching {
                inner.dropped_mid_emit.push(self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp(y: f64) -> Viewport {
        Viewport::new(y, 800.0, 600.0)
    }

    #[test]
    fn emit_reaches_subscribers_in_order() {
        let hub = ViewportHub::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s1 = seen.clone();
        let _a = hub.subscribe(move |v| s1.lock().unwrap().push(("a", v.y)));
        let s2 = seen.clone();
        let _b = hub.subscribe(move |v| s2.lock().unwrap().push(("b", v.y)));

        hub.emit(vp(10.0));
        hub.emit(vp(20.0));

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![("a", 10.0), ("b", 10.0), ("a", 20.0), ("b", 20.0)]
        );
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let hub = ViewportHub::new();
        let count = Arc::new(Mutex::new(0u32));

        let c = count.clone();
        let sub = hub.subscribe(move |_| *c.lock().unwrap() += 1);
        hub.emit(vp(0.0));
        assert_eq!(hub.subscriber_count(), 1);

        drop(sub);
        assert_eq!(hub.subscriber_count(), 0);
        hub.emit(vp(100.0));
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn callback_may_drop_its_own_subscription_during_emit() {
        // One-shot wiring: the callback tears its subscription down the
        // first time it fires, from inside the delivery.
        let hub = ViewportHub::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let fired = Arc::new(Mutex::new(0u32));

        let s = slot.clone();
        let f = fired.clone();
        let sub = hub.subscribe(move |_| {
            *f.lock().unwrap() += 1;
            s.lock().unwrap().take();
        });
        *slot.lock().unwrap() = Some(sub);

        hub.emit(vp(0.0));
        assert_eq!(hub.subscriber_count(), 0);

        hub.emit(vp(10.0));
        assert_eq!(*fired.lock().unwrap(), 1);
    }

    #[test]
    fn callback_may_subscribe_during_emit() {
        let hub = ViewportHub::new();
        let late = Arc::new(Mutex::new(Vec::new()));

        let h = hub.clone();
        let l = late.clone();
        let keep = Arc::new(Mutex::new(Vec::new()));
        let k = keep.clone();
        let _sub = hub.subscribe(move |v| {
            let l = l.clone();
            let new = h.subscribe(move |v| l.lock().unwrap().push(v.y));
            k.lock().unwrap().push(new);
            // The new subscriber sees later emits, not this one.
        });

        hub.emit(vp(1.0));
        assert!(late.lock().unwrap().is_empty());
        assert_eq!(hub.subscriber_count(), 2);

        hub.emit(vp(2.0));
        assert_eq!(*late.lock().unwrap(), vec![2.0]);
    }

    #[test]
    fn subscription_outliving_hub_is_harmless() {
        let hub = ViewportHub::new();
        let sub = hub.subscribe(|_| {});
        drop(hub);
        drop(sub);
    }
}
