//! A single mutable value that broadcasts changes to its subscribers.
//!
//! Late subscribers are replayed the current value synchronously when they
//! subscribe. Notification is synchronous and in subscription order; a
//! subscriber removed during a broadcast is skipped for the rest of it, and
//! a subscriber that panics is logged without stopping the others.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tracing::error;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: Option<T>,
    subscribers: Vec<(u64, Callback<T>)>,
    next_id: u64,
}

/// Removal side of a subscription, erased over the value type.
trait Detach: Send + Sync {
    fn detach(&self, id: u64);
}

impl<T: Send> Detach for Mutex<Inner<T>> {
    fn detach(&self, id: u64) {
        let mut inner = self.lock().unwrap_or_else(|e| e.into_inner());
        inner.subscribers.retain(|(sid, _)| *sid != id);
    }
}

/// Observable slot holding at most one value of `T`.
///
/// Cloning yields another handle to the same slot.
pub struct ObservableValue<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for ObservableValue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("ObservableValue")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T> ObservableValue<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    pub fn with_value(value: T) -> Self {
        Self::from_option(Some(value))
    }

    pub fn with_no_value() -> Self {
        Self::from_option(None)
    }

    fn from_option(value: Option<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value,
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store `value` and notify subscribers.
    ///
    /// Subscribers are skipped only when a value was already set, it equals
    /// `value`, and `force` is false.
    pub fn assign_and_signal(&self, value: T, force: bool) {
        let subscribers = {
            let mut inner = self.lock();
            let changed = inner.value.as_ref() != Some(&value);
            inner.value = Some(value.clone());
            if !changed && !force {
                return;
            }
            inner.subscribers.clone()
        };

        for (id, callback) in subscribers {
            // Membership is re-checked so that unsubscribing mid-broadcast
            // takes effect immediately.
            if !self.is_subscribed(id) {
                continue;
            }
            invoke(id, &callback, &value);
        }
    }

    /// Register `on_change`. If a value is already set it is delivered
    /// before this returns.
    pub fn subscribe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(on_change);
        let (id, current) = {
            let mut inner = self.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, Arc::clone(&callback)));
            (id, inner.value.clone())
        };

        if let Some(value) = current {
            invoke(id, &callback, &value);
        }

        let source: Weak<dyn Detach> = Arc::downgrade(&self.inner) as Weak<dyn Detach>;
        Subscription { id, source }
    }

    pub fn get_current_value(&self) -> Option<T> {
        self.lock().value.clone()
    }

    pub fn has_value(&self) -> bool {
        self.lock().value.is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.lock().subscribers.iter().any(|(sid, _)| *sid == id)
    }
}

fn invoke<T>(id: u64, callback: &Callback<T>, value: &T) {
    if panic::catch_unwind(AssertUnwindSafe(|| callback(value))).is_err() {
        error!(subscriber = id, "observable subscriber panicked during notification");
    }
}

/// Handle returned by [`ObservableValue::subscribe`].
pub struct Subscription {
    id: u64,
    source: Weak<dyn Detach>,
}

impl Subscription {
    /// Stop receiving notifications. Safe to call from inside a callback
    /// and more than once.
    pub fn unsubscribe(&self) {
        if let Some(source) = self.source.upgrade() {
            source.detach(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    fn recorder<T: Clone + Send + 'static>() -> (Arc<StdMutex<Vec<T>>>, impl Fn(&T) + Send + Sync) {
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |v: &T| sink.lock().unwrap().push(v.clone()))
    }

    #[test]
    fn with_no_value_is_unset() {
        let obs = ObservableValue::<u32>::with_no_value();
        assert!(!obs.has_value());
        assert_eq!(obs.get_current_value(), None);
    }

    #[test]
    fn subscribe_replays_current_value_once() {
        let obs = ObservableValue::with_value(7u32);
        let (seen, cb) = recorder();
        let _sub = obs.subscribe(cb);
        assert_eq!(*seen.lock().unwrap(), vec![7]);

        // Equal value without force does not re-notify.
        obs.assign_and_signal(7, false);
        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }

    #[test]
    fn subscribe_without_value_is_silent_until_first_assign() {
        let obs = ObservableValue::<u32>::with_no_value();
        let (seen, cb) = recorder();
        let _sub = obs.subscribe(cb);
        assert!(seen.lock().unwrap().is_empty());

        obs.assign_and_signal(1, false);
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn first_assignment_signals_even_for_default_like_value() {
        let obs = ObservableValue::<bool>::with_no_value();
        let (seen, cb) = recorder();
        let _sub = obs.subscribe(cb);
        obs.assign_and_signal(false, false);
        assert_eq!(*seen.lock().unwrap(), vec![false]);
    }

    #[test]
    fn force_notifies_equal_value() {
        let obs = ObservableValue::with_value("a".to_string());
        let (seen, cb) = recorder();
        let _sub = obs.subscribe(cb);
        obs.assign_and_signal("a".to_string(), true);
        assert_eq!(*seen.lock().unwrap(), vec!["a".to_string(), "a".to_string()]);
    }

    #[test]
    fn notifies_in_subscription_order() {
        let obs = ObservableValue::<u32>::with_no_value();
        let order = Arc::new(StdMutex::new(Vec::new()));
        let subs: Vec<Subscription> = (0..3)
            .map(|i| {
                let order = Arc::clone(&order);
                obs.subscribe(move |_| order.lock().unwrap().push(i))
            })
            .collect();
        obs.assign_and_signal(5, false);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(subs.len(), 3);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let obs = ObservableValue::<u32>::with_no_value();
        let (seen, cb) = recorder();
        let sub = obs.subscribe(cb);
        obs.assign_and_signal(1, false);
        sub.unsubscribe();
        sub.unsubscribe();
        obs.assign_and_signal(2, false);
        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn unsubscribe_during_broadcast_skips_later_subscriber() {
        let obs = ObservableValue::<u32>::with_no_value();
        let second: Arc<StdMutex<Option<Subscription>>> = Arc::new(StdMutex::new(None));

        let to_remove = Arc::clone(&second);
        let _first = obs.subscribe(move |_| {
            if let Some(sub) = to_remove.lock().unwrap().as_ref() {
                sub.unsubscribe();
            }
        });

        let (seen, cb) = recorder();
        *second.lock().unwrap() = Some(obs.subscribe(cb));

        obs.assign_and_signal(3, false);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn panicking_subscriber_does_not_stop_others() {
        let obs = ObservableValue::<u32>::with_no_value();
        let _bad = obs.subscribe(|_| panic!("subscriber failure"));
        let (seen, cb) = recorder();
        let _good = obs.subscribe(cb);

        obs.assign_and_signal(9, false);
        assert_eq!(*seen.lock().unwrap(), vec![9]);
        assert_eq!(obs.get_current_value(), Some(9));
    }

    #[test]
    fn subscriber_may_reassign_without_deadlock() {
        let obs = ObservableValue::<u32>::with_no_value();
        let handle = obs.clone();
        let _sub = obs.subscribe(move |v| {
            if *v == 1 {
                handle.assign_and_signal(2, false);
            }
        });
        obs.assign_and_signal(1, false);
        assert_eq!(obs.get_current_value(), Some(2));
    }

    #[test]
    fn clones_share_the_slot() {
        let obs = ObservableValue::<u32>::with_no_value();
        let other = obs.clone();
        other.assign_and_signal(4, false);
        assert_eq!(obs.get_current_value(), Some(4));
    }
}
