use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

/// Signal broadcast when the server rejects the stored credential.
///
/// Zero payload: by the time an observer runs, the credential is already
/// gone and there is nothing else to say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    Unauthorized,
}

type Observer = Arc<dyn Fn(AuthEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    observers: Vec<(u64, Observer)>,
}

/// Process-wide publish/subscribe channel for [`AuthEvent`].
///
/// Decouples the request gateway (publisher) from any number of views
/// (subscribers): neither side knows about the other. Clones share one
/// observer list. Delivery is synchronous and in subscription order;
/// there is no queue, so observers not subscribed at publish time never
/// see the event.
#[derive(Clone, Default)]
pub struct AuthEventBus {
    inner: Arc<Mutex<Registry>>,
}

impl AuthEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        // A poisoned registry only means some observer panicked; the list
        // itself is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an observer. The returned handle deregisters it when
    /// dropped or explicitly unsubscribed.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(AuthEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.observers.push((id, Arc::new(observer)));
        Subscription {
            registry: Arc::clone(&self.inner),
            id,
        }
    }

    /// Deliver `event` to every current subscriber, in subscription order,
    /// then return.
    ///
    /// The observer list is snapshotted before delivery, so an observer may
    /// subscribe or unsubscribe from inside its callback. Observers must be
    /// idempotent: concurrent request failures may publish the same event
    /// more than once.
    pub fn publish(&self, event: AuthEvent) {
        let observers: Vec<Observer> = self
            .registry()
            .observers
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        debug!(?event, subscribers = observers.len(), "publishing auth event");
        for observer in observers {
            observer(event);
        }
    }
}

/// Handle tying an observer's registration to a scope.
///
/// Dropping the handle deregisters the observer, so a view that goes away
/// stops receiving events with it.
pub struct Subscription {
    registry: Arc<Mutex<Registry>>,
    id: u64,
}

impl Subscription {
    /// Deregister now instead of at drop.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut registry = self
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        registry.observers.retain(|(id, _)| *id != self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_in_subscription_order() {
        let bus = AuthEventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let seen = Arc::clone(&seen);
            bus.subscribe(move |_| seen.lock().unwrap().push("first"))
        };
        let second = {
            let seen = Arc::clone(&seen);
            bus.subscribe(move |_| seen.lock().unwrap().push("second"))
        };

        bus.publish(AuthEvent::Unauthorized);

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
        drop(first);
        drop(second);
    }

    #[test]
    fn each_subscriber_sees_each_publish_once() {
        let bus = AuthEventBus::new();
        let count = Arc::new(Mutex::new(0u32));

        let _subscription = {
            let count = Arc::clone(&count);
            bus.subscribe(move |_| *count.lock().unwrap() += 1)
        };

        bus.publish(AuthEvent::Unauthorized);
        bus.publish(AuthEvent::Unauthorized);

        assert_eq!(*count.lock().unwrap(), 2);
    }

    #[test]
    fn unsubscribed_observer_receives_nothing() {
        let bus = AuthEventBus::new();
        let count = Arc::new(Mutex::new(0u32));

        let subscription = {
            let count = Arc::clone(&count);
            bus.subscribe(move |_| *count.lock().unwrap() += 1)
        };
        subscription.unsubscribe();

        bus.publish(AuthEvent::Unauthorized);

        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn dropping_the_handle_deregisters() {
        let bus = AuthEventBus::new();
        let count = Arc::new(Mutex::new(0u32));

        {
            let count = Arc::clone(&count);
            let _subscription = bus.subscribe(move |_| *count.lock().unwrap() += 1);
        }

        bus.publish(AuthEvent::Unauthorized);

        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn late_subscriber_misses_earlier_publishes() {
        let bus = AuthEventBus::new();
        bus.publish(AuthEvent::Unauthorized);

        let count = Arc::new(Mutex::new(0u32));
        let _subscription = {
            let count = Arc::clone(&count);
            bus.subscribe(move |_| *count.lock().unwrap() += 1)
        };

        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn clones_share_the_observer_list() {
        let bus = AuthEventBus::new();
        let count = Arc::new(Mutex::new(0u32));

        let _subscription = {
            let count = Arc::clone(&count);
            bus.subscribe(move |_| *count.lock().unwrap() += 1)
        };

        bus.clone().publish(AuthEvent::Unauthorized);

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn observer_may_unsubscribe_reentrantly() {
        let bus = AuthEventBus::new();
        let parked = Arc::new(Mutex::new(None::<Subscription>));

        let inner = {
            let count = Arc::new(Mutex::new(0u32));
            bus.subscribe(move |_| *count.lock().unwrap() += 1)
        };
        *parked.lock().unwrap() = Some(inner);

        let _outer = {
            let parked = Arc::clone(&parked);
            bus.subscribe(move |_| {
                // Dropping another subscription mid-delivery must not deadlock
                parked.lock().unwrap().take();
            })
        };

        bus.publish(AuthEvent::Unauthorized);
        bus.publish(AuthEvent::Unauthorized);
    }

    #[test]
    fn publish_with_no_subscribers_is_a_noop() {
        let bus = AuthEventBus::new();
        bus.publish(AuthEvent::Unauthorized);
    }
}
