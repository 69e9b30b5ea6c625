use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use super::{AuthEvent, AuthEventBus, CredentialStore, Subscription};

/// Where a guard sends the user when the session dies.
///
/// The redirect replaces the current view rather than stacking on top of
/// it, so back-navigation cannot return to the stale protected view.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Guard state as observed by the wrapped view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Authorized,
    Unauthorized,
}

/// Reactive wrapper around a protected view.
///
/// The initial state comes from the credential store at mount. Receiving
/// [`AuthEvent::Unauthorized`] while mounted demotes the guard and issues
/// exactly one redirect to the login view; the transition is one-way for
/// the guard's lifetime, so re-entering `Authorized` takes a fresh mount
/// after re-login. Dropping the guard ends its subscription, so events
/// after teardown have no effect.
pub struct RouteGuard {
    authorized: Arc<AtomicBool>,
    _subscription: Subscription,
}

impl RouteGuard {
    /// Mount a guard over a protected view. Mounting without a stored
    /// credential issues the redirect immediately.
    pub fn mount(
        store: &CredentialStore,
        bus: &AuthEventBus,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let authorized = Arc::new(AtomicBool::new(store.is_present()));

        let flag = Arc::clone(&authorized);
        let observer_navigator = Arc::clone(&navigator);
        let subscription = bus.subscribe(move |event| {
            let AuthEvent::Unauthorized = event;
            // One-way: only the first delivery observes `true` here, so a
            // repeated event cannot redirect twice.
            if flag.swap(false, Ordering::SeqCst) {
                debug!("credential invalidated, demoting protected view");
                observer_navigator.redirect_to_login();
            }
        });

        if !authorized.load(Ordering::SeqCst) {
            debug!("mounted without credential, redirecting to login");
            navigator.redirect_to_login();
        }

        Self {
            authorized,
            _subscription: subscription,
        }
    }

    pub fn state(&self) -> GuardState {
        if self.is_authorized() {
            GuardState::Authorized
        } else {
            GuardState::Unauthorized
        }
    }

    /// Whether the wrapped view may render.
    pub fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }
}
