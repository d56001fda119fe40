use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::auth::{Authenticator, Credentials, Registration, SessionError, SessionUser};
use super::screens::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SubscriptionId(u64);

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Value with change notification.
///
/// Listeners receive the current value on subscribe and every value passed to [`Observable::set`].
/// Deliveries are serialized, so every listener sees changes in the order they were stored and
/// exactly once. Listeners run on the caller's thread outside the value and listener locks: they
/// may read the observable or unsubscribe, but must not call `set` or `subscribe` on it.
pub struct Observable<T> {
    value: RwLock<T>,
    listeners: Mutex<Vec<(SubscriptionId, Listener<T>)>>,
    delivery: Mutex<()>,
    next_id: AtomicU64,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: RwLock::new(initial),
            listeners: Mutex::new(Vec::new()),
            delivery: Mutex::new(()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn get(&self) -> T {
        self.value.read().expect("observable lock poisoned").clone()
    }

    pub fn set(&self, value: T) {
        let _delivery = self.delivery.lock().expect("delivery lock poisoned");
        {
            let mut guard = self.value.write().expect("observable lock poisoned");
            *guard = value.clone();
        }
        for listener in self.snapshot() {
            listener(&value);
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let listener: Listener<T> = Arc::new(listener);
        let _delivery = self.delivery.lock().expect("delivery lock poisoned");
        self.listeners
            .lock()
            .expect("listener lock poisoned")
            .push((id, listener.clone()));

        listener(&self.get());
        id
    }

    /// Returns `false` when the subscription was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut guard = self.listeners.lock().expect("listener lock poisoned");
        let before = guard.len();
        guard.retain(|(existing, _)| *existing != id);
        guard.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.lock().expect("listener lock poisoned").len()
    }

    fn snapshot(&self) -> Vec<Listener<T>> {
        self.listeners
            .lock()
            .expect("listener lock poisoned")
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect()
    }
}

/// Authentication state for one recruiter workspace.
pub struct SessionContext<A> {
    auth: Arc<A>,
    state: Observable<Option<SessionUser>>,
}

impl<A: Authenticator> SessionContext<A> {
    pub fn new(auth: Arc<A>) -> Self {
        Self {
            auth,
            state: Observable::new(None),
        }
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.state.get()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn sign_in(&self, credentials: &Credentials) -> Result<SessionUser, SessionError> {
        let user = self.auth.sign_in(credentials)?;
        info!(uid = %user.uid, "recruiter signed in");
        self.state.set(Some(user.clone()));
        Ok(user)
    }

    pub fn sign_up(&self, registration: &Registration) -> Result<SessionUser, SessionError> {
        registration.validate()?;
        let user = self.auth.sign_up(registration)?;
        info!(uid = %user.uid, "recruiter registered");
        self.state.set(Some(user.clone()));
        Ok(user)
    }

    pub fn sign_out(&self) -> Result<(), SessionError> {
        let user = self.current_user().ok_or(SessionError::NotSignedIn)?;
        self.auth.sign_out(&user)?;
        debug!(uid = %user.uid, "recruiter signed out");
        self.state.set(None);
        Ok(())
    }

    pub fn can_access(&self, screen: Screen) -> bool {
        screen.is_reachable(self.current_user().as_ref())
    }

    pub fn require_user(&self) -> Result<SessionUser, SessionError> {
        self.current_user().ok_or(SessionError::NotSignedIn)
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Option<SessionUser>) + Send + Sync + 'static,
    {
        self.state.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Display theme preference.
pub struct ThemeContext {
    state: Observable<ThemeMode>,
}

impl ThemeContext {
    pub fn new(initial: ThemeMode) -> Self {
        Self {
            state: Observable::new(initial),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.state.get()
    }

    pub fn is_dark(&self) -> bool {
        self.mode() == ThemeMode::Dark
    }

    pub fn set(&self, mode: ThemeMode) {
        self.state.set(mode);
    }

    pub fn toggle(&self) -> ThemeMode {
        let next = self.mode().toggled();
        self.state.set(next);
        next
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ThemeMode) + Send + Sync + 'static,
    {
        self.state.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}
