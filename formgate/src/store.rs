use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

/// Unique identifier for a store subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SubscriberId(usize);

impl SubscriberId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;
type SubscriberList<T> = Arc<Mutex<Vec<(SubscriberId, Callback<T>)>>>;

/// Observable state container with interior mutability.
///
/// `Store<T>` holds a value behind `Arc<RwLock<T>>`, making it cheap to
/// clone and safe to use across async task boundaries. Unlike a plain
/// state cell it also carries a subscriber list: every `set`/`update`
/// synchronously invokes all registered callbacks with the new value.
///
/// # Example
///
/// ```ignore
/// let store = Store::new(0u32);
/// let sub = store.subscribe(|v| println!("value is now {v}"));
/// store.set(1);       // subscriber runs
/// sub.unsubscribe();  // or just drop it
/// store.set(2);       // nobody listening
/// ```
pub struct Store<T> {
    inner: Arc<RwLock<T>>,
    subscribers: SubscriberList<T>,
}

impl<T> Store<T> {
    /// Create a new store with the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Set a new value and notify all subscribers
    pub fn set(&self, value: T)
    where
        T: Clone,
    {
        if let Ok(mut guard) = self.inner.write() {
            *guard = value;
        }
        self.publish();
    }

    /// Update the value using a closure and notify all subscribers
    pub fn update<F>(&self, f: F)
    where
        T: Clone,
        F: FnOnce(&mut T),
    {
        if let Ok(mut guard) = self.inner.write() {
            f(&mut guard);
        }
        self.publish();
    }

    /// Register a callback invoked on every publication.
    ///
    /// The callback is invoked immediately with the current value, then
    /// once per subsequent `set`/`update`, until the returned
    /// [`Subscription`] is dropped or explicitly unsubscribed.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        T: Clone + 'static,
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriberId::new();
        let callback: Callback<T> = Arc::new(callback);

        if let Ok(mut guard) = self.subscribers.lock() {
            guard.push((id, Arc::clone(&callback)));
        }
        callback(&self.get());

        let subscribers: Weak<Mutex<Vec<(SubscriberId, Callback<T>)>>> =
            Arc::downgrade(&self.subscribers);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(subscribers) = subscribers.upgrade()
                    && let Ok(mut guard) = subscribers.lock()
                {
                    guard.retain(|(sub_id, _)| *sub_id != id);
                }
            })),
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Invoke every subscriber with a snapshot of the current value.
    ///
    /// The subscriber list is snapshotted first so callbacks may freely
    /// read the store or drop subscriptions without holding any lock.
    fn publish(&self)
    where
        T: Clone,
    {
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .lock()
            .map(|guard| guard.iter().map(|(_, cb)| Arc::clone(cb)).collect())
            .unwrap_or_default();
        if callbacks.is_empty() {
            return;
        }

        let value = self.get();
        for callback in callbacks {
            callback(&value);
        }
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.inner.read().ok().as_deref())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle for a registered store callback.
///
/// Dropping the subscription detaches the callback; `unsubscribe` does the
/// same explicitly.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Detach the callback now
    pub fn unsubscribe(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
