//! Form aggregation - membership, derived state, and the submission gate.
//!
//! A [`Form`] owns a dynamic set of [`Field`]s and republishes a derived
//! [`FormState`] synchronously after every membership change and after
//! every state a member field publishes. Attaching the form to a
//! [`FormSurface`] installs the submission gate.

mod surface;

pub use surface::{FormSurface, SubmitOutcome};

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

use serde::Serialize;

use crate::field::Field;
use crate::store::{Store, Subscription};

/// Unique identifier for a form instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FormId(usize);

impl FormId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__form_{}", self.0)
    }
}

/// Derived validity snapshot over a form's registered fields.
///
/// `dirty` and `touched` are the OR over all members, `valid` the AND;
/// a form with no members is vacuously valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    /// Any member field has been edited
    pub dirty: bool,
    /// Any member field has lost focus
    pub touched: bool,
    /// Every member field is valid
    pub valid: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            dirty: false,
            touched: false,
            valid: true,
        }
    }
}

/// A registered field together with its state subscription
struct Member {
    field: Field,
    _subscription: Subscription,
}

/// Internal state for a Form aggregator
struct FormInner {
    members: Vec<Member>,
    surface: Option<FormSurface>,
}

/// Aggregator over a dynamic set of field controllers.
///
/// `Form` is a cheap-clone shared handle. Fields are identified by their
/// [`FieldId`](crate::field::FieldId): adding a field twice is a no-op,
/// and a field belongs to at most one form at a time (remove it first to
/// reassign it).
///
/// # Example
///
/// ```ignore
/// let form = Form::new();
/// form.add(&username);
/// form.add(&email);
/// form.attach(&surface);
///
/// match surface.request_submit() {
///     SubmitOutcome::Submitted => { /* send it */ }
///     SubmitOutcome::Suppressed => { /* per-field messages already shown */ }
/// }
/// ```
pub struct Form {
    /// Unique identifier for this form instance
    id: FormId,
    /// Internal state
    inner: Arc<RwLock<FormInner>>,
    /// Published state
    store: Store<FormState>,
}

impl Form {
    /// Create a new form with no members
    pub fn new() -> Self {
        Self {
            id: FormId::new(),
            inner: Arc::new(RwLock::new(FormInner {
                members: Vec::new(),
                surface: None,
            })),
            store: Store::new(FormState::default()),
        }
    }

    /// Get the unique ID for this form
    pub fn id(&self) -> FormId {
        self.id
    }

    // -------------------------------------------------------------------------
    // Membership
    // -------------------------------------------------------------------------

    /// Register a field.
    ///
    /// No-op if the field is already a member. A field registered with a
    /// different form stays there; remove it from that form first.
    pub fn add(&self, field: &Field) {
        match field.form() {
            Some(owner) if owner == self.id => {
                log::debug!("form {}: field {} already registered", self.id, field.id());
                return;
            }
            Some(owner) => {
                log::warn!(
                    "form {}: field {} is registered with {}, remove it first",
                    self.id,
                    field.id(),
                    owner
                );
                return;
            }
            None => {}
        }

        let subscription = {
            let inner = Arc::downgrade(&self.inner);
            let store = self.store.clone();
            field.subscribe(move |_state| recompute_into(&inner, &store))
        };

        if let Ok(mut guard) = self.inner.write() {
            guard.members.push(Member {
                field: field.clone(),
                _subscription: subscription,
            });
        }
        field.set_form(Some(self.id));
        log::debug!("form {}: field {} registered", self.id, field.id());
        self.recompute();
    }

    /// Remove a field by identity.
    ///
    /// Dropping the membership also drops the state subscription, so the
    /// form stops following the field. Removing a non-member is a no-op.
    pub fn remove(&self, field: &Field) {
        let removed = self
            .inner
            .write()
            .map(|mut guard| {
                let before = guard.members.len();
                guard.members.retain(|member| member.field.id() != field.id());
                before != guard.members.len()
            })
            .unwrap_or(false);

        if removed {
            field.set_form(None);
            log::debug!("form {}: field {} removed", self.id, field.id());
            self.recompute();
        } else {
            log::debug!(
                "form {}: remove of non-member field {} ignored",
                self.id,
                field.id()
            );
        }
    }

    /// Number of registered fields
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.members.len())
            .unwrap_or(0)
    }

    /// Check if no fields are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------
    // Surface binding
    // -------------------------------------------------------------------------

    /// Bind this form's state as a surface's submission gate.
    ///
    /// The surface's own block-on-invalid behavior is disabled in favor of
    /// this form's decision. An earlier binding on this form is released.
    pub fn attach(&self, surface: &FormSurface) {
        if let Ok(mut guard) = self.inner.write() {
            if let Some(old) = guard.surface.take() {
                old.unbind();
            }
            guard.surface = Some(surface.clone());
        }
        surface.bind(self.store.clone());
        log::debug!("form {}: attached to surface", self.id);
    }

    /// Release the surface binding. Safe to call repeatedly.
    pub fn detach(&self) {
        let surface = self
            .inner
            .write()
            .ok()
            .and_then(|mut guard| guard.surface.take());
        if let Some(surface) = surface {
            surface.unbind();
            log::debug!("form {}: detached from surface", self.id);
        }
    }

    // -------------------------------------------------------------------------
    // Published state
    // -------------------------------------------------------------------------

    /// Get the last published state
    pub fn state(&self) -> FormState {
        self.store.get()
    }

    /// Subscribe to published states.
    ///
    /// The callback is invoked immediately with the current state, then
    /// after every membership change and every member publication.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&FormState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    fn recompute(&self) {
        let state = match self.inner.read() {
            Ok(guard) => fold(&guard.members),
            Err(_) => return,
        };
        self.store.set(state);
    }
}

/// Recompute the derived state for a form reached through a weak handle.
///
/// Member subscriptions route through here so a dropped form silently
/// stops aggregating instead of being kept alive by its fields.
fn recompute_into(inner: &Weak<RwLock<FormInner>>, store: &Store<FormState>) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let state = match inner.read() {
        Ok(guard) => fold(&guard.members),
        Err(_) => return,
    };
    store.set(state);
}

fn fold(members: &[Member]) -> FormState {
    let mut state = FormState::default();
    for member in members {
        let field_state = member.field.state();
        state.dirty |= field_state.dirty;
        state.touched |= field_state.touched;
        state.valid &= field_state.valid;
    }
    state
}

impl Clone for Form {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            store: self.store.clone(),
        }
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("id", &self.id)
            .field("members", &self.len())
            .field("state", &self.store.get())
            .finish_non_exhaustive()
    }
}
