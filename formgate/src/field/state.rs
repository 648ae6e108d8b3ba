use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use futures::future::BoxFuture;
use serde::Serialize;
use thiserror::Error;

use crate::control::{FormControl, Markers};
use crate::form::FormId;
use crate::store::{Store, Subscription};
use crate::validity::Validity;

/// Unique identifier for a field controller instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldId(usize);

impl FieldId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__field_{}", self.0)
    }
}

/// Snapshot of one field's validation outcome, published on every check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldState {
    /// Identity of the publishing field
    pub id: FieldId,
    /// The value has been edited at least once (monotonic)
    pub dirty: bool,
    /// The control has lost focus at least once (monotonic)
    pub touched: bool,
    /// Validation feedback should currently be displayed
    pub show: bool,
    /// All native and custom constraints are satisfied
    pub valid: bool,
    /// Human-readable validation message; empty when valid
    pub message: String,
    /// The constraint categories currently failing
    pub violations: Validity,
}

impl FieldState {
    fn initial(id: FieldId) -> Self {
        Self {
            id,
            dirty: false,
            touched: false,
            show: false,
            valid: false,
            message: String::new(),
            violations: Validity::new(),
        }
    }
}

/// Error returned by a failing custom validator.
///
/// A failure is a defect in caller-supplied code; the field treats it as
/// "no custom message" and logs a warning rather than corrupting state.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ValidatorError {
    /// Error message
    pub message: String,
}

impl ValidatorError {
    /// Create a new validator error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ValidatorError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for ValidatorError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ValidatorError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Outcome of a custom validation pass: `Ok(None)` means valid,
/// `Ok(Some(message))` means invalid with that message.
pub type ValidatorOutcome = Result<Option<String>, ValidatorError>;

type Validator = Arc<dyn Fn(String) -> BoxFuture<'static, ValidatorOutcome> + Send + Sync>;

/// Internal state for a Field controller
struct FieldInner {
    /// The bound control (None while detached)
    control: Option<Arc<dyn FormControl>>,
    /// Optional custom validator
    validator: Option<Validator>,
    /// Show feedback once the value has been edited
    show_on_dirty: bool,
    /// Show feedback once the control has lost focus
    show_on_touched: bool,
    /// The value has been edited at least once
    dirty: bool,
    /// The control has lost focus at least once
    touched: bool,
    /// The form this field is registered with (routing only, not ownership)
    form: Option<FormId>,
}

/// Controller for one control's validation lifecycle.
///
/// `Field` is a cheap-clone shared handle. It binds to a control via
/// [`attach`](Field::attach), re-checks on host events via
/// [`handle_event`](Field::handle_event), and publishes a [`FieldState`]
/// to subscribers after every check.
///
/// Checks are ordered by issuance: a check that suspends on the custom
/// validator and resolves after a newer check was issued is discarded
/// without touching any state.
///
/// # Example
///
/// ```ignore
/// let control = TextInput::new()
///     .with_constraints(Constraints::new().required());
/// let field = Field::new()
///     .with_validator(|value| async move {
///         Ok((value == "admin").then(|| "That name is taken".to_string()))
///     });
///
/// field.attach(control.clone()).await;
/// let sub = field.subscribe(|state| render_message(state));
/// field.handle_event(ControlEvent::Blur).await;
/// ```
pub struct Field {
    /// Unique identifier for this field instance
    id: FieldId,
    /// Internal state
    inner: Arc<RwLock<FieldInner>>,
    /// Issue counter for the stale-result guard
    issue: Arc<AtomicU64>,
    /// Published state
    store: Store<FieldState>,
}

impl Field {
    /// Create a new field with the default display policy
    /// (`show_on_dirty = false`, `show_on_touched = true`)
    pub fn new() -> Self {
        let id = FieldId::new();
        Self {
            id,
            inner: Arc::new(RwLock::new(FieldInner {
                control: None,
                validator: None,
                show_on_dirty: false,
                show_on_touched: true,
                dirty: false,
                touched: false,
                form: None,
            })),
            issue: Arc::new(AtomicU64::new(0)),
            store: Store::new(FieldState::initial(id)),
        }
    }

    /// Set the custom validator.
    ///
    /// The validator runs only when native constraints already pass and
    /// the control has a scalar value; composite controls are skipped.
    pub fn with_validator<F, Fut>(self, validator: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ValidatorOutcome> + Send + 'static,
    {
        if let Ok(mut guard) = self.inner.write() {
            guard.validator = Some(Arc::new(move |value| Box::pin(validator(value))));
        }
        self
    }

    /// Show feedback once the value has been edited
    pub fn with_show_on_dirty(self, show_on_dirty: bool) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.show_on_dirty = show_on_dirty;
        }
        self
    }

    /// Show feedback once the control has lost focus
    pub fn with_show_on_touched(self, show_on_touched: bool) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.show_on_touched = show_on_touched;
        }
        self
    }

    /// Get the unique ID for this field
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Get the ID as a string (for described-by references)
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Bind a control and run the initial check.
    ///
    /// The control starts clean and untouched, but its validity reflects
    /// reality from the first published state. Attaching while already
    /// attached is a no-op.
    pub async fn attach(&self, control: impl FormControl + 'static) {
        {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            if guard.control.is_some() {
                log::warn!("field {}: already attached, ignoring attach", self.id);
                return;
            }
            guard.control = Some(Arc::new(control));
        }
        log::debug!("field {}: attached", self.id);
        self.check(false, false).await;
    }

    /// Release the bound control and clear its presentation markers.
    ///
    /// Any in-flight check is invalidated. Safe to call repeatedly.
    pub fn detach(&self) {
        let control = self
            .inner
            .write()
            .ok()
            .and_then(|mut guard| guard.control.take());
        if let Some(control) = control {
            // invalidate in-flight checks before touching the control
            self.issue.fetch_add(1, Ordering::SeqCst);
            control.set_markers(Markers::default());
            log::debug!("field {}: detached", self.id);
        }
    }

    /// Check if a control is currently bound
    pub fn is_attached(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.control.is_some())
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Checking
    // -------------------------------------------------------------------------

    /// Re-evaluate the bound control and publish a fresh [`FieldState`].
    ///
    /// `cause_dirty` and `cause_touched` are OR-ed into the monotonic
    /// dirty/touched flags. When the control is natively valid and a
    /// validator is configured, the validator is awaited; if a newer check
    /// is issued while this one is suspended, the resolved outcome is
    /// discarded and nothing is published.
    pub async fn check(&self, cause_dirty: bool, cause_touched: bool) {
        let token = self.issue.fetch_add(1, Ordering::SeqCst) + 1;

        let (control, validator) = {
            let Ok(guard) = self.inner.read() else {
                return;
            };
            match &guard.control {
                Some(control) => (Arc::clone(control), guard.validator.clone()),
                None => {
                    log::debug!("field {}: check on detached field ignored", self.id);
                    return;
                }
            }
        };

        let mut valid = control.check_validity();

        // The custom validator only runs once native checks pass, and only
        // for controls with a scalar value.
        if valid
            && let Some(validator) = validator
            && let Some(value) = control.value()
        {
            let outcome = validator(value).await;

            if token != self.issue.load(Ordering::SeqCst) {
                log::debug!("field {}: discarding stale validation result", self.id);
                return;
            }

            match outcome {
                Ok(Some(message)) => control.set_custom_validity(&message),
                Ok(None) => control.set_custom_validity(""),
                Err(err) => {
                    log::warn!("field {}: custom validator failed: {err}", self.id);
                    control.set_custom_validity("");
                }
            }
            valid = control.check_validity();
        }

        let (dirty, touched, show) = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            guard.dirty |= cause_dirty;
            guard.touched |= cause_touched;
            let show = !valid
                && ((guard.show_on_dirty && guard.dirty)
                    || (guard.show_on_touched && guard.touched));
            (guard.dirty, guard.touched, show)
        };

        control.set_markers(Markers {
            invalid: show,
            described_by: show.then(|| self.id.to_string()),
            dirty,
            touched,
            show,
        });

        self.store.set(FieldState {
            id: self.id,
            dirty,
            touched,
            show,
            valid,
            message: control.validation_message(),
            violations: control.validity(),
        });
    }

    /// Clear any previously-set custom validity on the bound control
    pub(crate) fn clear_custom_validity(&self) {
        let control = self
            .inner
            .read()
            .ok()
            .and_then(|guard| guard.control.clone());
        if let Some(control) = control {
            control.set_custom_validity("");
        }
    }

    // -------------------------------------------------------------------------
    // Published state
    // -------------------------------------------------------------------------

    /// Get the last published state
    pub fn state(&self) -> FieldState {
        self.store.get()
    }

    /// Subscribe to published states.
    ///
    /// The callback is invoked immediately with the current state, then
    /// after every check.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&FieldState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    // -------------------------------------------------------------------------
    // Form routing
    // -------------------------------------------------------------------------

    /// The form this field is registered with, if any
    pub fn form(&self) -> Option<FormId> {
        self.inner.read().map(|guard| guard.form).unwrap_or(None)
    }

    pub(crate) fn set_form(&self, form: Option<FormId>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.form = form;
        }
    }
}

impl Clone for Field {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            issue: Arc::clone(&self.issue),
            store: self.store.clone(),
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("id", &self.id)
            .field("state", &self.store.get())
            .finish_non_exhaustive()
    }
}
