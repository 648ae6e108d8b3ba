//! Scalar text control.

use std::sync::{Arc, RwLock};

use crate::constraints::{Constraints, InputKind};
use crate::validity::{Validity, ViolationKind};

use super::{ControlId, FormControl, Markers};

/// Internal state for a TextInput control
#[derive(Debug, Default)]
struct TextInner {
    /// Current text value
    value: String,
    /// Input kind for type checking
    kind: InputKind,
    /// Declarative constraint set
    constraints: Constraints,
    /// Custom validity message (empty when unset)
    custom_validity: String,
    /// Validity recorded by the last check
    validity: Validity,
    /// Presentation markers
    markers: Markers,
}

/// A scalar text control with built-in constraint checking.
///
/// `TextInput` is a self-contained control that manages its own value,
/// constraint configuration, and validity. It is the text-like half of the
/// bound-element model a [`Field`](crate::field::Field) attaches to.
///
/// # Example
///
/// ```ignore
/// let username = TextInput::new()
///     .with_constraints(Constraints::new().required().min_length(3));
/// let email = TextInput::new()
///     .with_kind(InputKind::Email)
///     .with_constraints(Constraints::new().required());
///
/// username.set_value("guest");
/// assert!(username.check_validity());
/// ```
#[derive(Debug)]
pub struct TextInput {
    /// Unique identifier for this control instance
    id: ControlId,
    /// Internal state
    inner: Arc<RwLock<TextInner>>,
}

impl TextInput {
    /// Create a new empty text control
    pub fn new() -> Self {
        Self {
            id: ControlId::new(),
            inner: Arc::new(RwLock::new(TextInner::default())),
        }
    }

    /// Create a text control with an initial value
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            id: ControlId::new(),
            inner: Arc::new(RwLock::new(TextInner {
                value: value.into(),
                ..Default::default()
            })),
        }
    }

    /// Set the input kind
    pub fn with_kind(self, kind: InputKind) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.kind = kind;
        }
        self
    }

    /// Set the constraint configuration
    pub fn with_constraints(self, constraints: Constraints) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.constraints = constraints;
        }
        self
    }

    /// Get the ID as a string (for node binding)
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Get the current text value
    pub fn text(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.value.clone())
            .unwrap_or_default()
    }

    /// Get the input kind
    pub fn kind(&self) -> InputKind {
        self.inner.read().map(|guard| guard.kind).unwrap_or_default()
    }

    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.value.is_empty())
            .unwrap_or(true)
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Set the text value
    pub fn set_value(&self, value: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.value = value.into();
        }
    }

    /// Clear the text value
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.value.clear();
        }
    }
}

impl Clone for TextInput {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl FormControl for TextInput {
    fn id(&self) -> ControlId {
        self.id
    }

    fn value(&self) -> Option<String> {
        Some(self.text())
    }

    fn check_validity(&self) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            let mut validity = guard.constraints.check(&guard.value, guard.kind);
            if !guard.custom_validity.is_empty() {
                validity.insert(ViolationKind::CustomError);
            }
            guard.validity = validity;
            guard.validity.valid()
        } else {
            false
        }
    }

    fn validity(&self) -> Validity {
        self.inner
            .read()
            .map(|guard| guard.validity.clone())
            .unwrap_or_default()
    }

    fn validation_message(&self) -> String {
        self.inner
            .read()
            .map(|guard| {
                if !guard.custom_validity.is_empty() {
                    guard.custom_validity.clone()
                } else if let Some(kind) = guard.validity.first() {
                    guard.constraints.native_message(kind, guard.kind)
                } else {
                    String::new()
                }
            })
            .unwrap_or_default()
    }

    fn set_custom_validity(&self, message: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.custom_validity = message.to_string();
            if message.is_empty() {
                guard.validity.remove(ViolationKind::CustomError);
            } else {
                guard.validity.insert(ViolationKind::CustomError);
            }
        }
    }

    fn markers(&self) -> Markers {
        self.inner
            .read()
            .map(|guard| guard.markers.clone())
            .unwrap_or_default()
    }

    fn set_markers(&self, markers: Markers) {
        if let Ok(mut guard) = self.inner.write() {
            guard.markers = markers;
        }
    }
}
