//! Composite group control.

use std::sync::{Arc, RwLock};

use crate::validity::{Validity, ViolationKind};

use super::{ControlId, FormControl, Markers};

/// Internal state for a Group control
#[derive(Debug, Default)]
struct GroupInner {
    /// Custom validity message (empty when unset)
    custom_validity: String,
    /// Validity recorded by the last check
    validity: Validity,
    /// Presentation markers
    markers: Markers,
}

/// A composite (fieldset-like) control.
///
/// A group has no scalar value, so it never receives a custom validator
/// call; only a programmatically-set custom validity can make it invalid.
#[derive(Debug)]
pub struct Group {
    /// Unique identifier for this control instance
    id: ControlId,
    /// Internal state
    inner: Arc<RwLock<GroupInner>>,
}

impl Group {
    /// Create a new group control
    pub fn new() -> Self {
        Self {
            id: ControlId::new(),
            inner: Arc::new(RwLock::new(GroupInner::default())),
        }
    }

    /// Get the ID as a string (for node binding)
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }
}

impl Clone for Group {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

impl FormControl for Group {
    fn id(&self) -> ControlId {
        self.id
    }

    fn value(&self) -> Option<String> {
        None
    }

    fn check_validity(&self) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            let mut validity = Validity::new();
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
            .map(|guard| guard.custom_validity.clone())
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
