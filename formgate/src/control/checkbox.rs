//! Checkbox control.

use std::sync::{Arc, RwLock};

use crate::validity::{Validity, ViolationKind};

use super::{ControlId, FormControl, Markers};

/// Internal state for a Checkbox control
#[derive(Debug, Default)]
struct CheckboxInner {
    /// Whether the checkbox is checked
    checked: bool,
    /// Whether the checkbox must be checked to be valid
    required: bool,
    /// Custom validity message (empty when unset)
    custom_validity: String,
    /// Validity recorded by the last check
    validity: Validity,
    /// Presentation markers
    markers: Markers,
}

/// A checkbox control.
///
/// The scalar value is `"on"` when checked and empty otherwise, so a
/// custom validator sees a stable scalar. A required checkbox reports
/// `ValueMissing` while unchecked.
#[derive(Debug)]
pub struct Checkbox {
    /// Unique identifier for this control instance
    id: ControlId,
    /// Internal state
    inner: Arc<RwLock<CheckboxInner>>,
}

impl Checkbox {
    /// Create a new unchecked checkbox
    pub fn new() -> Self {
        Self {
            id: ControlId::new(),
            inner: Arc::new(RwLock::new(CheckboxInner::default())),
        }
    }

    /// Create a checked checkbox
    pub fn checked() -> Self {
        Self {
            id: ControlId::new(),
            inner: Arc::new(RwLock::new(CheckboxInner {
                checked: true,
                ..Default::default()
            })),
        }
    }

    /// Require the checkbox to be checked
    pub fn required(self) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.required = true;
        }
        self
    }

    /// Get the ID as a string (for node binding)
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// Check if the checkbox is checked
    pub fn is_checked(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.checked)
            .unwrap_or(false)
    }

    /// Set the checked state
    pub fn set_checked(&self, checked: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.checked = checked;
        }
    }

    /// Toggle the checked state
    pub fn toggle(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.checked = !guard.checked;
        }
    }
}

impl Clone for Checkbox {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new()
    }
}

impl FormControl for Checkbox {
    fn id(&self) -> ControlId {
        self.id
    }

    fn value(&self) -> Option<String> {
        Some(if self.is_checked() { "on".to_string() } else { String::new() })
    }

    fn check_validity(&self) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            let mut validity = Validity::new();
            if guard.required && !guard.checked {
                validity.insert(ViolationKind::ValueMissing);
            }
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
                } else if guard.validity.contains(ViolationKind::ValueMissing) {
                    "Please check this box if you want to proceed.".to_string()
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
