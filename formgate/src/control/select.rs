//! Select control.

use std::sync::{Arc, RwLock};

use crate::validity::{Validity, ViolationKind};

use super::{ControlId, FormControl, Markers};

/// Internal state for a Select control
#[derive(Debug, Default)]
struct SelectInner {
    /// Available options
    options: Vec<String>,
    /// Index of the selected option (None when nothing is selected)
    selected: Option<usize>,
    /// Whether a selection is required
    required: bool,
    /// Custom validity message (empty when unset)
    custom_validity: String,
    /// Validity recorded by the last check
    validity: Validity,
    /// Presentation markers
    markers: Markers,
}

/// A single-choice select control.
///
/// The scalar value is the selected option's text, or empty when nothing is
/// selected. A required select reports `ValueMissing` until a non-empty
/// option is selected.
#[derive(Debug)]
pub struct Select {
    /// Unique identifier for this control instance
    id: ControlId,
    /// Internal state
    inner: Arc<RwLock<SelectInner>>,
}

impl Select {
    /// Create a new select with no options
    pub fn new() -> Self {
        Self {
            id: ControlId::new(),
            inner: Arc::new(RwLock::new(SelectInner::default())),
        }
    }

    /// Create a select with options
    pub fn with_options(options: Vec<impl Into<String>>) -> Self {
        Self {
            id: ControlId::new(),
            inner: Arc::new(RwLock::new(SelectInner {
                options: options.into_iter().map(Into::into).collect(),
                ..Default::default()
            })),
        }
    }

    /// Require a non-empty selection
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

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Get the selected option index
    pub fn selected(&self) -> Option<usize> {
        self.inner.read().map(|guard| guard.selected).unwrap_or(None)
    }

    /// Get the selected option text
    pub fn selected_label(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.selected.and_then(|i| guard.options.get(i).cloned()))
    }

    /// Get the available options
    pub fn options(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|guard| guard.options.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Replace the option list, clearing any selection
    pub fn set_options(&self, options: Vec<impl Into<String>>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.options = options.into_iter().map(Into::into).collect();
            guard.selected = None;
        }
    }

    /// Select an option by index (out-of-range indices are ignored)
    pub fn select(&self, index: usize) {
        if let Ok(mut guard) = self.inner.write()
            && index < guard.options.len()
        {
            guard.selected = Some(index);
        }
    }

    /// Clear the selection
    pub fn clear_selection(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selected = None;
        }
    }
}

impl Clone for Select {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for Select {
    fn default() -> Self {
        Self::new()
    }
}

impl FormControl for Select {
    fn id(&self) -> ControlId {
        self.id
    }

    fn value(&self) -> Option<String> {
        Some(self.selected_label().unwrap_or_default())
    }

    fn check_validity(&self) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            let selection = guard
                .selected
                .and_then(|i| guard.options.get(i))
                .cloned()
                .unwrap_or_default();
            let mut validity = Validity::new();
            if guard.required && selection.is_empty() {
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
                    "Please select an item in the list.".to_string()
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
