//! Form control model - the bound-element side of validation.
//!
//! Controls are cheap-clone shared handles: every clone observes the same
//! underlying state. A control carries its own value, its constraint
//! configuration, the validity recorded by the last check, and the
//! presentation markers a field controller toggles on it.

mod checkbox;
mod group;
mod select;
mod text;

pub use checkbox::Checkbox;
pub use group::Group;
pub use select::Select;
pub use text::TextInput;

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::validity::Validity;

/// Unique identifier for a form control instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(usize);

impl ControlId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__control_{}", self.0)
    }
}

/// Presentation markers exposed on a control for styling and accessibility
/// tooling.
///
/// The owning field controller is the only writer; `invalid` and
/// `described_by` follow the field's `show` policy, while `dirty`,
/// `touched`, and `show` mirror the published field state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markers {
    /// The control should be presented as invalid
    pub invalid: bool,
    /// Identifier of the message element describing the control
    pub described_by: Option<String>,
    /// The value has been edited at least once
    pub dirty: bool,
    /// The control has lost focus at least once
    pub touched: bool,
    /// Validation feedback should currently be displayed
    pub show: bool,
}

/// Capability interface for controls that participate in validation.
///
/// Exactly one field controller is expected to own a control's validation
/// attributes (custom validity and markers); everything else only reads.
pub trait FormControl: Send + Sync {
    /// Process-unique identity of this control
    fn id(&self) -> ControlId;

    /// Current scalar value.
    ///
    /// Composite controls return `None` and are excluded from custom
    /// validator dispatch.
    fn value(&self) -> Option<String>;

    /// Re-evaluate native constraints plus any custom validity, record the
    /// result, and return whether the control is valid.
    fn check_validity(&self) -> bool;

    /// The violations recorded by the last check
    fn validity(&self) -> Validity;

    /// Human-readable message for the current violations; empty when valid.
    ///
    /// A custom validity message takes precedence over native messages.
    fn validation_message(&self) -> String;

    /// Set a custom validity message; an empty string clears it
    fn set_custom_validity(&self, message: &str);

    /// Current presentation markers
    fn markers(&self) -> Markers;

    /// Replace the presentation markers
    fn set_markers(&self, markers: Markers);
}
