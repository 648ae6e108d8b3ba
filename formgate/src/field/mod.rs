//! Field controller - one control's validation lifecycle.
//!
//! A [`Field`] owns the validation lifecycle of a single bound control:
//! it evaluates native constraints, runs an optional async custom
//! validator behind a stale-result guard, and publishes a
//! [`FieldState`] snapshot through an observable store on every check.

pub mod events;
mod state;

pub use events::ControlEvent;
pub use state::{Field, FieldId, FieldState, ValidatorError, ValidatorOutcome};
