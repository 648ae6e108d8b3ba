//! Reactive form validation: controls with built-in constraint checking,
//! field controllers with async custom validation, and form-level
//! aggregation with a submission gate.

pub mod constraints;
pub mod control;
pub mod field;
pub mod form;
pub mod store;
pub mod validity;

pub mod prelude {
    pub use crate::constraints::{Constraints, InputKind};
    pub use crate::control::{
        Checkbox, ControlId, FormControl, Group, Markers, Select, TextInput,
    };
    pub use crate::field::{
        ControlEvent, Field, FieldId, FieldState, ValidatorError, ValidatorOutcome,
    };
    pub use crate::form::{Form, FormId, FormState, FormSurface, SubmitOutcome};
    pub use crate::store::{Store, Subscription};
    pub use crate::validity::{Validity, ViolationKind};
}
