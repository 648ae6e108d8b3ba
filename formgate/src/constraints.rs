//! The built-in ("native") constraint engine for scalar controls.

use regex::Regex;

use crate::validity::{Validity, ViolationKind};

// Tolerance for step arithmetic on parsed floats.
const STEP_EPSILON: f64 = 1e-9;

/// The scalar input kinds subject to type checking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputKind {
    /// Free-form text, no type check
    #[default]
    Text,
    /// Must parse as an email address when non-empty
    Email,
    /// Must parse as an absolute URL when non-empty
    Url,
    /// Must parse as a number; enables range and step checks
    Number,
}

/// Declarative constraint set for a scalar control.
///
/// Constraints are configured up front with the consuming builder methods
/// and evaluated against the current value on every check. Empty values are
/// only subject to the `required` check; all other checks apply to
/// non-empty values, so an optional field left blank is valid.
///
/// # Example
///
/// ```ignore
/// let constraints = Constraints::new()
///     .required()
///     .min_length(3)
///     .pattern("[a-z]+");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    required: bool,
    pattern: Option<Regex>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
}

impl Constraints {
    /// Create an empty constraint set (everything passes)
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a non-blank value
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Require the whole value to match a regex pattern.
    ///
    /// The pattern is implicitly anchored. Panics if the pattern is not a
    /// valid regex; an invalid pattern is a programmer error, not a runtime
    /// condition.
    pub fn pattern(mut self, pattern: &str) -> Self {
        let anchored = format!("^(?:{pattern})$");
        self.pattern = Some(Regex::new(&anchored).expect("Invalid regex pattern"));
        self
    }

    /// Require minimum length (in characters)
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Require maximum length (in characters)
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Require a numeric value of at least `min` (Number kind only)
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Require a numeric value of at most `max` (Number kind only)
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Require the numeric value to land on a step increment, counted from
    /// `min` when set and from zero otherwise (Number kind only)
    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Whether a value is required
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Evaluate the constraint set against a value.
    pub fn check(&self, value: &str, kind: InputKind) -> Validity {
        let mut validity = Validity::new();

        if self.required && value.trim().is_empty() {
            validity.insert(ViolationKind::ValueMissing);
        }

        if value.is_empty() {
            return validity;
        }

        match kind {
            InputKind::Text => {}
            InputKind::Email => {
                if !email_address::EmailAddress::is_valid(value) {
                    validity.insert(ViolationKind::TypeMismatch);
                }
            }
            InputKind::Url => {
                if url::Url::parse(value).is_err() {
                    validity.insert(ViolationKind::TypeMismatch);
                }
            }
            InputKind::Number => match value.parse::<f64>() {
                Ok(number) => self.check_number(number, &mut validity),
                Err(_) => {
                    validity.insert(ViolationKind::BadInput);
                }
            },
        }

        if let Some(pattern) = &self.pattern
            && !pattern.is_match(value)
        {
            validity.insert(ViolationKind::PatternMismatch);
        }

        let length = value.chars().count();
        if let Some(min) = self.min_length
            && length < min
        {
            validity.insert(ViolationKind::TooShort);
        }
        if let Some(max) = self.max_length
            && length > max
        {
            validity.insert(ViolationKind::TooLong);
        }

        validity
    }

    fn check_number(&self, number: f64, validity: &mut Validity) {
        if let Some(min) = self.min
            && number < min
        {
            validity.insert(ViolationKind::RangeUnderflow);
        }
        if let Some(max) = self.max
            && number > max
        {
            validity.insert(ViolationKind::RangeOverflow);
        }
        if let Some(step) = self.step
            && step > 0.0
        {
            let base = self.min.unwrap_or(0.0);
            let steps = (number - base) / step;
            if (steps - steps.round()).abs() > STEP_EPSILON {
                validity.insert(ViolationKind::StepMismatch);
            }
        }
    }

    /// The native human-readable message for a failing category.
    ///
    /// `CustomError` has no native message; the control reports the custom
    /// validity message directly.
    pub fn native_message(&self, kind: ViolationKind, input: InputKind) -> String {
        match kind {
            ViolationKind::ValueMissing => "Please fill in this field.".to_string(),
            ViolationKind::TypeMismatch => match input {
                InputKind::Email => "Please enter an email address.".to_string(),
                InputKind::Url => "Please enter a URL.".to_string(),
                _ => "Please enter a valid value.".to_string(),
            },
            ViolationKind::PatternMismatch => "Please match the requested format.".to_string(),
            ViolationKind::TooLong => {
                let max = self.max_length.unwrap_or(0);
                format!("Please shorten this text to {max} characters or less.")
            }
            ViolationKind::TooShort => {
                let min = self.min_length.unwrap_or(0);
                format!("Please lengthen this text to {min} characters or more.")
            }
            ViolationKind::RangeUnderflow => {
                let min = self.min.unwrap_or(0.0);
                format!("Value must be greater than or equal to {min}.")
            }
            ViolationKind::RangeOverflow => {
                let max = self.max.unwrap_or(0.0);
                format!("Value must be less than or equal to {max}.")
            }
            ViolationKind::StepMismatch => "Please enter a valid value.".to_string(),
            ViolationKind::BadInput => "Please enter a number.".to_string(),
            ViolationKind::CustomError => String::new(),
        }
    }
}
