//! Violation taxonomy for native constraint checking.

use std::collections::BTreeSet;

use serde::Serialize;

/// A native constraint category that a control can currently fail.
///
/// Mirrors the constraint categories of browser-style validity reporting.
/// The ordering is the message-precedence order: when several categories
/// fail at once, the first one provides the validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ViolationKind {
    /// A required value is missing
    ValueMissing,
    /// The value does not conform to the input kind (email, url)
    TypeMismatch,
    /// The value does not match the configured pattern
    PatternMismatch,
    /// The value is longer than the maximum length
    TooLong,
    /// The value is shorter than the minimum length
    TooShort,
    /// The numeric value is below the minimum
    RangeUnderflow,
    /// The numeric value is above the maximum
    RangeOverflow,
    /// The numeric value does not land on a step increment
    StepMismatch,
    /// The raw input cannot be parsed for the input kind
    BadInput,
    /// A custom validity message is set
    CustomError,
}

/// The set of constraint categories currently failing for a control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validity {
    violations: BTreeSet<ViolationKind>,
}

impl Validity {
    /// An empty (valid) set
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no constraint category is failing
    pub fn valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Check whether a specific category is failing
    pub fn contains(&self, kind: ViolationKind) -> bool {
        self.violations.contains(&kind)
    }

    /// The highest-precedence failing category, if any
    pub fn first(&self) -> Option<ViolationKind> {
        self.violations.iter().next().copied()
    }

    /// Iterate over the failing categories in precedence order
    pub fn iter(&self) -> impl Iterator<Item = ViolationKind> + '_ {
        self.violations.iter().copied()
    }

    /// Number of failing categories
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True when no category is failing
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub(crate) fn insert(&mut self, kind: ViolationKind) {
        self.violations.insert(kind);
    }

    pub(crate) fn remove(&mut self, kind: ViolationKind) {
        self.violations.remove(&kind);
    }
}
