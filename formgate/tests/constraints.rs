//! Tests for the native constraint engine.

use formgate::constraints::{Constraints, InputKind};
use formgate::validity::ViolationKind;

#[test]
fn test_empty_constraints_pass() {
    let constraints = Constraints::new();
    assert!(constraints.check("anything", InputKind::Text).valid());
    assert!(constraints.check("", InputKind::Text).valid());
}

#[test]
fn test_required_flags_empty_value() {
    let constraints = Constraints::new().required();
    let validity = constraints.check("", InputKind::Text);
    assert!(!validity.valid());
    assert!(validity.contains(ViolationKind::ValueMissing));
}

#[test]
fn test_required_flags_blank_value() {
    let constraints = Constraints::new().required();
    assert!(constraints
        .check("   ", InputKind::Text)
        .contains(ViolationKind::ValueMissing));
}

#[test]
fn test_required_satisfied() {
    let constraints = Constraints::new().required();
    assert!(constraints.check("x", InputKind::Text).valid());
}

#[test]
fn test_optional_empty_value_skips_remaining_checks() {
    let constraints = Constraints::new().pattern("[a-z]+").min_length(3);
    assert!(constraints.check("", InputKind::Email).valid());
}

#[test]
fn test_pattern_is_anchored() {
    let constraints = Constraints::new().pattern("b");
    // a bare substring match would pass here
    assert!(constraints
        .check("abc", InputKind::Text)
        .contains(ViolationKind::PatternMismatch));
    assert!(constraints.check("b", InputKind::Text).valid());
}

#[test]
fn test_pattern_mismatch_and_match() {
    let constraints = Constraints::new().pattern("[a-z]+");
    assert!(constraints
        .check("abc1", InputKind::Text)
        .contains(ViolationKind::PatternMismatch));
    assert!(constraints.check("abc", InputKind::Text).valid());
}

#[test]
fn test_length_bounds_count_characters() {
    let constraints = Constraints::new().min_length(3).max_length(5);
    assert!(constraints
        .check("hé", InputKind::Text)
        .contains(ViolationKind::TooShort));
    assert!(constraints
        .check("héllo!", InputKind::Text)
        .contains(ViolationKind::TooLong));
    assert!(constraints.check("héllo", InputKind::Text).valid());
}

#[test]
fn test_email_kind_type_mismatch() {
    let constraints = Constraints::new();
    assert!(constraints
        .check("not-an-email", InputKind::Email)
        .contains(ViolationKind::TypeMismatch));
    assert!(constraints.check("user@example.com", InputKind::Email).valid());
}

#[test]
fn test_url_kind_type_mismatch() {
    let constraints = Constraints::new();
    assert!(constraints
        .check("not a url", InputKind::Url)
        .contains(ViolationKind::TypeMismatch));
    assert!(constraints
        .check("https://example.com/path", InputKind::Url)
        .valid());
}

#[test]
fn test_number_bad_input() {
    let constraints = Constraints::new();
    assert!(constraints
        .check("twelve", InputKind::Number)
        .contains(ViolationKind::BadInput));
    assert!(constraints.check("12", InputKind::Number).valid());
}

#[test]
fn test_number_range() {
    let constraints = Constraints::new().min(1.0).max(10.0);
    assert!(constraints
        .check("0", InputKind::Number)
        .contains(ViolationKind::RangeUnderflow));
    assert!(constraints
        .check("11", InputKind::Number)
        .contains(ViolationKind::RangeOverflow));
    assert!(constraints.check("5", InputKind::Number).valid());
}

#[test]
fn test_number_step_counts_from_min() {
    let constraints = Constraints::new().min(1.0).step(2.0);
    assert!(constraints
        .check("4", InputKind::Number)
        .contains(ViolationKind::StepMismatch));
    assert!(constraints.check("5", InputKind::Number).valid());
}

#[test]
fn test_number_step_tolerates_float_arithmetic() {
    let constraints = Constraints::new().step(0.1);
    assert!(constraints.check("0.3", InputKind::Number).valid());
    assert!(constraints
        .check("0.35", InputKind::Number)
        .contains(ViolationKind::StepMismatch));
}

#[test]
fn test_violations_accumulate_in_precedence_order() {
    let constraints = Constraints::new().pattern("[a-z]+").min_length(3);
    let validity = constraints.check("A1", InputKind::Text);
    assert_eq!(validity.len(), 2);
    assert!(validity.contains(ViolationKind::PatternMismatch));
    assert!(validity.contains(ViolationKind::TooShort));
    assert_eq!(validity.first(), Some(ViolationKind::PatternMismatch));
}

#[test]
fn test_native_messages() {
    let constraints = Constraints::new().required().min_length(3);
    assert_eq!(
        constraints.native_message(ViolationKind::ValueMissing, InputKind::Text),
        "Please fill in this field."
    );
    assert_eq!(
        constraints.native_message(ViolationKind::TooShort, InputKind::Text),
        "Please lengthen this text to 3 characters or more."
    );
    assert_eq!(
        constraints.native_message(ViolationKind::TypeMismatch, InputKind::Email),
        "Please enter an email address."
    );
}
