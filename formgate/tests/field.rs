//! Tests for the field controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use formgate::constraints::Constraints;
use formgate::control::{FormControl, Group, TextInput};
use formgate::field::{ControlEvent, Field};
use formgate::validity::ViolationKind;

fn required_text() -> TextInput {
    TextInput::new().with_constraints(Constraints::new().required())
}

// =============================================================================
// Attach and initial check
// =============================================================================

#[tokio::test]
async fn test_initial_check_reflects_reality_without_show() {
    let field = Field::new();
    field.attach(required_text()).await;

    let state = field.state();
    assert!(!state.dirty);
    assert!(!state.touched);
    assert!(!state.show);
    assert!(!state.valid);
    assert!(state.violations.contains(ViolationKind::ValueMissing));
}

#[tokio::test]
async fn test_attach_twice_is_noop() {
    let first = TextInput::with_value("kept");
    let second = required_text();

    let field = Field::new();
    field.attach(first).await;
    field.attach(second).await;

    // still bound to the first (valid) control
    field.check(false, false).await;
    assert!(field.state().valid);
}

// =============================================================================
// Display policy
// =============================================================================

#[tokio::test]
async fn test_blur_publishes_native_required_message() {
    let field = Field::new();
    field.attach(required_text()).await;

    field.handle_event(ControlEvent::Blur).await;

    let state = field.state();
    assert!(state.touched);
    assert!(!state.valid);
    assert!(state.show);
    assert_eq!(state.message, "Please fill in this field.");
}

#[tokio::test]
async fn test_default_policy_ignores_dirty() {
    let control = required_text();
    let field = Field::new();
    field.attach(control.clone()).await;

    control.set_value("x");
    control.clear();
    field.handle_event(ControlEvent::Input).await;

    let state = field.state();
    assert!(state.dirty);
    assert!(!state.valid);
    assert!(!state.show);

    field.handle_event(ControlEvent::Blur).await;
    assert!(field.state().show);
}

#[tokio::test]
async fn test_show_on_dirty_policy() {
    let field = Field::new().with_show_on_dirty(true);
    field.attach(required_text()).await;

    field.handle_event(ControlEvent::Input).await;
    assert!(field.state().show);
}

#[tokio::test]
async fn test_show_requires_invalid() {
    let control = TextInput::with_value("fine");
    let field = Field::new();
    field.attach(control).await;

    field.handle_event(ControlEvent::Blur).await;

    let state = field.state();
    assert!(state.touched);
    assert!(state.valid);
    assert!(!state.show);
}

// =============================================================================
// Monotonicity
// =============================================================================

#[tokio::test]
async fn test_dirty_and_touched_never_revert() {
    let field = Field::new();
    field.attach(required_text()).await;

    field.handle_event(ControlEvent::Input).await;
    field.handle_event(ControlEvent::Blur).await;
    assert!(field.state().dirty);
    assert!(field.state().touched);

    // checks that contribute neither cause must not reset the flags
    field.handle_event(ControlEvent::Change).await;
    field.check(false, false).await;

    let state = field.state();
    assert!(state.dirty);
    assert!(state.touched);
}

// =============================================================================
// Custom validator
// =============================================================================

#[tokio::test]
async fn test_validator_rejection_sets_custom_error() {
    let control = required_text();
    let field = Field::new().with_validator(|value| async move {
        Ok((value == "admin").then(|| "That username is taken".to_string()))
    });
    field.attach(control.clone()).await;

    control.set_value("admin");
    field.handle_event(ControlEvent::Input).await;
    field.handle_event(ControlEvent::Blur).await;

    let state = field.state();
    assert!(!state.valid);
    assert!(state.show);
    assert!(state.violations.contains(ViolationKind::CustomError));
    assert_eq!(state.message, "That username is taken");
}

#[tokio::test]
async fn test_validator_skipped_when_natively_invalid() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let field = Field::new().with_validator(move |_value| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    });
    field.attach(required_text()).await;

    field.handle_event(ControlEvent::Blur).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(field.state().violations.contains(ViolationKind::ValueMissing));
}

#[tokio::test]
async fn test_validator_skipped_for_group_control() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let field = Field::new().with_validator(move |_value| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Some("never applied".to_string()))
        }
    });
    field.attach(Group::new()).await;

    field.handle_event(ControlEvent::Change).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(field.state().valid);
}

#[tokio::test]
async fn test_validator_failure_means_no_custom_message() {
    let control = TextInput::with_value("anything");
    let field =
        Field::new().with_validator(|_value| async move { Err("backend down".into()) });
    field.attach(control).await;

    field.handle_event(ControlEvent::Blur).await;

    let state = field.state();
    assert!(state.valid);
    assert_eq!(state.message, "");
}

#[tokio::test]
async fn test_input_event_clears_stale_custom_error() {
    let control = required_text();
    let field = Field::new().with_validator(|value| async move {
        Ok((value == "admin").then(|| "taken".to_string()))
    });
    field.attach(control.clone()).await;

    control.set_value("admin");
    field.handle_event(ControlEvent::Input).await;
    assert!(field.state().violations.contains(ViolationKind::CustomError));

    // emptied again: natively invalid, so the validator does not run, and
    // the old custom error must not survive
    control.clear();
    field.handle_event(ControlEvent::Input).await;

    let state = field.state();
    assert!(!state.violations.contains(ViolationKind::CustomError));
    assert!(state.violations.contains(ViolationKind::ValueMissing));
}

// =============================================================================
// Presentation markers
// =============================================================================

#[tokio::test]
async fn test_markers_follow_show() {
    let control = required_text();
    let field = Field::new();
    field.attach(control.clone()).await;

    field.handle_event(ControlEvent::Blur).await;

    let markers = control.markers();
    assert!(markers.invalid);
    assert_eq!(markers.described_by, Some(field.id_string()));
    assert!(markers.touched);
    assert!(markers.show);

    control.set_value("fixed");
    field.handle_event(ControlEvent::Change).await;

    let markers = control.markers();
    assert!(!markers.invalid);
    assert_eq!(markers.described_by, None);
    assert!(!markers.show);
    assert!(markers.touched);
}

// =============================================================================
// Detach
// =============================================================================

#[tokio::test]
async fn test_detach_clears_markers_and_ignores_events() {
    let control = required_text();
    let field = Field::new();
    field.attach(control.clone()).await;
    field.handle_event(ControlEvent::Blur).await;
    assert!(control.markers().invalid);

    field.detach();
    assert!(!field.is_attached());
    assert_eq!(control.markers(), Default::default());

    let before = field.state();
    field.handle_event(ControlEvent::Input).await;
    assert_eq!(field.state(), before);

    // detaching again is fine
    field.detach();
}
