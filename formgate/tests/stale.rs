//! Tests for stale-result discarding on overlapping async validations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use formgate::constraints::Constraints;
use formgate::control::{FormControl, TextInput};
use formgate::field::{ControlEvent, Field};

fn required_text() -> TextInput {
    TextInput::new().with_constraints(Constraints::new().required())
}

#[tokio::test(start_paused = true)]
async fn test_stale_validator_result_is_discarded() {
    let completions = Arc::new(AtomicUsize::new(0));
    let done = Arc::clone(&completions);

    let control = required_text();
    let field = Field::new().with_validator(move |value: String| {
        let done = Arc::clone(&done);
        async move {
            // "admin" resolves slowly, so a later check can overtake it
            let delay = if value == "admin" { 100 } else { 10 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            done.fetch_add(1, Ordering::SeqCst);
            Ok((value == "admin").then(|| "taken".to_string()))
        }
    });

    // empty at attach time: natively invalid, validator not involved yet
    field.attach(control.clone()).await;

    let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    let _sub = field.subscribe(move |state| sink.lock().unwrap().push(state.message.clone()));

    // the slow "admin" check is issued first; "guest" supersedes it while
    // it is still suspended
    control.set_value("admin");
    let stale = field.handle_event(ControlEvent::Input);
    let fresh = async {
        control.set_value("guest");
        field.handle_event(ControlEvent::Input).await;
    };
    tokio::join!(stale, fresh);

    let state = field.state();
    assert!(state.valid);
    assert_eq!(state.message, "");

    // the superseded validator ran to completion, but its result was
    // never published
    assert_eq!(completions.load(Ordering::SeqCst), 2);
    assert!(messages.lock().unwrap().iter().all(|m| m != "taken"));
}

#[tokio::test(start_paused = true)]
async fn test_latest_of_three_overlapping_checks_wins() {
    let completions = Arc::new(AtomicUsize::new(0));
    let done = Arc::clone(&completions);

    let control = required_text();
    let field = Field::new().with_validator(move |value: String| {
        let done = Arc::clone(&done);
        async move {
            // earlier checks take longer, so completions arrive reversed
            let delay = match value.as_str() {
                "first" => 300,
                "second" => 200,
                _ => 100,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            done.fetch_add(1, Ordering::SeqCst);
            Ok(Some(value))
        }
    });
    field.attach(control.clone()).await;

    let a = async {
        control.set_value("first");
        field.handle_event(ControlEvent::Input).await;
    };
    let b = async {
        control.set_value("second");
        field.handle_event(ControlEvent::Input).await;
    };
    let c = async {
        control.set_value("third");
        field.handle_event(ControlEvent::Input).await;
    };
    tokio::join!(a, b, c);

    assert_eq!(completions.load(Ordering::SeqCst), 3);
    assert_eq!(field.state().message, "third");
}

#[tokio::test(start_paused = true)]
async fn test_detach_invalidates_inflight_check() {
    let control = required_text();
    let field = Field::new().with_validator(|_value: String| async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(Some("too late".to_string()))
    });

    // empty at attach time: natively invalid, validator not involved
    field.attach(control.clone()).await;
    let before = field.state();

    // a natively-valid value sends the check into the validator; the
    // field is detached while the check is suspended
    control.set_value("admin");
    let check = field.handle_event(ControlEvent::Blur);
    let teardown = async {
        field.detach();
    };
    tokio::join!(check, teardown);

    // the check resolved after detach and was dropped wholesale: neither
    // the custom error nor the touched transition was ever published
    assert!(!field.is_attached());
    assert_eq!(field.state(), before);
    assert_eq!(control.markers(), Default::default());
}
