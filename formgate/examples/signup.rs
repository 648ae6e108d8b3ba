//! Signup Form Example
//!
//! A console walkthrough of the validation lifecycle:
//! - TextInput controls with native constraints
//! - An async username-uniqueness validator
//! - Form aggregation and the submission gate
//!
//! Events are simulated in code; each step prints the states a real UI
//! would render from.

use std::fs::File;

use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use formgate::prelude::*;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    WriteLogger::init(
        LevelFilter::Debug,
        Config::default(),
        File::create("signup.log")?,
    )
    .ok();

    // ------------------------------------------------------------------------
    // Controls and fields
    // ------------------------------------------------------------------------

    let username_input = TextInput::new()
        .with_constraints(Constraints::new().required().min_length(3));
    let username = Field::new().with_validator(|value| async move {
        // stand-in for a lookup against a user service
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        Ok((value == "admin").then(|| "That username is taken".to_string()))
    });

    let email_input = TextInput::new()
        .with_kind(InputKind::Email)
        .with_constraints(Constraints::new().required());
    let email = Field::new();

    let terms_input = Checkbox::new().required();
    let terms = Field::new();

    username.attach(username_input.clone()).await;
    email.attach(email_input.clone()).await;
    terms.attach(terms_input.clone()).await;

    let _username_sub = username.subscribe(|state| {
        if state.show {
            println!("  [username] {}", state.message);
        }
    });

    // ------------------------------------------------------------------------
    // Form and submission surface
    // ------------------------------------------------------------------------

    let form = Form::new();
    form.add(&username);
    form.add(&email);
    form.add(&terms);

    let surface = FormSurface::new();
    form.attach(&surface);

    println!("fresh form: {:?}", form.state());
    println!("submit while empty: {:?}", surface.request_submit());

    // ------------------------------------------------------------------------
    // The user fills the form in
    // ------------------------------------------------------------------------

    username_input.set_value("admin");
    username.handle_event(ControlEvent::Input).await;
    username.handle_event(ControlEvent::Blur).await;
    println!("after 'admin': {:?}", username.state().message);

    username_input.set_value("guest");
    username.handle_event(ControlEvent::Input).await;
    println!("after 'guest': valid={}", username.state().valid);

    email_input.set_value("guest@example.com");
    email.handle_event(ControlEvent::Change).await;

    terms_input.set_checked(true);
    terms.handle_event(ControlEvent::Change).await;

    println!("filled form: {:?}", form.state());
    println!("submit: {:?}", surface.request_submit());
    println!("submissions that went through: {}", surface.submission_count());

    Ok(())
}
