//! Contact form validation and simulated submission.
//!
//! DESIGN
//! ======
//! Validation runs in two places. Submitting checks all four fields at once
//! with field-specific messages; leaving a field (blur) re-checks just that
//! field with a generic "`<label>` is required" message. Editing a field clears
//! its error without re-validating.
//!
//! Errors render inline: a red caption appended to the field's parent and a red
//! border on the field. There is no network request. A valid submission
//! disables the submit control for a fixed delay, then the controller raises a
//! success toast and the form is reset.

#[cfg(test)]
#[path = "contact_form_test.rs"]
mod contact_form_test;

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::bindings::FormBindings;
use crate::controller::Task;
use crate::dom::{Dom, NodeRef};
use crate::scheduler::TimerQueue;

pub const ERROR_CLASS: &str = "field-error";
pub const ERROR_COLOR: &str = "#e74c3c";
pub const NEUTRAL_BORDER_COLOR: &str = "#e0e0e0";
pub const SENDING_LABEL: &str = "Sending...";

static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.as_ref().is_ok_and(|pattern| pattern.is_match(email))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    #[must_use]
    pub fn missing_message(self) -> &'static str {
        match self {
            Self::Name => "Please enter your name",
            Self::Email => "Please enter your email",
            Self::Subject => "Please enter a subject",
            Self::Message => "Please enter your message",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Blank field found on submit.
    #[error("{}", .0.missing_message())]
    Missing(Field),
    /// Blank field found on blur, named by its placeholder or name.
    #[error("{0} is required")]
    Required(String),
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactValues {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Check all four values. Empty result means valid.
///
/// Blankness is judged on trimmed values; the email pattern is matched
/// against the raw value, so surrounding whitespace fails it.
pub fn validate(values: &ContactValues) -> Vec<(Field, FieldError)> {
    let mut issues = Vec::new();
    if values.name.trim().is_empty() {
        issues.push((Field::Name, FieldError::Missing(Field::Name)));
    }
    if values.email.trim().is_empty() {
        issues.push((Field::Email, FieldError::Missing(Field::Email)));
    } else if !is_valid_email(&values.email) {
        issues.push((Field::Email, FieldError::InvalidEmail));
    }
    if values.subject.trim().is_empty() {
        issues.push((Field::Subject, FieldError::Missing(Field::Subject)));
    }
    if values.message.trim().is_empty() {
        issues.push((Field::Message, FieldError::Missing(Field::Message)));
    }
    issues
}

/// Check one field's value the way blur validation does.
pub fn validate_value(value: &str, label: &str, is_email: bool) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required(label.to_owned()));
    }
    if is_email && !is_valid_email(value) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

#[must_use]
pub fn success_message(name: &str) -> String {
    format!("Thank you for your message, {name}! I will get back to you soon.")
}

/// Error state of an invalid field. Valid fields have no entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldState {
    pub message: String,
    pub error_node: Option<NodeRef>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; errors are shown inline.
    Rejected,
    /// A previous submission is still in flight.
    Pending,
    /// Simulated submission started.
    Sending,
}

#[derive(Clone, Debug)]
pub struct ContactForm {
    bindings: FormBindings,
    invalid: HashMap<NodeRef, FieldState>,
    in_flight: bool,
    submission_delay_ms: u32,
}

impl ContactForm {
    #[must_use]
    pub fn new(bindings: FormBindings, submission_delay_ms: u32) -> Self {
        Self { bindings, invalid: HashMap::new(), in_flight: false, submission_delay_ms }
    }

    #[must_use]
    pub fn bindings(&self) -> &FormBindings {
        &self.bindings
    }

    #[must_use]
    pub fn node_for(&self, field: Field) -> NodeRef {
        match field {
            Field::Name => self.bindings.name,
            Field::Email => self.bindings.email,
            Field::Subject => self.bindings.subject,
            Field::Message => self.bindings.message,
        }
    }

    #[must_use]
    pub fn field_state(&self, node: NodeRef) -> Option<&FieldState> {
        self.invalid.get(&node)
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn read_values(&self, dom: &impl Dom) -> ContactValues {
        ContactValues {
            name: dom.value(self.bindings.name),
            email: dom.value(self.bindings.email),
            subject: dom.value(self.bindings.subject),
            message: dom.value(self.bindings.message),
        }
    }

    /// Validate `values`, showing an inline error on each failing field.
    pub fn validate_form(&mut self, dom: &mut impl Dom, values: &ContactValues) -> bool {
        let issues = validate(values);
        for (field, error) in &issues {
            let node = self.node_for(*field);
            self.show_error(dom, node, &error.to_string());
        }
        issues.is_empty()
    }

    pub fn on_submit(&mut self, dom: &mut impl Dom, timers: &mut TimerQueue<Task>) -> SubmitOutcome {
        if self.in_flight {
            log::debug!("contact form submit ignored; submission in flight");
            return SubmitOutcome::Pending;
        }
        let values = self.read_values(dom);
        if !self.validate_form(dom, &values) {
            log::debug!("contact form rejected by validation");
            return SubmitOutcome::Rejected;
        }
        self.simulate_submission(dom, timers, values.name);
        SubmitOutcome::Sending
    }

    /// Put the submit control into its pending state and queue completion.
    pub fn simulate_submission(&mut self, dom: &mut impl Dom, timers: &mut TimerQueue<Task>, name: String) {
        let submit = self.bindings.submit;
        let label = dom.text(submit);
        dom.set_text(submit, SENDING_LABEL);
        dom.set_disabled(submit, true);
        self.in_flight = true;
        timers.schedule(self.submission_delay_ms, Task::CompleteSubmission { name, label });
    }

    /// Reset the form to its defaults and restore the submit control.
    pub fn finish_submission(&mut self, dom: &mut impl Dom, label: &str) {
        dom.reset_form(self.bindings.form);
        let submit = self.bindings.submit;
        dom.set_text(submit, label);
        dom.set_disabled(submit, false);
        self.in_flight = false;
    }

    /// Re-validate one field after it loses focus. Returns whether it passed.
    pub fn on_blur(&mut self, dom: &mut impl Dom, node: NodeRef) -> bool {
        let value = dom.value(node);
        let label = ["placeholder", "name"]
            .into_iter()
            .filter_map(|attr| dom.attribute(node, attr))
            .find(|label| !label.is_empty())
            .unwrap_or_default();
        let is_email = dom.attribute(node, "type").as_deref() == Some("email");
        match validate_value(&value, &label, is_email) {
            Ok(()) => {
                self.clear_error(dom, node);
                true
            }
            Err(error) => {
                self.show_error(dom, node, &error.to_string());
                false
            }
        }
    }

    /// Editing a field drops its error immediately.
    pub fn on_input(&mut self, dom: &mut impl Dom, node: NodeRef) {
        self.clear_error(dom, node);
    }

    pub fn show_error(&mut self, dom: &mut impl Dom, node: NodeRef, message: &str) {
        self.clear_error(dom, node);

        let error_node = match (dom.parent(node), dom.create_element("div")) {
            (Some(parent), Some(caption)) => {
                dom.set_class_name(caption, ERROR_CLASS);
                dom.set_style(caption, "color", ERROR_COLOR);
                dom.set_style(caption, "font-size", "0.8rem");
                dom.set_style(caption, "margin-top", "5px");
                dom.set_text(caption, message);
                dom.append_child(parent, caption);
                Some(caption)
            }
            _ => None,
        };
        dom.set_style(node, "border-color", ERROR_COLOR);
        self.invalid.insert(node, FieldState { message: message.to_owned(), error_node });
    }

    pub fn clear_error(&mut self, dom: &mut impl Dom, node: NodeRef) {
        dom.set_style(node, "border-color", NEUTRAL_BORDER_COLOR);
        if let Some(FieldState { error_node: Some(caption), .. }) = self.invalid.remove(&node) {
            dom.remove(caption);
        }
    }
}
