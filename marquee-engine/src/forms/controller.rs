// Form controller
//
// Binds to one form on the page: validates fields inline, posts through
// the collaborator endpoint with the form's CSRF token, and reports the
// outcome through the message center. A failed submission re-enables the
// form so the user can retry; nothing is retried automatically.

use crate::collaborators::{FormEndpoint, FormSubmission};
use crate::forms::messages::MessageCenter;
use crate::forms::validate::{validate, FieldKind};
use crate::scheduler::Scheduler;
use log::{error, info};
use marquee_page::{ElementId, Page};
use marquee_utils::StatusMessage;
use std::collections::BTreeMap;

/// Forms the runtime binds controllers to
pub const FORM_CLASS: &str = "ajax-form";

pub const ERROR_CLASS: &str = "error";
pub const ERROR_MESSAGE_CLASS: &str = "error-message";

const PROCESSING_LABEL: &str = "Processing...";
const DEFAULT_SUCCESS: &str = "Thank you!";
const DEFAULT_FAILURE: &str = "Submission failed. Please try again.";
const NETWORK_FAILURE: &str = "Network error. Please try again.";

/// Name of the hidden input carrying the CSRF token
const CSRF_FIELD: &str = "csrfmiddlewaretoken";

#[derive(Debug, Clone)]
struct FieldSpec {
    input: ElementId,
    name: String,
    kind: FieldKind,
    required: bool,
}

/// Controller for one form
pub struct FormController {
    form: ElementId,
    action: String,
    submit_button: Option<ElementId>,
    submit_label: String,
    fields: Vec<FieldSpec>,
    csrf_input: Option<ElementId>,
}

impl FormController {
    /// Bind to a form element, discovering its fields and submit control.
    /// Returns None when the form is not on the page.
    pub fn bind(page: &Page, form: ElementId) -> Option<Self> {
        if !page.contains(form) {
            return None;
        }
        let action = page.attr(form, "action").unwrap_or("/").to_string();

        let mut fields = Vec::new();
        let mut submit_button = None;
        let mut csrf_input = None;
        for element in descendants(page, form) {
            let Some(el) = page.element(element) else {
                continue;
            };
            match el.kind.as_str() {
                "button" => {
                    if submit_button.is_none() {
                        submit_button = Some(element);
                    }
                }
                "input" | "textarea" => {
                    let Some(name) = el.attr("name") else {
                        continue;
                    };
                    if name == CSRF_FIELD {
                        csrf_input = Some(element);
                        continue;
                    }
                    let kind = if el.attr("type") == Some("email") {
                        FieldKind::Email
                    } else {
                        FieldKind::Text
                    };
                    fields.push(FieldSpec {
                        input: element,
                        name: name.to_string(),
                        kind,
                        required: el.attr("required").is_some(),
                    });
                }
                _ => {}
            }
        }

        let submit_label = submit_button
            .map(|button| page.text(button).to_string())
            .unwrap_or_default();
        Some(Self {
            form,
            action,
            submit_button,
            submit_label,
            fields,
            csrf_input,
        })
    }

    pub fn form(&self) -> ElementId {
        self.form
    }

    pub fn owns_input(&self, input: ElementId) -> bool {
        self.fields.iter().any(|field| field.input == input)
    }

    /// Validate one field on blur, surfacing or clearing its inline error
    pub fn on_blur(&self, page: &mut Page, input: ElementId) -> bool {
        let Some(field) = self.fields.iter().find(|field| field.input == input) else {
            return true;
        };
        self.clear_field_error(page, input);
        match validate(field.kind, field.required, page.value(input)) {
            Ok(()) => true,
            Err(err) => {
                self.show_field_error(page, input, err.message());
                false
            }
        }
    }

    /// Clear a field's error while the user edits it
    pub fn on_input(&self, page: &mut Page, input: ElementId) {
        if self.owns_input(input) {
            self.clear_field_error(page, input);
        }
    }

    /// Validate everything; inline errors appear next to offending fields
    pub fn validate_all(&self, page: &mut Page) -> bool {
        let mut ok = true;
        for field in &self.fields {
            if !self.on_blur(page, field.input) {
                ok = false;
            }
        }
        ok
    }

    /// Submit the form through `endpoint`. Returns true on a success
    /// envelope; any failure leaves the form enabled for retry.
    pub fn submit(
        &mut self,
        page: &mut Page,
        scheduler: &mut Scheduler,
        center: &mut MessageCenter,
        endpoint: &mut dyn FormEndpoint,
    ) -> bool {
        if !self.validate_all(page) {
            return false;
        }
        self.set_busy(page, true);

        let mut field_values = BTreeMap::new();
        for field in &self.fields {
            field_values.insert(field.name.clone(), page.value(field.input).to_string());
        }
        let csrf_token = self
            .csrf_input
            .map(|input| page.value(input).to_string())
            .unwrap_or_default();
        let submission = FormSubmission {
            action: self.action.clone(),
            fields: field_values,
            csrf_token,
        };

        let outcome = endpoint.submit(&submission);
        self.set_busy(page, false);
        match outcome {
            Ok(response) if response.success => {
                let text = response
                    .message
                    .or_else(|| page.attr(self.form, "data-success-message").map(String::from))
                    .unwrap_or_else(|| DEFAULT_SUCCESS.to_string());
                center.show(page, scheduler, StatusMessage::success(text));
                self.reset(page);
                info!("Marquee: {} submitted via {}", self.action, endpoint.name());
                true
            }
            Ok(_) => {
                let text = page
                    .attr(self.form, "data-error-message")
                    .unwrap_or(DEFAULT_FAILURE)
                    .to_string();
                center.show(page, scheduler, StatusMessage::error(text));
                false
            }
            Err(err) => {
                error!(
                    "Marquee: {} submission via {} failed: {}",
                    self.action,
                    endpoint.name(),
                    err
                );
                center.show(page, scheduler, StatusMessage::error(NETWORK_FAILURE));
                false
            }
        }
    }

    fn set_busy(&self, page: &mut Page, busy: bool) {
        let Some(button) = self.submit_button else {
            return;
        };
        page.set_disabled(button, busy);
        if busy {
            page.set_text(button, PROCESSING_LABEL);
        } else {
            page.set_text(button, self.submit_label.clone());
        }
    }

    fn reset(&self, page: &mut Page) {
        for field in &self.fields {
            page.set_value(field.input, "");
            self.clear_field_error(page, field.input);
        }
    }

    fn show_field_error(&self, page: &mut Page, input: ElementId, message: &str) {
        page.add_class(input, ERROR_CLASS);
        let Some(parent) = page.element(input).and_then(|el| el.parent) else {
            return;
        };
        let existing = page
            .children(parent)
            .into_iter()
            .find(|child| page.has_class(*child, ERROR_MESSAGE_CLASS));
        let holder = existing.unwrap_or_else(|| {
            let created = page.create("div");
            page.add_class(created, ERROR_MESSAGE_CLASS);
            page.append_child(parent, created);
            created
        });
        page.set_text(holder, message);
    }

    fn clear_field_error(&self, page: &mut Page, input: ElementId) {
        page.remove_class(input, ERROR_CLASS);
        let Some(parent) = page.element(input).and_then(|el| el.parent) else {
            return;
        };
        let holders: Vec<ElementId> = page
            .children(parent)
            .into_iter()
            .filter(|child| page.has_class(*child, ERROR_MESSAGE_CLASS))
            .collect();
        for holder in holders {
            page.remove(holder);
        }
    }
}

/// Preorder walk of every element under `root`
fn descendants(page: &Page, root: ElementId) -> Vec<ElementId> {
    let mut result = Vec::new();
    let mut stack: Vec<ElementId> = page.children(root);
    stack.reverse();
    while let Some(element) = stack.pop() {
        result.push(element);
        let mut children = page.children(element);
        children.reverse();
        stack.extend(children);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{EndpointError, FormResponse, MockEndpoint};
    use marquee_page::Rect;

    struct Fixture {
        page: Page,
        scheduler: Scheduler,
        center: MessageCenter,
        controller: FormController,
        email: ElementId,
        button: ElementId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut page = Page::new();
            let form = page.create_with("form", &[FORM_CLASS], Rect::default());
            page.set_attr(form, "action", "/newsletter-subscribe/");
            page.set_attr(form, "data-success-message", "Thank you for subscribing!");
            page.set_attr(form, "data-error-message", "Subscription failed. Please try again.");

            let group = page.create("div");
            page.append_child(form, group);
            let email = page.create("input");
            page.set_attr(email, "name", "email");
            page.set_attr(email, "type", "email");
            page.set_attr(email, "required", "");
            page.append_child(group, email);

            let csrf = page.create("input");
            page.set_attr(csrf, "name", "csrfmiddlewaretoken");
            page.set_value(csrf, "tok-123");
            page.append_child(form, csrf);

            let button = page.create("button");
            page.set_text(button, "Subscribe");
            page.append_child(form, button);

            let controller = FormController::bind(&page, form).unwrap();
            Self {
                page,
                scheduler: Scheduler::new(),
                center: MessageCenter::new(),
                controller,
                email,
                button,
            }
        }
    }

    #[test]
    fn test_blur_validation_inline_errors() {
        let mut fx = Fixture::new();
        let email = fx.email;

        // Empty required field
        assert!(!fx.controller.on_blur(&mut fx.page, email));
        assert!(fx.page.has_class(email, ERROR_CLASS));
        let holder = fx.page.select_class(ERROR_MESSAGE_CLASS)[0];
        assert_eq!(fx.page.text(holder), "This field is required.");

        // Malformed email swaps the message
        fx.page.set_value(email, "nope");
        assert!(!fx.controller.on_blur(&mut fx.page, email));
        let holder = fx.page.select_class(ERROR_MESSAGE_CLASS)[0];
        assert_eq!(fx.page.text(holder), "Please enter a valid email address.");

        // Editing clears the error
        fx.controller.on_input(&mut fx.page, email);
        assert!(!fx.page.has_class(email, ERROR_CLASS));
        assert!(fx.page.select_class(ERROR_MESSAGE_CLASS).is_empty());
    }

    #[test]
    fn test_successful_submission_resets_form() {
        let mut fx = Fixture::new();
        let email = fx.email;
        fx.page.set_value(email, "ada@example.org");

        let mut endpoint = MockEndpoint::new("newsletter");
        endpoint.set_response(Ok(FormResponse {
            success: true,
            message: None,
        }));

        let ok = fx.controller.submit(
            &mut fx.page,
            &mut fx.scheduler,
            &mut fx.center,
            &mut endpoint,
        );
        assert!(ok);
        assert_eq!(endpoint.submit_count(), 1);

        let sent = endpoint.last_submission().unwrap();
        assert_eq!(sent.action, "/newsletter-subscribe/");
        assert_eq!(sent.fields["email"], "ada@example.org");
        assert_eq!(sent.csrf_token, "tok-123");

        // Form reset, button restored, success message from the form attr
        assert_eq!(fx.page.value(email), "");
        assert!(!fx.page.element(fx.button).unwrap().disabled);
        assert_eq!(fx.page.text(fx.button), "Subscribe");
        assert_eq!(
            fx.center.latest().unwrap().text,
            "Thank you for subscribing!"
        );
    }

    #[test]
    fn test_network_failure_reenables_for_retry() {
        let mut fx = Fixture::new();
        let email = fx.email;
        fx.page.set_value(email, "ada@example.org");

        let mut endpoint = MockEndpoint::new("newsletter");
        endpoint.set_response(Err(EndpointError::Network("refused".to_string())));

        let ok = fx.controller.submit(
            &mut fx.page,
            &mut fx.scheduler,
            &mut fx.center,
            &mut endpoint,
        );
        assert!(!ok);
        assert_eq!(
            fx.center.latest().unwrap().text,
            "Network error. Please try again."
        );
        // Value kept and form usable again
        assert_eq!(fx.page.value(email), "ada@example.org");
        assert!(!fx.page.element(fx.button).unwrap().disabled);

        // Retry succeeds
        endpoint.set_response(Ok(FormResponse {
            success: true,
            message: Some("Welcome back".to_string()),
        }));
        assert!(fx.controller.submit(
            &mut fx.page,
            &mut fx.scheduler,
            &mut fx.center,
            &mut endpoint,
        ));
        assert_eq!(endpoint.submit_count(), 2);
    }

    #[test]
    fn test_unsuccess_envelope_shows_form_error_text() {
        let mut fx = Fixture::new();
        let email = fx.email;
        fx.page.set_value(email, "ada@example.org");

        let mut endpoint = MockEndpoint::new("newsletter");
        endpoint.set_response(Ok(FormResponse {
            success: false,
            message: None,
        }));

        fx.controller.submit(
            &mut fx.page,
            &mut fx.scheduler,
            &mut fx.center,
            &mut endpoint,
        );
        assert_eq!(
            fx.center.latest().unwrap().text,
            "Subscription failed. Please try again."
        );
    }

    #[test]
    fn test_invalid_form_never_reaches_endpoint() {
        let mut fx = Fixture::new();
        let mut endpoint = MockEndpoint::new("newsletter");

        let ok = fx.controller.submit(
            &mut fx.page,
            &mut fx.scheduler,
            &mut fx.center,
            &mut endpoint,
        );
        assert!(!ok);
        assert_eq!(endpoint.submit_count(), 0);
        assert!(!fx.page.select_class(ERROR_MESSAGE_CLASS).is_empty());
    }

    #[test]
    fn test_bind_missing_form_is_none() {
        let page = Page::new();
        assert!(FormController::bind(&page, ElementId(404)).is_none());
    }
}
