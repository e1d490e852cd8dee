// Donation flow
//
// Amount and frequency selection feed the summary panel and the impact
// description; submission opens a payment intent through the gateway,
// confirms it, and schedules the redirect to the confirmation URL with the
// payment id attached. Payment internals stay opaque behind the gateway
// trait.

use crate::collaborators::{PaymentGateway, PaymentRequest};
use crate::forms::messages::MessageCenter;
use crate::scheduler::{Scheduler, Task};
use log::{error, info};
use marquee_page::{ElementId, Page};
use marquee_utils::StatusMessage;
use std::fmt;
use std::time::Duration;

pub const DONATION_FORM_CLASS: &str = "donation-form";
pub const AMOUNT_OPTION_CLASS: &str = "amount-option";
pub const CUSTOM_AMOUNT_CLASS: &str = "custom-amount";
pub const FREQUENCY_CLASS: &str = "frequency-option";
pub const SELECTED_CLASS: &str = "selected";
pub const AMOUNT_ATTR: &str = "data-amount";

const SELECTED_AMOUNT_CLASS: &str = "selected-amount";
const SUMMARY_AMOUNT_CLASS: &str = "summary-amount";
const SUMMARY_FREQUENCY_CLASS: &str = "summary-frequency";
const SUMMARY_TOTAL_CLASS: &str = "summary-total";
const IMPACT_CLASS: &str = "impact-description";
const DONATE_BUTTON_CLASS: &str = "donate-btn";

const PROCESSING_LABEL: &str = "Processing...";
const THANKS_LABEL: &str = "Thank You!";
const REDIRECT_DELAY: Duration = Duration::from_millis(2000);
const DEFAULT_REDIRECT_BASE: &str = "/donate/thank-you/";

/// Donation cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frequency {
    #[default]
    OneTime,
    Monthly,
}

impl Frequency {
    /// Parse the radio input's wire value
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "one-time" => Some(Frequency::OneTime),
            "monthly" => Some(Frequency::Monthly),
            _ => None,
        }
    }

    pub fn wire(&self) -> &'static str {
        match self {
            Frequency::OneTime => "one-time",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::OneTime => write!(f, "One-time"),
            Frequency::Monthly => write!(f, "Monthly"),
        }
    }
}

/// Impact copy for the selected amount tier
pub fn impact_description(amount: f64) -> &'static str {
    if amount >= 1000.0 {
        "Sponsor a regional leadership summit for 100 young leaders"
    } else if amount >= 500.0 {
        "Launch a community empowerment program reaching 50 participants"
    } else if amount >= 250.0 {
        "Fund comprehensive skills training for 5 young people"
    } else if amount >= 100.0 {
        "Support one student in the mentorship program for three months"
    } else if amount >= 50.0 {
        "Cover leadership workshop participation for one attendee"
    } else if amount >= 25.0 {
        "Provide school supplies for one student for a full semester"
    } else {
        "Select an amount to see your impact"
    }
}

/// Controller for the donation form
pub struct DonationController {
    form: ElementId,
    button: Option<ElementId>,
    button_label: String,
    options: Vec<ElementId>,
    custom_input: Option<ElementId>,
    name_input: Option<ElementId>,
    email_input: Option<ElementId>,
    amount_display: Option<ElementId>,
    summary_amount: Option<ElementId>,
    summary_frequency: Option<ElementId>,
    summary_total: Option<ElementId>,
    impact: Option<ElementId>,
    selected_amount: f64,
    frequency: Frequency,
    redirect_base: String,
}

impl DonationController {
    /// Bind to the page's donation form, if it has one
    pub fn bind(page: &mut Page) -> Option<Self> {
        let form = page.first_class(DONATION_FORM_CLASS)?;
        let button = page.first_class(DONATE_BUTTON_CLASS);
        let button_label = button.map(|b| page.text(b).to_string()).unwrap_or_default();
        let mut controller = Self {
            form,
            button,
            button_label,
            options: page.select_class(AMOUNT_OPTION_CLASS),
            custom_input: page.first_class(CUSTOM_AMOUNT_CLASS),
            name_input: page.first_class("donor-name"),
            email_input: page.first_class("donor-email"),
            amount_display: page.first_class(SELECTED_AMOUNT_CLASS),
            summary_amount: page.first_class(SUMMARY_AMOUNT_CLASS),
            summary_frequency: page.first_class(SUMMARY_FREQUENCY_CLASS),
            summary_total: page.first_class(SUMMARY_TOTAL_CLASS),
            impact: page.first_class(IMPACT_CLASS),
            selected_amount: 0.0,
            frequency: Frequency::default(),
            redirect_base: page
                .attr(form, "data-redirect")
                .unwrap_or(DEFAULT_REDIRECT_BASE)
                .to_string(),
        };
        controller.update_displays(page);
        Some(controller)
    }

    pub fn form(&self) -> ElementId {
        self.form
    }

    pub fn selected_amount(&self) -> f64 {
        self.selected_amount
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn owns_option(&self, element: ElementId) -> bool {
        self.options.contains(&element)
    }

    pub fn is_custom_input(&self, element: ElementId) -> bool {
        self.custom_input == Some(element)
    }

    pub fn is_frequency_input(&self, page: &Page, element: ElementId) -> bool {
        page.has_class(element, FREQUENCY_CLASS)
    }

    /// Select a preset amount card; presets and the custom input are
    /// mutually exclusive.
    pub fn select_preset(&mut self, page: &mut Page, option: ElementId) {
        if !self.options.contains(&option) {
            return;
        }
        for other in &self.options {
            page.remove_class(*other, SELECTED_CLASS);
        }
        page.add_class(option, SELECTED_CLASS);
        self.selected_amount = page
            .attr(option, AMOUNT_ATTR)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        if let Some(custom) = self.custom_input {
            page.set_value(custom, "");
        }
        self.update_displays(page);
    }

    /// A custom amount clears any preset selection
    pub fn set_custom_amount(&mut self, page: &mut Page, raw: &str) {
        for option in &self.options {
            page.remove_class(*option, SELECTED_CLASS);
        }
        self.selected_amount = raw.trim().parse::<f64>().unwrap_or(0.0).max(0.0);
        self.update_displays(page);
    }

    pub fn set_frequency(&mut self, page: &mut Page, wire_value: &str) {
        self.frequency = Frequency::from_wire(wire_value).unwrap_or_default();
        self.update_displays(page);
    }

    /// Refresh the amount, summary and impact displays
    pub fn update_displays(&self, page: &mut Page) {
        if let Some(display) = self.amount_display {
            page.set_text(display, format!("{:.2}", self.selected_amount));
        }
        if let Some(display) = self.summary_amount {
            page.set_text(display, format!("${:.2}", self.selected_amount));
        }
        if let Some(display) = self.summary_total {
            page.set_text(display, format!("${:.2}", self.selected_amount));
        }
        if let Some(display) = self.summary_frequency {
            page.set_text(display, self.frequency.to_string());
        }
        if let Some(display) = self.impact {
            page.set_text(display, impact_description(self.selected_amount));
        }
    }

    /// Run the payment flow. On success the confirmation redirect is
    /// scheduled and true is returned; every failure path re-enables the
    /// form and reports through the message center.
    pub fn submit(
        &mut self,
        page: &mut Page,
        scheduler: &mut Scheduler,
        center: &mut MessageCenter,
        gateway: &mut dyn PaymentGateway,
    ) -> bool {
        if self.selected_amount <= 0.0 {
            center.show(
                page,
                scheduler,
                StatusMessage::warning("Please select a donation amount."),
            );
            return false;
        }
        let donor_name = self
            .name_input
            .map(|input| page.value(input).trim().to_string())
            .unwrap_or_default();
        let donor_email = self
            .email_input
            .map(|input| page.value(input).trim().to_string())
            .unwrap_or_default();
        if donor_name.is_empty() || donor_email.is_empty() {
            center.show(
                page,
                scheduler,
                StatusMessage::warning("Please fill in all required fields."),
            );
            return false;
        }

        self.set_busy(page, true);
        let request = PaymentRequest {
            amount_cents: (self.selected_amount * 100.0).round() as i64,
            frequency: self.frequency.wire().to_string(),
            donor_name,
            donor_email,
        };

        let intent = match gateway.create_payment_intent(&request) {
            Ok(intent) => intent,
            Err(err) => {
                error!("Marquee: {} intent creation failed: {}", gateway.name(), err);
                center.show(
                    page,
                    scheduler,
                    StatusMessage::error("An error occurred. Please try again."),
                );
                self.set_busy(page, false);
                return false;
            }
        };

        match gateway.confirm_payment(&intent.client_secret) {
            Ok(confirmation) => {
                info!(
                    "Marquee: donation of ${:.2} confirmed as {}",
                    self.selected_amount, confirmation.payment_id
                );
                if let Some(button) = self.button {
                    page.set_text(button, THANKS_LABEL);
                }
                scheduler.schedule_after(
                    REDIRECT_DELAY,
                    Task::Redirect(format!(
                        "{}?payment_intent={}",
                        self.redirect_base, confirmation.payment_id
                    )),
                );
                true
            }
            Err(err) => {
                error!("Marquee: {} confirmation failed: {}", gateway.name(), err);
                center.show(page, scheduler, StatusMessage::error(err.to_string()));
                self.set_busy(page, false);
                false
            }
        }
    }

    fn set_busy(&self, page: &mut Page, busy: bool) {
        let Some(button) = self.button else {
            return;
        };
        page.set_disabled(button, busy);
        if busy {
            page.set_text(button, PROCESSING_LABEL);
        } else {
            page.set_text(button, self.button_label.clone());
        }
    }
}
