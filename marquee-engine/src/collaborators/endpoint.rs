// Collaborator traits and wire envelopes

use super::error::EndpointResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A form-encoded POST to a server endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    /// Endpoint path, e.g. `/newsletter-subscribe/`
    pub action: String,
    /// Field name → value pairs
    pub fields: BTreeMap<String, String>,
    /// CSRF token sent as a request header
    pub csrf_token: String,
}

/// The JSON envelope every form endpoint answers with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// A server endpoint accepting form submissions.
///
/// Implementations own transport and authentication; the engine only sees
/// the envelope. Errors are returned, never thrown through the page.
pub trait FormEndpoint {
    /// Submit the form and return the server's envelope
    fn submit(&mut self, submission: &FormSubmission) -> EndpointResult<FormResponse>;

    /// Name for logging and error messages
    fn name(&self) -> &str;
}

/// What the donation form sends when creating a payment intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub amount_cents: i64,
    pub frequency: String,
    pub donor_name: String,
    pub donor_email: String,
}

/// Server-issued handle for confirming a payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub client_secret: String,
}

/// Gateway acknowledgement of a confirmed payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub payment_id: String,
}

/// The payment machinery behind the donation form, treated as opaque:
/// the engine never inspects payment state beyond these two calls.
pub trait PaymentGateway {
    /// Ask the server to open a payment intent for this request
    fn create_payment_intent(&mut self, request: &PaymentRequest) -> EndpointResult<PaymentIntent>;

    /// Confirm the payment for a previously issued client secret
    fn confirm_payment(&mut self, client_secret: &str) -> EndpointResult<PaymentConfirmation>;

    /// Name for logging and error messages
    fn name(&self) -> &str;
}
