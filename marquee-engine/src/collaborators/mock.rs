// Mock collaborators
//
// Test and demo stand-ins for the server endpoint and payment gateway.
// Tests script responses, simulate failures, and verify what the
// controllers actually sent.

use super::endpoint::{
    FormEndpoint, FormResponse, FormSubmission, PaymentConfirmation, PaymentGateway,
    PaymentIntent, PaymentRequest,
};
use super::error::{EndpointError, EndpointResult};
use uuid::Uuid;

/// Mock form endpoint with a scripted response and call accounting.
/// Defaults to a bare success envelope; `set_response` overrides it, and
/// the counters verify what controllers actually did.
pub struct MockEndpoint {
    name: String,
    response: EndpointResult<FormResponse>,
    submit_count: usize,
    last_submission: Option<FormSubmission>,
}

impl MockEndpoint {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            response: Ok(FormResponse {
                success: true,
                message: None,
            }),
            submit_count: 0,
            last_submission: None,
        }
    }

    /// Script the result the next submissions will receive
    pub fn set_response(&mut self, response: EndpointResult<FormResponse>) {
        self.response = response;
    }

    pub fn submit_count(&self) -> usize {
        self.submit_count
    }

    pub fn last_submission(&self) -> Option<&FormSubmission> {
        self.last_submission.as_ref()
    }

    /// Reset counters and recorded submissions
    pub fn reset(&mut self) {
        self.submit_count = 0;
        self.last_submission = None;
    }
}

impl FormEndpoint for MockEndpoint {
    fn submit(&mut self, submission: &FormSubmission) -> EndpointResult<FormResponse> {
        self.submit_count += 1;
        self.last_submission = Some(submission.clone());
        self.response.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Mock payment gateway issuing uuid-based secrets and payment ids
pub struct MockGateway {
    intent_response: Option<EndpointResult<PaymentIntent>>,
    confirm_response: Option<EndpointResult<PaymentConfirmation>>,
    intent_count: usize,
    confirm_count: usize,
    last_request: Option<PaymentRequest>,
    open_secret: Option<String>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            intent_response: None,
            confirm_response: None,
            intent_count: 0,
            confirm_count: 0,
            last_request: None,
            open_secret: None,
        }
    }

    /// Override the scripted intent result (None = issue a fresh secret)
    pub fn set_intent_response(&mut self, response: EndpointResult<PaymentIntent>) {
        self.intent_response = Some(response);
    }

    /// Override the scripted confirmation result
    pub fn set_confirm_response(&mut self, response: EndpointResult<PaymentConfirmation>) {
        self.confirm_response = Some(response);
    }

    pub fn intent_count(&self) -> usize {
        self.intent_count
    }

    pub fn confirm_count(&self) -> usize {
        self.confirm_count
    }

    pub fn last_request(&self) -> Option<&PaymentRequest> {
        self.last_request.as_ref()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentGateway for MockGateway {
    fn create_payment_intent(&mut self, request: &PaymentRequest) -> EndpointResult<PaymentIntent> {
        self.intent_count += 1;
        self.last_request = Some(request.clone());
        if let Some(response) = &self.intent_response {
            return response.clone();
        }
        let secret = format!("seti_{}", Uuid::new_v4().simple());
        self.open_secret = Some(secret.clone());
        Ok(PaymentIntent {
            client_secret: secret,
        })
    }

    fn confirm_payment(&mut self, client_secret: &str) -> EndpointResult<PaymentConfirmation> {
        self.confirm_count += 1;
        if let Some(response) = &self.confirm_response {
            return response.clone();
        }
        match self.open_secret.take() {
            Some(open) if open == client_secret => Ok(PaymentConfirmation {
                payment_id: format!("pi_{}", Uuid::new_v4().simple()),
            }),
            _ => Err(EndpointError::UnknownIntent(client_secret.to_string())),
        }
    }

    fn name(&self) -> &str {
        "mock-gateway"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn submission() -> FormSubmission {
        FormSubmission {
            action: "/contact/".to_string(),
            fields: BTreeMap::new(),
            csrf_token: "tok".to_string(),
        }
    }

    #[test]
    fn test_scripted_failure() {
        let mut mock = MockEndpoint::new("contact");
        mock.set_response(Err(EndpointError::Network("refused".to_string())));

        let result = mock.submit(&submission());
        assert!(matches!(result, Err(EndpointError::Network(_))));
        assert_eq!(mock.submit_count(), 1);
    }

    #[test]
    fn test_reset() {
        let mut mock = MockEndpoint::new("contact");
        mock.submit(&submission()).unwrap();
        assert_eq!(mock.submit_count(), 1);

        mock.reset();
        assert_eq!(mock.submit_count(), 0);
        assert!(mock.last_submission().is_none());
    }

    #[test]
    fn test_gateway_rejects_unknown_secret() {
        let mut gateway = MockGateway::new();
        let result = gateway.confirm_payment("seti_never_issued");
        assert!(matches!(result, Err(EndpointError::UnknownIntent(_))));
    }

    #[test]
    fn test_gateway_scripted_decline() {
        let mut gateway = MockGateway::new();
        gateway.set_confirm_response(Err(EndpointError::PaymentDeclined(
            "insufficient funds".to_string(),
        )));

        let request = PaymentRequest {
            amount_cents: 100,
            frequency: "one-time".to_string(),
            donor_name: "Ada".to_string(),
            donor_email: "ada@example.org".to_string(),
        };
        let intent = gateway.create_payment_intent(&request).unwrap();
        let result = gateway.confirm_payment(&intent.client_secret);
        assert!(matches!(result, Err(EndpointError::PaymentDeclined(_))));
    }

    #[test]
    fn test_mock_names() {
        assert_eq!(MockEndpoint::new("newsletter").name(), "newsletter");
        assert_eq!(MockGateway::new().name(), "mock-gateway");
    }
}
