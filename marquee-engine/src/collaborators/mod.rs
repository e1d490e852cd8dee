// External collaborators
//
// The server endpoints and payment gateway the page talks to are opaque to
// this engine: each is a trait with a request/response envelope, so form
// and donation controllers can be exercised against mocks. Failures are
// isolated — a failing collaborator surfaces as an inline message, never a
// crash.
//
// ```text
// FormController ─────▶ FormEndpoint ───▶ POST /newsletter-subscribe/
// DonationController ─▶ PaymentGateway ─▶ create intent / confirm
// ```

mod endpoint;
mod error;
mod mock;

pub use endpoint::{
    FormEndpoint, FormResponse, FormSubmission, PaymentConfirmation, PaymentGateway,
    PaymentIntent, PaymentRequest,
};
pub use error::{EndpointError, EndpointResult};
pub use mock::{MockEndpoint, MockGateway};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// End-to-end check of the mock workflow controllers rely on
    #[test]
    fn test_mock_endpoint_workflow() {
        let mut mock = MockEndpoint::new("newsletter");
        mock.set_response(Ok(FormResponse {
            success: true,
            message: Some("Thank you for subscribing!".to_string()),
        }));

        let submission = FormSubmission {
            action: "/newsletter-subscribe/".to_string(),
            fields: BTreeMap::from([("email".to_string(), "ada@example.org".to_string())]),
            csrf_token: "token-1".to_string(),
        };
        let response = mock.submit(&submission).unwrap();
        assert!(response.success);
        assert_eq!(mock.submit_count(), 1);
        assert_eq!(
            mock.last_submission().unwrap().fields["email"],
            "ada@example.org"
        );
    }

    #[test]
    fn test_mock_gateway_workflow() {
        let mut gateway = MockGateway::new();
        let request = PaymentRequest {
            amount_cents: 2500,
            frequency: "monthly".to_string(),
            donor_name: "Ada".to_string(),
            donor_email: "ada@example.org".to_string(),
        };

        let intent = gateway.create_payment_intent(&request).unwrap();
        assert!(!intent.client_secret.is_empty());

        let confirmation = gateway.confirm_payment(&intent.client_secret).unwrap();
        assert!(confirmation.payment_id.starts_with("pi_"));
        assert_eq!(gateway.intent_count(), 1);
        assert_eq!(gateway.confirm_count(), 1);
    }

    #[test]
    fn test_response_envelope_parses_from_json() {
        let response: FormResponse =
            serde_json::from_str(r#"{"success": true, "message": "ok"}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("ok"));

        // Message is optional on the wire
        let response: FormResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.message, None);
    }
}
