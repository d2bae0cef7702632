//! PayHubGateway unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use payhub_types::codes::ERROR_CODES;
    use payhub_types::{
        Address, ConfigError, CreditCard, Customer, GatewayError, HttpTransport, Money,
        PaymentOptions, RequestHeaders, StandardErrorCode, TransportError,
    };

    use crate::{GatewayConfig, LIVE_URL, PayHubGateway};

    /// A request the mock received.
    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub url: String,
        pub body: Value,
        pub headers: RequestHeaders,
    }

    /// Scripted in-memory transport for testing the gateway.
    ///
    /// Replies are handed out in order; once exhausted every call fails with
    /// a network error.
    pub struct MockTransport {
        replies: Mutex<VecDeque<Result<String, TransportError>>>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                replies: Mutex::new(VecDeque::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn reply_ok(self, body: &str) -> Self {
            self.replies.lock().unwrap().push_back(Ok(body.to_string()));
            self
        }

        pub fn reply_status(self, status: u16, body: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(TransportError::Response {
                    status,
                    body: body.to_string(),
                }));
            self
        }

        pub fn reply_network_error(self, reason: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(TransportError::Network(reason.to_string())));
            self
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn post(
            &self,
            url: &str,
            body: String,
            headers: &RequestHeaders,
        ) -> Result<String, TransportError> {
            self.calls.lock().unwrap().push(RecordedCall {
                url: url.to_string(),
                body: serde_json::from_str(&body).unwrap(),
                headers: headers.clone(),
            });
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Network("no scripted reply".into())))
        }
    }

    const APPROVED: &str =
        r#"{"RESPONSE_CODE":"00","RESPONSE_TEXT":"Approved","TRANSACTION_ID":"abc123"}"#;

    fn config() -> GatewayConfig {
        GatewayConfig::new()
            .with_org_id("10005")
            .with_username("api-user")
            .with_password("secret-token")
            .with_terminal_id("5")
    }

    fn gateway(transport: MockTransport) -> PayHubGateway<MockTransport> {
        PayHubGateway::new(config(), transport).unwrap()
    }

    fn card() -> CreditCard {
        CreditCard::new("4111111111111111", 9, 2030)
            .unwrap()
            .with_verification_value("123")
    }

    fn money(cents: i64) -> Money {
        Money::new(cents).unwrap()
    }

    fn header<'a>(call: &'a RecordedCall, name: &str) -> Option<&'a str> {
        call.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Construction
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_missing_credential_fails_fast() {
        let transport = Arc::new(MockTransport::new());
        let result = PayHubGateway::new(
            GatewayConfig {
                terminal_id: None,
                ..config()
            },
            transport.clone(),
        );

        assert!(matches!(result, Err(ConfigError::MissingField("tid"))));
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_username_is_required_even_though_unused() {
        let result = PayHubGateway::new(
            GatewayConfig {
                username: None,
                ..config()
            },
            MockTransport::new(),
        );
        assert!(matches!(result, Err(ConfigError::MissingField("username"))));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // End-to-end outcomes
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_purchase_approved() {
        let gateway = gateway(MockTransport::new().reply_ok(APPROVED));

        let response = gateway
            .purchase(money(1000), &card(), &PaymentOptions::default())
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("Approved"));
        assert_eq!(response.authorization.as_deref(), Some("abc123"));
        assert_eq!(response.error_code, None);
        assert!(!response.test);
    }

    #[tokio::test]
    async fn test_purchase_declined() {
        let gateway = gateway(MockTransport::new().reply_status(400, r#"{"RESPONSE_CODE":"05"}"#));

        let response = gateway
            .purchase(money(1000), &card(), &PaymentOptions::default())
            .await
            .unwrap();

        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("05"));
        assert_eq!(response.error_code, Some(StandardErrorCode::CardDeclined));
    }

    #[tokio::test]
    async fn test_every_mapped_code_on_failure() {
        for (code, expected) in ERROR_CODES {
            let body = json!({ "RESPONSE_CODE": code }).to_string();
            let gateway = gateway(MockTransport::new().reply_status(400, &body));

            let response = gateway
                .authorize(money(500), &card(), &PaymentOptions::default())
                .await
                .unwrap();

            assert!(!response.success);
            assert_eq!(response.error_code, Some(*expected), "code {}", code);
        }
    }

    #[tokio::test]
    async fn test_unmapped_code_on_failure() {
        let gateway = gateway(MockTransport::new().reply_status(400, r#"{"RESPONSE_CODE":"N7"}"#));

        let response = gateway
            .authorize(money(500), &card(), &PaymentOptions::default())
            .await
            .unwrap();

        assert!(!response.success);
        assert_eq!(response.error_code, None);
    }

    #[tokio::test]
    async fn test_malformed_body_on_success_status() {
        let gateway = gateway(MockTransport::new().reply_ok("Service Temporarily Unavailable"));

        let response = gateway
            .purchase(money(1000), &card(), &PaymentOptions::default())
            .await
            .unwrap();

        assert!(!response.success);
        assert!(
            response
                .message
                .unwrap()
                .contains("Service Temporarily Unavailable")
        );
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        let gateway = gateway(MockTransport::new().reply_network_error("connection refused"));

        let result = gateway
            .purchase(money(1000), &card(), &PaymentOptions::default())
            .await;

        assert!(matches!(
            result,
            Err(GatewayError::Transport(TransportError::Network(reason))) if reason == "connection refused"
        ));
    }

    #[tokio::test]
    async fn test_avs_and_cvv_results() {
        let gateway = gateway(MockTransport::new().reply_ok(
            r#"{"RESPONSE_CODE":"00","AVS_RESULT_CODE":"N","VERIFICATION_RESULT_CODE":"N"}"#,
        ));

        let response = gateway
            .verify(&card(), &PaymentOptions::default())
            .await
            .unwrap();

        assert_eq!(response.avs_result.code.as_deref(), Some("N"));
        assert_eq!(
            response.avs_result.message,
            Some("No - Address and ZIP Code does not match")
        );
        assert_eq!(response.cvv_result.message, Some("CVV does not match"));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Wire format per operation
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_headers_and_url() {
        let gateway = gateway(MockTransport::new().reply_ok(APPROVED));
        gateway
            .authorize(money(1000), &card(), &PaymentOptions::default())
            .await
            .unwrap();

        let calls = gateway.transport().calls();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.url, format!("{}/authOnly", LIVE_URL));
        assert_eq!(header(call, "Content-Type"), Some("application/json"));
        assert_eq!(header(call, "Accept"), Some("application/json"));
        assert_eq!(header(call, "Authorization"), Some("Bearer secret-token"));
        assert_eq!(header(call, "cache-control"), Some("no-cache"));
    }

    #[tokio::test]
    async fn test_authorize_payload() {
        let gateway = gateway(MockTransport::new().reply_ok(APPROVED));
        let options = PaymentOptions::new()
            .with_customer(Customer {
                first_name: Some("Jane".into()),
                email: Some("jane@example.com".into()),
                ..Default::default()
            })
            .with_billing_address(Address {
                address1: Some("1 Main St".into()),
                zip: Some("94107".into()),
                ..Default::default()
            })
            .with_tax_amount(money(80));

        gateway
            .authorize(money(1000), &card(), &options)
            .await
            .unwrap();

        let body = &gateway.transport().calls()[0].body;
        assert_eq!(
            body["merchant"],
            json!({ "organization_id": "10005", "terminal_id": "5" })
        );
        assert!(body.get("mode").is_none());
        assert_eq!(body["record_format"], json!("CC"));
        assert_eq!(body["card_data"]["card_expiry_date"], json!("2030/09"));
        assert_eq!(body["card_data"]["billing_address_1"], json!("1 Main St"));
        assert_eq!(body["card_data"]["billing_zip"], json!("94107"));
        assert_eq!(
            body["bill"],
            json!({ "base_amount": "10.00", "tax_amount": "0.80" })
        );
        assert_eq!(body["customer"]["first_name"], json!("Jane"));
        assert_eq!(body["customer"]["last_name"], Value::Null);
        assert!(body.get("transaction_id").is_none());
    }

    #[tokio::test]
    async fn test_purchase_without_address_has_no_billing_fields() {
        let gateway = gateway(MockTransport::new().reply_ok(APPROVED));
        gateway
            .purchase(money(1000), &card(), &PaymentOptions::default())
            .await
            .unwrap();

        let calls = gateway.transport().calls();
        assert!(calls[0].url.ends_with("/sale"));
        let card_data = calls[0].body["card_data"].as_object().unwrap().clone();
        assert!(card_data.keys().all(|k| !k.starts_with("billing_")));
        assert!(calls[0].body.get("customer").is_some());
    }

    #[tokio::test]
    async fn test_test_mode_adds_demo_marker() {
        let gateway = PayHubGateway::new(
            config().with_test(true),
            MockTransport::new().reply_ok(APPROVED),
        )
        .unwrap();

        let response = gateway
            .purchase(money(1000), &card(), &PaymentOptions::default())
            .await
            .unwrap();

        let calls = gateway.transport().calls();
        assert_eq!(calls[0].body["mode"], json!("demo"));
        assert_eq!(calls[0].url, format!("{}/sale", LIVE_URL));
        assert!(response.test);
    }

    #[tokio::test]
    async fn test_capture_payload() {
        let gateway = gateway(MockTransport::new().reply_ok(APPROVED));
        gateway.capture(money(1000), "abc123").await.unwrap();

        let call = &gateway.transport().calls()[0];
        assert!(call.url.ends_with("/capture"));
        assert_eq!(
            call.body,
            json!({
                "merchant": { "organization_id": "10005", "terminal_id": "5" },
                "transaction_id": "abc123",
                "bill": { "base_amount": "10.00" },
            })
        );
    }

    #[tokio::test]
    async fn test_void_payload() {
        let gateway = gateway(MockTransport::new().reply_ok(APPROVED));
        gateway.void("abc123").await.unwrap();

        let call = &gateway.transport().calls()[0];
        assert!(call.url.ends_with("/void"));
        assert_eq!(
            call.body,
            json!({
                "merchant": { "organization_id": "10005", "terminal_id": "5" },
                "transaction_id": "abc123",
            })
        );
    }

    #[tokio::test]
    async fn test_verify_payload_has_no_bill() {
        let gateway = gateway(MockTransport::new().reply_ok(APPROVED));
        gateway
            .verify(&card(), &PaymentOptions::default())
            .await
            .unwrap();

        let call = &gateway.transport().calls()[0];
        assert!(call.url.ends_with("/verify"));
        assert!(call.body.get("bill").is_none());
        assert!(call.body.get("card_data").is_some());
        assert!(call.body.get("customer").is_some());
    }

    #[tokio::test]
    async fn test_card_data_is_rebuilt_per_request() {
        let gateway = gateway(MockTransport::new().reply_ok(APPROVED).reply_ok(APPROVED));
        let other = CreditCard::new("5555555555554444", 1, 2031).unwrap();

        gateway
            .authorize(money(100), &card(), &PaymentOptions::default())
            .await
            .unwrap();
        gateway
            .authorize(money(100), &other, &PaymentOptions::default())
            .await
            .unwrap();

        let calls = gateway.transport().calls();
        assert_eq!(calls[0].body["card_data"]["card_number"], json!("4111111111111111"));
        assert_eq!(calls[1].body["card_data"]["card_number"], json!("5555555555554444"));
        assert!(calls[1].body["card_data"].get("cvv_data").is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Refund
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_refund_satisfied_by_void() {
        let gateway = gateway(MockTransport::new().reply_ok(
            r#"{"RESPONSE_CODE":"00","RESPONSE_TEXT":"Voided","TRANSACTION_ID":"abc123"}"#,
        ));

        let response = gateway.refund(money(1000), "abc123").await.unwrap();

        let calls = gateway.transport().calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].url.ends_with("/void"));
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("Voided"));
    }

    #[tokio::test]
    async fn test_refund_after_failed_void() {
        let gateway = gateway(
            MockTransport::new()
                .reply_status(400, r#"{"RESPONSE_CODE":"12","RESPONSE_TEXT":"Already settled"}"#)
                .reply_ok(r#"{"RESPONSE_CODE":"00","RESPONSE_TEXT":"Refunded","TRANSACTION_ID":"r-1"}"#),
        );

        let response = gateway.refund(money(1000), "abc123").await.unwrap();

        let calls = gateway.transport().calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].url.ends_with("/void"));
        assert!(calls[1].url.ends_with("/refund"));
        assert_eq!(calls[1].body["transaction_id"], json!("abc123"));
        assert!(calls[1].body.get("bill").is_none());
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("Refunded"));
        assert_eq!(response.authorization.as_deref(), Some("r-1"));
    }

    #[tokio::test]
    async fn test_refund_failure_is_returned() {
        let gateway = gateway(
            MockTransport::new()
                .reply_status(400, r#"{"RESPONSE_CODE":"12"}"#)
                .reply_status(400, r#"{"RESPONSE_CODE":"51","RESPONSE_TEXT":"Declined"}"#),
        );

        let response = gateway.refund(money(1000), "abc123").await.unwrap();

        assert_eq!(gateway.transport().calls().len(), 2);
        assert!(!response.success);
        assert_eq!(response.error_code, Some(StandardErrorCode::CardDeclined));
    }

    #[tokio::test]
    async fn test_refund_stops_on_transport_failure() {
        let gateway = gateway(MockTransport::new().reply_network_error("timeout"));

        let result = gateway.refund(money(1000), "abc123").await;

        assert!(matches!(result, Err(GatewayError::Transport(_))));
        assert_eq!(gateway.transport().calls().len(), 1);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Sharing
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_shared_gateway_across_tasks() {
        let gateway = Arc::new(gateway(
            MockTransport::new().reply_ok(APPROVED).reply_ok(APPROVED),
        ));

        let a = tokio::spawn({
            let gateway = gateway.clone();
            async move { gateway.void("one").await }
        });
        let b = tokio::spawn({
            let gateway = gateway.clone();
            async move { gateway.void("two").await }
        });

        assert!(a.await.unwrap().unwrap().success);
        assert!(b.await.unwrap().unwrap().success);
        assert_eq!(gateway.transport().calls().len(), 2);
    }
}
