//! PayHub Gateway
//!
//! The six public operations. Each one composes the request builders, a
//! single transport call and the response interpreter. Refund may make a
//! second call (see `refund`).

use std::fmt;

use tracing::{debug, info, instrument};

use payhub_types::{
    ConfigError, CreditCard, GatewayError, GatewayResponse, HttpTransport, MerchantContext, Money,
    PaymentOptions, RequestHeaders,
};

use crate::config::GatewayConfig;
use crate::refund::RefundFlow;
use crate::request::{self, PayHubRequest};
use crate::response;

/// PayHub API actions, appended to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AuthOnly,
    Sale,
    Capture,
    Void,
    Refund,
    Verify,
}

impl Action {
    pub fn path(&self) -> &'static str {
        match self {
            Action::AuthOnly => "authOnly",
            Action::Sale => "sale",
            Action::Capture => "capture",
            Action::Void => "void",
            Action::Refund => "refund",
            Action::Verify => "verify",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// PayHub credit card gateway.
///
/// Generic over `T: HttpTransport` - the transport is injected at
/// construction. The gateway holds only immutable configuration, so one
/// instance can be shared (e.g. behind an `Arc`) by concurrent callers.
pub struct PayHubGateway<T: HttpTransport> {
    merchant: MerchantContext,
    password: String,
    test: bool,
    base_url: String,
    transport: T,
}

impl<T: HttpTransport> PayHubGateway<T> {
    pub const DISPLAY_NAME: &'static str = "PayHub";
    pub const HOMEPAGE_URL: &'static str = "http://www.payhub.com/";
    pub const SUPPORTED_COUNTRIES: &'static [&'static str] = &["US"];
    pub const DEFAULT_CURRENCY: &'static str = "USD";
    pub const SUPPORTED_CARD_BRANDS: &'static [&'static str] =
        &["visa", "master", "american_express", "discover"];

    /// Creates a gateway, failing fast if a required credential is missing.
    pub fn new(config: GatewayConfig, transport: T) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        Ok(Self {
            merchant: config.merchant,
            password: config.password,
            test: config.test,
            base_url: config.base_url,
            transport,
        })
    }

    /// Returns true when requests carry the demo marker.
    pub fn is_test(&self) -> bool {
        self.test
    }

    pub fn merchant(&self) -> &MerchantContext {
        &self.merchant
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Card Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Places a hold for `money` on the card.
    #[instrument(skip_all, fields(amount = %money))]
    pub async fn authorize(
        &self,
        money: Money,
        card: &CreditCard,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse, GatewayError> {
        let mut post = request::build_base(&self.merchant, self.test);
        request::add_card_data(&mut post, card, options.effective_address());
        add_bill_from_options(&mut post, money, options);
        request::add_customer_data(&mut post, &options.customer);

        self.commit(post, Action::AuthOnly).await
    }

    /// Authorizes and captures `money` in one step.
    #[instrument(skip_all, fields(amount = %money))]
    pub async fn purchase(
        &self,
        money: Money,
        card: &CreditCard,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse, GatewayError> {
        let mut post = request::build_base(&self.merchant, self.test);
        request::add_card_data(&mut post, card, options.effective_address());
        add_bill_from_options(&mut post, money, options);
        request::add_customer_data(&mut post, &options.customer);

        self.commit(post, Action::Sale).await
    }

    /// Checks the card without moving funds.
    #[instrument(skip_all)]
    pub async fn verify(
        &self,
        card: &CreditCard,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse, GatewayError> {
        let mut post = request::build_base(&self.merchant, self.test);
        request::add_card_data(&mut post, card, options.effective_address());
        request::add_customer_data(&mut post, &options.customer);

        self.commit(post, Action::Verify).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Reference Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Captures a prior authorization. Only the base amount is sent.
    #[instrument(skip_all, fields(amount = %money, transaction_id = %transaction_id))]
    pub async fn capture(
        &self,
        money: Money,
        transaction_id: &str,
    ) -> Result<GatewayResponse, GatewayError> {
        let mut post = request::build_base(&self.merchant, self.test);
        request::add_reference(&mut post, transaction_id);
        request::add_bill(&mut post, money, None, None, None);

        self.commit(post, Action::Capture).await
    }

    /// Cancels an unsettled transaction.
    #[instrument(skip(self))]
    pub async fn void(&self, transaction_id: &str) -> Result<GatewayResponse, GatewayError> {
        let mut post = request::build_base(&self.merchant, self.test);
        request::add_reference(&mut post, transaction_id);

        self.commit(post, Action::Void).await
    }

    /// Returns funds for a transaction.
    ///
    /// Tries a void first; if that succeeds its response is returned and no
    /// refund request is made. `money` is not sent: PayHub refunds the full
    /// transaction.
    #[instrument(skip_all, fields(amount = %money, transaction_id = %transaction_id))]
    pub async fn refund(
        &self,
        money: Money,
        transaction_id: &str,
    ) -> Result<GatewayResponse, GatewayError> {
        let mut flow = RefundFlow::start();
        loop {
            let response = match flow {
                RefundFlow::Done(response) => return Ok(response),
                RefundFlow::AttemptingVoid => {
                    let response = self.void(transaction_id).await?;
                    if response.success {
                        info!("Unsettled transaction voided instead of refunded");
                    }
                    response
                }
                RefundFlow::IssuingRefund => {
                    let mut post = request::build_base(&self.merchant, self.test);
                    request::add_reference(&mut post, transaction_id);
                    self.commit(post, Action::Refund).await?
                }
            };
            flow = flow.advance(response);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Plumbing
    // ─────────────────────────────────────────────────────────────────────────────

    fn url_for(&self, action: Action) -> String {
        format!("{}/{}", self.base_url, action.path())
    }

    fn request_headers(&self) -> RequestHeaders {
        vec![
            ("Content-Type", "application/json".to_string()),
            ("Authorization", format!("Bearer {}", self.password)),
            ("Accept", "application/json".to_string()),
            ("cache-control", "no-cache".to_string()),
        ]
    }

    async fn commit(
        &self,
        post: PayHubRequest,
        action: Action,
    ) -> Result<GatewayResponse, GatewayError> {
        let url = self.url_for(action);
        let body = serde_json::to_string(&post)?;

        debug!(%action, %url, test = self.test, "Sending request to PayHub");
        let outcome = self
            .transport
            .post(&url, body, &self.request_headers())
            .await;

        let response = response::interpret(outcome, self.test)?;
        debug!(
            %action,
            success = response.success,
            error_code = ?response.error_code,
            "PayHub responded"
        );
        Ok(response)
    }
}

/// Bill for authorize/purchase: the amount plus whatever extras the caller set.
fn add_bill_from_options(post: &mut PayHubRequest, money: Money, options: &PaymentOptions) {
    request::add_bill(
        post,
        money,
        options.tax_amount,
        options.shipping_amount,
        options.invoice_number.as_deref(),
    );
}
