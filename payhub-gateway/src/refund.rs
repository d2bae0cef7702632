//! Refund flow.
//!
//! PayHub distinguishes transactions that can still be voided from settled
//! ones that must be refunded. A refund therefore first tries a void and
//! only issues a real refund if the void is rejected:
//!
//! ```text
//! AttemptingVoid --void ok-------> Done(void response)
//! AttemptingVoid --void failed---> IssuingRefund --any--> Done(refund response)
//! ```

use payhub_types::GatewayResponse;

/// State of a single refund call.
#[derive(Debug, Clone, PartialEq)]
pub enum RefundFlow {
    AttemptingVoid,
    IssuingRefund,
    Done(GatewayResponse),
}

impl RefundFlow {
    pub fn start() -> Self {
        RefundFlow::AttemptingVoid
    }

    /// Feeds the response of the step just performed.
    pub fn advance(self, response: GatewayResponse) -> Self {
        match self {
            RefundFlow::AttemptingVoid if response.success => RefundFlow::Done(response),
            RefundFlow::AttemptingVoid => RefundFlow::IssuingRefund,
            RefundFlow::IssuingRefund => RefundFlow::Done(response),
            done @ RefundFlow::Done(_) => done,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, RefundFlow::Done(_))
    }
}
