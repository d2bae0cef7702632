//! Normalized gateway result.

use serde::Serialize;

use crate::codes::{StandardErrorCode, avs_message, cvv_message};

/// Address verification outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AvsResult {
    /// Raw processor code (`AVS_RESULT_CODE`)
    pub code: Option<String>,
    /// Meaning from the AVS table, if the code is known
    pub message: Option<&'static str>,
}

impl AvsResult {
    pub fn new(code: Option<String>) -> Self {
        let message = code.as_deref().and_then(avs_message);
        Self { code, message }
    }
}

/// Card verification outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CvvResult {
    /// Raw processor code (`VERIFICATION_RESULT_CODE`)
    pub code: Option<String>,
    /// Meaning from the CVV table, if the code is known
    pub message: Option<&'static str>,
}

impl CvvResult {
    pub fn new(code: Option<String>) -> Self {
        let message = code.as_deref().and_then(cvv_message);
        Self { code, message }
    }
}

/// Result of a gateway operation.
///
/// Processor declines and undecodable bodies are represented here with
/// `success == false`; they are never raised as errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayResponse {
    pub success: bool,
    /// Human-readable message
    pub message: Option<String>,
    pub avs_result: AvsResult,
    pub cvv_result: CvvResult,
    /// Normalized decline reason; only set on failure with a known code
    pub error_code: Option<StandardErrorCode>,
    /// Processor transaction id, used by capture/void/refund
    pub authorization: Option<String>,
    /// Decoded response payload, kept for diagnostics
    pub params: serde_json::Value,
    /// Whether the request ran in demo mode
    pub test: bool,
}

impl GatewayResponse {
    pub fn is_success(&self) -> bool {
        self.success
    }
}
