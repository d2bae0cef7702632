//! PayHub response interpretation.
//!
//! Turns a raw transport outcome into a `GatewayResponse`:
//!
//! 1. 2xx body → decode; a body that does not decode becomes a diagnostic
//! 2. non-2xx with a body → decode the same way, but never successful
//! 3. no response at all → `GatewayError::Transport`, not a result
//!
//! Only path 1 with a body that decodes counts as success.

use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};
use tracing::warn;

use payhub_types::codes::standard_error_code;
use payhub_types::{AvsResult, CvvResult, GatewayError, GatewayResponse, TransportError};

/// Fields consumed from a processor reply. Everything else stays in `params`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProcessorReply {
    #[serde(rename = "RESPONSE_TEXT", default, deserialize_with = "lenient_string")]
    pub response_text: Option<String>,
    #[serde(rename = "RESPONSE_CODE", default, deserialize_with = "lenient_string")]
    pub response_code: Option<String>,
    #[serde(rename = "AVS_RESULT_CODE", default, deserialize_with = "lenient_string")]
    pub avs_result_code: Option<String>,
    #[serde(
        rename = "VERIFICATION_RESULT_CODE",
        default,
        deserialize_with = "lenient_string"
    )]
    pub verification_result_code: Option<String>,
    #[serde(rename = "TRANSACTION_ID", default, deserialize_with = "lenient_string")]
    pub transaction_id: Option<String>,
}

/// Accepts strings and numbers; anything else (null, arrays, objects) is
/// treated as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// A JSON object from the processor
    Processor { reply: ProcessorReply, raw: Value },
    /// The body could not be decoded
    Diagnostic { message: String },
}

type MessageSource = fn(&ResponseBody) -> Option<&str>;

/// Where the display message comes from, first present wins.
const MESSAGE_SOURCES: &[MessageSource] = &[response_text, response_code, diagnostic_message];

fn response_text(body: &ResponseBody) -> Option<&str> {
    body.reply()?.response_text.as_deref()
}

fn response_code(body: &ResponseBody) -> Option<&str> {
    body.reply()?.response_code.as_deref()
}

fn diagnostic_message(body: &ResponseBody) -> Option<&str> {
    match body {
        ResponseBody::Diagnostic { message } => Some(message.as_str()),
        ResponseBody::Processor { .. } => None,
    }
}

impl ResponseBody {
    /// Decodes a raw body. Never fails: undecodable input becomes a
    /// `Diagnostic` that quotes the raw text.
    pub fn decode(raw: &str) -> Self {
        let decoded = serde_json::from_str::<Value>(raw).ok().and_then(|value| {
            if !value.is_object() {
                return None;
            }
            let reply = ProcessorReply::deserialize(&value).ok()?;
            Some(ResponseBody::Processor { reply, raw: value })
        });

        decoded.unwrap_or_else(|| {
            warn!(body_len = raw.len(), "Undecodable response from PayHub");
            ResponseBody::Diagnostic {
                message: invalid_response_message(raw),
            }
        })
    }

    pub fn reply(&self) -> Option<&ProcessorReply> {
        match self {
            ResponseBody::Processor { reply, .. } => Some(reply),
            ResponseBody::Diagnostic { .. } => None,
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, ResponseBody::Processor { .. })
    }

    pub fn message(&self) -> Option<&str> {
        MESSAGE_SOURCES.iter().find_map(|source| source(self))
    }

    /// Payload kept on the result for diagnostics.
    pub fn params(&self) -> Value {
        match self {
            ResponseBody::Processor { raw, .. } => raw.clone(),
            ResponseBody::Diagnostic { message } => json!({ "error_message": message }),
        }
    }
}

/// Message used when PayHub sends something that is not a JSON object.
pub fn invalid_response_message(raw: &str) -> String {
    format!(
        "Invalid response received from the Payhub API.  Please contact wecare@payhub.com \
         if you continue to receive this message.  (The raw response returned by the API \
         was {:?})",
        raw
    )
}

/// Interprets a transport outcome.
pub fn interpret(
    outcome: Result<String, TransportError>,
    test: bool,
) -> Result<GatewayResponse, GatewayError> {
    let (success, body) = match outcome {
        Ok(raw) => {
            let body = ResponseBody::decode(&raw);
            (body.is_decoded(), body)
        }
        Err(TransportError::Response { status, body }) => {
            warn!(status, "PayHub returned an error status");
            (false, ResponseBody::decode(&body))
        }
        Err(err @ TransportError::Network(_)) => {
            warn!(error = %err, "PayHub request failed without a response");
            return Err(err.into());
        }
    };

    Ok(build_response(success, &body, test))
}

/// Builds the normalized result from a decoded body.
pub fn build_response(success: bool, body: &ResponseBody, test: bool) -> GatewayResponse {
    let reply = body.reply();

    let error_code = if success {
        None
    } else {
        reply
            .and_then(|r| r.response_code.as_deref())
            .and_then(standard_error_code)
    };

    GatewayResponse {
        success,
        message: body.message().map(str::to_string),
        avs_result: AvsResult::new(reply.and_then(|r| r.avs_result_code.clone())),
        cvv_result: CvvResult::new(reply.and_then(|r| r.verification_result_code.clone())),
        error_code,
        authorization: reply.and_then(|r| r.transaction_id.clone()),
        params: body.params(),
        test,
    }
}
