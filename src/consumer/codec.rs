use serde_json::{Map, Value};
use tracing::error;

/// Name of the decoding engine, included in decode-failure diagnostics.
pub const DECODE_ENGINE: &str = "serde_json";

/// A decoded message payload: a mapping from string keys to JSON values.
///
/// The consumer itself only looks at the optional `uuid` key; every other key
/// passes through to the handler verbatim.
pub type Payload = Map<String, Value>;

/// Decodes a raw message body into a payload.
///
/// Returns `None` when the body is not valid JSON or not a JSON object.
/// Decode failure is an expected outcome, not a fault: it is logged exactly
/// once, with the engine identity, the error detail and the raw body, and
/// never propagates further.
pub fn decode(body: &[u8]) -> Option<Payload> {
    match serde_json::from_slice(body) {
        Ok(payload) => Some(payload),
        Err(e) => {
            error!(
                engine = DECODE_ENGINE,
                error = %e,
                body = %String::from_utf8_lossy(body),
                "payload could not be decoded"
            );
            None
        }
    }
}

/// Correlation identifier carried by the payload, if any.
///
/// Absence is tolerated and simply yields `None`; so does a `uuid` value that
/// is not a string.
pub fn correlation_id(payload: &Payload) -> Option<&str> {
    payload.get("uuid").and_then(Value::as_str)
}
