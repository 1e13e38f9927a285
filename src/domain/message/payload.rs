//! QR payload scheme

use crate::domain::message::MessageId;

/// Scheme prefix marking a QR payload as one of ours
pub const SCHEME_PREFIX: &str = "qr-audio";

/// Build the QR payload string for a message identifier
pub fn encode(id: &MessageId) -> String {
    format!("{}:{}", SCHEME_PREFIX, id)
}

/// Extract the identifier from a decoded QR payload.
///
/// Returns `None` for payloads that do not carry our scheme prefix. Only the
/// first `:` separates scheme from identifier; the identifier may itself
/// contain colons and is returned verbatim.
pub fn parse(payload: &str) -> Option<&str> {
    let (scheme, id) = payload.split_once(':')?;
    if scheme != SCHEME_PREFIX || id.is_empty() {
        return None;
    }
    Some(id)
}
