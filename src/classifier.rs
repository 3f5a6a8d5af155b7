//! Reply classification.
//!
//! The provider is told to answer with a bare JSON object once it has enough
//! information for an itinerary, but it routinely wraps that object in prose or
//! a ```` ```json ```` fence. Extraction is a best-effort scan for the outermost
//! brace pair: the first `{` and the last `}` of the trimmed reply. Anything
//! that does not parse as an object comes back as plain text, untouched.
//!
//! The scan does not balance braces. A reply carrying two separate objects, or
//! prose with a stray `}` after the payload, yields a candidate spanning both
//! and therefore falls back to text.

use log::debug;
use serde_json::{ Map, Value };

use crate::models::chat::ClassifiedReply;

/// Candidates larger than this are not handed to the JSON parser.
pub const MAX_PAYLOAD_BYTES: usize = 1024 * 1024;

/// Returns the slice between the first `{` and the last `}` (inclusive) of the
/// trimmed reply, if such a span exists.
pub fn extract_payload(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&trimmed[start..=end])
}

pub fn classify_reply(raw: &str) -> ClassifiedReply {
    let Some(candidate) = extract_payload(raw) else {
        return ClassifiedReply::Text(raw.to_string());
    };

    if candidate.len() > MAX_PAYLOAD_BYTES {
        debug!("Candidate payload of {} bytes exceeds limit, treating reply as text", candidate.len());
        return ClassifiedReply::Text(raw.to_string());
    }

    match serde_json::from_str::<Map<String, Value>>(candidate) {
        Ok(object) => ClassifiedReply::Itinerary(Value::Object(object)),
        Err(e) => {
            debug!("Reply carried braces but no valid object ({}), treating as text", e);
            ClassifiedReply::Text(raw.to_string())
        }
    }
}
