//! Conversions from DevTools protocol payloads to plain values.

use base64::Engine;
use serde_json::Value;

/// Header object as `(name, value)` pairs in protocol order.
pub(crate) fn header_pairs(headers: &Value) -> Result<Vec<(String, String)>, String> {
    let obj = headers
        .as_object()
        .ok_or_else(|| format!("expected a header object, got {}", headers))?;
    Ok(obj
        .iter()
        .map(|(name, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (name.clone(), value)
        })
        .collect())
}

/// Case-insensitive header lookup; empty string when absent.
pub(crate) fn content_type(headers: &[(String, String)]) -> String {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| value.clone())
        .unwrap_or_default()
}

/// Text of a `Network.getResponseBody` result; base64 bodies count only if UTF-8.
pub(crate) fn decode_body(body: String, base64_encoded: bool) -> Option<String> {
    if !base64_encoded {
        return Some(body);
    }
    let bytes = base64::engine::general_purpose::STANDARD.decode(body).ok()?;
    String::from_utf8(bytes).ok()
}

/// Request body from base64 `postDataEntries`, joined in order.
///
/// `None` when there are no entries or the joined bytes are not UTF-8.
pub(crate) fn decode_post_entries(entries: &[String]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }
    let mut bytes = Vec::new();
    for entry in entries {
        bytes.extend(base64::engine::general_purpose::STANDARD.decode(entry).ok()?);
    }
    String::from_utf8(bytes).ok()
}
