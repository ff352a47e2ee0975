//! Post-processing of the visual search payload.

use serde_json::Value;

const MATCHES_KEY: &str = "visual_matches";

/// Drop visual matches without commercial metadata.
///
/// Keeps entries carrying a `price` field and `in_stock == true` (exact
/// boolean), preserving their relative order. Payloads without a
/// `visual_matches` array pass through untouched.
pub fn retain_purchasable(payload: &mut Value) {
    if let Some(matches) = payload.get_mut(MATCHES_KEY).and_then(Value::as_array_mut) {
        matches.retain(|entry| {
            entry.get("price").is_some()
                && entry.get("in_stock").and_then(Value::as_bool) == Some(true)
        });
    }
}
