//! Per-request client configuration decoded from the transport.
//!
//! Clients may pass a base64-encoded JSON `config` blob plus flat key=value
//! overrides in the URL query string. Decoding is a total function: any
//! malformed piece is dropped silently and the request proceeds.

use std::collections::BTreeMap;

use base64::{engine::general_purpose, Engine as _};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    values: BTreeMap<String, String>,
}

impl SessionConfig {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decodes a raw URL query string into a flat key/value mapping.
    ///
    /// Pairs are applied in encounter order, last write per key wins. A
    /// `config` pair carries a base64-encoded JSON object whose top-level
    /// entries are merged at the point of encounter; both the standard and
    /// URL-safe alphabets are accepted and missing padding is tolerated.
    pub fn from_query(query: &str) -> Self {
        let mut values = BTreeMap::new();

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, value),
                None => (pair, ""),
            };

            if key == "config" {
                for (blob_key, blob_value) in decode_config_blob(value) {
                    values.insert(blob_key, blob_value);
                }
            } else {
                values.insert(key.to_string(), value.to_string());
            }
        }

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.get("apiKey")
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Yields nothing on any decode or parse failure.
fn decode_config_blob(encoded: &str) -> Vec<(String, String)> {
    let Some(bytes) = decode_base64_flexible(encoded) else {
        return Vec::new();
    };

    let Ok(Value::Object(entries)) = serde_json::from_slice::<Value>(&bytes) else {
        return Vec::new();
    };

    entries
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(text) => (key, text),
            other => (key, other.to_string()),
        })
        .collect()
}

fn decode_base64_flexible(encoded: &str) -> Option<Vec<u8>> {
    // '+' in a query string arrives as a space; padding is stripped so both
    // padded and unpadded blobs decode.
    let normalized = encoded.trim().replace(' ', "+");
    let normalized = normalized.trim_end_matches('=');

    general_purpose::STANDARD_NO_PAD
        .decode(normalized)
        .or_else(|_| general_purpose::URL_SAFE_NO_PAD.decode(normalized))
        .ok()
}
