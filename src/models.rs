//! Typed projections of upstream payloads.
//!
//! Only the fields the proxy touches are named; everything else rides along
//! in `extra` via `#[serde(flatten)]` so the response stays a faithful
//! pass-through of whatever the upstream sent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of the OAuth2 token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds. The upstream usually reports 3600; absent means
    /// assume that default.
    pub expires_in: Option<u64>,
    pub token_type: Option<String>,
}

/// A verse-list response from `/verses/by_chapter/{id}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct VersesResponse {
    pub verses: Vec<VerseRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerseRecord {
    pub id: u64,
    pub verse_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_uthmani: Option<String>,
    #[serde(default)]
    pub translations: Vec<TranslationEntry>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub text: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
