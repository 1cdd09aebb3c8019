//! Data structures for the webhook Lambda payload and response.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw event delivered by API Gateway to the Lambda.
///
/// The body arrives base64-encoded; the headers of interest are
/// `x-hub-signature` and `x-github-event`.
#[derive(Debug, Deserialize)]
pub struct IncomingEvent {
    #[serde(default)]
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl IncomingEvent {
    /// Case-insensitive header lookup. API Gateway lowercases header names,
    /// but GitHub's documented casing is mixed.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// The part of the GitHub payload the handler cares about.
///
/// `ref` is only present on push/delete deliveries; ping payloads do not
/// carry it.
#[derive(Debug, Deserialize)]
pub struct EventPayload {
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
}

/// Event types the webhook understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GithubEvent {
    Ping,
    Push,
    Delete,
}

impl GithubEvent {
    pub fn from_header(value: &str) -> Option<Self> {
        match value {
            "ping" => Some(Self::Ping),
            "push" => Some(Self::Push),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Plain `{statusCode, body}` structure returned to API Gateway.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub status_code: i32,
    pub body: String,
}

impl WebhookResponse {
    pub fn new(status_code: i32, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }
}
