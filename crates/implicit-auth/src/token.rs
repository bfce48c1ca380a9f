//! Token information and its storage format
//!
//! A successful grant is persisted as `<access_token>-----<expires>` where
//! `expires` is an absolute millisecond timestamp, or empty when the provider
//! gave no `expires_in`.

use common::Secret;

use crate::constants::DELIMITER;
use crate::error::{Error, Result};

/// Result of parsing a provider redirect.
///
/// `error` and `access_token` are mutually exclusive in well-formed
/// responses, but nothing enforces it: check `error` first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenInfo {
    pub access_token: Option<Secret<String>>,
    /// Absolute expiry in milliseconds, as a numeric string
    pub expires: Option<String>,
    pub error: Option<String>,
    /// ` (<error_description>)`, or empty
    pub error_description: String,
    /// `; see: <error_uri>`, or empty
    pub error_uri: String,
}

impl TokenInfo {
    pub fn new(access_token: impl Into<String>, expires: Option<f64>) -> Self {
        Self {
            access_token: Some(Secret::new(access_token.into())),
            expires: expires.map(|e| e.to_string()),
            ..Self::default()
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_ref().map(|t| t.expose().as_str())
    }

    /// Expiry parsed as milliseconds; `None` when absent or not a finite number.
    pub fn expires_at(&self) -> Option<f64> {
        self.expires
            .as_deref()?
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|e| e.is_finite())
    }

    /// Serialize to `<access_token>-----<expires>`.
    pub fn to_stored(&self) -> String {
        format!(
            "{}{}{}",
            self.access_token().unwrap_or_default(),
            DELIMITER,
            self.expires.as_deref().unwrap_or_default()
        )
    }

    /// Parse the `<access_token>-----<expires>` format.
    ///
    /// An empty or missing second segment restores as no expiry.
    pub fn from_stored(value: &str) -> Self {
        let mut parts = value.split(DELIMITER);
        let access_token = parts.next().unwrap_or_default();
        let expires = parts.next().filter(|e| !e.is_empty()).map(str::to_owned);
        Self {
            access_token: Some(Secret::from(access_token)),
            expires,
            ..Self::default()
        }
    }

    /// Classify a parsed redirect: provider error first, then a missing token.
    ///
    /// `fragment` is embedded verbatim in the malformed-response message.
    pub fn into_result(mut self, fragment: &str) -> Result<TokenInfo> {
        if let Some(error) = self.error.take() {
            return Err(Error::Provider {
                error,
                description: std::mem::take(&mut self.error_description),
                uri: std::mem::take(&mut self.error_uri),
            });
        }
        if self.access_token.is_none() {
            return Err(Error::MalformedResponse {
                fragment: fragment.to_owned(),
            });
        }
        Ok(self)
    }
}
