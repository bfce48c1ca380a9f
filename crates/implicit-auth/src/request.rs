//! Authorization request description
//!
//! An `AuthRequest` names the provider endpoint, the client, and the scopes
//! being asked for. It builds the authorization URL opened in the popup and
//! the cache key under which the resulting token is stored.

use crate::codec::UrlCodec;
use crate::constants::{DELIMITER, RESPONSE_TYPE};

/// A desired implicit grant.
///
/// Scopes keep insertion order and duplicates: `["a", "b"]` and `["b", "a"]`
/// produce different cache keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    authorization_url: String,
    client_id: String,
    scopes: Vec<String>,
    params: Vec<(String, String)>,
}

impl AuthRequest {
    pub fn new(authorization_url: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            authorization_url: authorization_url.into(),
            client_id: client_id.into(),
            scopes: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Append a scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.push(scope.into());
        self
    }

    /// Append several scopes in order.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes.extend(scopes.into_iter().map(Into::into));
        self
    }

    /// Append a provider-specific query parameter (e.g. `prompt`, `login_hint`).
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn authorization_endpoint(&self) -> &str {
        &self.authorization_url
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Build the authorization URL, without the `redirect_uri` parameter.
    ///
    /// Parameter order: `client_id`, `response_type`, `scope`, then extra
    /// parameters in insertion order.
    pub fn to_url(&self, codec: &dyn UrlCodec) -> String {
        let mut url = format!(
            "{}?client_id={}&response_type={}&scope={}",
            self.authorization_url,
            codec.encode(&self.client_id),
            RESPONSE_TYPE,
            codec.encode(&self.scopes.join(" ")),
        );
        for (key, value) in &self.params {
            url.push('&');
            url.push_str(&codec.encode(key));
            url.push('=');
            url.push_str(&codec.encode(value));
        }
        url
    }

    /// Key identifying the stored token: `<client_id>-----<scope1 scope2 ...>`.
    ///
    /// The endpoint and extra parameters do not take part.
    pub fn cache_key(&self) -> String {
        format!("{}{}{}", self.client_id, DELIMITER, self.scopes.join(" "))
    }
}
