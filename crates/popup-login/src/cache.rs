//! Token cache keyed by request
//!
//! Wraps the injected `TokenStore`: tokens are filed under
//! `AuthRequest::cache_key()` in their `<token>-----<expires>` form. The
//! cache also owns the freshness policy deciding whether a stored token may
//! be handed out without a popup round-trip.

use std::rc::Rc;

use implicit_auth::{AuthRequest, FRESHNESS_MARGIN_MILLIS, Result, TokenInfo, TokenStore};
use tracing::debug;

pub struct TokenCache {
    store: Rc<dyn TokenStore>,
    freshness_margin: f64,
}

impl TokenCache {
    /// Cache with the default ten-minute freshness margin.
    pub fn new(store: Rc<dyn TokenStore>) -> Self {
        Self::with_margin(store, FRESHNESS_MARGIN_MILLIS)
    }

    /// Cache with a custom freshness margin, in milliseconds.
    pub fn with_margin(store: Rc<dyn TokenStore>, freshness_margin: f64) -> Self {
        Self {
            store,
            freshness_margin,
        }
    }

    pub fn freshness_margin(&self) -> f64 {
        self.freshness_margin
    }

    pub fn lookup(&self, request: &AuthRequest) -> Option<TokenInfo> {
        self.store
            .get(&request.cache_key())
            .map(|stored| TokenInfo::from_stored(&stored))
    }

    pub fn store(&self, request: &AuthRequest, info: &TokenInfo) -> Result<()> {
        let key = request.cache_key();
        debug!(cache_key = %key, has_expiry = info.expires.is_some(), "caching token");
        self.store.set(&key, &info.to_stored())
    }

    /// Drop every cached token, whichever request stored it.
    pub fn clear(&self) -> Result<()> {
        self.store.clear()
    }

    /// True iff the expiry is known and at least the freshness margin away.
    ///
    /// Tokens without a parseable expiry are never fresh, which forces a
    /// re-authorization.
    pub fn is_fresh_enough(&self, info: &TokenInfo, now: f64) -> bool {
        info.expires_at()
            .is_some_and(|expires| expires >= now + self.freshness_margin)
    }

    /// Milliseconds until the stored token expires.
    ///
    /// `-inf` when nothing is stored; `+inf` when the stored token has no
    /// usable expiry.
    pub fn expires_in(&self, request: &AuthRequest, now: f64) -> f64 {
        match self.lookup(request) {
            None => f64::NEG_INFINITY,
            Some(info) => info
                .expires_at()
                .map_or(f64::INFINITY, |expires| expires - now),
        }
    }
}
