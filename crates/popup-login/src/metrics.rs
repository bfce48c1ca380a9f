//! Login metrics
//!
//! - `auth_login_total` (counter): label `path` = `cache` | `popup`
//! - `auth_login_completed_total` (counter): label `outcome` = `success` |
//!   `provider_error` | `malformed_response` | `channel_error`
//! - `auth_login_superseded_total` (counter)
//!
//! Without an installed recorder these calls are no-ops.

use crate::error::{Error, Result};

/// Record which path a `login` call took.
pub fn record_login(path: &'static str) {
    metrics::counter!("auth_login_total", "path" => path).increment(1);
}

/// Record how a login attempt ended.
pub fn record_completion<T>(result: &Result<T>) {
    metrics::counter!("auth_login_completed_total", "outcome" => outcome_label(result))
        .increment(1);
}

/// Record a pending attempt dropped in favor of a newer one.
pub fn record_superseded() {
    metrics::counter!("auth_login_superseded_total").increment(1);
}

fn outcome_label<T>(result: &Result<T>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(Error::Auth(implicit_auth::Error::Provider { .. })) => "provider_error",
        Err(Error::Channel(_)) => "channel_error",
        // A parsed redirect without an error fails only for a missing token.
        Err(_) => "malformed_response",
    }
}
