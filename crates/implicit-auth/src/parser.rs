//! Provider redirect parsing
//!
//! The provider appends `#key1=val1&key2=val2...` to the redirect URL. The
//! default parser scans that fragment for the implicit-grant keys and ignores
//! everything else. The orchestrator accepts any `ResponseParser`, so
//! providers that answer in the query string can plug in their own.

use std::rc::Rc;

use tracing::warn;

use crate::clock::Clock;
use crate::token::TokenInfo;

/// Turns the raw redirect fragment and query string into a `TokenInfo`.
pub trait ResponseParser {
    fn parse_response(&self, fragment: &str, query: &str) -> TokenInfo;
}

/// Fragment parser for standard implicit-grant responses.
///
/// Recognized keys (exact match only):
/// - `access_token`: stored verbatim
/// - `expires_in`: seconds, converted to an absolute millisecond timestamp
/// - `error`: stored verbatim
/// - `error_description`: stored as ` (<value>)`
/// - `error_uri`: stored as `; see: <value>`
///
/// The query string is ignored.
pub struct DefaultResponseParser {
    clock: Rc<dyn Clock>,
}

impl DefaultResponseParser {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl ResponseParser for DefaultResponseParser {
    fn parse_response(&self, fragment: &str, _query: &str) -> TokenInfo {
        let mut info = TokenInfo::default();

        // Skip the leading character (normally '#').
        let mut idx = fragment.chars().next().map_or(0, char::len_utf8);

        while idx + 1 < fragment.len() {
            let Some(eq) = fragment[idx..].find('=').map(|i| idx + i) else {
                break;
            };
            let key = &fragment[idx..eq];

            let amp = fragment[eq..]
                .find('&')
                .map_or(fragment.len(), |i| eq + i);
            let value = &fragment[eq + 1..amp];

            idx = amp + 1;

            match key {
                "access_token" => info.access_token = Some(value.into()),
                "expires_in" => match parse_seconds(value) {
                    Some(secs) => {
                        info.expires = Some((self.clock.now() + secs * 1000.0).to_string());
                    }
                    None => warn!(value, "ignoring unparseable expires_in"),
                },
                "error" => info.error = Some(value.to_owned()),
                "error_description" => info.error_description = format!(" ({value})"),
                "error_uri" => info.error_uri = format!("; see: {value}"),
                _ => {}
            }
        }

        info
    }
}

/// Seconds from `expires_in`; `inf` and `NaN` are rejected.
fn parse_seconds(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|s| s.is_finite())
}
