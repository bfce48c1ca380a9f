//! OAuth 2.0 implicit-grant building blocks
//!
//! Leaf components of the popup login flow, with no knowledge of the
//! orchestrator that drives them:
//! 1. `AuthRequest` describes the grant and builds the authorization URL
//! 2. `ResponseParser` turns the provider's redirect fragment into a `TokenInfo`
//! 3. `TokenInfo` serializes to the `<token>-----<expires>` storage format
//! 4. `Clock`, `UrlCodec` and `TokenStore` are injected capabilities, so the
//!    flow runs without a browser host

pub mod clock;
pub mod codec;
pub mod constants;
pub mod error;
pub mod parser;
pub mod request;
pub mod store;
pub mod token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{IdentityCodec, PercentCodec, UrlCodec};
pub use constants::*;
pub use error::{Error, Result};
pub use parser::{DefaultResponseParser, ResponseParser};
pub use request::AuthRequest;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use token::TokenInfo;
