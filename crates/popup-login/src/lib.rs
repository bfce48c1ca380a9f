//! Popup-driven OAuth 2.0 implicit-grant login
//!
//! Ties the `implicit-auth` building blocks into the token lifecycle:
//! 1. Caller builds an `AuthRequest` and calls `Auth::login`
//! 2. `TokenCache` is consulted; a token good for at least the freshness
//!    margin is handed back on the next scheduler tick
//! 3. Otherwise the `AuthorizationChannel` opens the provider page in a popup
//! 4. The channel calls `Auth::finish` with the redirect fragment
//! 5. The parsed token is cached and the caller's callback fires
//!
//! Everything runs on one thread. `Auth` tracks a single pending attempt: a
//! new `login` silently replaces the previous one.

pub mod auth;
pub mod cache;
pub mod channel;
pub mod error;
pub mod metrics;
pub mod scheduler;

pub use auth::{Auth, LoginCallback, LoginOutcome, PendingToken};
pub use cache::TokenCache;
pub use channel::{AuthorizationChannel, PopupRequest};
pub use error::{Error, Result};
pub use scheduler::{DeferredQueue, LocalTaskScheduler, Scheduler};
